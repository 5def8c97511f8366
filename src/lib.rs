//!
//! narrowphase is a crate dedicated to the narrow-phase half of collision and picking:
//! pairwise intersection and distance tests between axis aligned boxes, spheres, rays,
//! triangles, segments and planes.
//!
//! Shapes are plain `Copy` values ([`Aabb`], [`Sphere`], [`Ray`]) and every test is a pure
//! function living in [`intersections`]. Nothing allocates and nothing is validated on the hot
//! path: distance queries return `f32::INFINITY` when there is no hit.
//!
//! Points and vectors are exchanged as [`mint`] types, so arrays (`[f32; 3]`) and most math
//! libraries can be passed in directly.
//!
//! ```rust
//! use narrowphase::{intersections, Aabb, Ray};
//!
//! let aabb = Aabb::from_extent_origin([1.0, 1.0, 1.0], [0.0, 0.0, 5.0]);
//! let ray = Ray::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0]);
//!
//! let t = intersections::intersect_ray_with_aabb(&ray, &aabb);
//! assert_eq!(t, 4.0);
//! ```

pub mod error;
pub mod frustum;
pub mod intersections;
pub mod projections;
pub mod shape;

pub use error::GeomError;
pub use frustum::{Containment, FrustumCuller};
pub use intersections::SegmentPlane;
pub use shape::{Aabb, Intersect, Ray, Shape, Sphere};
