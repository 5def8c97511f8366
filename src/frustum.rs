//! The view frustum is not implemented here, only consumed through [`FrustumCuller`].

use mint::Point3;

/// Result of classifying a box against a frustum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Containment {
    Outside,
    Inside,
    Intersecting,
}

/// A view frustum culler, as provided by the renderer.
///
/// ```rust
/// use narrowphase::{Aabb, Containment, FrustumCuller, intersections};
/// use mint::Point3;
///
/// /// Everything in front of the z = 0 plane is visible.
/// struct HalfSpace;
///
/// impl FrustumCuller for HalfSpace {
///     fn classify_aabb(&self, min: Point3<f32>, max: Point3<f32>) -> Containment {
///         if min.z >= 0.0 {
///             Containment::Inside
///         } else if max.z >= 0.0 {
///             Containment::Intersecting
///         } else {
///             Containment::Outside
///         }
///     }
///
///     fn contains_sphere(&self, center: Point3<f32>, radius: f32) -> bool {
///         center.z >= -radius
///     }
/// }
///
/// let aabb = Aabb::from_extent_origin([1.0, 1.0, 1.0], [0.0, 0.0, -0.5]);
/// assert!(intersections::intersect_aabb_with_frustum(&aabb, &HalfSpace));
/// ```
pub trait FrustumCuller {
    /// Classifies the box spanning `min` to `max`.
    fn classify_aabb(&self, min: Point3<f32>, max: Point3<f32>) -> Containment;

    /// True if any part of the sphere is inside the frustum.
    fn contains_sphere(&self, center: Point3<f32>, radius: f32) -> bool;
}

impl<F: FrustumCuller + ?Sized> FrustumCuller for &F {
    fn classify_aabb(&self, min: Point3<f32>, max: Point3<f32>) -> Containment {
        (**self).classify_aabb(min, max)
    }

    fn contains_sphere(&self, center: Point3<f32>, radius: f32) -> bool {
        (**self).contains_sphere(center, radius)
    }
}
