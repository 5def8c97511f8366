//! Pairwise intersection tests between [`Aabb`], [`Sphere`], [`Ray`], planes, disks, triangles
//! and segments.
//!
//! Ray queries return the hit parameter `t` (a distance when the ray direction is normalized), or
//! `f32::INFINITY` when there is no hit. Compare against the sentinel instead of expecting an
//! `Option`:
//!
//! ```rust
//! use narrowphase::{intersections, Ray, Sphere};
//!
//! let ray = Ray::new([0.0, 0.0, -5.0], [0.0, 0.0, 1.0]);
//! let t = intersections::intersect_ray_with_sphere(&ray, &Sphere::default());
//! if t < f32::INFINITY {
//!     assert_eq!(ray.trace(t), [0.0, 0.0, -1.0].into());
//! }
//! ```
//!
//! No input is validated: degenerate shapes (zero length directions, flat triangles, parallel
//! planes) fall out as "no hit" through the float semantics rather than being special cased,
//! except where noted.

use crate::frustum::{Containment, FrustumCuller};
use crate::shape::{
    as_vector, cross, diff, dot, offset, Aabb, Ray, Sphere, BACK, DOWN, FRONT, LEFT, ORIGIN, RIGHT,
    UP,
};
use mint::{Point3, Vector3};

#[cfg(test)]
mod tests;

/// A ray passes "through" a segment when the lines get closer than this.
pub const SEGMENT_HIT_DISTANCE: f32 = 0.1;

/// Threshold on the segment determinant and the closest point numerators in
/// [`intersect_ray_with_segment`].
///
/// This is Euler's number and not a small tolerance: rays and segments whose squared lengths
/// multiply to less than about 2.7 take the "parallel" branch, and closest point numerators below
/// it are snapped to 0. Kept as is until the intended value is confirmed.
pub const NEAR_PARALLEL_EPSILON: f32 = std::f32::consts::E;

/// Smallest positive subnormal `f32`. A segment/plane denominator below it counts as parallel.
pub const PARALLEL_EPSILON: f32 = 1.0e-45;

/// Outcome of [`intersect_segment_with_plane`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum SegmentPlane {
    /// The segment doesn't reach the plane, or is parallel to it.
    None = 0,
    /// The segment crosses the plane, the crossing point has been stored.
    Point = 1,
    /// The whole segment lies in the plane, nothing is stored.
    InPlane = 2,
}

/// True unless the culler classifies the box as [`Containment::Outside`].
pub fn intersect_aabb_with_frustum(aabb: &Aabb, culler: &impl FrustumCuller) -> bool {
    culler.classify_aabb(aabb.minimum(), aabb.maximum()) != Containment::Outside
}

/// Box to center squared distance against the squared radius. Touching counts.
pub fn intersect_aabb_with_sphere(aabb: &Aabb, sphere: &Sphere) -> bool {
    aabb.min_distance_squared(sphere.center) <= sphere.radius_squared()
}

pub fn intersect_aabb_with_sphere_components(
    aabb: &Aabb,
    center: impl Into<Point3<f32>>,
    radius: f32,
) -> bool {
    aabb.min_distance_squared(center) <= radius * radius
}

/// See [`Aabb::overlap`], touching boxes don't intersect.
pub fn intersect_aabb_with_aabb(a: &Aabb, b: &Aabb) -> bool {
    a.overlap(b)
}

pub fn intersect_aabb_with_aabb_components(
    aabb: &Aabb,
    extent: impl Into<Vector3<f32>>,
    origin: impl Into<Point3<f32>>,
) -> bool {
    aabb.intersect_components(extent, origin)
}

/// See [`Sphere::intersect`] for the unsquared radius sum.
pub fn intersect_sphere_with_sphere(a: &Sphere, b: &Sphere) -> bool {
    a.intersect(b)
}

pub fn intersect_sphere_with_frustum(sphere: &Sphere, culler: &impl FrustumCuller) -> bool {
    culler.contains_sphere(sphere.center, sphere.radius)
}

/// Intersects the ray with the plane going through `point` with the given `normal`.
///
/// Returns `t > 0` or infinity. A ray parallel to the plane divides by zero: the result is
/// either +-infinity or NaN, and both end up as infinity since neither compares greater than 0
/// (+infinity is returned as is).
pub fn intersect_ray_with_plane(
    ray: &Ray,
    normal: impl Into<Vector3<f32>>,
    point: impl Into<Point3<f32>>,
) -> f32 {
    let n = normal.into();
    let ndr = dot(n, ray.direction);
    let nndp = -dot(n, as_vector(point.into()));
    let ndo = dot(n, as_vector(ray.origin));

    let t = -((ndo + nndp) / ndr);
    if t > 0.0 {
        t
    } else {
        f32::INFINITY
    }
}

/// Plane x = 0, facing +X.
pub fn intersect_ray_with_positive_x_axis_plane(ray: &Ray) -> f32 {
    intersect_ray_with_plane(ray, RIGHT, ORIGIN)
}

/// Plane y = 0, facing +Y.
pub fn intersect_ray_with_positive_y_axis_plane(ray: &Ray) -> f32 {
    intersect_ray_with_plane(ray, UP, ORIGIN)
}

/// Plane z = 0, facing +Z.
pub fn intersect_ray_with_positive_z_axis_plane(ray: &Ray) -> f32 {
    intersect_ray_with_plane(ray, FRONT, ORIGIN)
}

pub fn intersect_ray_with_negative_x_axis_plane(ray: &Ray) -> f32 {
    intersect_ray_with_plane(ray, LEFT, ORIGIN)
}

pub fn intersect_ray_with_negative_y_axis_plane(ray: &Ray) -> f32 {
    intersect_ray_with_plane(ray, DOWN, ORIGIN)
}

pub fn intersect_ray_with_negative_z_axis_plane(ray: &Ray) -> f32 {
    intersect_ray_with_plane(ray, BACK, ORIGIN)
}

/// Plane intersection that only counts when the hit point is [`Aabb::inside`] the box.
pub fn intersect_ray_with_plane_in_box(
    ray: &Ray,
    normal: impl Into<Vector3<f32>>,
    point: impl Into<Point3<f32>>,
    aabb: &Aabb,
) -> f32 {
    let t = intersect_ray_with_plane(ray, normal, point);
    if aabb.inside(ray.trace(t)) {
        t
    } else {
        f32::INFINITY
    }
}

/// Intersects the ray with the disk of `radius` centered on `center`, lying in the plane of
/// normal `normal`. The disk edge counts as a hit.
pub fn intersect_ray_with_disk(
    ray: &Ray,
    normal: impl Into<Vector3<f32>>,
    center: impl Into<Point3<f32>>,
    radius: f32,
) -> f32 {
    let center = center.into();
    let t = intersect_ray_with_plane(ray, normal, center);
    if t == f32::INFINITY {
        return f32::INFINITY;
    }

    let v = diff(ray.trace(t), center);
    if dot(v, v) <= radius * radius {
        t
    } else {
        f32::INFINITY
    }
}

pub fn intersect_ray_with_sphere(ray: &Ray, sphere: &Sphere) -> f32 {
    intersect_ray_with_sphere_components(ray, sphere.center, sphere.radius)
}

/// Returns the nearest positive root of the ray/sphere quadratic.
///
/// From inside the sphere the near root is negative and the far one (the exit point) is
/// returned. The discriminant is computed for a unit direction.
pub fn intersect_ray_with_sphere_components(
    ray: &Ray,
    center: impl Into<Point3<f32>>,
    radius: f32,
) -> f32 {
    let v = diff(center.into(), ray.origin);
    let b = dot(v, ray.direction);
    let disc = b * b - dot(v, v) + radius * radius;

    if disc < 0.0 {
        return f32::INFINITY;
    }

    let d = disc.sqrt();
    let t2 = b + d;
    if t2 < 0.0 {
        return f32::INFINITY;
    }

    let t1 = b - d;
    if t1 > 0.0 {
        t1
    } else {
        t2
    }
}

/// Intersects the ray with each of the six faces of the box and returns the closest hit.
///
/// A ray starting inside the box hits the face it exits through.
pub fn intersect_ray_with_aabb(ray: &Ray, aabb: &Aabb) -> f32 {
    let faces = [
        (UP, [0.0, aabb.max_y(), 0.0]),
        (DOWN, [0.0, aabb.min_y(), 0.0]),
        (LEFT, [aabb.min_x(), 0.0, 0.0]),
        (RIGHT, [aabb.max_x(), 0.0, 0.0]),
        (FRONT, [0.0, 0.0, aabb.max_z()]),
        (BACK, [0.0, 0.0, aabb.min_z()]),
    ];

    faces
        .into_iter()
        .map(|(normal, point)| intersect_ray_with_plane_in_box(ray, normal, point, aabb))
        .fold(f32::INFINITY, f32::min)
}

/// Möller–Trumbore ray/triangle intersection.
///
/// A triangle seen exactly edge-on (or flat) has a zero determinant and is never hit, there is no
/// tolerance around 0. Hits on the edges count.
pub fn intersect_ray_with_triangle(
    ray: &Ray,
    p1: impl Into<Point3<f32>>,
    p2: impl Into<Point3<f32>>,
    p3: impl Into<Point3<f32>>,
) -> f32 {
    let p1 = p1.into();
    let edge1 = diff(p2.into(), p1);
    let edge2 = diff(p3.into(), p1);

    let s1 = cross(ray.direction, edge2);
    let divisor = dot(s1, edge1);
    if divisor == 0.0 {
        return f32::INFINITY;
    }
    let inv_divisor = 1.0 / divisor;

    let distance = diff(ray.origin, p1);
    let b1 = dot(distance, s1) * inv_divisor;
    if b1 < 0.0 || b1 > 1.0 {
        return f32::INFINITY;
    }

    let s2 = cross(distance, edge1);
    let b2 = dot(ray.direction, s2) * inv_divisor;
    if b2 < 0.0 || b1 + b2 > 1.0 {
        return f32::INFINITY;
    }

    let t = dot(edge2, s2) * inv_divisor;
    if t >= 0.0 {
        t
    } else {
        f32::INFINITY
    }
}

/// Closest approach between the ray and the segment `start`..`end`.
///
/// When the two get closer than [`SEGMENT_HIT_DISTANCE`], returns the smaller of the distance from
/// the ray origin to its closest point and the distance from `start` to the segment's closest
/// point. Infinity otherwise.
///
/// The near parallel threshold is [`NEAR_PARALLEL_EPSILON`], read its caveats: short rays and
/// segments are all treated as parallel.
pub fn intersect_ray_with_segment(
    ray: &Ray,
    start: impl Into<Point3<f32>>,
    end: impl Into<Point3<f32>>,
) -> f32 {
    let start = start.into();
    let u = ray.direction;
    let v = diff(end.into(), start);
    let w = diff(ray.origin, start);

    let a = dot(u, u);
    let b = dot(u, v);
    let c = dot(v, v);
    let d = dot(u, w);
    let e = dot(v, w);
    let det = a * c - b * b;

    // sc = s_n / s_d on the ray, tc = t_n / t_d on the segment
    let mut s_n;
    let mut s_d = det;
    let mut t_n;
    let mut t_d = det;

    if det < NEAR_PARALLEL_EPSILON {
        s_n = 0.0;
        s_d = 1.0;
        t_n = e;
        t_d = c;
    } else {
        s_n = b * e - c * d;
        t_n = a * e - b * d;
        if s_n < 0.0 {
            s_n = 0.0;
            t_n = e;
            t_d = c;
        }
    }

    if t_n < 0.0 {
        t_n = 0.0;
        if -d < 0.0 {
            s_n = 0.0;
        } else {
            s_n = -d;
            s_d = a;
        }
    } else if t_n > t_d {
        t_n = t_d;
        if -d + b < 0.0 {
            s_n = 0.0;
        } else {
            s_n = -d + b;
            s_d = a;
        }
    }

    let sc = if s_n.abs() < NEAR_PARALLEL_EPSILON {
        0.0
    } else {
        s_n / s_d
    };
    let tc = if t_n.abs() < NEAR_PARALLEL_EPSILON {
        0.0
    } else {
        t_n / t_d
    };

    let usc = scaled(u, sc);
    let vtc = scaled(v, tc);
    let dp = Vector3 {
        x: w.x + usc.x - vtc.x,
        y: w.y + usc.y - vtc.y,
        z: w.z + usc.z - vtc.z,
    };

    let dist = dot(dp, dp).sqrt();
    if dist < SEGMENT_HIT_DISTANCE {
        dot(usc, usc).sqrt().min(dot(vtc, vtc).sqrt())
    } else {
        f32::INFINITY
    }
}

fn scaled(v: Vector3<f32>, s: f32) -> Vector3<f32> {
    Vector3 {
        x: v.x * s,
        y: v.y * s,
        z: v.z * s,
    }
}

/// Intersects the segment `p0`..`p1` with the plane going through `plane_point`.
///
/// `store` is only written when [`SegmentPlane::Point`] is returned. Both segment ends count as
/// part of the segment.
pub fn intersect_segment_with_plane(
    p0: impl Into<Point3<f32>>,
    p1: impl Into<Point3<f32>>,
    plane_normal: impl Into<Vector3<f32>>,
    plane_point: impl Into<Point3<f32>>,
    store: &mut Point3<f32>,
) -> SegmentPlane {
    let p0 = p0.into();
    let n = plane_normal.into();
    let u = diff(p1.into(), p0);
    let w = diff(p0, plane_point.into());

    let denom = dot(n, u);
    let num = -dot(n, w);

    if denom.abs() < PARALLEL_EPSILON {
        return if num == 0.0 {
            SegmentPlane::InPlane
        } else {
            SegmentPlane::None
        };
    }

    let s = num / denom;
    if s < 0.0 || s > 1.0 {
        return SegmentPlane::None;
    }

    *store = offset(p0, u, s);
    SegmentPlane::Point
}

/// Cuts the box with a plane, storing the points where the plane crosses the 12 box edges and
/// returning how many were stored.
///
/// A plane cuts a box in at most a hexagon, so at most 6 points are produced, the scan stops
/// there. Edges lying in the plane produce no point, and a plane going through a corner reports
/// that corner once per edge meeting there.
pub fn intersect_aabb_with_plane(
    plane_normal: impl Into<Vector3<f32>>,
    plane_point: impl Into<Point3<f32>>,
    aabb: &Aabb,
    store: &mut [Point3<f32>; 6],
) -> usize {
    let n = plane_normal.into();
    let p = plane_point.into();
    let (lo, hi) = aabb.min_and_max();
    let corner = |x: f32, y: f32, z: f32| Point3 { x, y, z };

    let edges = [
        // vertical
        (corner(lo.x, lo.y, lo.z), corner(lo.x, hi.y, lo.z)),
        (corner(hi.x, lo.y, lo.z), corner(hi.x, hi.y, lo.z)),
        (corner(hi.x, lo.y, hi.z), corner(hi.x, hi.y, hi.z)),
        (corner(lo.x, lo.y, hi.z), corner(lo.x, hi.y, hi.z)),
        // bottom
        (corner(lo.x, lo.y, lo.z), corner(hi.x, lo.y, lo.z)),
        (corner(lo.x, lo.y, hi.z), corner(hi.x, lo.y, hi.z)),
        (corner(lo.x, lo.y, lo.z), corner(lo.x, lo.y, hi.z)),
        (corner(hi.x, lo.y, lo.z), corner(hi.x, lo.y, hi.z)),
        // top
        (corner(lo.x, hi.y, lo.z), corner(hi.x, hi.y, lo.z)),
        (corner(lo.x, hi.y, hi.z), corner(hi.x, hi.y, hi.z)),
        (corner(lo.x, hi.y, lo.z), corner(lo.x, hi.y, hi.z)),
        (corner(hi.x, hi.y, lo.z), corner(hi.x, hi.y, hi.z)),
    ];

    let mut count = 0;
    for (start, end) in edges {
        if intersect_segment_with_plane(start, end, n, p, &mut store[count]) == SegmentPlane::Point
        {
            count += 1;
            if count == store.len() {
                break;
            }
        }
    }
    count
}
