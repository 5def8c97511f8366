use crate::shape::{diff, dot};
use mint::{Point3, Vector3};

/// Projects `point` onto the plane going through `plane_point` with normal `plane_normal`,
/// returning the closest point of the plane.
///
/// The normal must have unit length, otherwise the result is scaled along it.
///
/// ```rust
/// use narrowphase::projections::project_point_onto_plane;
///
/// let p = project_point_onto_plane([3.0, 7.0, -2.0], [0.0, 1.0, 0.0], [0.0, 1.0, 0.0]);
/// assert_eq!(p, [3.0, 1.0, -2.0].into());
/// ```
pub fn project_point_onto_plane(
    point: impl Into<Point3<f32>>,
    plane_normal: impl Into<Vector3<f32>>,
    plane_point: impl Into<Point3<f32>>,
) -> Point3<f32> {
    let q = point.into();
    let n = plane_normal.into();
    let d = dot(diff(q, plane_point.into()), n);

    Point3 {
        x: q.x - n.x * d,
        y: q.y - n.y * d,
        z: q.z - n.z * d,
    }
}
