use super::*;
use approx::assert_relative_eq;

/// Orthographic frustum: everything within an axis aligned box is visible.
struct BoxCuller(Aabb);

impl FrustumCuller for BoxCuller {
    fn classify_aabb(&self, min: Point3<f32>, max: Point3<f32>) -> Containment {
        let other = Aabb::from_min_max(min, max);
        if self.0.inside(min) && self.0.inside(max) {
            Containment::Inside
        } else if self.0.overlap(&other) {
            Containment::Intersecting
        } else {
            Containment::Outside
        }
    }

    fn contains_sphere(&self, center: Point3<f32>, radius: f32) -> bool {
        intersect_aabb_with_sphere_components(&self.0, center, radius)
    }
}

fn unit_at(x: f32, y: f32, z: f32) -> Aabb {
    Aabb::from_extent_origin([1.0, 1.0, 1.0], [x, y, z])
}

#[test]
fn test_aabb_frustum() {
    let culler = BoxCuller(Aabb::with_extent([10.0, 10.0, 10.0]));
    assert!(intersect_aabb_with_frustum(&unit_at(0.0, 0.0, 0.0), &culler));
    assert!(intersect_aabb_with_frustum(&unit_at(10.0, 0.0, 0.0), &culler));
    assert!(!intersect_aabb_with_frustum(&unit_at(20.0, 0.0, 0.0), &culler));

    assert!(intersect_sphere_with_frustum(&Sphere::new([12.0, 0.0, 0.0], 2.0), &culler));
    assert!(!intersect_sphere_with_frustum(&Sphere::new([12.1, 0.0, 0.0], 2.0), &culler));

    let by_ref: &dyn FrustumCuller = &culler;
    assert!(intersect_aabb_with_frustum(&unit_at(0.0, 0.0, 0.0), &by_ref));
}

#[test]
fn test_aabb_sphere_and_aabb() {
    let a = Aabb::new();
    assert!(intersect_aabb_with_sphere(&a, &Sphere::new([0.0, 3.0, 0.0], 2.0)));
    assert!(!intersect_aabb_with_sphere(&a, &Sphere::new([3.0, 3.0, 3.0], 3.0)));
    assert!(intersect_aabb_with_sphere_components(&a, [3.0, 3.0, 3.0], 3.5));

    assert!(intersect_aabb_with_aabb(&a, &unit_at(1.999, 0.0, 0.0)));
    assert!(!intersect_aabb_with_aabb(&a, &unit_at(0.0, 0.0, -2.0)));
    assert!(intersect_aabb_with_aabb_components(&a, [0.5, 0.5, 0.5], [1.4, 0.0, 0.0]));
    assert!(!intersect_aabb_with_aabb_components(&a, [0.5, 0.5, 0.5], [1.5, 0.0, 0.0]));

    assert!(intersect_sphere_with_sphere(
        &Sphere::new([0.0, 0.0, 0.0], 0.5),
        &Sphere::new([0.9, 0.0, 0.0], 0.5)
    ));
}

#[test]
fn test_ray_plane() {
    let ray = Ray::new([0.0, 5.0, 0.0], [0.0, -1.0, 0.0]);
    assert_eq!(intersect_ray_with_plane(&ray, [0.0, 1.0, 0.0], [0.0, 1.0, 0.0]), 4.0);
    // the normal orientation doesn't matter
    assert_eq!(intersect_ray_with_plane(&ray, [0.0, -1.0, 0.0], [7.0, 1.0, 3.0]), 4.0);
    // behind the ray
    assert_eq!(
        intersect_ray_with_plane(&ray, [0.0, 1.0, 0.0], [0.0, 6.0, 0.0]),
        f32::INFINITY
    );
    assert_eq!(intersect_ray_with_positive_y_axis_plane(&ray), 5.0);
    assert_eq!(intersect_ray_with_negative_y_axis_plane(&ray), 5.0);
    assert_eq!(intersect_ray_with_positive_x_axis_plane(&ray), f32::INFINITY);
}

#[test]
fn test_ray_plane_parallel_is_a_miss() {
    // in the plane: 0 / 0
    let inside = Ray::new([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
    assert_eq!(intersect_ray_with_positive_y_axis_plane(&inside), f32::INFINITY);

    // above the plane: x / 0
    let above = Ray::new([0.0, 1.0, 0.0], [1.0, 0.0, 0.0]);
    assert_eq!(intersect_ray_with_positive_y_axis_plane(&above), f32::INFINITY);
    assert_eq!(intersect_ray_with_negative_y_axis_plane(&above), f32::INFINITY);

    let towards_z = Ray::new([0.0, 0.0, -3.0], [0.0, 0.0, 2.0]);
    assert_eq!(intersect_ray_with_positive_z_axis_plane(&towards_z), 1.5);
    assert_eq!(intersect_ray_with_negative_z_axis_plane(&towards_z), 1.5);
    assert_eq!(intersect_ray_with_negative_x_axis_plane(&towards_z), f32::INFINITY);
}

#[test]
fn test_ray_plane_in_box() {
    let ray = Ray::new([0.0, 5.0, 0.0], [0.0, -1.0, 0.0]);
    let aabb = Aabb::new();
    assert_eq!(
        intersect_ray_with_plane_in_box(&ray, [0.0, 1.0, 0.0], [0.0, 1.0, 0.0], &aabb),
        4.0
    );
    assert_eq!(
        intersect_ray_with_plane_in_box(&ray, [0.0, 1.0, 0.0], [0.0, 3.0, 0.0], &aabb),
        f32::INFINITY
    );
}

#[test]
fn test_ray_disk() {
    let ray = Ray::new([0.5, 5.0, 0.0], [0.0, -1.0, 0.0]);
    assert_eq!(intersect_ray_with_disk(&ray, [0.0, 1.0, 0.0], [0.0, 0.0, 0.0], 1.0), 5.0);
    // on the edge
    assert_eq!(intersect_ray_with_disk(&ray, [0.0, 1.0, 0.0], [0.0, 0.0, 0.0], 0.5), 5.0);
    assert_eq!(
        intersect_ray_with_disk(&ray, [0.0, 1.0, 0.0], [0.0, 0.0, 0.0], 0.4),
        f32::INFINITY
    );
    assert_eq!(
        intersect_ray_with_disk(&ray, [0.0, 1.0, 0.0], [0.0, 10.0, 0.0], 1.0),
        f32::INFINITY
    );
}

#[test]
fn test_ray_sphere() {
    let sphere = Sphere::new([0.0, 0.0, 10.0], 2.0);

    let towards = Ray::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0]);
    assert_eq!(intersect_ray_with_sphere(&towards, &sphere), 8.0);

    let away = Ray::new([0.0, 0.0, 0.0], [0.0, 0.0, -1.0]);
    assert_eq!(intersect_ray_with_sphere(&away, &sphere), f32::INFINITY);

    let beside = Ray::new([0.0, 2.5, 0.0], [0.0, 0.0, 1.0]);
    assert_eq!(intersect_ray_with_sphere(&beside, &sphere), f32::INFINITY);

    // from the inside the exit point is returned
    let inside = Ray::new([0.0, 0.0, 9.0], [0.0, 0.0, 1.0]);
    assert_eq!(intersect_ray_with_sphere(&inside, &sphere), 3.0);

    assert_eq!(
        intersect_ray_with_sphere_components(&towards, [0.0, 0.0, 10.0], 2.0),
        8.0
    );
}

#[test]
fn test_ray_sphere_distance_minus_radius() {
    fastrand::seed(3);
    for _ in 0..200 {
        let center = [
            fastrand::f32() * 100.0 - 50.0,
            fastrand::f32() * 100.0 - 50.0,
            fastrand::f32() * 100.0 - 50.0,
        ];
        let radius = fastrand::f32() * 5.0 + 1.0;
        let (dx, dy, dz) = (8.0 + fastrand::f32() * 4.0, -3.0, 2.0);
        let origin = [center[0] + dx, center[1] + dy, center[2] + dz];

        let ray = Ray::try_new_normalized(origin, [-dx, -dy, -dz]).unwrap();
        let dist = (dx * dx + dy * dy + dz * dz).sqrt();

        let t = intersect_ray_with_sphere(&ray, &Sphere::new(center, radius));
        assert_relative_eq!(t, dist - radius, epsilon = 1e-3);
    }
}

#[test]
fn test_ray_aabb() {
    let aabb = unit_at(0.0, 0.0, 5.0);

    let front = Ray::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0]);
    assert_eq!(intersect_ray_with_aabb(&front, &aabb), 4.0);

    let side = Ray::new([-10.0, 0.5, 5.5], [1.0, 0.0, 0.0]);
    assert_eq!(intersect_ray_with_aabb(&side, &aabb), 9.0);

    let miss = Ray::new([0.0, 1.5, 0.0], [0.0, 0.0, 1.0]);
    assert_eq!(intersect_ray_with_aabb(&miss, &aabb), f32::INFINITY);

    let away = Ray::new([0.0, 0.0, 0.0], [0.0, 0.0, -1.0]);
    assert_eq!(intersect_ray_with_aabb(&away, &aabb), f32::INFINITY);

    // starting inside, the exit face is hit
    let inside = Ray::new([0.0, 0.0, 5.0], [0.0, 1.0, 0.0]);
    assert_eq!(intersect_ray_with_aabb(&inside, &aabb), 1.0);

    let diagonal = Ray::new([-2.0, -2.0, 3.0], [1.0, 1.0, 1.0]);
    assert_eq!(intersect_ray_with_aabb(&diagonal, &aabb), 1.0);
}

#[test]
fn test_ray_triangle() {
    let (a, b, c) = ([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);

    let hit = Ray::new([0.2, 0.2, 1.0], [0.0, 0.0, -1.0]);
    assert_relative_eq!(intersect_ray_with_triangle(&hit, a, b, c), 1.0);

    // winding doesn't matter
    assert_relative_eq!(intersect_ray_with_triangle(&hit, a, c, b), 1.0);

    let outside = Ray::new([2.0, 2.0, 1.0], [0.0, 0.0, -1.0]);
    assert_eq!(intersect_ray_with_triangle(&outside, a, b, c), f32::INFINITY);

    // past the hypotenuse: both coordinates are in range but their sum isn't
    let past = Ray::new([0.6, 0.6, 1.0], [0.0, 0.0, -1.0]);
    assert_eq!(intersect_ray_with_triangle(&past, a, b, c), f32::INFINITY);

    let behind = Ray::new([0.2, 0.2, 1.0], [0.0, 0.0, 1.0]);
    assert_eq!(intersect_ray_with_triangle(&behind, a, b, c), f32::INFINITY);

    // parallel to the triangle plane
    let parallel = Ray::new([0.2, 0.2, 0.0], [1.0, 0.0, 0.0]);
    assert_eq!(intersect_ray_with_triangle(&parallel, a, b, c), f32::INFINITY);

    // flat triangle
    assert_eq!(
        intersect_ray_with_triangle(&hit, a, b, [2.0, 0.0, 0.0]),
        f32::INFINITY
    );
}

#[test]
fn test_ray_segment() {
    let ray = Ray::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0]);

    assert_relative_eq!(
        intersect_ray_with_segment(&ray, [-10.0, 0.0, 5.0], [10.0, 0.0, 5.0]),
        5.0
    );
    // closer than the hit distance
    assert_relative_eq!(
        intersect_ray_with_segment(&ray, [-10.0, 0.05, 5.0], [10.0, 0.05, 5.0]),
        5.0
    );
    assert_eq!(
        intersect_ray_with_segment(&ray, [-10.0, 1.0, 5.0], [10.0, 1.0, 5.0]),
        f32::INFINITY
    );
}

#[test]
fn test_ray_segment_short_segments_look_parallel() {
    // a 2 units long segment crossed in its middle: the segment parameter numerator is below
    // the threshold, gets snapped to the segment start and the crossing is not found
    let ray = Ray::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0]);
    assert_eq!(
        intersect_ray_with_segment(&ray, [-1.0, 0.0, 5.0], [1.0, 0.0, 5.0]),
        f32::INFINITY
    );
}

#[test]
fn test_ray_segment_near_parallel_threshold() {
    // unit direction and unit segment: det = 1 < e, treated as parallel
    let ray = Ray::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0]);
    assert_eq!(
        intersect_ray_with_segment(&ray, [-0.5, 0.0, 5.0], [0.5, 0.0, 5.0]),
        f32::INFINITY
    );

    // collinear segment ahead: the closest segment point is its start
    assert_eq!(
        intersect_ray_with_segment(&ray, [0.0, 0.0, 5.0], [0.0, 0.0, 6.0]),
        0.0
    );
}

#[test]
fn test_segment_plane() {
    let mut store = Point3 {
        x: 9.0,
        y: 9.0,
        z: 9.0,
    };

    assert_eq!(
        intersect_segment_with_plane(
            [0.0, -1.0, 0.0],
            [0.0, 3.0, 2.0],
            [0.0, 1.0, 0.0],
            [5.0, 0.0, 5.0],
            &mut store
        ),
        SegmentPlane::Point
    );
    assert_eq!(store, [0.0, 0.0, 0.5].into());

    let before = store;
    assert_eq!(
        intersect_segment_with_plane(
            [0.0, 1.0, 0.0],
            [0.0, 3.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0],
            &mut store
        ),
        SegmentPlane::None
    );
    assert_eq!(
        intersect_segment_with_plane(
            [0.0, 1.0, 0.0],
            [4.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0],
            &mut store
        ),
        SegmentPlane::None
    );
    assert_eq!(
        intersect_segment_with_plane(
            [0.0, 0.0, 0.0],
            [4.0, 0.0, 1.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0],
            &mut store
        ),
        SegmentPlane::InPlane
    );
    assert_eq!(store, before);

    // segment ends count
    assert_eq!(
        intersect_segment_with_plane(
            [0.0, 0.0, 0.0],
            [0.0, 2.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 2.0, 0.0],
            &mut store
        ),
        SegmentPlane::Point
    );
    assert_eq!(store, [0.0, 2.0, 0.0].into());
    assert_eq!(SegmentPlane::InPlane as u8, 2);
}

#[test]
fn test_aabb_plane_square() {
    let mut store = [ORIGIN; 6];
    let n = intersect_aabb_with_plane([0.0, 1.0, 0.0], [0.0, 0.0, 0.0], &Aabb::new(), &mut store);
    assert_eq!(n, 4);
    assert_eq!(store[0], [-1.0, 0.0, -1.0].into());
    assert_eq!(store[1], [1.0, 0.0, -1.0].into());
    assert_eq!(store[2], [1.0, 0.0, 1.0].into());
    assert_eq!(store[3], [-1.0, 0.0, 1.0].into());
}

#[test]
fn test_aabb_plane_hexagon() {
    let mut store = [ORIGIN; 6];
    let s = 1.0 / 3.0f32.sqrt();
    let n = intersect_aabb_with_plane([s, s, s], [0.0, 0.0, 0.0], &Aabb::new(), &mut store);
    assert_eq!(n, 6);
    for p in store {
        assert_relative_eq!(p.x + p.y + p.z, 0.0, epsilon = 1e-5);
        assert!(Aabb::new().inside(p));
    }
}

#[test]
fn test_aabb_plane_through_corners_caps_at_six() {
    // x + y + z = 1 touches three corners, each shared by three crossing edges
    let mut store = [ORIGIN; 6];
    let n = intersect_aabb_with_plane([1.0, 1.0, 1.0], [1.0, 1.0, -1.0], &Aabb::new(), &mut store);
    assert_eq!(n, 6);
    for p in store {
        assert_relative_eq!(p.x + p.y + p.z, 1.0, epsilon = 1e-5);
        assert_relative_eq!(p.x.abs(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(p.y.abs(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(p.z.abs(), 1.0, epsilon = 1e-5);
    }
}

#[test]
fn test_aabb_plane_miss() {
    let mut store = [ORIGIN; 6];
    let n = intersect_aabb_with_plane([0.0, 1.0, 0.0], [0.0, 5.0, 0.0], &Aabb::new(), &mut store);
    assert_eq!(n, 0);
    assert_eq!(store, [ORIGIN; 6]);
}
