use euclid::default::Transform3D;
use euclid::Angle;
use mint::ColumnMatrix4;
use narrowphase::intersections::*;
use narrowphase::{Aabb, Ray, Sphere};

#[derive(Copy, Clone, Debug)]
enum Object {
    Crate(Aabb),
    Ball(Sphere),
    Sign([[f32; 3]; 3]),
}

impl Object {
    fn cast(&self, ray: &Ray) -> f32 {
        match self {
            Object::Crate(aabb) => intersect_ray_with_aabb(ray, aabb),
            Object::Ball(sphere) => intersect_ray_with_sphere(ray, sphere),
            Object::Sign([a, b, c]) => intersect_ray_with_triangle(ray, *a, *b, *c),
        }
    }
}

/// euclid stores row vectors, so its rows are the columns of the column-vector convention.
fn to_mint(t: &Transform3D<f32>) -> ColumnMatrix4<f32> {
    ColumnMatrix4::from(t.to_arrays())
}

fn main() {
    let scene = [
        Object::Crate(Aabb::from_extent_origin([1.0, 1.0, 1.0], [0.0, 0.0, 10.0])),
        Object::Ball(Sphere::new([10.0, 0.0, 0.0], 2.0)),
        Object::Sign([[-1.0, -1.0, -8.0], [1.0, -1.0, -8.0], [0.0, 2.0, -8.0]]),
        Object::Crate(Aabb::from_extent_origin([0.5, 3.0, 0.5], [-6.0, 0.0, 0.0])),
    ];

    // Spin a camera ray around the Y axis and report what it sees first
    for step in 0..8 {
        let rotation =
            Transform3D::rotation(0.0, 1.0, 0.0, Angle::degrees(45.0 * step as f32));
        let mut ray = Ray::default();
        ray.transform(&to_mint(&rotation), true);

        let nearest = scene
            .iter()
            .map(|o| (o.cast(&ray), o))
            .filter(|(t, _)| *t < f32::INFINITY)
            .min_by(|a, b| a.0.total_cmp(&b.0));

        match nearest {
            Some((t, o)) => println!("{:>3}°: hit {:?} at {:.2}", 45 * step, o, t),
            None => println!("{:>3}°: nothing", 45 * step),
        }
    }

    // Drop a crate onto the floor, clamping each step against it
    let floor = Aabb::from_extent_origin([10.0, 0.5, 10.0], [0.0, -0.5, 0.0]);
    let mut falling = Aabb::from_extent_origin([1.0, 1.0, 1.0], [0.0, 5.0, 0.0]);
    for _ in 0..10 {
        let dy = falling.y_movement_overlap(&floor, -1.5);
        falling.move_by([0.0, dy, 0.0]);
        println!("crate at y = {:.2}", falling.origin.y);
    }

    let mut cut = [mint::Point3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    }; 6];
    let s = 1.0 / 3.0f32.sqrt();
    let n = intersect_aabb_with_plane([s, s, s], [0.0, 0.0, 0.0], &Aabb::new(), &mut cut);
    println!("diagonal cut of the unit crate: {:?}", &cut[..n]);
}
