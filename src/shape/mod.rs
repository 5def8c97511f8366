use mint::{Point3, Vector3};

mod aabb;
mod ray;
mod sphere;

pub use aabb::*;
pub use ray::*;
pub use sphere::*;

pub(crate) const ORIGIN: Point3<f32> = Point3 {
    x: 0.0,
    y: 0.0,
    z: 0.0,
};
pub(crate) const RIGHT: Vector3<f32> = Vector3 {
    x: 1.0,
    y: 0.0,
    z: 0.0,
};
pub(crate) const UP: Vector3<f32> = Vector3 {
    x: 0.0,
    y: 1.0,
    z: 0.0,
};
pub(crate) const FRONT: Vector3<f32> = Vector3 {
    x: 0.0,
    y: 0.0,
    z: 1.0,
};
pub(crate) const LEFT: Vector3<f32> = Vector3 {
    x: -1.0,
    y: 0.0,
    z: 0.0,
};
pub(crate) const DOWN: Vector3<f32> = Vector3 {
    x: 0.0,
    y: -1.0,
    z: 0.0,
};
pub(crate) const BACK: Vector3<f32> = Vector3 {
    x: 0.0,
    y: 0.0,
    z: -1.0,
};

pub(crate) fn dot(a: Vector3<f32>, b: Vector3<f32>) -> f32 {
    a.x * b.x + a.y * b.y + a.z * b.z
}

pub(crate) fn cross(a: Vector3<f32>, b: Vector3<f32>) -> Vector3<f32> {
    Vector3 {
        x: a.y * b.z - a.z * b.y,
        y: a.z * b.x - a.x * b.z,
        z: a.x * b.y - a.y * b.x,
    }
}

/// a - b
pub(crate) fn diff(a: Point3<f32>, b: Point3<f32>) -> Vector3<f32> {
    Vector3 {
        x: a.x - b.x,
        y: a.y - b.y,
        z: a.z - b.z,
    }
}

/// p + v * t
pub(crate) fn offset(p: Point3<f32>, v: Vector3<f32>, t: f32) -> Point3<f32> {
    Point3 {
        x: p.x + v.x * t,
        y: p.y + v.y * t,
        z: p.z + v.z * t,
    }
}

pub(crate) fn as_vector(p: Point3<f32>) -> Vector3<f32> {
    Vector3 {
        x: p.x,
        y: p.y,
        z: p.z,
    }
}

pub trait Intersect<T: Shape> {
    fn intersects(&self, shape: T) -> bool;
}

/// Anything that can be bounded by an [`Aabb`] and tested against one.
pub trait Shape: Copy + Intersect<Aabb> {
    fn bbox(&self) -> Aabb;
}

impl Shape for [f32; 3] {
    fn bbox(&self) -> Aabb {
        Aabb::from_extent_origin([0.0, 0.0, 0.0], *self)
    }
}

impl Intersect<Aabb> for [f32; 3] {
    fn intersects(&self, aabb: Aabb) -> bool {
        aabb.inside(*self)
    }
}
