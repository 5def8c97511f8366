pub use super::*;
use crate::error::{check_finite, GeomError};

/// A sphere given by its center and radius.
///
/// The radius is expected to be non-negative, a negative one is accepted and corrupts every
/// squared radius comparison.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sphere {
    pub center: Point3<f32>,
    pub radius: f32,
}

/// The unit sphere at (0, 0, 0).
impl Default for Sphere {
    fn default() -> Self {
        Self {
            center: ORIGIN,
            radius: 1.0,
        }
    }
}

impl Sphere {
    pub fn new(center: impl Into<Point3<f32>>, radius: f32) -> Self {
        Self {
            center: center.into(),
            radius,
        }
    }

    /// A sphere of the given radius at (0, 0, 0).
    pub fn with_radius(radius: f32) -> Self {
        Self {
            center: ORIGIN,
            radius,
        }
    }

    pub fn try_new(center: impl Into<Point3<f32>>, radius: f32) -> Result<Self, GeomError> {
        let s = Self::new(center, radius);
        check_finite("center", &[s.center.x, s.center.y, s.center.z])?;
        check_finite("radius", &[radius])?;
        if radius < 0.0 {
            log::debug!("rejecting sphere with negative radius {}", radius);
            return Err(GeomError::NegativeRadius(radius));
        }
        Ok(s)
    }

    pub fn center(&self) -> Point3<f32> {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn radius_squared(&self) -> f32 {
        self.radius * self.radius
    }

    pub fn set_center(&mut self, center: impl Into<Point3<f32>>) -> &mut Self {
        self.center = center.into();
        self
    }

    pub fn set_radius(&mut self, radius: f32) -> &mut Self {
        self.radius = radius;
        self
    }

    pub fn grow(&mut self, amount: f32) -> &mut Self {
        self.radius += amount;
        self
    }

    pub fn shrink(&mut self, amount: f32) -> &mut Self {
        self.radius -= amount;
        self
    }

    pub fn move_by(&mut self, delta: impl Into<Vector3<f32>>) -> &mut Self {
        self.center = offset(self.center, delta.into(), 1.0);
        self
    }

    /// Tests the squared center distance against `r1 + r2`.
    ///
    /// Note that the sum of the radii is *not* squared, so this only matches the geometric test
    /// when `r1 + r2` is 0 or 1. When `r1 + r2 > 1`, overlapping spheres can be reported as
    /// separate. When `r1 + r2 < 1`, separate spheres can be reported as overlapping.
    pub fn intersect(&self, other: &Sphere) -> bool {
        self.intersect_components(other.center, other.radius)
    }

    /// Same as [`Sphere::intersect`] against a sphere given by its center and radius.
    pub fn intersect_components(&self, center: impl Into<Point3<f32>>, radius: f32) -> bool {
        let off = diff(self.center, center.into());
        dot(off, off) <= self.radius + radius
    }
}

impl Shape for Sphere {
    fn bbox(&self) -> Aabb {
        Aabb::from_extent_origin([self.radius, self.radius, self.radius], self.center)
    }
}

impl Intersect<Aabb> for Sphere {
    fn intersects(&self, b: Aabb) -> bool {
        b.min_distance_squared(self.center) <= self.radius_squared()
    }
}

impl Intersect<Sphere> for Sphere {
    fn intersects(&self, s: Sphere) -> bool {
        self.intersect(&s)
    }
}

impl Intersect<[f32; 3]> for Sphere {
    fn intersects(&self, p: [f32; 3]) -> bool {
        let off = diff(self.center, p.into());
        dot(off, off) <= self.radius_squared()
    }
}
