pub use super::*;
use crate::error::{check_finite, GeomError};
use mint::ColumnMatrix4;

/// A half line starting at `origin` going along `direction`.
///
/// The direction is *not* normalized for you. Every test in [`crate::intersections`] returns the
/// hit parameter `t` such that the hit point is `origin + direction * t`, so `t` is only a true
/// distance when the direction has unit length.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
}

/// A ray at (0, 0, 0) pointing towards positive Z.
impl Default for Ray {
    fn default() -> Self {
        Self {
            origin: ORIGIN,
            direction: FRONT,
        }
    }
}

impl Ray {
    pub fn new(origin: impl Into<Point3<f32>>, direction: impl Into<Vector3<f32>>) -> Self {
        Self {
            origin: origin.into(),
            direction: direction.into(),
        }
    }

    /// A ray starting at (0, 0, 0).
    pub fn towards(direction: impl Into<Vector3<f32>>) -> Self {
        Self {
            origin: ORIGIN,
            direction: direction.into(),
        }
    }

    /// Builds a ray with a unit length direction, rejecting zero length and non-finite input.
    pub fn try_new_normalized(
        origin: impl Into<Point3<f32>>,
        direction: impl Into<Vector3<f32>>,
    ) -> Result<Self, GeomError> {
        let mut ray = Self::new(origin, direction);
        let (o, d) = (ray.origin, ray.direction);
        check_finite("origin", &[o.x, o.y, o.z])?;
        check_finite("direction", &[d.x, d.y, d.z])?;

        let len = dot(d, d).sqrt();
        if len == 0.0 {
            log::debug!("rejecting ray with zero length direction");
            return Err(GeomError::ZeroDirection);
        }
        ray.direction = Vector3 {
            x: d.x / len,
            y: d.y / len,
            z: d.z / len,
        };
        Ok(ray)
    }

    pub fn origin(&self) -> Point3<f32> {
        self.origin
    }

    pub fn direction(&self) -> Vector3<f32> {
        self.direction
    }

    /// Point at parameter `t` along the ray.
    pub fn trace(&self, t: f32) -> Point3<f32> {
        offset(self.origin, self.direction, t)
    }

    /// Point at parameter `t` behind the origin.
    pub fn trace_reverse(&self, t: f32) -> Point3<f32> {
        offset(self.origin, self.direction, -t)
    }

    pub fn move_by(&mut self, delta: impl Into<Vector3<f32>>) -> &mut Self {
        self.origin = offset(self.origin, delta.into(), 1.0);
        self
    }

    /// Transforms the origin and the direction by `m`.
    ///
    /// Both are transformed as points (w = 1) and the resulting w is ignored, there is no
    /// perspective division.
    /// The direction is therefore only correct for transforms without translation, or when the
    /// translation is irrelevant because the caller normalizes and only cares about the
    /// orientation of a linear transform. A zero length direction is left as is when asked to
    /// normalize.
    pub fn transform(&mut self, m: &ColumnMatrix4<f32>, normalize_direction: bool) -> &mut Self {
        self.origin = transform_point(m, self.origin);
        self.direction = as_vector(transform_point(m, Point3 {
            x: self.direction.x,
            y: self.direction.y,
            z: self.direction.z,
        }));

        if normalize_direction {
            let len = dot(self.direction, self.direction).sqrt();
            if len > 0.0 {
                self.direction.x /= len;
                self.direction.y /= len;
                self.direction.z /= len;
            } else {
                log::warn!("cannot normalize a zero length ray direction after transform");
            }
        }
        self
    }
}

fn transform_point(m: &ColumnMatrix4<f32>, p: Point3<f32>) -> Point3<f32> {
    Point3 {
        x: m.x.x * p.x + m.y.x * p.y + m.z.x * p.z + m.w.x,
        y: m.x.y * p.x + m.y.y * p.y + m.z.y * p.z + m.w.y,
        z: m.x.z * p.x + m.y.z * p.y + m.z.z * p.z + m.w.z,
    }
}

#[cfg(feature = "euclid")]
impl Ray {
    pub fn from_euclid<U>(
        origin: euclid::Point3D<f32, U>,
        direction: euclid::Vector3D<f32, U>,
    ) -> Self {
        Self::new(
            [origin.x, origin.y, origin.z],
            [direction.x, direction.y, direction.z],
        )
    }
}
