pub use super::*;
use crate::error::{check_finite, GeomError};

/// An axis aligned bounding box, stored as a center and a half size.
///
/// ## Extent
/// `extent` is always *half* the size of the box on each axis, and `origin` is its center (not a
/// corner). The corners are derived: `min = origin - extent`, `max = origin + extent`.
///
/// ## Negative extents
/// The extent is assumed to be non-negative but this is never enforced: [`Aabb::shrink`] past
/// zero or a negative [`Aabb::set_extent`] silently inverts min and max, which breaks every test
/// built on top of them. Call [`Aabb::correct_extent`] after anything that may go negative, or use
/// [`Aabb::try_new`] to reject such boxes up front.
///
/// ```rust
/// use narrowphase::Aabb;
///
/// let mut a = Aabb::new(); // extent (1, 1, 1) at (0, 0, 0)
/// let b = Aabb::from_extent_origin([1.0, 1.0, 1.0], [1.5, 0.0, 0.0]);
/// assert!(a.overlap(&b));
///
/// a.move_by([-0.5, 0.0, 0.0]); // now exactly touching
/// assert!(!a.overlap(&b));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    /// Half size of the box on each axis
    pub extent: Vector3<f32>,
    /// Center of the box
    pub origin: Point3<f32>,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::new()
    }
}

impl Aabb {
    /// Creates a box with an extent of (1, 1, 1) located at (0, 0, 0).
    pub fn new() -> Self {
        Self {
            extent: Vector3 {
                x: 1.0,
                y: 1.0,
                z: 1.0,
            },
            origin: ORIGIN,
        }
    }

    /// Creates a box with the given extent located at (0, 0, 0).
    pub fn with_extent(extent: impl Into<Vector3<f32>>) -> Self {
        Self {
            extent: extent.into(),
            origin: ORIGIN,
        }
    }

    pub fn from_extent_origin(
        extent: impl Into<Vector3<f32>>,
        origin: impl Into<Point3<f32>>,
    ) -> Self {
        Self {
            extent: extent.into(),
            origin: origin.into(),
        }
    }

    /// Creates the box spanning the two given corners.
    /// `min` is expected to be lower than `max` on every axis.
    pub fn from_min_max(min: impl Into<Point3<f32>>, max: impl Into<Point3<f32>>) -> Self {
        let min = min.into();
        let max = max.into();
        Self {
            extent: Vector3 {
                x: (max.x - min.x) / 2.0,
                y: (max.y - min.y) / 2.0,
                z: (max.z - min.z) / 2.0,
            },
            origin: Point3 {
                x: (min.x + max.x) / 2.0,
                y: (min.y + max.y) / 2.0,
                z: (min.z + max.z) / 2.0,
            },
        }
    }

    /// Same as [`Aabb::from_extent_origin`] but rejects negative extents and non-finite values.
    pub fn try_new(
        extent: impl Into<Vector3<f32>>,
        origin: impl Into<Point3<f32>>,
    ) -> Result<Self, GeomError> {
        let aabb = Self::from_extent_origin(extent, origin);
        let e = aabb.extent;
        let o = aabb.origin;
        check_finite("extent", &[e.x, e.y, e.z])?;
        check_finite("origin", &[o.x, o.y, o.z])?;

        for (axis, value) in [('x', e.x), ('y', e.y), ('z', e.z)] {
            if value < 0.0 {
                log::debug!("rejecting aabb with negative {} extent {}", axis, value);
                return Err(GeomError::NegativeExtent { axis, value });
            }
        }
        Ok(aabb)
    }

    pub fn extent(&self) -> Vector3<f32> {
        self.extent
    }

    pub fn origin(&self) -> Point3<f32> {
        self.origin
    }

    /// Full size of the box, twice the extent.
    pub fn size(&self) -> Vector3<f32> {
        Vector3 {
            x: self.extent.x * 2.0,
            y: self.extent.y * 2.0,
            z: self.extent.z * 2.0,
        }
    }

    pub fn minimum(&self) -> Point3<f32> {
        Point3 {
            x: self.min_x(),
            y: self.min_y(),
            z: self.min_z(),
        }
    }

    pub fn maximum(&self) -> Point3<f32> {
        Point3 {
            x: self.max_x(),
            y: self.max_y(),
            z: self.max_z(),
        }
    }

    pub fn min_and_max(&self) -> (Point3<f32>, Point3<f32>) {
        (self.minimum(), self.maximum())
    }

    pub fn min_x(&self) -> f32 {
        self.origin.x - self.extent.x
    }

    pub fn min_y(&self) -> f32 {
        self.origin.y - self.extent.y
    }

    pub fn min_z(&self) -> f32 {
        self.origin.z - self.extent.z
    }

    pub fn max_x(&self) -> f32 {
        self.origin.x + self.extent.x
    }

    pub fn max_y(&self) -> f32 {
        self.origin.y + self.extent.y
    }

    pub fn max_z(&self) -> f32 {
        self.origin.z + self.extent.z
    }

    pub fn set(
        &mut self,
        extent: impl Into<Vector3<f32>>,
        origin: impl Into<Point3<f32>>,
    ) -> &mut Self {
        self.extent = extent.into();
        self.origin = origin.into();
        self
    }

    pub fn set_extent(&mut self, extent: impl Into<Vector3<f32>>) -> &mut Self {
        self.extent = extent.into();
        self
    }

    pub fn set_origin(&mut self, origin: impl Into<Point3<f32>>) -> &mut Self {
        self.origin = origin.into();
        self
    }

    /// Sets the full size of the box, the extent becomes half of it.
    pub fn set_size(&mut self, size: impl Into<Vector3<f32>>) -> &mut Self {
        let size = size.into();
        self.extent = Vector3 {
            x: size.x / 2.0,
            y: size.y / 2.0,
            z: size.z / 2.0,
        };
        self
    }

    /// Sets the full size on the X axis.
    pub fn set_width(&mut self, width: f32) -> &mut Self {
        self.extent.x = width / 2.0;
        self
    }

    /// Sets the full size on the Y axis.
    pub fn set_height(&mut self, height: f32) -> &mut Self {
        self.extent.y = height / 2.0;
        self
    }

    /// Sets the full size on the Z axis.
    pub fn set_length(&mut self, length: f32) -> &mut Self {
        self.extent.z = length / 2.0;
        self
    }

    /// Replaces every extent component by its absolute value.
    ///
    /// This is the only guard against negative extents, nothing else in the crate calls it.
    pub fn correct_extent(&mut self) -> &mut Self {
        if self.extent.x < 0.0 || self.extent.y < 0.0 || self.extent.z < 0.0 {
            log::trace!("correcting negative aabb extent {:?}", self.extent);
        }
        self.extent.x = self.extent.x.abs();
        self.extent.y = self.extent.y.abs();
        self.extent.z = self.extent.z.abs();
        self
    }

    /// Moves the origin by `delta`.
    pub fn move_by(&mut self, delta: impl Into<Vector3<f32>>) -> &mut Self {
        let delta = delta.into();
        self.origin = offset(self.origin, delta, 1.0);
        self
    }

    pub fn grow(&mut self, amount: f32) -> &mut Self {
        self.extent.x += amount;
        self.extent.y += amount;
        self.extent.z += amount;
        self
    }

    /// Subtracts `amount` from every extent component.
    /// Shrinking past zero leaves a negative extent, see [`Aabb::correct_extent`].
    pub fn shrink(&mut self, amount: f32) -> &mut Self {
        self.grow(-amount)
    }

    pub fn grow_by(&mut self, amount: impl Into<Vector3<f32>>) -> &mut Self {
        let amount = amount.into();
        self.extent.x += amount.x;
        self.extent.y += amount.y;
        self.extent.z += amount.z;
        self
    }

    pub fn shrink_by(&mut self, amount: impl Into<Vector3<f32>>) -> &mut Self {
        let amount = amount.into();
        self.extent.x -= amount.x;
        self.extent.y -= amount.y;
        self.extent.z -= amount.z;
        self
    }

    /// Separating axis test. Boxes that exactly touch are *not* overlapping.
    pub fn overlap(&self, other: &Aabb) -> bool {
        self.intersect_components(other.extent, other.origin)
    }

    /// Same as [`Aabb::overlap`] against a box given by its raw extent and origin.
    pub fn intersect_components(
        &self,
        extent: impl Into<Vector3<f32>>,
        origin: impl Into<Point3<f32>>,
    ) -> bool {
        let extent = extent.into();
        let origin = origin.into();

        if (self.origin.x - origin.x).abs() >= self.extent.x + extent.x {
            return false;
        }
        if (self.origin.y - origin.y).abs() >= self.extent.y + extent.y {
            return false;
        }
        if (self.origin.z - origin.z).abs() >= self.extent.z + extent.z {
            return false;
        }
        true
    }

    /// Computes the overlapping region of the two boxes and writes it to `store`.
    /// When the boxes don't overlap `store` is left untouched and false is returned.
    pub fn overlap_boxes(&self, other: &Aabb, store: &mut Aabb) -> bool {
        if !self.overlap(other) {
            return false;
        }

        let (a_min, a_max) = self.min_and_max();
        let (b_min, b_max) = other.min_and_max();

        *store = Aabb::from_min_max(
            Point3 {
                x: a_min.x.max(b_min.x),
                y: a_min.y.max(b_min.y),
                z: a_min.z.max(b_min.z),
            },
            Point3 {
                x: a_max.x.min(b_max.x),
                y: a_max.y.min(b_max.y),
                z: a_max.z.min(b_max.z),
            },
        );
        true
    }

    /// Resizes this box to the tightest box around `points`.
    ///
    /// The min/max accumulators start at (0, 0, 0) and not at the first point, so the resulting
    /// box always contains the world origin: `{(5,5,5), (6,6,6)}` gives min (0,0,0), max (6,6,6).
    /// An empty input therefore yields a zero sized box at the origin.
    pub fn surround_points<P: Into<Point3<f32>>>(
        &mut self,
        points: impl IntoIterator<Item = P>,
    ) -> &mut Self {
        let mut min = ORIGIN;
        let mut max = ORIGIN;
        let mut n = 0usize;

        for p in points {
            let p = p.into();
            min.x = if p.x < min.x { p.x } else { min.x };
            min.y = if p.y < min.y { p.y } else { min.y };
            min.z = if p.z < min.z { p.z } else { min.z };
            max.x = if p.x > max.x { p.x } else { max.x };
            max.y = if p.y > max.y { p.y } else { max.y };
            max.z = if p.z > max.z { p.z } else { max.z };
            n += 1;
        }

        if n == 0 {
            log::debug!("surround_points called without points, collapsing box onto the origin");
        }

        *self = Aabb::from_min_max(min, max);
        self
    }

    /// Squared distance from `point` to the closest point of the box, 0 if inside.
    pub fn min_distance_squared(&self, point: impl Into<Point3<f32>>) -> f32 {
        let p = point.into();
        axis_distance_squared(p.x, self.min_x(), self.max_x())
            + axis_distance_squared(p.y, self.min_y(), self.max_y())
            + axis_distance_squared(p.z, self.min_z(), self.max_z())
    }

    pub fn min_distance(&self, point: impl Into<Point3<f32>>) -> f32 {
        self.min_distance_squared(point).sqrt()
    }

    /// Inclusive containment test, points on the faces are inside.
    pub fn inside(&self, point: impl Into<Point3<f32>>) -> bool {
        let p = point.into();
        p.x >= self.min_x()
            && p.x <= self.max_x()
            && p.y >= self.min_y()
            && p.y <= self.max_y()
            && p.z >= self.min_z()
            && p.z <= self.max_z()
    }

    /// Stores in `self` the componentwise linear interpolation of extent and origin between
    /// `a` (t = 0) and `b` (t = 1).
    pub fn interpolate(&mut self, a: &Aabb, b: &Aabb, t: f32) -> &mut Self {
        let lerp = |x: f32, y: f32| x + (y - x) * t;
        self.extent = Vector3 {
            x: lerp(a.extent.x, b.extent.x),
            y: lerp(a.extent.y, b.extent.y),
            z: lerp(a.extent.z, b.extent.z),
        };
        self.origin = Point3 {
            x: lerp(a.origin.x, b.origin.x),
            y: lerp(a.origin.y, b.origin.y),
            z: lerp(a.origin.z, b.origin.z),
        };
        self
    }

    /// Strict overlap on the X axis only.
    pub fn intersect_on_x(&self, other: &Aabb) -> bool {
        self.intersect_on_axis(other, 0)
    }

    /// Strict overlap on the Y axis only.
    pub fn intersect_on_y(&self, other: &Aabb) -> bool {
        self.intersect_on_axis(other, 1)
    }

    /// Strict overlap on the Z axis only.
    pub fn intersect_on_z(&self, other: &Aabb) -> bool {
        self.intersect_on_axis(other, 2)
    }

    /// Clamps a tentative X displacement of `self` so that it stops at the face of `other`.
    ///
    /// The movement is only clamped when both boxes overlap on Y and Z, `self` is entirely on one
    /// side of `other` on X and moving towards it. Boxes already interpenetrating on X are not
    /// resolved, `movement` is returned as is.
    ///
    /// ```rust
    /// use narrowphase::Aabb;
    ///
    /// let player = Aabb::new();
    /// let wall = Aabb::from_extent_origin([1.0, 1.0, 1.0], [5.0, 0.0, 0.0]);
    /// assert_eq!(player.x_movement_overlap(&wall, 10.0), 3.0);
    /// assert_eq!(player.x_movement_overlap(&wall, -10.0), -10.0);
    /// ```
    pub fn x_movement_overlap(&self, other: &Aabb, movement: f32) -> f32 {
        self.movement_overlap(other, 0, movement)
    }

    /// See [`Aabb::x_movement_overlap`].
    pub fn y_movement_overlap(&self, other: &Aabb, movement: f32) -> f32 {
        self.movement_overlap(other, 1, movement)
    }

    /// See [`Aabb::x_movement_overlap`].
    pub fn z_movement_overlap(&self, other: &Aabb, movement: f32) -> f32 {
        self.movement_overlap(other, 2, movement)
    }

    fn axis(&self, axis: usize) -> (f32, f32) {
        let origin: [f32; 3] = self.origin.into();
        let extent: [f32; 3] = self.extent.into();
        (origin[axis], extent[axis])
    }

    fn intersect_on_axis(&self, other: &Aabb, axis: usize) -> bool {
        let (o1, e1) = self.axis(axis);
        let (o2, e2) = other.axis(axis);
        (o1 - o2).abs() < e1 + e2
    }

    fn movement_overlap(&self, other: &Aabb, axis: usize, mut movement: f32) -> f32 {
        let others = [(axis + 1) % 3, (axis + 2) % 3];
        if !others.iter().all(|&a| self.intersect_on_axis(other, a)) {
            return movement;
        }

        let (o1, e1) = self.axis(axis);
        let (o2, e2) = other.axis(axis);

        if movement > 0.0 && o1 + e1 <= o2 - e2 {
            let gap = (o2 - e2) - (o1 + e1);
            if gap < movement {
                movement = gap;
            }
        } else if movement < 0.0 && o1 - e1 >= o2 + e2 {
            let gap = (o2 + e2) - (o1 - e1);
            if gap > movement {
                movement = gap;
            }
        }
        movement
    }
}

fn axis_distance_squared(p: f32, min: f32, max: f32) -> f32 {
    if p < min {
        (min - p) * (min - p)
    } else if p > max {
        (p - max) * (p - max)
    } else {
        0.0
    }
}

impl Shape for Aabb {
    fn bbox(&self) -> Aabb {
        *self
    }
}

impl Intersect<Aabb> for Aabb {
    fn intersects(&self, b: Aabb) -> bool {
        self.overlap(&b)
    }
}

impl Intersect<Sphere> for Aabb {
    fn intersects(&self, shape: Sphere) -> bool {
        shape.intersects(*self)
    }
}

impl Intersect<[f32; 3]> for Aabb {
    fn intersects(&self, p: [f32; 3]) -> bool {
        self.inside(p)
    }
}

#[cfg(feature = "euclid")]
impl<U> From<euclid::Box3D<f32, U>> for Aabb {
    fn from(b: euclid::Box3D<f32, U>) -> Self {
        Aabb::from_min_max(
            [b.min.x, b.min.y, b.min.z],
            [b.max.x, b.max.y, b.max.z],
        )
    }
}

#[cfg(feature = "euclid")]
impl<U> From<Aabb> for euclid::Box3D<f32, U> {
    fn from(aabb: Aabb) -> Self {
        let (min, max) = aabb.min_and_max();
        euclid::Box3D::new(
            euclid::point3(min.x, min.y, min.z),
            euclid::point3(max.x, max.y, max.z),
        )
    }
}
