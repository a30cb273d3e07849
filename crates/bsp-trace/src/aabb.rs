//! Axis-aligned bounding box used to bound the scene.
//!
//! The tree stores one box around everything it contains; clipping a ray
//! against it yields the parametric interval the root traversal starts
//! from.

use nalgebra::{Point3, Vector3};

use crate::Ray;

/// An axis-aligned box, stored as its minimum and maximum corners.
///
/// The default value is the *empty* box (inverted corners), which grows
/// correctly under [`Aabb::grow`] and clips every ray to `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    min: Point3<f32>,
    max: Point3<f32>,
}

impl Default for Aabb {
    fn default() -> Self {
        Self {
            min: Point3::new(f32::MAX, f32::MAX, f32::MAX),
            max: Point3::new(f32::MIN, f32::MIN, f32::MIN),
        }
    }
}

impl Aabb {
    /// Creates a box from its two extreme corners.
    ///
    /// # Panics (debug builds only)
    /// Panics if `min` exceeds `max` on any axis.
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        debug_assert!(
            min.x <= max.x && min.y <= max.y && min.z <= max.z,
            "Aabb corners must be ordered per axis"
        );
        Self { min, max }
    }

    /// Builds the smallest box containing all given points.
    ///
    /// An empty iterator yields the empty box.
    pub fn from_points(points: impl IntoIterator<Item = Point3<f32>>) -> Self {
        let mut aabb = Self::default();
        for point in points {
            aabb.grow(point);
        }
        aabb
    }

    /// Returns the minimum corner.
    #[inline]
    pub fn min(&self) -> Point3<f32> {
        self.min
    }

    /// Returns the maximum corner.
    #[inline]
    pub fn max(&self) -> Point3<f32> {
        self.max
    }

    /// Returns the per-axis size of the box.
    #[inline]
    pub fn extent(&self) -> Vector3<f32> {
        self.max - self.min
    }

    /// Returns the center point of the box.
    #[inline]
    pub fn center(&self) -> Point3<f32> {
        self.min + self.extent() * 0.5
    }

    /// Expands the box to contain `point`.
    pub fn grow(&mut self, point: Point3<f32>) {
        self.min = Point3::new(
            self.min.x.min(point.x),
            self.min.y.min(point.y),
            self.min.z.min(point.z),
        );
        self.max = Point3::new(
            self.max.x.max(point.x),
            self.max.y.max(point.y),
            self.max.z.max(point.z),
        );
    }

    /// Returns the smallest box containing both `self` and `other`.
    pub fn union(&self, other: &Aabb) -> Aabb {
        let mut result = *self;
        result.grow(other.min);
        result.grow(other.max);
        result
    }

    /// Returns `true` if `point` lies inside the box (boundary included).
    pub fn contains_point(&self, point: Point3<f32>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Clips a ray against the box using the slab method.
    ///
    /// Returns the parametric interval `(entry, exit)` over which the ray
    /// lies inside the box. If the origin is inside, `entry` is clamped to
    /// zero. Returns `None` when the ray misses the box or the box lies
    /// entirely behind the origin.
    ///
    /// Zero direction components divide to infinities that drop out of the
    /// min/max chain, so axis-parallel rays clip correctly without special
    /// cases.
    pub fn clip_ray(&self, ray: &Ray) -> Option<(f32, f32)> {
        let tx1 = (self.min.x - ray.origin.x) / ray.direction.x;
        let tx2 = (self.max.x - ray.origin.x) / ray.direction.x;
        let ty1 = (self.min.y - ray.origin.y) / ray.direction.y;
        let ty2 = (self.max.y - ray.origin.y) / ray.direction.y;
        let tz1 = (self.min.z - ray.origin.z) / ray.direction.z;
        let tz2 = (self.max.z - ray.origin.z) / ray.direction.z;

        let entry = tx1.min(tx2).max(ty1.min(ty2)).max(tz1.min(tz2));
        let exit = tx1.max(tx2).min(ty1.max(ty2)).min(tz1.max(tz2));

        if exit < 0.0 || entry > exit {
            return None;
        }
        Some((entry.max(0.0), exit))
    }
}
