//! Sphere primitive.

use nalgebra::{Point3, Vector3};

use crate::{Aabb, HIT_EPSILON, Primitive, Ray};

/// A sphere, defined by its center and radius.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: Point3<f32>,
    radius: f32,
}

impl Sphere {
    /// Creates a new sphere.
    ///
    /// # Panics
    /// Panics if the radius is not strictly positive.
    pub fn new(center: Point3<f32>, radius: f32) -> Self {
        assert!(radius > 0.0, "Sphere radius must be positive");
        Self { center, radius }
    }

    /// Returns the center of the sphere.
    #[inline]
    pub fn center(&self) -> Point3<f32> {
        self.center
    }

    /// Returns the radius of the sphere.
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Returns the outward unit normal at a point on the surface.
    #[inline]
    pub fn normal_at(&self, point: Point3<f32>) -> Vector3<f32> {
        (point - self.center) / self.radius
    }

    /// Returns the axis-aligned bounding box of the sphere.
    pub fn bounds(&self) -> Aabb {
        let r = Vector3::new(self.radius, self.radius, self.radius);
        Aabb::new(self.center - r, self.center + r)
    }
}

impl Primitive for Sphere {
    fn intersect(&self, ray: &mut Ray) {
        let oc = ray.origin - self.center;
        let a = ray.direction.dot(&ray.direction);
        let half_b = oc.dot(&ray.direction);
        let c = oc.dot(&oc) - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return;
        }
        let sqrt_d = discriminant.sqrt();

        // Near root first; fall back to the far root when the origin is
        // inside the sphere or the near root is behind the origin.
        let mut t = (-half_b - sqrt_d) / a;
        if t < HIT_EPSILON {
            t = (-half_b + sqrt_d) / a;
        }
        if t < HIT_EPSILON {
            return;
        }

        ray.record_hit(t);
    }
}
