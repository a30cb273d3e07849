//! Triangle primitive.

use nalgebra::{Point3, Vector3};

use crate::{Aabb, HIT_EPSILON, Primitive, Ray};

/// Determinant threshold below which a ray counts as parallel to the
/// triangle plane.
const DET_EPSILON: f32 = 1e-8;

/// A triangle in 3D space, defined by three vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    vertices: [Point3<f32>; 3],
}

impl Triangle {
    /// Creates a new triangle from three points.
    ///
    /// The winding order determines the normal direction via the right-hand
    /// rule: normal = (b - a) × (c - a). Intersection does not cull back
    /// faces, so winding affects shading only.
    pub fn new(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Returns the three vertices of the triangle.
    #[inline]
    pub fn vertices(&self) -> &[Point3<f32>; 3] {
        &self.vertices
    }

    /// Computes the (unnormalized) normal vector of the triangle.
    ///
    /// The direction follows the right-hand rule based on vertex winding.
    pub fn normal(&self) -> Vector3<f32> {
        let [a, b, c] = &self.vertices;
        let ab = b - a;
        let ac = c - a;
        ab.cross(&ac)
    }

    /// Computes the unit normal vector of the triangle.
    ///
    /// Returns `None` if the triangle is degenerate (zero area).
    pub fn unit_normal(&self) -> Option<Vector3<f32>> {
        let n = self.normal();
        let len = n.norm();
        if len > f32::EPSILON {
            Some(n / len)
        } else {
            None
        }
    }

    /// Computes the centroid (center of mass) of the triangle.
    pub fn centroid(&self) -> Point3<f32> {
        let [a, b, c] = &self.vertices;
        Point3::from((a.coords + b.coords + c.coords) / 3.0)
    }

    /// Returns the axis-aligned bounding box of the triangle.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().copied())
    }
}

impl Primitive for Triangle {
    /// Möller–Trumbore intersection without backface culling.
    fn intersect(&self, ray: &mut Ray) {
        let [a, b, c] = &self.vertices;
        let e1 = b - a;
        let e2 = c - a;

        let pvec = ray.direction.cross(&e2);
        let det = e1.dot(&pvec);
        if det.abs() < DET_EPSILON {
            return;
        }
        let inv_det = 1.0 / det;

        let tvec = ray.origin - a;
        let u = tvec.dot(&pvec) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return;
        }

        let qvec = tvec.cross(&e1);
        let v = ray.direction.dot(&qvec) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return;
        }

        let t = e2.dot(&qvec) * inv_det;
        if t < HIT_EPSILON {
            return;
        }

        ray.record_hit(t);
    }
}
