//! Ray representation with accumulated closest-hit state.
//!
//! A ray is `r(t) = origin + t * direction`. During BSP traversal the same
//! ray is threaded through every node and primitive test; it carries the
//! closest hit found so far and is the single output channel for hit
//! results.

use nalgebra::{Point3, Vector3};

/// Tolerance used when comparing hit distances against interval boundaries.
///
/// A leaf reports success only when the recorded hit lies within its exit
/// distance plus this slack, which absorbs floating-point error for hits
/// sitting essentially on a splitting plane. The same value serves as the
/// minimum hit distance for the bundled primitives, guarding against
/// self-intersection of secondary rays. Chosen for `f32` scenes with
/// coordinates up to a few hundred units: small enough that no leaf claims
/// hits meaningfully beyond its exit plane, large enough to swallow the
/// rounding noise of a split-plane crossing.
pub const HIT_EPSILON: f32 = 1e-4;

/// A ray through the scene, mutated in place as hits are found.
///
/// `origin` and `direction` are plain data; the hit state (`t`, `hit`) is
/// private and can only advance through [`Ray::record_hit`], which enforces
/// the closest-hit contract: a new hit is recorded only if it is strictly
/// closer than the one already stored. Primitive implementations report
/// through `record_hit` and never need to compare distances themselves.
///
/// The direction does not need to be normalized, but all recorded distances
/// are in units of its length, so mixing normalized and unnormalized
/// directions within one scene will skew comparisons.
#[derive(Debug, Clone)]
pub struct Ray {
    /// Starting point of the ray.
    pub origin: Point3<f32>,
    /// Travel direction of the ray.
    pub direction: Vector3<f32>,
    /// Distance to the closest hit found so far (`f32::INFINITY` if none).
    t: f32,
    /// Whether any hit has been recorded.
    hit: bool,
}

impl Ray {
    /// Creates a ray with no recorded hit.
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction,
            t: f32::INFINITY,
            hit: false,
        }
    }

    /// Evaluates the ray at parameter `t`.
    #[inline]
    pub fn at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction * t
    }

    /// Returns the distance to the closest recorded hit,
    /// or `f32::INFINITY` if nothing has been hit.
    #[inline]
    pub fn t(&self) -> f32 {
        self.t
    }

    /// Returns `true` if any hit has been recorded.
    #[inline]
    pub fn hit(&self) -> bool {
        self.hit
    }

    /// Records a hit at distance `t` if it is strictly closer than the
    /// current one. Returns `true` if the hit was recorded.
    ///
    /// Non-finite distances never compare closer and are silently ignored.
    /// Callers are expected to reject distances below their own minimum
    /// (for the bundled primitives, [`HIT_EPSILON`]) before reporting.
    #[inline]
    pub fn record_hit(&mut self, t: f32) -> bool {
        if t.is_finite() && t < self.t {
            self.t = t;
            self.hit = true;
            true
        } else {
            false
        }
    }

    /// Clears the recorded hit state so the ray can be traced again.
    pub fn reset(&mut self) {
        self.t = f32::INFINITY;
        self.hit = false;
    }

    /// Returns the point of the closest recorded hit, if any.
    pub fn hit_point(&self) -> Option<Point3<f32>> {
        self.hit.then(|| self.at(self.t))
    }
}
