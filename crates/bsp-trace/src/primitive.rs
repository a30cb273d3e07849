//! The primitive capability consumed by BSP traversal.
//!
//! The tree never inspects geometry itself; leaves delegate to each
//! primitive's own intersection routine and collect results through the
//! shared ray state.

use std::fmt::Debug;
use std::sync::Arc;

use crate::Ray;

/// A geometric object that can be tested against a ray.
///
/// Implementations must honor the closest-hit contract: report a hit
/// through [`Ray::record_hit`] (which only accepts strictly closer
/// distances) and leave the ray untouched otherwise. Nothing is returned;
/// the mutated ray is the sole channel for hit results.
///
/// The `Send + Sync` bounds let an immutable tree be traversed from many
/// threads at once, provided each thread traces its own ray. The `Debug`
/// bound keeps nodes holding primitives printable.
pub trait Primitive: Debug + Send + Sync {
    /// Tests the ray against this primitive, updating the ray's hit state
    /// if a hit closer than the currently recorded one is found.
    fn intersect(&self, ray: &mut Ray);
}

/// Shared handle to a primitive.
///
/// Leaves store shared handles rather than owned values because a primitive
/// overlapping a splitting plane is listed in the leaves on both sides.
pub type PrimitiveRef = Arc<dyn Primitive>;
