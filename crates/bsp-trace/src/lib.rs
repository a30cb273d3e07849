//! BSP (Binary Space Partitioning) tree acceleration for ray tracing.
//!
//! Pre-built trees of axis-aligned splits answer closest-hit ray queries
//! by visiting only the regions a ray passes through, in order. See the
//! [`bsp`] module for the tree itself and the traversal guarantees.

mod aabb;
mod primitive;
mod ray;
mod sphere;
mod triangle;

pub mod bsp;

pub use aabb::Aabb;
pub use bsp::{Axis, BspNode, BspTree, FnVisitor, TreeStats, TreeVisitor};
pub use primitive::{Primitive, PrimitiveRef};
pub use ray::{Ray, HIT_EPSILON};
pub use sphere::Sphere;
pub use triangle::Triangle;
