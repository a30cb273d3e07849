//! Binary Space Partitioning tree for ray-scene intersection.
//!
//! This module provides a BSP tree that subdivides a bounded region of
//! space with axis-aligned planes and walks rays through the resulting
//! regions in order. The tree enables:
//!
//! - Closest-hit queries that skip regions a ray never enters
//! - Early termination as soon as a region yields a confirmed hit
//! - Structural walks for statistics and debugging overlays
//!
//! # Example
//!
//! ```ignore
//! use bsp_trace::{BspNode, BspTree, Ray};
//! use nalgebra::{Point3, Vector3};
//!
//! // Hierarchies are assembled by an outside producer.
//! let tree = BspTree::new(root_node, scene_bounds);
//!
//! // Trace a ray; the closest hit ends up on the ray itself.
//! let mut ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
//! if tree.intersect(&mut ray) {
//!     println!("hit at t = {}", ray.t());
//! }
//! ```
//!
//! # Architecture
//!
//! - [`BspTree`]: The container pairing the root node with the scene bounds
//! - [`BspNode`]: Leaf and branch nodes carrying the traversal algorithm
//! - [`Axis`]: The axis a branch's splitting plane is perpendicular to
//! - [`TreeVisitor`]: Visitor trait for structural walks

mod axis;
mod node;
mod tree;
mod visitor;

// Re-export main types
pub use axis::Axis;
pub use node::BspNode;
pub use tree::BspTree;
pub use visitor::{walk, FnVisitor, TreeStats, TreeVisitor};
