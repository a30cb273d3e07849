//! Visitor pattern for structural tree traversal.
//!
//! Visitors decouple walking the tree from what happens at each node.
//! They serve statistics, debugging dumps and drawing overlays; ray
//! queries never go through this seam.

use super::node::BspNode;
use super::tree::BspTree;

/// Visitor for processing nodes during a structural walk of the tree.
///
/// Implement this trait to define custom behavior when walking the tree.
/// Common uses include:
/// - Collecting statistics (see [`TreeStats`])
/// - Dumping or drawing split planes
/// - Validating externally built hierarchies
pub trait TreeVisitor {
    /// Called once per node, parents before children.
    ///
    /// `depth` starts at 1 for the root, matching [`BspNode::depth`].
    fn visit(&mut self, node: &BspNode, depth: usize);
}

/// Walks a subtree in depth-first pre-order: each node before its
/// children, the left child before the right.
pub fn walk<V: TreeVisitor>(root: &BspNode, visitor: &mut V) {
    walk_node(root, 1, visitor);
}

fn walk_node<V: TreeVisitor>(node: &BspNode, depth: usize, visitor: &mut V) {
    visitor.visit(node, depth);
    if let BspNode::Branch { left, right, .. } = node {
        walk_node(left, depth + 1, visitor);
        walk_node(right, depth + 1, visitor);
    }
}

/// A visitor that calls a closure for each node.
pub struct FnVisitor<F>
where
    F: FnMut(&BspNode, usize),
{
    func: F,
}

impl<F> FnVisitor<F>
where
    F: FnMut(&BspNode, usize),
{
    /// Creates a new visitor from a closure.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> TreeVisitor for FnVisitor<F>
where
    F: FnMut(&BspNode, usize),
{
    fn visit(&mut self, node: &BspNode, depth: usize) {
        (self.func)(node, depth);
    }
}

/// A visitor that tallies the shape of a tree in a single walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Total number of nodes.
    pub nodes: usize,
    /// Number of leaf nodes.
    pub leaves: usize,
    /// Depth of the deepest node (1 for a lone leaf).
    pub max_depth: usize,
    /// Primitive references across all leaves, straddlers counted per leaf.
    pub primitive_refs: usize,
}

impl TreeStats {
    /// Collects statistics over a whole tree.
    pub fn collect(tree: &BspTree) -> Self {
        let mut stats = Self::default();
        tree.visit(&mut stats);
        stats
    }
}

impl TreeVisitor for TreeStats {
    fn visit(&mut self, node: &BspNode, depth: usize) {
        self.nodes += 1;
        self.max_depth = self.max_depth.max(depth);
        if node.is_leaf() {
            self.leaves += 1;
            self.primitive_refs += node.primitives().len();
        }
    }
}
