//! BSP tree node and the ordered ray-traversal algorithm.

use crate::{Axis, HIT_EPSILON, PrimitiveRef, Ray};

/// A node in the BSP tree.
///
/// A node is either a `Leaf` holding the primitives overlapping its region,
/// or a `Branch` dividing space with an axis-aligned plane. The two cases
/// are separate variants, so a node can never carry both children and
/// primitives; the shape traversal relies on is enforced by the type itself.
///
/// # Shared Primitives
///
/// Leaves hold [`PrimitiveRef`] handles rather than owned primitives: an
/// object straddling a splitting plane is listed in the leaves on BOTH
/// sides of it, and the closest-hit gate in [`Ray::record_hit`] makes
/// testing it twice harmless.
///
/// Nodes are immutable once assembled. Traversal takes `&self`, so a single
/// tree can serve rays from many threads at once.
#[derive(Debug, Clone)]
pub enum BspNode {
    /// Terminal region of space.
    Leaf {
        /// Primitives overlapping this region.
        primitives: Vec<PrimitiveRef>,
    },
    /// Interior node dividing space with an axis-aligned plane.
    Branch {
        /// The axis perpendicular to the splitting plane.
        axis: Axis,
        /// Coordinate along `axis` where the plane sits.
        split: f32,
        /// Subtree covering coordinates BELOW the split.
        left: Box<BspNode>,
        /// Subtree covering coordinates ABOVE the split.
        right: Box<BspNode>,
    },
}

impl BspNode {
    /// Creates a leaf holding the given primitive references.
    pub fn leaf(primitives: Vec<PrimitiveRef>) -> Self {
        BspNode::Leaf { primitives }
    }

    /// Creates a branch splitting space at `split` along `axis`.
    pub fn branch(axis: Axis, split: f32, left: BspNode, right: BspNode) -> Self {
        BspNode::Branch {
            axis,
            split,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Checks if this node is a leaf.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, BspNode::Leaf { .. })
    }

    /// Returns the child covering coordinates below the split, or `None`
    /// for a leaf.
    #[inline]
    pub fn left(&self) -> Option<&BspNode> {
        match self {
            BspNode::Branch { left, .. } => Some(left),
            BspNode::Leaf { .. } => None,
        }
    }

    /// Returns the child covering coordinates above the split, or `None`
    /// for a leaf.
    #[inline]
    pub fn right(&self) -> Option<&BspNode> {
        match self {
            BspNode::Branch { right, .. } => Some(right),
            BspNode::Leaf { .. } => None,
        }
    }

    /// Returns the primitives stored at this node. Branches store none.
    #[inline]
    pub fn primitives(&self) -> &[PrimitiveRef] {
        match self {
            BspNode::Leaf { primitives } => primitives,
            BspNode::Branch { .. } => &[],
        }
    }

    /// Returns the number of primitive references held in this subtree.
    ///
    /// A primitive listed in several leaves is counted once per leaf.
    pub fn primitive_count(&self) -> usize {
        match self {
            BspNode::Leaf { primitives } => primitives.len(),
            BspNode::Branch { left, right, .. } => left.primitive_count() + right.primitive_count(),
        }
    }

    /// Returns the number of nodes in this subtree (this node included).
    pub fn node_count(&self) -> usize {
        match self {
            BspNode::Leaf { .. } => 1,
            BspNode::Branch { left, right, .. } => 1 + left.node_count() + right.node_count(),
        }
    }

    /// Returns the depth of this subtree (1 for a leaf node).
    pub fn depth(&self) -> usize {
        match self {
            BspNode::Leaf { .. } => 1,
            BspNode::Branch { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Searches this subtree for the closest primitive hit along `ray`,
    /// restricted to the parametric interval `[t0, t1]`.
    ///
    /// Returns `true` once a hit inside the interval is found, which ends
    /// the traversal; callers higher up the tree must not search any
    /// further region. The hit itself lives on the ray. A hit recorded
    /// beyond `t1` stays on the ray but is NOT reported here, because a
    /// region nearer the origin may still contain a closer hit.
    ///
    /// # Ordering
    ///
    /// At a branch the sign of the ray direction along the split axis
    /// decides which child is in front (nearer the origin): left for a
    /// positive component, right for a negative one. The plane is met at
    /// `t_split = (split - origin) / direction`, and the interval decides
    /// what gets visited:
    ///
    /// - `t0 >= t_split`: the interval lies entirely past the plane; only
    ///   the back child is searched.
    /// - `t1 <= t_split`: the interval ends before the plane; only the
    ///   front child is searched.
    /// - otherwise the front child is searched over `[t0, t_split]`, and
    ///   the back child over `[t_split, t1]` only if the front reported
    ///   no hit.
    ///
    /// A ray parallel to the splitting plane never crosses it and descends
    /// into the child containing its origin. An origin lying exactly ON
    /// the plane has no near side, so both children are searched over the
    /// full interval.
    pub fn intersect(&self, ray: &mut Ray, t0: f32, t1: f32) -> bool {
        match self {
            BspNode::Leaf { primitives } => {
                for primitive in primitives {
                    primitive.intersect(ray);
                }
                // A hit past this leaf's exit belongs to a farther region;
                // reporting it here would end the traversal before nearer
                // regions were searched.
                ray.hit() && ray.t() < t1 + HIT_EPSILON
            }
            BspNode::Branch {
                axis,
                split,
                left,
                right,
            } => {
                let origin = ray.origin[axis.index()];
                let direction = ray.direction[axis.index()];

                // Parallel to the splitting plane (this also catches -0.0):
                // the ray stays on the origin's side for its whole length.
                if direction == 0.0 {
                    return if origin < *split {
                        left.intersect(ray, t0, t1)
                    } else if origin > *split {
                        right.intersect(ray, t0, t1)
                    } else {
                        let hit_left = left.intersect(ray, t0, t1);
                        let hit_right = right.intersect(ray, t0, t1);
                        hit_left || hit_right
                    };
                }

                let t_split = (*split - origin) / direction;
                let (front, back) = if direction < 0.0 {
                    (right, left)
                } else {
                    (left, right)
                };

                if t0 >= t_split {
                    back.intersect(ray, t0, t1)
                } else if t1 <= t_split {
                    front.intersect(ray, t0, t1)
                } else {
                    // The plane falls inside the interval; every hit in the
                    // front part precedes every hit in the back part.
                    if front.intersect(ray, t0, t_split) {
                        return true;
                    }
                    back.intersect(ray, t_split, t1)
                }
            }
        }
    }
}
