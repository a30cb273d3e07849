//! BSP tree container.

use crate::{Aabb, Ray};

use super::node::BspNode;
use super::visitor::{walk, TreeVisitor};

/// A Binary Space Partitioning tree over ray-traceable primitives.
///
/// The tree pairs a pre-built node hierarchy with the bounds of the region
/// it subdivides. It answers one query: the closest primitive hit along a
/// ray, found by descending only into the regions the ray passes through,
/// in the order it passes through them.
///
/// # Construction
///
/// Splitting heuristics live outside this crate. A producer decides where
/// the planes go, assembles the hierarchy from [`BspNode::leaf`] and
/// [`BspNode::branch`], and hands it over together with the scene bounds:
///
/// ```ignore
/// use bsp_trace::{Axis, BspNode, BspTree};
///
/// let root = BspNode::branch(Axis::X, 5.0, left_subtree, right_subtree);
/// let tree = BspTree::new(root, scene_bounds);
/// ```
///
/// Every primitive must lie inside the scene bounds, and every leaf must
/// list the primitives overlapping its region; the query relies on both.
///
/// # Traversal
///
/// The query clips the ray against the bounds to find the parametric
/// interval the descent starts from, so rays missing the scene never touch
/// a node:
///
/// ```ignore
/// let mut ray = Ray::new(origin, direction);
/// if tree.intersect(&mut ray) {
///     let hit = ray.hit_point();
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct BspTree {
    root: Option<BspNode>,
    bounds: Aabb,
}

impl BspTree {
    /// Creates a tree from a pre-built node hierarchy and the bounds of
    /// the region it subdivides.
    pub fn new(root: BspNode, bounds: Aabb) -> Self {
        Self {
            root: Some(root),
            bounds,
        }
    }

    /// Creates a tree with no nodes. It intersects nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns `true` if the tree has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns a reference to the root node, if any.
    #[inline]
    pub fn root(&self) -> Option<&BspNode> {
        self.root.as_ref()
    }

    /// Returns the bounds of the subdivided region.
    #[inline]
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Returns the maximum depth of the tree (0 for an empty tree).
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, |n| n.depth())
    }

    /// Returns the number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.root.as_ref().map_or(0, |n| n.node_count())
    }

    /// Returns the number of primitive references held in the leaves.
    ///
    /// A primitive listed in several leaves is counted once per leaf.
    pub fn primitive_count(&self) -> usize {
        self.root.as_ref().map_or(0, |n| n.primitive_count())
    }

    /// Searches for the closest primitive hit along `ray`.
    ///
    /// The ray is clipped against the tree bounds first; a ray missing the
    /// bounds (or overlapping them only behind its origin) is rejected
    /// without testing a single primitive, as is an empty tree. On `true`
    /// the hit is on the ray: [`Ray::t`] and [`Ray::hit_point`].
    pub fn intersect(&self, ray: &mut Ray) -> bool {
        if let Some(ref root) = self.root {
            match self.bounds.clip_ray(ray) {
                Some((t0, t1)) => root.intersect(ray, t0, t1),
                None => false,
            }
        } else {
            false
        }
    }

    /// Visits every node in depth-first pre-order: parents before
    /// children, left before right.
    pub fn visit<V: TreeVisitor>(&self, visitor: &mut V) {
        if let Some(ref root) = self.root {
            walk(root, visitor);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use nalgebra::{Point3, Vector3};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::{Axis, Primitive, PrimitiveRef, Sphere};

    /// Splits at the spatial midpoint of the longest axis until the list is
    /// small or the depth limit runs out, listing straddlers on both sides.
    fn build_midpoint(spheres: &[Arc<Sphere>], bounds: &Aabb, depth: usize) -> BspNode {
        if depth == 0 || spheres.len() <= 2 {
            return BspNode::leaf(spheres.iter().map(|s| s.clone() as PrimitiveRef).collect());
        }

        let extent = bounds.extent();
        let mut axis = Axis::X;
        for candidate in [Axis::Y, Axis::Z] {
            if extent[candidate.index()] > extent[axis.index()] {
                axis = candidate;
            }
        }
        let split = bounds.center()[axis.index()];

        let mut left_max = bounds.max();
        left_max[axis.index()] = split;
        let mut right_min = bounds.min();
        right_min[axis.index()] = split;

        let left: Vec<Arc<Sphere>> = spheres
            .iter()
            .filter(|s| s.bounds().min()[axis.index()] <= split)
            .cloned()
            .collect();
        let right: Vec<Arc<Sphere>> = spheres
            .iter()
            .filter(|s| s.bounds().max()[axis.index()] >= split)
            .cloned()
            .collect();

        BspNode::branch(
            axis,
            split,
            build_midpoint(&left, &Aabb::new(bounds.min(), left_max), depth - 1),
            build_midpoint(&right, &Aabb::new(right_min, bounds.max()), depth - 1),
        )
    }

    #[test]
    fn empty_tree_intersects_nothing() {
        let tree = BspTree::empty();
        assert!(tree.is_empty());
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.node_count(), 0);
        assert_eq!(tree.primitive_count(), 0);

        let mut ray = Ray::new(Point3::origin(), Vector3::new(1.0, 0.0, 0.0));
        assert!(!tree.intersect(&mut ray));
        assert!(!ray.hit());
    }

    #[test]
    fn single_leaf_tree_finds_hit() {
        let sphere = Arc::new(Sphere::new(Point3::new(0.0, 0.0, -5.0), 1.0));
        let tree = BspTree::new(BspNode::leaf(vec![sphere.clone()]), sphere.bounds());
        assert!(!tree.is_empty());
        assert_eq!(tree.primitive_count(), 1);

        let mut ray = Ray::new(Point3::origin(), Vector3::new(0.0, 0.0, -1.0));
        assert!(tree.intersect(&mut ray));
        assert_eq!(ray.t(), 4.0);
    }

    #[test]
    fn ray_missing_bounds_is_rejected() {
        let sphere = Arc::new(Sphere::new(Point3::new(0.0, 0.0, -5.0), 1.0));
        let tree = BspTree::new(BspNode::leaf(vec![sphere.clone()]), sphere.bounds());

        // Pointing away from the scene.
        let mut ray = Ray::new(Point3::origin(), Vector3::new(0.0, 0.0, 1.0));
        assert!(!tree.intersect(&mut ray));
        assert!(!ray.hit());
    }

    #[test]
    fn origin_inside_bounds_still_hits() {
        let sphere = Arc::new(Sphere::new(Point3::new(0.0, 0.0, -5.0), 1.0));
        let bounds = Aabb::new(Point3::new(-10.0, -10.0, -10.0), Point3::new(10.0, 10.0, 10.0));
        let tree = BspTree::new(BspNode::leaf(vec![sphere.clone()]), bounds);

        let mut ray = Ray::new(Point3::origin(), Vector3::new(0.0, 0.0, -1.0));
        assert!(tree.intersect(&mut ray));
        assert_eq!(ray.t(), 4.0);
    }

    #[test]
    fn random_scene_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(42);

        let spheres: Vec<Arc<Sphere>> = (0..48)
            .map(|_| {
                let center = Point3::new(
                    rng.gen_range(0.0..10.0),
                    rng.gen_range(0.0..10.0),
                    rng.gen_range(0.0..10.0),
                );
                Arc::new(Sphere::new(center, rng.gen_range(0.2..0.7)))
            })
            .collect();

        let mut bounds = Aabb::default();
        for sphere in &spheres {
            bounds = bounds.union(&sphere.bounds());
        }
        let tree = BspTree::new(build_midpoint(&spheres, &bounds, 8), bounds);
        assert!(tree.depth() > 1);

        let mut hits = 0;
        for _ in 0..200 {
            let origin = Point3::new(
                rng.gen_range(-5.0..15.0),
                rng.gen_range(-5.0..15.0),
                rng.gen_range(-5.0..15.0),
            );
            let target = Point3::new(
                rng.gen_range(0.0..10.0),
                rng.gen_range(0.0..10.0),
                rng.gen_range(0.0..10.0),
            );

            let mut tree_ray = Ray::new(origin, target - origin);
            let tree_hit = tree.intersect(&mut tree_ray);

            let mut brute_ray = Ray::new(origin, target - origin);
            for sphere in &spheres {
                sphere.intersect(&mut brute_ray);
            }

            assert_eq!(tree_hit, brute_ray.hit());
            if tree_hit {
                hits += 1;
                assert_eq!(tree_ray.t(), brute_ray.t());
            }
        }

        // The scene is dense enough that a good share of rays connect.
        assert!(hits > 10, "only {hits} of 200 rays hit");
    }
}
