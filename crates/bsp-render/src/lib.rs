//! Interactive CPU ray-tracing demo for the `bsp-trace` crate.
//!
//! Scenes of colored spheres (plus a triangle floor in the mixed demo) are
//! produced by seeded generators, handed to a midpoint builder that
//! assembles the tree, and traced pixel by pixel into a macroquad [`Image`]
//! whenever the camera moves. Primary visibility and shadows both go
//! through [`BspTree::intersect`].

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use bsp_trace::{Aabb, Axis, BspNode, BspTree, FnVisitor, PrimitiveRef, Ray, Sphere, Triangle};
use macroquad::prelude::*;
use nalgebra::{Point3, Vector3};

pub mod camera;

pub use camera::{OrbitCamera, ViewBasis};

/// Split limit for generated scenes.
const MAX_DEPTH: usize = 16;
/// Primitive count below which a region stays a leaf.
const LEAF_SIZE: usize = 4;

/// Side length of the cube generated scenes live in.
const WORLD_SIZE: f32 = 30.0;
const MIN_RADIUS: f32 = 1.0;
const MAX_RADIUS: f32 = 3.0;

/// Simple seeded random number generator (LCG) so demo scenes are
/// reproducible.
struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_f32(&mut self) -> f32 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1);
        ((self.state >> 33) as f32) / (u32::MAX as f32 / 2.0)
    }

    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }
}

/// The shapes a demo scene can hold. Each variant keeps the shared
/// primitive handle that also sits in the tree's leaves.
enum Shape {
    Sphere(Arc<Sphere>),
    Triangle(Arc<Triangle>),
}

/// A renderable object: geometry plus its surface color.
pub struct SceneObject {
    shape: Shape,
    color: Color,
}

impl SceneObject {
    /// Creates a sphere, colored deterministically from its center.
    pub fn sphere(center: Point3<f32>, radius: f32) -> Self {
        Self {
            shape: Shape::Sphere(Arc::new(Sphere::new(center, radius))),
            color: color_from_anchor(center),
        }
    }

    /// Creates a triangle, colored deterministically from its centroid.
    pub fn triangle(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Self {
        let triangle = Triangle::new(a, b, c);
        let color = color_from_anchor(triangle.centroid());
        Self {
            shape: Shape::Triangle(Arc::new(triangle)),
            color,
        }
    }

    /// Returns the surface color.
    pub fn color(&self) -> Color {
        self.color
    }

    fn primitive(&self) -> PrimitiveRef {
        match &self.shape {
            Shape::Sphere(sphere) => sphere.clone() as PrimitiveRef,
            Shape::Triangle(triangle) => triangle.clone() as PrimitiveRef,
        }
    }

    fn bounds(&self) -> Aabb {
        match &self.shape {
            Shape::Sphere(sphere) => sphere.bounds(),
            Shape::Triangle(triangle) => triangle.bounds(),
        }
    }

    /// Unsigned distance from `point` to this object's surface.
    fn surface_distance(&self, point: Point3<f32>) -> f32 {
        match &self.shape {
            Shape::Sphere(sphere) => ((point - sphere.center()).norm() - sphere.radius()).abs(),
            Shape::Triangle(triangle) => {
                let normal = triangle.unit_normal().unwrap_or_else(Vector3::y);
                (point - triangle.vertices()[0]).dot(&normal).abs()
            }
        }
    }

    fn normal_at(&self, point: Point3<f32>) -> Vector3<f32> {
        match &self.shape {
            Shape::Sphere(sphere) => sphere.normal_at(point),
            Shape::Triangle(triangle) => triangle.unit_normal().unwrap_or_else(Vector3::y),
        }
    }
}

/// A set of colored objects together with the tree that accelerates their
/// ray queries.
pub struct Scene {
    objects: Vec<SceneObject>,
    tree: BspTree,
}

impl Scene {
    /// Builds the tree for the given objects with the default split limits.
    pub fn new(objects: Vec<SceneObject>) -> Self {
        let primitives: Vec<(PrimitiveRef, Aabb)> = objects
            .iter()
            .map(|object| (object.primitive(), object.bounds()))
            .collect();
        let tree = build_tree(&primitives, MAX_DEPTH, LEAF_SIZE);
        Self { objects, tree }
    }

    /// Returns the objects in the scene.
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Returns the acceleration tree.
    pub fn tree(&self) -> &BspTree {
        &self.tree
    }

    /// Finds the object whose surface passes closest to `point`, along
    /// with its outward normal there. The tree reports hit distances only,
    /// so the hit point is matched back to its owner here.
    fn surface_at(&self, point: Point3<f32>) -> Option<(&SceneObject, Vector3<f32>)> {
        let mut best: Option<(&SceneObject, f32)> = None;
        for object in &self.objects {
            let distance = object.surface_distance(point);
            if best.map_or(true, |(_, nearest)| distance < nearest) {
                best = Some((object, distance));
            }
        }
        best.map(|(object, _)| (object, object.normal_at(point)))
    }
}

/// Builds a tree over `primitives` by splitting regions at the spatial
/// midpoint of their longest axis until a region holds at most `leaf_size`
/// primitives or `max_depth` runs out. A primitive overlapping both sides
/// of a plane is listed in both children.
pub fn build_tree(
    primitives: &[(PrimitiveRef, Aabb)],
    max_depth: usize,
    leaf_size: usize,
) -> BspTree {
    if primitives.is_empty() {
        return BspTree::empty();
    }

    let mut bounds = Aabb::default();
    for (_, aabb) in primitives {
        bounds = bounds.union(aabb);
    }

    let root = split_region(primitives.to_vec(), &bounds, max_depth, leaf_size);
    BspTree::new(root, bounds)
}

fn split_region(
    primitives: Vec<(PrimitiveRef, Aabb)>,
    bounds: &Aabb,
    depth: usize,
    leaf_size: usize,
) -> BspNode {
    if depth == 0 || primitives.len() <= leaf_size {
        return BspNode::leaf(primitives.into_iter().map(|(p, _)| p).collect());
    }

    let extent = bounds.extent();
    let mut axis = Axis::X;
    for candidate in [Axis::Y, Axis::Z] {
        if extent[candidate.index()] > extent[axis.index()] {
            axis = candidate;
        }
    }
    let split = bounds.center()[axis.index()];

    let left: Vec<_> = primitives
        .iter()
        .filter(|(_, aabb)| aabb.min()[axis.index()] <= split)
        .cloned()
        .collect();
    let right: Vec<_> = primitives
        .iter()
        .filter(|(_, aabb)| aabb.max()[axis.index()] >= split)
        .cloned()
        .collect();

    // A plane every primitive straddles separates nothing; stop here
    // rather than recurse on two identical lists.
    if left.len() == primitives.len() && right.len() == primitives.len() {
        return BspNode::leaf(primitives.into_iter().map(|(p, _)| p).collect());
    }

    let mut left_max = bounds.max();
    left_max[axis.index()] = split;
    let mut right_min = bounds.min();
    right_min[axis.index()] = split;

    BspNode::branch(
        axis,
        split,
        split_region(left, &Aabb::new(bounds.min(), left_max), depth - 1, leaf_size),
        split_region(right, &Aabb::new(right_min, bounds.max()), depth - 1, leaf_size),
    )
}

/// Derives a deterministic color from a point's coordinates, so an object
/// keeps its color across frames and rebuilds.
pub fn color_from_anchor(anchor: Point3<f32>) -> Color {
    let mut hasher = DefaultHasher::new();
    anchor.x.to_bits().hash(&mut hasher);
    anchor.y.to_bits().hash(&mut hasher);
    anchor.z.to_bits().hash(&mut hasher);
    let hash = hasher.finish();

    let r = ((hash >> 16) & 0xFF) as u8;
    let g = ((hash >> 8) & 0xFF) as u8;
    let b = (hash & 0xFF) as u8;

    // Ensure minimum brightness so shading stays visible
    Color::from_rgba(r.max(60), g.max(60), b.max(60), 255)
}

/// Unit vector pointing from surfaces toward the light.
fn light_direction() -> Vector3<f32> {
    Vector3::new(-0.5, 1.0, -0.35).normalize()
}

/// Traces every pixel of `image` through the scene's tree.
pub fn render_scene(scene: &Scene, view: &ViewBasis, image: &mut Image) {
    let width = image.width();
    let height = image.height();

    for y in 0..height {
        for x in 0..width {
            let u = (x as f32 + 0.5) / width as f32;
            let v = (y as f32 + 0.5) / height as f32;

            let mut ray = view.ray_at(u, v);
            let color = if scene.tree().intersect(&mut ray) {
                shade(scene, &ray)
            } else {
                background(&ray)
            };
            image.set_pixel(x as u32, y as u32, color);
        }
    }
}

/// Lambert shading with a hard shadow ray, both resolved through the tree.
fn shade(scene: &Scene, ray: &Ray) -> Color {
    let Some(point) = ray.hit_point() else {
        return background(ray);
    };
    let Some((object, normal)) = scene.surface_at(point) else {
        return background(ray);
    };

    // Two-sided surfaces: flip the normal to face the viewer.
    let normal = if normal.dot(&ray.direction) > 0.0 {
        -normal
    } else {
        normal
    };

    let to_light = light_direction();
    let mut diffuse = normal.dot(&to_light).max(0.0);

    // Shadow ray through the same tree, nudged off the surface so the
    // origin's own primitive cannot swallow it.
    if diffuse > 0.0 {
        let mut shadow = Ray::new(point + normal * 1e-3, to_light);
        if scene.tree().intersect(&mut shadow) {
            diffuse = 0.0;
        }
    }

    let intensity = 0.15 + 0.85 * diffuse;
    let base = object.color();
    Color::new(base.r * intensity, base.g * intensity, base.b * intensity, 1.0)
}

/// Vertical sky gradient for rays that leave the scene.
fn background(ray: &Ray) -> Color {
    let t = 0.5 * (ray.direction.normalize().y + 1.0);
    Color::new(1.0 - t * 0.5, 1.0 - t * 0.3, 1.0, 1.0)
}

/// Overlays the splitting planes of the upper tree levels as outlines,
/// projected with the same view the image was traced with. Planes are
/// drawn as their cross section through the scene bounds, colored per
/// axis and fading with depth.
pub fn draw_split_planes(scene: &Scene, view: &ViewBasis, max_depth: usize) {
    let bounds = scene.tree().bounds();
    let mut visitor = FnVisitor::new(|node: &BspNode, depth: usize| {
        if depth > max_depth {
            return;
        }
        if let BspNode::Branch { axis, split, .. } = node {
            draw_plane_outline(&bounds, *axis, *split, depth, view);
        }
    });
    scene.tree().visit(&mut visitor);
}

fn axis_color(axis: Axis, depth: usize) -> Color {
    // Root planes draw solid, deeper ones fainter.
    let alpha = (1.0 / depth as f32).max(0.3);
    match axis {
        Axis::X => Color::new(1.0, 0.45, 0.45, alpha),
        Axis::Y => Color::new(0.45, 1.0, 0.45, alpha),
        Axis::Z => Color::new(0.5, 0.65, 1.0, alpha),
    }
}

fn draw_plane_outline(bounds: &Aabb, axis: Axis, split: f32, depth: usize, view: &ViewBasis) {
    let (u_axis, v_axis) = match axis {
        Axis::X => (1, 2),
        Axis::Y => (0, 2),
        Axis::Z => (0, 1),
    };

    let min = bounds.min();
    let max = bounds.max();
    let mut corners = [min; 4];
    for (corner, (at_u_max, at_v_max)) in corners
        .iter_mut()
        .zip([(false, false), (true, false), (true, true), (false, true)])
    {
        corner[axis.index()] = split;
        corner[u_axis] = if at_u_max { max[u_axis] } else { min[u_axis] };
        corner[v_axis] = if at_v_max { max[v_axis] } else { min[v_axis] };
    }

    let color = axis_color(axis, depth);
    let (width, height) = (screen_width(), screen_height());
    for i in 0..4 {
        let from = view.project(corners[i], width, height);
        let to = view.project(corners[(i + 1) % 4], width, height);
        if let (Some(from), Some(to)) = (from, to) {
            draw_line(from.x, from.y, to.x, to.y, 1.0, color);
        }
    }
}

/// Generates a field of random spheres.
pub fn random_sphere_scene(seed: u64, count: usize) -> Scene {
    let mut rng = Rng::new(seed);
    let mut objects = Vec::with_capacity(count);

    for _ in 0..count {
        let center = Point3::new(
            (rng.next_f32() - 0.5) * WORLD_SIZE,
            (rng.next_f32() - 0.5) * WORLD_SIZE,
            (rng.next_f32() - 0.5) * WORLD_SIZE,
        );
        objects.push(SceneObject::sphere(center, rng.range(MIN_RADIUS, MAX_RADIUS)));
    }

    Scene::new(objects)
}

/// Generates spheres floating above a two-triangle floor. The floor
/// spans many regions, so its triangles are listed in many leaves while
/// staying single shared primitives.
pub fn mixed_scene(seed: u64, count: usize) -> Scene {
    let mut rng = Rng::new(seed);
    let mut objects = Vec::with_capacity(count + 2);

    let floor_y = -0.5 * WORLD_SIZE;
    let extent = WORLD_SIZE;
    let corners = [
        Point3::new(-extent, floor_y, -extent),
        Point3::new(extent, floor_y, -extent),
        Point3::new(extent, floor_y, extent),
        Point3::new(-extent, floor_y, extent),
    ];
    objects.push(SceneObject::triangle(corners[0], corners[1], corners[2]));
    objects.push(SceneObject::triangle(corners[0], corners[2], corners[3]));

    for _ in 0..count {
        let radius = rng.range(MIN_RADIUS, MAX_RADIUS);
        let center = Point3::new(
            (rng.next_f32() - 0.5) * WORLD_SIZE,
            floor_y + radius + rng.next_f32() * (0.5 * WORLD_SIZE),
            (rng.next_f32() - 0.5) * WORLD_SIZE,
        );
        objects.push(SceneObject::sphere(center, radius));
    }

    Scene::new(objects)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_of_spheres(count: usize) -> Vec<(PrimitiveRef, Aabb)> {
        (0..count)
            .map(|i| {
                let sphere = Arc::new(Sphere::new(Point3::new(i as f32 * 4.0, 0.0, 0.0), 1.0));
                let bounds = sphere.bounds();
                (sphere as PrimitiveRef, bounds)
            })
            .collect()
    }

    #[test]
    fn empty_input_builds_empty_tree() {
        let tree = build_tree(&[], 8, 2);
        assert!(tree.is_empty());
        assert_eq!(tree.node_count(), 0);
    }

    #[test]
    fn builder_splits_down_to_leaf_size() {
        let tree = build_tree(&line_of_spheres(8), 8, 2);

        assert!(tree.depth() > 1);
        let mut largest_leaf = 0;
        let mut visitor = bsp_trace::FnVisitor::new(|node: &BspNode, _| {
            if node.is_leaf() {
                largest_leaf = largest_leaf.max(node.primitives().len());
            }
        });
        tree.visit(&mut visitor);
        assert!(largest_leaf <= 2, "leaf holds {largest_leaf} primitives");
    }

    #[test]
    fn coincident_primitives_stop_splitting() {
        // Every candidate plane straddles all of these, so the builder
        // must settle for a single leaf instead of recursing forever.
        let primitives: Vec<(PrimitiveRef, Aabb)> = (0..6)
            .map(|_| {
                let sphere = Arc::new(Sphere::new(Point3::origin(), 1.0));
                let bounds = sphere.bounds();
                (sphere as PrimitiveRef, bounds)
            })
            .collect();

        let tree = build_tree(&primitives, 32, 2);
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.primitive_count(), 6);
    }

    #[test]
    fn scene_traces_spheres_it_contains() {
        let scene = Scene::new(vec![SceneObject::sphere(Point3::new(0.0, 0.0, -5.0), 1.0)]);

        let mut ray = Ray::new(Point3::origin(), Vector3::new(0.0, 0.0, -1.0));
        assert!(scene.tree().intersect(&mut ray));
        assert_eq!(ray.t(), 4.0);

        let point = ray.hit_point().unwrap();
        let (object, normal) = scene.surface_at(point).unwrap();
        assert!((normal - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-5);
        assert_eq!(object.color().a, 1.0);
    }

    #[test]
    fn surface_lookup_picks_the_owning_object() {
        let scene = Scene::new(vec![
            SceneObject::sphere(Point3::new(-5.0, 0.0, 0.0), 1.0),
            SceneObject::sphere(Point3::new(5.0, 0.0, 0.0), 1.0),
        ]);

        let (object, _) = scene.surface_at(Point3::new(4.0, 0.0, 0.0)).unwrap();
        let expected = color_from_anchor(Point3::new(5.0, 0.0, 0.0));
        assert_eq!(object.color().r, expected.r);
        assert_eq!(object.color().g, expected.g);
        assert_eq!(object.color().b, expected.b);
    }

    #[test]
    fn triangle_color_follows_centroid() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(3.0, 0.0, 0.0);
        let c = Point3::new(0.0, 3.0, 0.0);
        let object = SceneObject::triangle(a, b, c);

        let expected = color_from_anchor(Triangle::new(a, b, c).centroid());
        assert_eq!(object.color().r, expected.r);
        assert_eq!(object.color().g, expected.g);
        assert_eq!(object.color().b, expected.b);
        assert_eq!(object.color().a, 1.0);
    }

    #[test]
    fn generated_scenes_are_reproducible() {
        let first = random_sphere_scene(9, 32);
        let second = random_sphere_scene(9, 32);

        assert_eq!(first.objects().len(), second.objects().len());
        assert_eq!(first.tree().node_count(), second.tree().node_count());
        assert_eq!(first.tree().primitive_count(), second.tree().primitive_count());
    }
}
