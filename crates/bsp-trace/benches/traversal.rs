use std::sync::Arc;

use criterion::{criterion_group, criterion_main};
use nalgebra::Point3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use bsp_trace::{Aabb, Axis, BspNode, BspTree, Primitive, PrimitiveRef, Ray, Sphere};

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

fn criterion_benchmark(c: &mut criterion::Criterion) {
    let mut rng = StdRng::seed_from_u64(7);

    let spheres: Vec<Arc<Sphere>> = (0..512)
        .map(|_| {
            let center = Point3::new(
                rng.gen_range(0.0..100.0),
                rng.gen_range(0.0..100.0),
                rng.gen_range(0.0..100.0),
            );
            Arc::new(Sphere::new(center, rng.gen_range(0.5..2.0)))
        })
        .collect();

    let mut bounds = Aabb::default();
    for sphere in &spheres {
        bounds = bounds.union(&sphere.bounds());
    }
    let tree = BspTree::new(build_midpoint(&spheres, &bounds, 14), bounds);

    // One shared eye outside the scene, rays aimed at random points inside.
    let eye = Point3::new(-40.0, 120.0, -40.0);
    let rays: Vec<Ray> = (0..4096)
        .map(|_| {
            let target = Point3::new(
                rng.gen_range(0.0..100.0),
                rng.gen_range(0.0..100.0),
                rng.gen_range(0.0..100.0),
            );
            Ray::new(eye, target - eye)
        })
        .collect();

    c.bench_function("bsp tree trace", |b| {
        b.iter(|| {
            let mut hits = 0;
            for ray in &rays {
                let mut ray = ray.clone();
                if tree.intersect(&mut ray) {
                    hits += 1;
                }
            }
            hits
        })
    });

    c.bench_function("brute force trace", |b| {
        b.iter(|| {
            let mut hits = 0;
            for ray in &rays {
                let mut ray = ray.clone();
                for sphere in &spheres {
                    sphere.intersect(&mut ray);
                }
                if ray.hit() {
                    hits += 1;
                }
            }
            hits
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
