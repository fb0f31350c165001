//! Benchmarks for per-frame synchronization
//!
//! Run with: cargo bench -p blinc_physics_debug

use blinc_physics_debug::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;

/// World with `count` bodies cycling through primitive and generated shapes
fn build_world(count: usize) -> WorldSnapshot {
    let sphere = Arc::new(Shape::sphere(0.5));
    let cuboid = Arc::new(Shape::cuboid(Vec3::new(0.5, 0.25, 1.0)));
    let hull = Arc::new(Shape::convex_polyhedron(
        vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z],
        vec![vec![0, 2, 1], vec![0, 1, 3], vec![0, 3, 2], vec![1, 2, 3]],
    ));

    let mut world = WorldSnapshot::new();
    for i in 0..count {
        let shape = match i % 3 {
            0 => Arc::clone(&sphere),
            1 => Arc::clone(&cuboid),
            _ => Arc::clone(&hull),
        };
        let position = Vec3::new((i % 32) as f32, (i / 32) as f32, 0.0);
        world.add_body(Body::new().with_position(position).with_shape(shape));
    }
    world
}

fn bench_steady_state(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_steady_state");

    for count in [100usize, 1_000, 10_000] {
        let world = build_world(count);
        let mut scene = HeadlessScene::new();
        let root = scene.root();
        let mut debugger = ShapeDebugger::new(&mut scene, root, DebugOptions::default());
        debugger.update(&mut scene, &world);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| black_box(debugger.update(&mut scene, &world)))
        });
    }

    group.finish();
}

fn bench_cold_start(c: &mut Criterion) {
    let world = build_world(1_000);

    c.bench_function("update_cold_1000", |b| {
        b.iter(|| {
            let mut scene = HeadlessScene::new();
            let root = scene.root();
            let mut debugger = ShapeDebugger::new(&mut scene, root, DebugOptions::default());
            black_box(debugger.update(&mut scene, &world));
            debugger.destroy(&mut scene);
        })
    });
}

criterion_group!(benches, bench_steady_state, bench_cold_start);
criterion_main!(benches);
