//! Falling Shapes
//!
//! Drops a sphere and a two-box compound onto a ground plane and mirrors them
//! with a headless shape debugger:
//! - init/update event listeners
//! - color and offset changes at runtime
//! - clear and destroy
//!
//! Run with: cargo run -p blinc_physics_debug --example falling_shapes [options.toml]

use anyhow::Result;
use blinc_physics_debug::prelude::*;
use blinc_physics_debug::world::BodyId;
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

const GRAVITY: f32 = -9.82;
const DT: f32 = 1.0 / 60.0;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let options = match std::env::args().nth(1) {
        Some(path) => DebugOptions::load(path)?,
        None => DebugOptions::default(),
    };

    let mut scene = HeadlessScene::new();
    let root = scene.root();
    let mut debugger = ShapeDebugger::new(&mut scene, root, options);

    let inits = Rc::new(Cell::new(0usize));
    let counter = Rc::clone(&inits);
    debugger.on_init(move |event| {
        counter.set(counter.get() + 1);
        tracing::info!(index = event.index, kind = %event.shape.tag(), "outline created");
    });
    debugger.on_update(|event| {
        if event.index == 0 {
            tracing::trace!(y = event.body.position.y, "sphere moved");
        }
    });

    let mut world = WorldSnapshot::new();
    world.add_body(
        Body::new()
            .with_orientation(Quat::from_axis_angle(Vec3::X, -std::f32::consts::FRAC_PI_2))
            .with_shape(Arc::new(Shape::plane())),
    );
    let sphere = world.add_body(
        Body::new()
            .with_position(Vec3::new(0.0, 10.0, 0.0))
            .with_shape(Arc::new(Shape::sphere(2.0))),
    );
    let compound = world.add_body(
        Body::new()
            .with_position(Vec3::new(0.0, 16.0, 0.0))
            .with_shape(Arc::new(Shape::cuboid(Vec3::new(3.0, 2.0, 2.0))))
            .with_slot(
                ShapeSlot::new(Arc::new(Shape::cuboid(Vec3::new(3.0, 2.0, 2.0))))
                    .at(Vec3::new(4.0, 3.0, -7.0)),
            ),
    );

    let mut velocities = [(sphere, 0.0f32, 2.0f32), (compound, 0.0, 2.0)];
    for frame in 0..180 {
        for (id, velocity, rest_height) in &mut velocities {
            step(&mut world, *id, velocity, *rest_height);
        }

        let stats = debugger.update(&mut scene, &world);
        if frame == 90 {
            debugger.set_color(&mut scene, Color::from_hex(0xe60c0c));
            debugger.set_offset(&mut scene, 0.01);
        }
        if frame % 60 == 0 {
            tracing::info!(frame, tracked = stats.tracked, reused = stats.reused, "synchronized");
        }
    }

    debugger.clear(&mut scene);
    tracing::info!(
        outlines = inits.get(),
        live_nodes = scene.node_count(),
        "cleared"
    );

    debugger.destroy(&mut scene);
    let counters = scene.counters();
    tracing::info!(
        uploaded = counters.geometries_uploaded,
        disposed = counters.geometries_disposed,
        live_nodes = scene.node_count(),
        "destroyed"
    );

    Ok(())
}

/// Semi-implicit Euler with a bouncy floor at `rest_height`
fn step(world: &mut WorldSnapshot, id: BodyId, velocity: &mut f32, rest_height: f32) {
    let Some(body) = world.body_mut(id) else {
        return;
    };
    *velocity += GRAVITY * DT;
    body.position.y += *velocity * DT;
    if body.position.y < rest_height {
        body.position.y = rest_height;
        *velocity = -*velocity * 0.5;
    }
}
