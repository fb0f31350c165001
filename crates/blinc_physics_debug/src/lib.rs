//! # Blinc Physics Debug
//!
//! Wireframe visualization of physics bodies for Blinc 3D scenes.
//!
//! This crate provides:
//! - **ShapeDebugger** that mirrors every collision shape as an outline renderable
//! - **Geometry builders** for spheres, boxes, planes, cylinders, convex hulls,
//!   triangle meshes and heightfields
//! - **SceneBackend** trait so any renderer can host the outlines
//! - **HeadlessScene** for tests and servers without a GPU
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use blinc_physics_debug::prelude::*;
//! use std::sync::Arc;
//!
//! let mut scene = HeadlessScene::new();
//! let root = scene.root();
//! let mut debugger = ShapeDebugger::new(&mut scene, root, DebugOptions::default());
//!
//! let mut world = WorldSnapshot::new();
//! world.add_body(Body::new().with_shape(Arc::new(Shape::sphere(2.0))));
//!
//! debugger.on_init(|event| println!("new outline for {}", event.shape.id()));
//! debugger.update(&mut scene, &world);
//! ```

// Value types
pub mod math;

// Collision shapes and the bodies that carry them
pub mod shape;
pub mod world;

// Outline geometry
pub mod geometry;
pub mod materials;

// Rendering collaborator
pub mod scene;

// Synchronizer
pub mod debugger;
pub mod events;

pub mod error;
pub mod options;

pub mod prelude;

pub use debugger::{Diagnostic, GeometryRegistry, GeometryToken, ShapeDebugger, SyncStats};
pub use error::{DebugError, Result};
pub use events::{ListenerId, ShapeEvent, ShapeEventKind};
pub use geometry::{BuiltGeometry, Geometry, GeometryIssue, PrimitiveOptions, SharedPrimitives, Topology, Vertex};
pub use materials::DebugMaterial;
pub use math::{Color, Quat, Vec3};
pub use options::DebugOptions;
pub use scene::{GeometryHandle, HeadlessScene, MaterialHandle, NodeId, RenderKind, SceneBackend};
pub use shape::{Shape, ShapeId, ShapeKind, ShapeTag};
pub use world::{Body, BodyId, PhysicsWorld, ShapeSlot, WorldSnapshot};
