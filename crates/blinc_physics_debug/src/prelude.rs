//! Common imports for hosting a shape debugger
//!
//! ```rust,ignore
//! use blinc_physics_debug::prelude::*;
//! ```

pub use crate::debugger::{ShapeDebugger, SyncStats};
pub use crate::events::{ShapeEvent, ShapeEventKind};
pub use crate::math::{Color, Quat, Vec3};
pub use crate::options::DebugOptions;
pub use crate::scene::{HeadlessScene, NodeId, SceneBackend};
pub use crate::shape::{Shape, ShapeKind};
pub use crate::world::{Body, PhysicsWorld, ShapeSlot, WorldSnapshot};
