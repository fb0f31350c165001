//! Read-only view of the physics state the debugger mirrors

use crate::math::{Quat, Vec3};
use crate::shape::Shape;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::sync::Arc;

new_key_type! {
    /// Unique identifier for a body in a world
    pub struct BodyId;
}

/// A shape attached to a body at a fixed local pose
#[derive(Clone, Debug)]
pub struct ShapeSlot {
    /// The attached shape; clone the `Arc` to attach the same shape twice
    pub shape: Arc<Shape>,
    /// Offset from the body origin, in body space
    pub offset: Vec3,
    /// Orientation relative to the body, in body space
    pub orientation: Quat,
}

impl ShapeSlot {
    pub fn new(shape: Arc<Shape>) -> Self {
        Self {
            shape,
            offset: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }

    /// Set the local offset
    pub fn at(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    /// Set the local orientation
    pub fn rotated(mut self, orientation: Quat) -> Self {
        self.orientation = orientation;
        self
    }

    /// World-space pose of this shape on `body`
    ///
    /// Position is `P + Q·O` and orientation is `Q ∘ L`.
    pub fn world_transform(&self, body: &Body) -> (Vec3, Quat) {
        let position = body.position + body.orientation.rotate_vec3(self.offset);
        let orientation = body.orientation * self.orientation;
        (position, orientation)
    }
}

/// A rigid body: a world pose plus an ordered list of shapes
#[derive(Clone, Debug)]
pub struct Body {
    /// Assigned when the body is inserted into a [`WorldSnapshot`]
    pub id: BodyId,
    pub position: Vec3,
    pub orientation: Quat,
    pub shapes: SmallVec<[ShapeSlot; 2]>,
}

impl Default for Body {
    fn default() -> Self {
        Self::new()
    }
}

impl Body {
    /// Create a body at the origin with no shapes
    pub fn new() -> Self {
        Self {
            id: BodyId::default(),
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            shapes: SmallVec::new(),
        }
    }

    /// Set the world position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set the world orientation
    pub fn with_orientation(mut self, orientation: Quat) -> Self {
        self.orientation = orientation;
        self
    }

    /// Attach a shape at the body origin
    pub fn with_shape(self, shape: Arc<Shape>) -> Self {
        self.with_slot(ShapeSlot::new(shape))
    }

    /// Attach a shape at a local pose
    pub fn with_slot(mut self, slot: ShapeSlot) -> Self {
        self.shapes.push(slot);
        self
    }

    pub fn add_shape(&mut self, slot: ShapeSlot) {
        self.shapes.push(slot);
    }
}

/// Source of bodies for [`ShapeDebugger::update`](crate::ShapeDebugger::update)
///
/// Implementations must yield bodies, and each body's shapes, in the same order
/// from one call to the next when nothing changed. Reordering is not an error,
/// it only defeats renderable reuse.
pub trait PhysicsWorld {
    /// Bodies in a stable order
    fn bodies(&self) -> Box<dyn Iterator<Item = &Body> + '_>;

    /// Total number of attached shapes across all bodies
    fn shape_count(&self) -> usize {
        self.bodies().map(|body| body.shapes.len()).sum()
    }
}

/// In-memory world that keeps bodies in insertion order
#[derive(Debug, Default)]
pub struct WorldSnapshot {
    bodies: SlotMap<BodyId, Body>,
    order: Vec<BodyId>,
}

impl WorldSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a body at the end of the traversal order and return its id
    pub fn add_body(&mut self, body: Body) -> BodyId {
        let id = self.bodies.insert_with_key(|id| Body { id, ..body });
        self.order.push(id);
        id
    }

    /// Remove a body; the survivors keep their relative order
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        let body = self.bodies.remove(id)?;
        self.order.retain(|other| *other != id);
        Some(body)
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
        self.order.clear();
    }
}

impl PhysicsWorld for WorldSnapshot {
    fn bodies(&self) -> Box<dyn Iterator<Item = &Body> + '_> {
        Box::new(self.order.iter().filter_map(|id| self.bodies.get(*id)))
    }
}
