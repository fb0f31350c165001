//! Physics-to-scene synchronizer
//!
//! [`ShapeDebugger`] mirrors every shape of every body in a [`PhysicsWorld`] as
//! an outline renderable under one container node. Call
//! [`update`](ShapeDebugger::update) once per frame after stepping physics.
//!
//! # Example
//!
//! ```ignore
//! let mut scene = HeadlessScene::new();
//! let root = scene.root();
//! let mut debugger = ShapeDebugger::new(&mut scene, root, DebugOptions::default());
//!
//! loop {
//!     step_physics(&mut world);
//!     debugger.update(&mut scene, &world);
//!     render(&scene);
//! }
//! ```

mod registry;
mod stats;


pub use registry::{GeometryRegistry, GeometryToken, RegistryEntry};
pub use stats::{Diagnostic, SyncStats};

use crate::events::{ListenerId, Listeners, ShapeEvent, ShapeEventKind};
use crate::geometry::{build_complex, SharedPrimitives, Topology};
use crate::materials::DebugMaterial;
use crate::math::{Color, Vec3};
use crate::options::DebugOptions;
use crate::scene::{GeometryHandle, MaterialHandle, NodeId, RenderKind, SceneBackend};
use crate::shape::{Shape, ShapeId, ShapeKind, ShapeTag};
use crate::world::{Body, PhysicsWorld};
use std::sync::Arc;

/// Bookkeeping for the renderable at one flattened index
#[derive(Clone, Copy, Debug)]
struct TrackedSlot {
    node: NodeId,
    tag: ShapeTag,
    token: Option<GeometryToken>,
}

/// This instance's uploads of the shared primitives
#[derive(Debug, Default)]
struct PrimitiveHandles {
    sphere: Option<GeometryHandle>,
    cuboid: Option<GeometryHandle>,
    plane: Option<GeometryHandle>,
}

impl PrimitiveHandles {
    fn slot(&mut self, tag: ShapeTag) -> Option<&mut Option<GeometryHandle>> {
        match tag {
            ShapeTag::Sphere => Some(&mut self.sphere),
            ShapeTag::Box => Some(&mut self.cuboid),
            ShapeTag::Plane => Some(&mut self.plane),
            _ => None,
        }
    }

    fn take_all(&mut self) -> impl Iterator<Item = GeometryHandle> {
        [self.sphere.take(), self.cuboid.take(), self.plane.take()]
            .into_iter()
            .flatten()
    }
}

/// Keeps outline renderables in step with a physics world
///
/// Renderables are matched to shapes by flattened index: body order, then
/// shape order within each body. A renderable is reused while the shape at its
/// index keeps the same kind (and, for cylinders, hulls, meshes and
/// heightfields, the same generated geometry), and rebuilt otherwise.
///
/// The debugger does not own the scene. Call [`destroy`](Self::destroy) with
/// the same scene before dropping it to release every node, geometry and
/// material it created.
pub struct ShapeDebugger {
    container: NodeId,
    line_material: MaterialHandle,
    mesh_material: MaterialHandle,
    line_desc: DebugMaterial,
    mesh_desc: DebugMaterial,
    primitives: Arc<SharedPrimitives>,
    primitive_handles: PrimitiveHandles,
    slots: Vec<TrackedSlot>,
    registry: GeometryRegistry,
    listeners: Listeners,
    color: Color,
    offset: f32,
    visible: bool,
    destroyed: bool,
    last_stats: SyncStats,
    diagnostics: Vec<Diagnostic>,
}

impl ShapeDebugger {
    /// Create a debugger whose container is attached under `parent`
    pub fn new(scene: &mut dyn SceneBackend, parent: NodeId, options: DebugOptions) -> Self {
        let primitives = SharedPrimitives::new(options.primitives.clone());
        Self::with_primitives(scene, parent, options, primitives)
    }

    /// Create a debugger that draws from an existing primitive set
    ///
    /// The primitive set's own tessellation settings take precedence over
    /// `options.primitives`.
    pub fn with_primitives(
        scene: &mut dyn SceneBackend,
        parent: NodeId,
        options: DebugOptions,
        primitives: Arc<SharedPrimitives>,
    ) -> Self {
        let container = scene.create_group();
        scene.attach(parent, container);
        scene.set_visible(container, options.visible);

        let line_desc = DebugMaterial::lines(options.color, options.offset);
        let mesh_desc = DebugMaterial::mesh(options.color, options.offset);
        let line_material = scene.create_material(&line_desc);
        let mesh_material = scene.create_material(&mesh_desc);

        tracing::debug!(?container, ?parent, offset = options.offset, "created shape debugger");

        Self {
            container,
            line_material,
            mesh_material,
            line_desc,
            mesh_desc,
            primitives,
            primitive_handles: PrimitiveHandles::default(),
            slots: Vec::new(),
            registry: GeometryRegistry::new(),
            listeners: Listeners::new(),
            color: options.color,
            offset: options.offset,
            visible: options.visible,
            destroyed: false,
            last_stats: SyncStats::default(),
            diagnostics: Vec::new(),
        }
    }

    /// Reconcile renderables with the current state of `world`
    ///
    /// Fires exactly one init or update event per shape, in traversal order.
    /// Does nothing once the debugger has been destroyed.
    pub fn update(&mut self, scene: &mut dyn SceneBackend, world: &dyn PhysicsWorld) -> SyncStats {
        if self.destroyed {
            return SyncStats::default();
        }

        self.diagnostics.clear();
        let mut stats = SyncStats::default();
        let mut index = 0;

        for body in world.bodies() {
            for slot in &body.shapes {
                let shape = slot.shape.as_ref();
                let created = self.reconcile(scene, index, body, shape);
                let node = self.slots[index].node;

                if let Some(scale) = render_scale(shape.kind()) {
                    scene.set_scale(node, scale);
                }
                let (position, orientation) = slot.world_transform(body);
                scene.set_transform(node, position, orientation);

                let kind = if created {
                    stats.created += 1;
                    ShapeEventKind::Init
                } else {
                    stats.reused += 1;
                    ShapeEventKind::Update
                };
                self.listeners.emit(&ShapeEvent {
                    kind,
                    body,
                    renderable: node,
                    shape,
                    index,
                });

                index += 1;
            }
        }

        if index < self.slots.len() {
            for slot in self.slots.split_off(index) {
                self.release(scene, slot);
                stats.removed += 1;
            }
        }

        stats.tracked = self.slots.len();
        stats.diagnostics = self.diagnostics.len();
        tracing::trace!(
            tracked = stats.tracked,
            created = stats.created,
            reused = stats.reused,
            removed = stats.removed,
            "debug shapes synchronized"
        );
        self.last_stats = stats;
        stats
    }

    /// Ensure slot `index` holds a renderable matching `shape`; returns true if built
    fn reconcile(&mut self, scene: &mut dyn SceneBackend, index: usize, body: &Body, shape: &Shape) -> bool {
        if let Some(existing) = self.slots.get(index) {
            if self.matches(existing, shape) {
                return false;
            }
        }

        // The old renderable is disposed before its replacement is uploaded
        let old = self.slots.get(index).copied();
        if let Some(old) = old {
            self.release(scene, old);
        }
        let fresh = self.build(scene, body, shape);
        match old {
            Some(_) => self.slots[index] = fresh,
            None => self.slots.push(fresh),
        }
        true
    }

    /// Primitives match by kind alone, complex kinds also need current geometry
    fn matches(&self, slot: &TrackedSlot, shape: &Shape) -> bool {
        if slot.tag != shape.tag() {
            return false;
        }
        if !slot.tag.is_complex() {
            return true;
        }
        slot.token
            .is_some_and(|token| self.registry.is_current(shape.id(), token))
    }

    fn build(&mut self, scene: &mut dyn SceneBackend, body: &Body, shape: &Shape) -> TrackedSlot {
        let tag = shape.tag();
        let mut token = None;

        let node = if let Some(handle) = self.primitive_handle(scene, tag) {
            scene.create_renderable(RenderKind::LineSegments, Some(handle), Some(self.line_material))
        } else if let Some(built) = build_complex(shape.kind()) {
            for issue in built.issues {
                let diagnostic = Diagnostic {
                    body: body.id,
                    shape: shape.id(),
                    issue,
                };
                tracing::warn!(shape = %shape.id(), kind = %tag, "{}", diagnostic.issue);
                self.diagnostics.push(diagnostic);
            }

            let handle = scene.upload_geometry(&built.geometry);
            token = Some(self.registry.insert(shape.id(), handle, &built.geometry));

            let (kind, material) = match built.geometry.topology {
                Topology::Lines => (RenderKind::LineSegments, self.line_material),
                Topology::Triangles => (RenderKind::Mesh, self.mesh_material),
            };
            scene.create_renderable(kind, Some(handle), Some(material))
        } else {
            scene.create_renderable(RenderKind::Empty, None, None)
        };

        scene.attach(self.container, node);
        tracing::debug!(?node, shape = %shape.id(), kind = %tag, "created debug renderable");
        TrackedSlot { node, tag, token }
    }

    /// Upload a shared primitive on first use; `None` for non-primitive kinds
    fn primitive_handle(&mut self, scene: &mut dyn SceneBackend, tag: ShapeTag) -> Option<GeometryHandle> {
        let cached = self.primitive_handles.slot(tag)?;
        if let Some(handle) = *cached {
            return Some(handle);
        }
        let geometry = self.primitives.get(tag)?;
        let handle = scene.upload_geometry(&geometry);
        *cached = Some(handle);
        Some(handle)
    }

    fn release(&mut self, scene: &mut dyn SceneBackend, slot: TrackedSlot) {
        scene.remove(slot.node);
        if let Some(entry) = slot.token.and_then(|token| self.registry.remove(token)) {
            scene.dispose_geometry(entry.handle);
        }
        tracing::debug!(node = ?slot.node, kind = %slot.tag, "released debug renderable");
    }

    /// Change the outline color of every renderable
    pub fn set_color(&mut self, scene: &mut dyn SceneBackend, color: Color) {
        if self.destroyed {
            return;
        }
        self.color = color;
        self.line_desc.color = color;
        self.mesh_desc.color = color;
        self.push_materials(scene);
    }

    /// Change how far outlines are pushed along vertex normals
    pub fn set_offset(&mut self, scene: &mut dyn SceneBackend, offset: f32) {
        if self.destroyed {
            return;
        }
        self.offset = offset;
        self.line_desc.normal_offset = offset;
        self.mesh_desc.normal_offset = offset;
        self.push_materials(scene);
    }

    fn push_materials(&self, scene: &mut dyn SceneBackend) {
        scene.update_material(self.line_material, &self.line_desc);
        scene.update_material(self.mesh_material, &self.mesh_desc);
    }

    /// Show or hide the whole debug container
    pub fn set_visible(&mut self, scene: &mut dyn SceneBackend, visible: bool) {
        if self.destroyed {
            return;
        }
        self.visible = visible;
        scene.set_visible(self.container, visible);
    }

    /// Release every renderable and generated geometry
    ///
    /// Materials, primitives and the container survive, so the debugger can be
    /// updated again afterwards.
    pub fn clear(&mut self, scene: &mut dyn SceneBackend) {
        if self.destroyed {
            return;
        }
        let released = self.slots.len();
        for slot in std::mem::take(&mut self.slots) {
            self.release(scene, slot);
        }
        for entry in self.registry.drain() {
            scene.dispose_geometry(entry.handle);
        }
        self.diagnostics.clear();
        tracing::info!(released, "cleared debug shapes");
    }

    /// Release everything this debugger created, including its container
    ///
    /// Listeners are dropped and later calls become no-ops.
    pub fn destroy(&mut self, scene: &mut dyn SceneBackend) {
        if self.destroyed {
            return;
        }
        self.clear(scene);

        scene.remove(self.container);
        scene.dispose_material(self.line_material);
        scene.dispose_material(self.mesh_material);
        for handle in self.primitive_handles.take_all() {
            scene.dispose_geometry(handle);
        }

        self.listeners.clear();
        self.destroyed = true;
        tracing::info!(container = ?self.container, "destroyed shape debugger");
    }

    /// Force the geometry of `shape` to be regenerated on the next update
    ///
    /// Needed after mutating a shape's data in place. Returns false if no
    /// renderable currently uses generated geometry for it.
    pub fn invalidate_shape(&mut self, shape: ShapeId) -> bool {
        self.registry.forget_shape(shape)
    }

    /// Listen for renderables built during an update
    pub fn on_init(&mut self, callback: impl FnMut(&ShapeEvent<'_>) + 'static) -> ListenerId {
        self.listeners.add(ShapeEventKind::Init, callback)
    }

    /// Listen for renderables reused during an update
    pub fn on_update(&mut self, callback: impl FnMut(&ShapeEvent<'_>) + 'static) -> ListenerId {
        self.listeners.add(ShapeEventKind::Update, callback)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Group node holding every renderable
    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn line_material(&self) -> MaterialHandle {
        self.line_material
    }

    pub fn mesh_material(&self) -> MaterialHandle {
        self.mesh_material
    }

    pub fn primitives(&self) -> &Arc<SharedPrimitives> {
        &self.primitives
    }

    /// Number of tracked renderables
    pub fn tracked_len(&self) -> usize {
        self.slots.len()
    }

    /// Renderable at a flattened index
    pub fn renderable(&self, index: usize) -> Option<NodeId> {
        self.slots.get(index).map(|slot| slot.node)
    }

    pub fn registry(&self) -> &GeometryRegistry {
        &self.registry
    }

    /// Number of live generated geometries
    pub fn registry_len(&self) -> usize {
        self.registry.len()
    }

    pub fn last_stats(&self) -> SyncStats {
        self.last_stats
    }

    /// Issues raised during the last update
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl std::fmt::Debug for ShapeDebugger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapeDebugger")
            .field("container", &self.container)
            .field("tracked", &self.slots.len())
            .field("registry", &self.registry.len())
            .field("visible", &self.visible)
            .field("destroyed", &self.destroyed)
            .finish()
    }
}

/// Instance scale that maps a unit primitive or mesh onto the shape
fn render_scale(kind: &ShapeKind) -> Option<Vec3> {
    match kind {
        ShapeKind::Sphere { radius } => Some(Vec3::splat(*radius)),
        ShapeKind::Box { half_extents } => Some(*half_extents * 2.0),
        ShapeKind::TriangleMesh { scale, .. } => Some(*scale),
        _ => None,
    }
}
