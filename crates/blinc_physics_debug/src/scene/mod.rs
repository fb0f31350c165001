//! Rendering collaborator interface
//!
//! The debugger never touches a renderer directly. It drives a
//! [`SceneBackend`], which owns nodes, uploaded geometry and materials and hands
//! out opaque handles for them. [`HeadlessScene`] is an in-memory
//! implementation for tests and hosts without a GPU.

mod headless;

pub use headless::{HeadlessScene, NodeKind, SceneCounters, SceneNode};

use crate::geometry::Geometry;
use crate::materials::DebugMaterial;
use crate::math::{Quat, Vec3};
use slotmap::new_key_type;

new_key_type! {
    /// Node in a scene graph (group or renderable)
    pub struct NodeId;
}

/// Handle to geometry uploaded to a backend
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GeometryHandle(pub u64);

impl Default for GeometryHandle {
    fn default() -> Self {
        Self(0)
    }
}

/// Handle to a material created by a backend
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaterialHandle(pub u64);

impl Default for MaterialHandle {
    fn default() -> Self {
        Self(0)
    }
}

/// How a renderable draws its geometry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderKind {
    /// Line list
    LineSegments,
    /// Triangles, normally with a wireframe material
    Mesh,
    /// Transform-only placeholder that draws nothing
    Empty,
}

/// Scene graph and GPU resource operations needed by the debugger
///
/// Backends displace vertices along their normals by the material's
/// `normal_offset` when drawing. Operations on ids that are no longer live
/// must be ignored.
pub trait SceneBackend {
    /// Create an empty group node, not yet attached anywhere
    fn create_group(&mut self) -> NodeId;

    /// Make `child` a child of `parent`, detaching it from any previous parent
    fn attach(&mut self, parent: NodeId, child: NodeId);

    /// Detach `node` from its parent and free it along with its descendants
    ///
    /// Geometry and materials referenced by the freed nodes stay alive.
    fn remove(&mut self, node: NodeId);

    fn upload_geometry(&mut self, geometry: &Geometry) -> GeometryHandle;
    fn dispose_geometry(&mut self, handle: GeometryHandle);

    fn create_material(&mut self, material: &DebugMaterial) -> MaterialHandle;
    fn update_material(&mut self, handle: MaterialHandle, material: &DebugMaterial);
    fn dispose_material(&mut self, handle: MaterialHandle);

    /// Create a detached renderable node
    fn create_renderable(
        &mut self,
        kind: RenderKind,
        geometry: Option<GeometryHandle>,
        material: Option<MaterialHandle>,
    ) -> NodeId;

    /// Set a node's local position and orientation
    fn set_transform(&mut self, node: NodeId, position: Vec3, orientation: Quat);
    fn set_scale(&mut self, node: NodeId, scale: Vec3);
    fn set_visible(&mut self, node: NodeId, visible: bool);
}
