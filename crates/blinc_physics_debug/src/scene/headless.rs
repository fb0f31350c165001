//! In-memory scene graph

use super::{GeometryHandle, MaterialHandle, NodeId, RenderKind, SceneBackend};
use crate::geometry::Geometry;
use crate::materials::DebugMaterial;
use crate::math::{Quat, Vec3};
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use smallvec::SmallVec;

/// What a node is
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Group,
    Renderable(RenderKind),
}

/// A node with its local transform and hierarchy links
#[derive(Clone, Debug)]
pub struct SceneNode {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: SmallVec<[NodeId; 4]>,
    pub position: Vec3,
    pub orientation: Quat,
    pub scale: Vec3,
    pub visible: bool,
    pub geometry: Option<GeometryHandle>,
    pub material: Option<MaterialHandle>,
}

impl SceneNode {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: SmallVec::new(),
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            scale: Vec3::ONE,
            visible: true,
            geometry: None,
            material: None,
        }
    }
}

/// Lifetime resource counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SceneCounters {
    pub geometries_uploaded: usize,
    pub geometries_disposed: usize,
    pub materials_created: usize,
    pub materials_disposed: usize,
    pub nodes_created: usize,
    pub nodes_freed: usize,
    /// Most geometries alive at the same time
    pub peak_live_geometries: usize,
}

/// Scene graph kept entirely in memory
///
/// Holds a root group plus copies of every uploaded geometry and material so
/// tests can inspect exactly what a renderer would have received.
pub struct HeadlessScene {
    nodes: SlotMap<NodeId, SceneNode>,
    root: NodeId,
    geometries: FxHashMap<GeometryHandle, Geometry>,
    materials: FxHashMap<MaterialHandle, DebugMaterial>,
    next_handle: u64,
    counters: SceneCounters,
}

impl Default for HeadlessScene {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessScene {
    /// Create a scene containing only the root group
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(SceneNode::new(NodeKind::Group));
        Self {
            nodes,
            root,
            geometries: FxHashMap::default(),
            materials: FxHashMap::default(),
            next_handle: 1,
            counters: SceneCounters::default(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Live nodes, including the root
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    pub fn geometry(&self, handle: GeometryHandle) -> Option<&Geometry> {
        self.geometries.get(&handle)
    }

    pub fn material(&self, handle: MaterialHandle) -> Option<&DebugMaterial> {
        self.materials.get(&handle)
    }

    pub fn live_geometries(&self) -> usize {
        self.geometries.len()
    }

    pub fn live_materials(&self) -> usize {
        self.materials.len()
    }

    pub fn counters(&self) -> SceneCounters {
        self.counters
    }

    /// Whether the node and all of its ancestors are visible
    pub fn is_effectively_visible(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            match self.nodes.get(node_id) {
                Some(node) if node.visible => current = node.parent,
                _ => return false,
            }
        }
        true
    }

    fn allocate_handle(&mut self) -> u64 {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle
    }

    fn insert_node(&mut self, node: SceneNode) -> NodeId {
        self.counters.nodes_created += 1;
        self.nodes.insert(node)
    }

    fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.nodes.get_mut(child).and_then(|node| node.parent.take()) else {
            return;
        };
        if let Some(parent) = self.nodes.get_mut(parent) {
            parent.children.retain(|c| *c != child);
        }
    }
}

impl SceneBackend for HeadlessScene {
    fn create_group(&mut self) -> NodeId {
        self.insert_node(SceneNode::new(NodeKind::Group))
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || !self.contains(parent) || !self.contains(child) {
            tracing::warn!(?parent, ?child, "ignoring attach of unknown or identical nodes");
            return;
        }
        self.detach(child);
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
    }

    fn remove(&mut self, node: NodeId) {
        if node == self.root || !self.contains(node) {
            return;
        }
        self.detach(node);

        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if let Some(removed) = self.nodes.remove(id) {
                self.counters.nodes_freed += 1;
                stack.extend(removed.children);
            }
        }
    }

    fn upload_geometry(&mut self, geometry: &Geometry) -> GeometryHandle {
        let handle = GeometryHandle(self.allocate_handle());
        self.geometries.insert(handle, geometry.clone());
        self.counters.geometries_uploaded += 1;
        self.counters.peak_live_geometries = self.counters.peak_live_geometries.max(self.geometries.len());
        handle
    }

    fn dispose_geometry(&mut self, handle: GeometryHandle) {
        if self.geometries.remove(&handle).is_some() {
            self.counters.geometries_disposed += 1;
        } else {
            tracing::warn!(?handle, "dispose of unknown geometry");
        }
    }

    fn create_material(&mut self, material: &DebugMaterial) -> MaterialHandle {
        let handle = MaterialHandle(self.allocate_handle());
        self.materials.insert(handle, material.clone());
        self.counters.materials_created += 1;
        handle
    }

    fn update_material(&mut self, handle: MaterialHandle, material: &DebugMaterial) {
        if let Some(stored) = self.materials.get_mut(&handle) {
            *stored = material.clone();
        }
    }

    fn dispose_material(&mut self, handle: MaterialHandle) {
        if self.materials.remove(&handle).is_some() {
            self.counters.materials_disposed += 1;
        } else {
            tracing::warn!(?handle, "dispose of unknown material");
        }
    }

    fn create_renderable(
        &mut self,
        kind: RenderKind,
        geometry: Option<GeometryHandle>,
        material: Option<MaterialHandle>,
    ) -> NodeId {
        let mut node = SceneNode::new(NodeKind::Renderable(kind));
        node.geometry = geometry;
        node.material = material;
        self.insert_node(node)
    }

    fn set_transform(&mut self, node: NodeId, position: Vec3, orientation: Quat) {
        if let Some(node) = self.nodes.get_mut(node) {
            node.position = position;
            node.orientation = orientation;
        }
    }

    fn set_scale(&mut self, node: NodeId, scale: Vec3) {
        if let Some(node) = self.nodes.get_mut(node) {
            node.scale = scale;
        }
    }

    fn set_visible(&mut self, node: NodeId, visible: bool) {
        if let Some(node) = self.nodes.get_mut(node) {
            node.visible = visible;
        }
    }
}
