//! Uploaded per-shape geometry and its ownership

use crate::geometry::Geometry;
use crate::scene::GeometryHandle;
use crate::shape::ShapeId;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Identity of one uploaded complex-shape geometry
    pub struct GeometryToken;
}

/// What the registry knows about an uploaded geometry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegistryEntry {
    pub handle: GeometryHandle,
    /// Shape the geometry was generated from
    pub shape: ShapeId,
    pub vertex_count: usize,
    pub index_count: usize,
}

/// Registry of geometry generated for complex shapes
///
/// Every entry belongs to exactly one tracked renderable. Each shape also keeps
/// the set of tokens that are current for it; a renderable whose token has
/// left that set is stale and gets rebuilt on the next update.
#[derive(Debug, Default)]
pub struct GeometryRegistry {
    entries: SlotMap<GeometryToken, RegistryEntry>,
    shape_tokens: FxHashMap<ShapeId, SmallVec<[GeometryToken; 1]>>,
}

impl GeometryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record uploaded geometry for `shape` and make it current
    pub fn insert(&mut self, shape: ShapeId, handle: GeometryHandle, geometry: &Geometry) -> GeometryToken {
        let token = self.entries.insert(RegistryEntry {
            handle,
            shape,
            vertex_count: geometry.vertex_count(),
            index_count: geometry.index_count(),
        });
        self.shape_tokens.entry(shape).or_default().push(token);
        token
    }

    pub fn get(&self, token: GeometryToken) -> Option<&RegistryEntry> {
        self.entries.get(token)
    }

    pub fn contains(&self, token: GeometryToken) -> bool {
        self.entries.contains_key(token)
    }

    /// Whether `token` is live and still current for `shape`
    pub fn is_current(&self, shape: ShapeId, token: GeometryToken) -> bool {
        self.entries.contains_key(token)
            && self
                .shape_tokens
                .get(&shape)
                .is_some_and(|tokens| tokens.contains(&token))
    }

    /// Remove an entry; the caller disposes the returned handle
    pub fn remove(&mut self, token: GeometryToken) -> Option<RegistryEntry> {
        let entry = self.entries.remove(token)?;
        if let Some(tokens) = self.shape_tokens.get_mut(&entry.shape) {
            tokens.retain(|t| *t != token);
            if tokens.is_empty() {
                self.shape_tokens.remove(&entry.shape);
            }
        }
        Some(entry)
    }

    /// Mark every entry of `shape` stale; returns false if none was current
    pub fn forget_shape(&mut self, shape: ShapeId) -> bool {
        self.shape_tokens.remove(&shape).is_some()
    }

    /// Remove everything, returning the entries whose handles need disposal
    pub fn drain(&mut self) -> Vec<RegistryEntry> {
        self.shape_tokens.clear();
        self.entries.drain().map(|(_, entry)| entry).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Vertices held by all registered geometry
    pub fn vertex_total(&self) -> usize {
        self.entries.values().map(|entry| entry.vertex_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::box_edges;
    use crate::shape::Shape;

    #[test]
    fn test_current_tokens() {
        let shape = Shape::trimesh(Vec::new(), Vec::new());
        let other = Shape::trimesh(Vec::new(), Vec::new());
        let geometry = box_edges();
        let mut registry = GeometryRegistry::new();

        let a = registry.insert(shape.id(), GeometryHandle(1), &geometry);
        let b = registry.insert(shape.id(), GeometryHandle(2), &geometry);
        assert!(registry.is_current(shape.id(), a));
        assert!(registry.is_current(shape.id(), b));
        assert!(!registry.is_current(other.id(), a));
        assert_eq!(registry.vertex_total(), 48);

        assert_eq!(registry.remove(a).map(|e| e.handle), Some(GeometryHandle(1)));
        assert!(!registry.is_current(shape.id(), a));
        assert!(registry.is_current(shape.id(), b));

        assert!(registry.forget_shape(shape.id()));
        assert!(!registry.is_current(shape.id(), b));
        assert!(registry.contains(b));
        assert!(!registry.forget_shape(shape.id()));

        assert_eq!(registry.drain().len(), 1);
        assert!(registry.is_empty());
    }
}
