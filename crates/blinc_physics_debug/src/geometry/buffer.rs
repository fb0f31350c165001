//! Vertex format and geometry buffers

use crate::math::Vec3;
use rustc_hash::FxHashMap;

/// Components smaller than this are treated as exactly zero when keying positions
pub const POSITION_EPSILON: f32 = 1e-10;

/// How the vertex/index stream is assembled into primitives
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topology {
    /// Every pair of vertices (or indices) is one segment
    Lines,
    /// Every triple of vertices (or indices) is one triangle
    Triangles,
}

/// Vertex data for debug geometry
///
/// The normal is what the renderer pushes vertices along when a material has a
/// non-zero normal offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Vertex {
    /// Position in local space
    pub position: [f32; 3],
    /// Normal vector
    pub normal: [f32; 3],
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }

    /// Create a vertex whose normal points away from the local origin
    pub fn radial(position: Vec3) -> Self {
        Self::new(position.to_array(), position.normalize().to_array())
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from(self.position)
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoundingBox {
    /// Create an empty bounding box
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Expand to include a point
    pub fn expand_to_include(&mut self, point: Vec3) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Size (width, height, depth)
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// CPU-side geometry ready to be uploaded to a scene backend
#[derive(Clone, Debug)]
pub struct Geometry {
    /// Primitive assembly
    pub topology: Topology,
    /// Vertex data
    pub vertices: Vec<Vertex>,
    /// Index data; empty means the vertex stream is used in order
    pub indices: Vec<u32>,
    /// Axis-aligned bounding box
    pub bounding_box: BoundingBox,
}

impl Geometry {
    /// Non-indexed line list
    pub fn lines(vertices: Vec<Vertex>) -> Self {
        Self::from_parts(Topology::Lines, vertices, Vec::new())
    }

    /// Indexed triangle list
    pub fn triangles(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self::from_parts(Topology::Triangles, vertices, indices)
    }

    fn from_parts(topology: Topology, vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        let mut geometry = Self {
            topology,
            vertices,
            indices,
            bounding_box: BoundingBox::empty(),
        };
        geometry.compute_bounds();
        geometry
    }

    /// Compute bounding box from vertex data
    pub fn compute_bounds(&mut self) {
        self.bounding_box = BoundingBox::empty();
        for vertex in &self.vertices {
            self.bounding_box.expand_to_include(vertex.position());
        }
    }

    pub fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Number of segments or triangles, depending on topology
    pub fn primitive_count(&self) -> usize {
        let elements = if self.is_indexed() {
            self.indices.len()
        } else {
            self.vertices.len()
        };
        match self.topology {
            Topology::Lines => elements / 2,
            Topology::Triangles => elements / 3,
        }
    }

    /// Triangles as vertex index triples (indexed or sequential)
    pub fn triangle_indices(&self) -> Vec<[usize; 3]> {
        if self.topology != Topology::Triangles {
            return Vec::new();
        }
        if self.is_indexed() {
            self.indices
                .chunks_exact(3)
                .map(|t| [t[0] as usize, t[1] as usize, t[2] as usize])
                .collect()
        } else {
            (0..self.vertices.len() / 3)
                .map(|t| [t * 3, t * 3 + 1, t * 3 + 2])
                .collect()
        }
    }

    /// Recompute smooth normals from triangle topology
    ///
    /// Face normals are accumulated unnormalized, so larger faces weigh more.
    pub fn compute_vertex_normals(&mut self) {
        if self.topology != Topology::Triangles {
            return;
        }

        let mut accumulated = vec![Vec3::ZERO; self.vertices.len()];
        for [i0, i1, i2] in self.triangle_indices() {
            if i0 >= accumulated.len() || i1 >= accumulated.len() || i2 >= accumulated.len() {
                continue;
            }
            let p0 = self.vertices[i0].position();
            let p1 = self.vertices[i1].position();
            let p2 = self.vertices[i2].position();
            let face = (p1 - p0).cross(p2 - p0);

            accumulated[i0] += face;
            accumulated[i1] += face;
            accumulated[i2] += face;
        }

        for (vertex, normal) in self.vertices.iter_mut().zip(accumulated) {
            vertex.normal = normal.normalize().to_array();
        }
    }

    /// Merge vertices sharing an exact position and rewrite the index buffer
    ///
    /// Normals of merged vertices are discarded; call `compute_vertex_normals`
    /// afterwards. Returns the number of vertices removed.
    pub fn merge_vertices(&mut self) -> usize {
        let before = self.vertices.len();
        let sequence: Vec<u32> = if self.is_indexed() {
            std::mem::take(&mut self.indices)
        } else {
            (0..before as u32).collect()
        };

        let mut lookup: FxHashMap<[u32; 3], u32> = FxHashMap::default();
        let mut merged: Vec<Vertex> = Vec::with_capacity(before);
        let mut remap: Vec<u32> = Vec::with_capacity(before);

        for vertex in &self.vertices {
            let key = position_key(vertex.position);
            let index = *lookup.entry(key).or_insert_with(|| {
                merged.push(*vertex);
                (merged.len() - 1) as u32
            });
            remap.push(index);
        }

        self.indices = sequence
            .into_iter()
            .filter_map(|i| remap.get(i as usize).copied())
            .collect();
        self.vertices = merged;
        before - self.vertices.len()
    }

    /// Raw vertex bytes for GPU upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index bytes for GPU upload
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Exact hash key for a position, with near-zero components snapped to zero
///
/// Snapping also folds `-0.0` into `0.0`.
pub fn position_key(position: [f32; 3]) -> [u32; 3] {
    position.map(|c| {
        let snapped = if c.abs() < POSITION_EPSILON { 0.0f32 } else { c };
        snapped.to_bits()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Geometry {
        let vertices = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ]
        .into_iter()
        .map(|p| Vertex::new(p, [0.0; 3]))
        .collect();
        Geometry::triangles(vertices, vec![0, 1, 2, 0, 2, 3])
    }

    #[test]
    fn test_vertex_normals_face_up() {
        let mut geom = quad();
        geom.compute_vertex_normals();
        for vertex in &geom.vertices {
            assert_eq!(vertex.normal, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_merge_vertices() {
        // Two triangles sharing an edge, stored unshared
        let points = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 0.0, -0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ];
        let vertices = points.into_iter().map(|p| Vertex::new(p, [0.0; 3])).collect();
        let mut geom = Geometry::from_parts(Topology::Triangles, vertices, Vec::new());

        assert_eq!(geom.merge_vertices(), 2);
        assert_eq!(geom.vertex_count(), 4);
        assert_eq!(geom.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(geom.primitive_count(), 2);
    }

    #[test]
    fn test_bounds_and_bytes() {
        let geom = quad();
        assert_eq!(geom.bounding_box.min, Vec3::ZERO);
        assert_eq!(geom.bounding_box.max, Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(geom.vertex_bytes().len(), 4 * std::mem::size_of::<Vertex>());
        assert_eq!(geom.index_bytes().len(), 6 * 4);
    }

    #[test]
    fn test_position_key_snaps_noise() {
        assert_eq!(position_key([1e-12, -0.0, 2.0]), position_key([0.0, 0.0, 2.0]));
        assert_ne!(position_key([1e-9, 0.0, 0.0]), position_key([0.0, 0.0, 0.0]));
    }
}
