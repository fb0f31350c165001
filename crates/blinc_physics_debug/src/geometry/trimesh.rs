//! Triangle mesh tessellation

use super::{position_key, BuiltGeometry, Geometry, GeometryIssue, Vertex};
use crate::math::Vec3;
use rustc_hash::FxHashMap;

/// Build an indexed mesh, welding vertices that share a position
///
/// Only referenced vertices are emitted. Triangles that reference a missing
/// vertex are dropped, as are trailing indices that do not form a triangle.
pub fn triangle_mesh(points: &[Vec3], indices: &[u32]) -> BuiltGeometry {
    let mut issues = Vec::new();
    if indices.len() % 3 != 0 {
        issues.push(GeometryIssue::IncompleteTriangle { len: indices.len() });
    }

    let mut lookup: FxHashMap<[u32; 3], u32> = FxHashMap::default();
    let mut vertices: Vec<Vertex> = Vec::new();
    let mut welded: Vec<u32> = Vec::with_capacity(indices.len());

    for (triangle, corners) in indices.chunks_exact(3).enumerate() {
        if let Some(&index) = corners.iter().find(|&&i| i as usize >= points.len()) {
            issues.push(GeometryIssue::IndexOutOfBounds {
                triangle,
                index,
                vertex_count: points.len(),
            });
            continue;
        }

        for &corner in corners {
            let position = points[corner as usize].to_array();
            let index = *lookup.entry(position_key(position)).or_insert_with(|| {
                vertices.push(Vertex::new(position, [0.0; 3]));
                (vertices.len() - 1) as u32
            });
            welded.push(index);
        }
    }

    let mut geometry = Geometry::triangles(vertices, welded);
    geometry.compute_vertex_normals();
    BuiltGeometry { geometry, issues }
}
