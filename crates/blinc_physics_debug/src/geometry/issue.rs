//! Recoverable problems found while building shape geometry

use super::Geometry;
use thiserror::Error;

/// Malformed input skipped by a geometry builder
///
/// Builders never fail: the offending element is dropped and one of these is
/// reported alongside the geometry that could be built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryIssue {
    /// Triangle references a vertex past the end of the vertex buffer
    #[error("triangle {triangle} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfBounds {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },

    /// Index buffer ends with fewer than three indices
    #[error("index buffer length {len} is not a multiple of 3, trailing indices ignored")]
    IncompleteTriangle { len: usize },

    /// Hull face references a vertex past the end of the vertex buffer
    #[error("face {face} references vertex {index}, but the hull has {vertex_count} vertices")]
    FaceIndexOutOfBounds {
        face: usize,
        index: u32,
        vertex_count: usize,
    },

    /// Hull face with fewer than three vertices
    #[error("face {face} has {count} vertices, at least 3 are needed")]
    DegenerateFace { face: usize, count: usize },

    /// Tessellation count above the supported maximum
    #[error("{requested} radial segments requested, clamped to {max}")]
    SegmentsClamped { requested: u32, max: u32 },

    /// Heightfield row whose length differs from the first row
    #[error("heightfield row {row} has {len} samples, expected {expected}")]
    RaggedHeightfield {
        row: usize,
        len: usize,
        expected: usize,
    },
}

/// Builder output: the geometry plus everything that had to be skipped
#[derive(Clone, Debug)]
pub struct BuiltGeometry {
    pub geometry: Geometry,
    pub issues: Vec<GeometryIssue>,
}

impl BuiltGeometry {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}
