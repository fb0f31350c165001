//! Solid cylinder tessellation

use super::{BuiltGeometry, Geometry, GeometryIssue, Vertex};
use std::f32::consts::TAU;

/// Most segments a cylinder is tessellated with
pub const MAX_RADIAL_SEGMENTS: u32 = 1024;

/// Build a closed, Y-aligned cylinder with smooth normals
///
/// Side and cap rims are generated separately and fused by position, so
/// normals are averaged across the seam and along the rim edges. Segment
/// counts are clamped to `3..=MAX_RADIAL_SEGMENTS`; exceeding the maximum is
/// reported as an issue.
pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> BuiltGeometry {
    let mut issues = Vec::new();
    if radial_segments > MAX_RADIAL_SEGMENTS {
        issues.push(GeometryIssue::SegmentsClamped {
            requested: radial_segments,
            max: MAX_RADIAL_SEGMENTS,
        });
    }
    let segments = radial_segments.clamp(3, MAX_RADIAL_SEGMENTS);
    let half_height = height / 2.0;

    // The last column wraps to angle 0 so the seam positions are bit-identical
    let angle = |x: u32| ((x % segments) as f32 / segments as f32) * TAU;
    let rim = |radius: f32, y: f32, x: u32| {
        let (sin, cos) = angle(x).sin_cos();
        Vertex::new([radius * sin, y, radius * cos], [0.0; 3])
    };

    let mut vertices = Vec::with_capacity((segments as usize + 1) * 4 + 2);
    let mut indices = Vec::with_capacity(segments as usize * 12);

    // Sides
    for (radius, y) in [(radius_top, half_height), (radius_bottom, -half_height)] {
        for x in 0..=segments {
            vertices.push(rim(radius, y, x));
        }
    }
    for x in 0..segments {
        let a = x;
        let b = a + segments + 1;
        let c = b + 1;
        let d = a + 1;
        indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    // Caps
    if radius_top > 0.0 {
        let center = vertices.len() as u32;
        vertices.push(Vertex::new([0.0, half_height, 0.0], [0.0; 3]));
        for x in 0..=segments {
            vertices.push(rim(radius_top, half_height, x));
        }
        for x in 0..segments {
            indices.extend_from_slice(&[center, center + x + 1, center + x + 2]);
        }
    }
    if radius_bottom > 0.0 {
        let center = vertices.len() as u32;
        vertices.push(Vertex::new([0.0, -half_height, 0.0], [0.0; 3]));
        for x in 0..=segments {
            vertices.push(rim(radius_bottom, -half_height, x));
        }
        for x in 0..segments {
            indices.extend_from_slice(&[center, center + x + 2, center + x + 1]);
        }
    }

    let mut geometry = Geometry::triangles(vertices, indices);
    geometry.merge_vertices();
    geometry.compute_vertex_normals();
    BuiltGeometry { geometry, issues }
}
