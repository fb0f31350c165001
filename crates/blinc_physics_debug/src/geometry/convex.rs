//! Convex hull tessellation

use super::{BuiltGeometry, Geometry, GeometryIssue, Vertex};
use crate::math::Vec3;

/// Fan-triangulate each hull face
///
/// Normals point from the hull origin through each vertex, which gives the
/// outline offset a consistent outward direction without per-face splitting.
/// Faces with fewer than three vertices or out-of-range indices are skipped.
pub fn convex_polyhedron(points: &[Vec3], faces: &[Vec<u32>]) -> BuiltGeometry {
    let mut issues = Vec::new();
    let mut indices = Vec::new();

    for (face, loop_indices) in faces.iter().enumerate() {
        if loop_indices.len() < 3 {
            issues.push(GeometryIssue::DegenerateFace {
                face,
                count: loop_indices.len(),
            });
            continue;
        }
        if let Some(&index) = loop_indices.iter().find(|&&i| i as usize >= points.len()) {
            issues.push(GeometryIssue::FaceIndexOutOfBounds {
                face,
                index,
                vertex_count: points.len(),
            });
            continue;
        }

        let first = loop_indices[0];
        for pair in loop_indices[1..].windows(2) {
            indices.extend_from_slice(&[first, pair[0], pair[1]]);
        }
    }

    let vertices = if indices.is_empty() {
        Vec::new()
    } else {
        points.iter().map(|p| Vertex::radial(*p)).collect()
    };

    BuiltGeometry {
        geometry: Geometry::triangles(vertices, indices),
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_cube() -> (Vec<Vec3>, Vec<Vec<u32>>) {
        let points = vec![
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-1.0, 1.0, 1.0),
        ];
        let faces = vec![
            vec![3, 2, 1, 0],
            vec![4, 5, 6, 7],
            vec![5, 4, 0, 1],
            vec![2, 3, 7, 6],
            vec![0, 4, 7, 3],
            vec![1, 2, 6, 5],
        ];
        (points, faces)
    }

    #[test]
    fn test_quads_become_two_triangles() {
        let (points, faces) = unit_cube();
        let built = convex_polyhedron(&points, &faces);
        assert!(built.is_clean());
        assert_eq!(built.geometry.primitive_count(), 12);
        assert_eq!(built.geometry.vertex_count(), 8);

        let expected = 1.0 / 3.0f32.sqrt();
        for vertex in &built.geometry.vertices {
            for c in vertex.normal {
                assert!((c.abs() - expected).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_bad_faces_are_reported() {
        let (points, mut faces) = unit_cube();
        faces.push(vec![0, 1]);
        faces.push(vec![0, 1, 42]);

        let built = convex_polyhedron(&points, &faces);
        assert_eq!(built.geometry.primitive_count(), 12);
        assert_eq!(
            built.issues,
            vec![
                GeometryIssue::DegenerateFace { face: 6, count: 2 },
                GeometryIssue::FaceIndexOutOfBounds {
                    face: 7,
                    index: 42,
                    vertex_count: 8
                },
            ]
        );
    }
}
