//! Heightfield wireframe

use super::{BuiltGeometry, Geometry, GeometryIssue, Vertex};

/// Connect each sample to its +X and +Y neighbours with line segments
///
/// `data[x][y]` is the height at `(x * element_size, y * element_size)`.
/// A non-positive element size falls back to 1. Rows shorter than the first
/// are reported and connected only where both samples exist.
pub fn heightfield(data: &[Vec<f32>], element_size: f32) -> BuiltGeometry {
    let size = if element_size > 0.0 { element_size } else { 1.0 };
    let expected = data.first().map_or(0, Vec::len);

    let issues = data
        .iter()
        .enumerate()
        .filter(|(_, row)| row.len() != expected)
        .map(|(row, samples)| GeometryIssue::RaggedHeightfield {
            row,
            len: samples.len(),
            expected,
        })
        .collect();

    let normal = [0.0, 0.0, 1.0];
    let point = |x: usize, y: usize, h: f32| Vertex::new([x as f32 * size, y as f32 * size, h], normal);
    let mut vertices = Vec::new();

    for (xi, row) in data.iter().enumerate() {
        for (yi, &height) in row.iter().enumerate() {
            if let Some(&next) = data.get(xi + 1).and_then(|r| r.get(yi)) {
                vertices.push(point(xi, yi, height));
                vertices.push(point(xi + 1, yi, next));
            }
            if let Some(&next) = row.get(yi + 1) {
                vertices.push(point(xi, yi, height));
                vertices.push(point(xi, yi + 1, next));
            }
        }
    }

    BuiltGeometry {
        geometry: Geometry::lines(vertices),
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    #[test]
    fn test_grid_segments() {
        let data = vec![vec![0.0, 1.0, 0.0], vec![1.0, 2.0, 1.0], vec![0.0, 1.0, 0.0]];
        let built = heightfield(&data, 0.5);
        assert!(built.is_clean());
        // 3 rows * 2 + 3 columns * 2
        assert_eq!(built.geometry.primitive_count(), 12);
        assert_eq!(built.geometry.bounding_box.max, Vec3::new(1.0, 1.0, 2.0));
    }

    #[test]
    fn test_zero_element_size_defaults_to_one() {
        let built = heightfield(&[vec![0.0, 0.0], vec![0.0, 0.0]], 0.0);
        assert_eq!(built.geometry.bounding_box.max, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_ragged_rows() {
        let data = vec![vec![0.0, 0.0, 0.0], vec![0.0]];
        let built = heightfield(&data, 1.0);
        assert_eq!(
            built.issues,
            vec![GeometryIssue::RaggedHeightfield {
                row: 1,
                len: 1,
                expected: 3
            }]
        );
        // Two along the first row, one to the single sample in the second
        assert_eq!(built.geometry.primitive_count(), 3);
    }
}
