//! Debug geometry: buffers, shared primitives and per-shape builders

mod buffer;
mod convex;
mod cylinder;
mod heightfield;
mod issue;
mod primitives;
mod trimesh;

pub use buffer::{position_key, BoundingBox, Geometry, Topology, Vertex, POSITION_EPSILON};
pub use convex::convex_polyhedron;
pub use cylinder::{cylinder, MAX_RADIAL_SEGMENTS};
pub use heightfield::heightfield;
pub use issue::{BuiltGeometry, GeometryIssue};
pub use primitives::{box_edges, plane_grid, sphere_rings, PrimitiveOptions, SharedPrimitives};
pub use trimesh::triangle_mesh;

use crate::shape::ShapeKind;

/// Generate the dedicated geometry for a complex shape
///
/// Returns `None` for kinds drawn with a shared primitive or with nothing.
pub fn build_complex(kind: &ShapeKind) -> Option<BuiltGeometry> {
    let built = match kind {
        ShapeKind::Cylinder {
            radius_top,
            radius_bottom,
            height,
            radial_segments,
        } => cylinder(*radius_top, *radius_bottom, *height, *radial_segments),
        ShapeKind::ConvexPolyhedron { vertices, faces } => convex_polyhedron(vertices, faces),
        ShapeKind::TriangleMesh { vertices, indices, .. } => triangle_mesh(vertices, indices),
        ShapeKind::Heightfield { data, element_size } => heightfield(data, *element_size),
        ShapeKind::Sphere { .. } | ShapeKind::Box { .. } | ShapeKind::Plane | ShapeKind::Particle => {
            return None
        }
    };
    Some(built)
}
