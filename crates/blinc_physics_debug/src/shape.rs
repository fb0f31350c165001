//! Collision shape descriptions mirrored by the debugger
//!
//! Shapes are immutable once built. A shape's identity is its [`ShapeId`]: share
//! an `Arc<Shape>` to attach the same shape twice, build a new `Shape` to replace
//! one.

use crate::math::Vec3;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SHAPE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique shape identity, never reused
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(u64);

impl ShapeId {
    fn next() -> Self {
        Self(NEXT_SHAPE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw id value (for logging)
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shape-{}", self.0)
    }
}

/// Shape parameters, one variant per supported collision shape
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeKind {
    /// Sphere centered on the shape origin
    Sphere {
        /// Radius
        radius: f32,
    },
    /// Box centered on the shape origin
    Box {
        /// Half-extents (half width, height, depth)
        half_extents: Vec3,
    },
    /// Infinite plane through the origin, facing +Z
    Plane,
    /// Y-aligned cylinder or truncated cone
    Cylinder {
        /// Radius of the +Y cap
        radius_top: f32,
        /// Radius of the -Y cap
        radius_bottom: f32,
        /// Distance between the caps
        height: f32,
        /// Number of segments around the axis
        radial_segments: u32,
    },
    /// Convex hull given as vertices and polygonal faces
    ConvexPolyhedron {
        /// Hull vertices around the local origin
        vertices: Vec<Vec3>,
        /// Faces as ordered vertex index loops
        faces: Vec<Vec<u32>>,
    },
    /// Triangle soup
    TriangleMesh {
        /// Vertex positions
        vertices: Vec<Vec3>,
        /// Vertex indices, three per triangle
        indices: Vec<u32>,
        /// Per-axis scale applied at render time
        scale: Vec3,
    },
    /// Regular height grid; `data[x][y]` is the height (Z) at that sample
    Heightfield {
        /// Height samples
        data: Vec<Vec<f32>>,
        /// Distance between neighbouring samples
        element_size: f32,
    },
    /// Point shape with no extent; drawn as an empty placeholder
    Particle,
}

/// Shape discriminant without parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeTag {
    Sphere,
    Box,
    Plane,
    Cylinder,
    ConvexPolyhedron,
    TriangleMesh,
    Heightfield,
    Particle,
}

impl ShapeTag {
    /// Whether renderables of this kind own per-shape generated geometry
    ///
    /// Other kinds share one prebuilt primitive scaled per instance, or draw
    /// nothing at all.
    pub fn is_complex(self) -> bool {
        matches!(
            self,
            Self::Cylinder | Self::ConvexPolyhedron | Self::TriangleMesh | Self::Heightfield
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Sphere => "sphere",
            Self::Box => "box",
            Self::Plane => "plane",
            Self::Cylinder => "cylinder",
            Self::ConvexPolyhedron => "convex_polyhedron",
            Self::TriangleMesh => "trimesh",
            Self::Heightfield => "heightfield",
            Self::Particle => "particle",
        }
    }
}

impl fmt::Display for ShapeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ShapeKind {
    pub fn tag(&self) -> ShapeTag {
        match self {
            Self::Sphere { .. } => ShapeTag::Sphere,
            Self::Box { .. } => ShapeTag::Box,
            Self::Plane => ShapeTag::Plane,
            Self::Cylinder { .. } => ShapeTag::Cylinder,
            Self::ConvexPolyhedron { .. } => ShapeTag::ConvexPolyhedron,
            Self::TriangleMesh { .. } => ShapeTag::TriangleMesh,
            Self::Heightfield { .. } => ShapeTag::Heightfield,
            Self::Particle => ShapeTag::Particle,
        }
    }
}

/// A collision shape with a stable identity
#[derive(Debug)]
pub struct Shape {
    id: ShapeId,
    kind: ShapeKind,
}

impl Shape {
    /// Wrap shape parameters with a fresh identity
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            id: ShapeId::next(),
            kind,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn tag(&self) -> ShapeTag {
        self.kind.tag()
    }

    /// Create a sphere shape
    pub fn sphere(radius: f32) -> Self {
        Self::new(ShapeKind::Sphere { radius })
    }

    /// Create a box shape from half-extents
    pub fn cuboid(half_extents: Vec3) -> Self {
        Self::new(ShapeKind::Box { half_extents })
    }

    pub fn plane() -> Self {
        Self::new(ShapeKind::Plane)
    }

    /// Create a cylinder (or cone when one radius is zero)
    pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Self {
        Self::new(ShapeKind::Cylinder {
            radius_top,
            radius_bottom,
            height,
            radial_segments,
        })
    }

    pub fn convex_polyhedron(vertices: Vec<Vec3>, faces: Vec<Vec<u32>>) -> Self {
        Self::new(ShapeKind::ConvexPolyhedron { vertices, faces })
    }

    /// Create a triangle mesh with unit scale
    pub fn trimesh(vertices: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self::new(ShapeKind::TriangleMesh {
            vertices,
            indices,
            scale: Vec3::ONE,
        })
    }

    pub fn heightfield(data: Vec<Vec<f32>>, element_size: f32) -> Self {
        Self::new(ShapeKind::Heightfield { data, element_size })
    }

    pub fn particle() -> Self {
        Self::new(ShapeKind::Particle)
    }

    /// Set the render scale of a triangle mesh; ignored for other kinds
    pub fn with_scale(mut self, value: Vec3) -> Self {
        if let ShapeKind::TriangleMesh { scale, .. } = &mut self.kind {
            *scale = value;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = Shape::sphere(1.0);
        let b = Shape::sphere(1.0);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.kind(), b.kind());
    }

    #[test]
    fn test_complex_tags() {
        assert!(!ShapeTag::Sphere.is_complex());
        assert!(!ShapeTag::Box.is_complex());
        assert!(!ShapeTag::Plane.is_complex());
        assert!(!ShapeTag::Particle.is_complex());
        assert!(ShapeTag::Cylinder.is_complex());
        assert!(ShapeTag::ConvexPolyhedron.is_complex());
        assert!(ShapeTag::TriangleMesh.is_complex());
        assert!(ShapeTag::Heightfield.is_complex());
    }

    #[test]
    fn test_with_scale_only_touches_trimesh() {
        let mesh = Shape::trimesh(Vec::new(), Vec::new()).with_scale(Vec3::splat(2.0));
        assert!(matches!(mesh.kind(), ShapeKind::TriangleMesh { scale, .. } if *scale == Vec3::splat(2.0)));

        let sphere = Shape::sphere(1.0).with_scale(Vec3::splat(2.0));
        assert_eq!(sphere.kind(), &ShapeKind::Sphere { radius: 1.0 });
    }
}
