//! Shared unit primitives for sphere, box and plane shapes
//!
//! These are built once and scaled per instance through the renderable's
//! transform, so their buffers never depend on a particular shape.

use super::{Geometry, Vertex};
use crate::math::Vec3;
use crate::shape::ShapeTag;
use serde::Deserialize;
use std::f32::consts::TAU;
use std::sync::{Arc, OnceLock};

/// Tessellation settings for the shared primitives
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PrimitiveOptions {
    /// Segments per great circle of the sphere wireframe
    pub sphere_segments: u32,
    /// Edge length of the plane grid
    pub plane_size: f32,
    /// Grid cells along each plane axis
    pub plane_divisions: u32,
    /// Z offset of the grid above the plane
    pub plane_offset: f32,
}

impl Default for PrimitiveOptions {
    fn default() -> Self {
        Self {
            sphere_segments: 64,
            plane_size: 100.0,
            plane_divisions: 20,
            plane_offset: 0.001,
        }
    }
}

/// Three orthogonal unit circles (XY, XZ, YZ) as a line list
pub fn sphere_rings(segments: u32) -> Geometry {
    let segments = segments.max(3);
    let delta = TAU / segments as f32;
    let mut vertices = Vec::with_capacity(segments as usize * 6);

    for i in 0..segments {
        let (y1, x1) = (i as f32 * delta).sin_cos();
        let (y2, x2) = ((i + 1) as f32 * delta).sin_cos();

        for (a, b) in [
            (Vec3::new(x1, y1, 0.0), Vec3::new(x2, y2, 0.0)),
            (Vec3::new(x1, 0.0, y1), Vec3::new(x2, 0.0, y2)),
            (Vec3::new(0.0, x1, y1), Vec3::new(0.0, x2, y2)),
        ] {
            vertices.push(Vertex::radial(a));
            vertices.push(Vertex::radial(b));
        }
    }

    Geometry::lines(vertices)
}

/// The 12 edges of a unit-edge cube centered at the origin
pub fn box_edges() -> Geometry {
    const H: f32 = 0.5;
    let corner = |x: f32, y: f32, z: f32| Vertex::radial(Vec3::new(x * H, y * H, z * H));

    let edges = [
        // Bottom loop
        ((-1.0, -1.0, 1.0), (1.0, -1.0, 1.0)),
        ((1.0, -1.0, 1.0), (1.0, -1.0, -1.0)),
        ((1.0, -1.0, -1.0), (-1.0, -1.0, -1.0)),
        ((-1.0, -1.0, -1.0), (-1.0, -1.0, 1.0)),
        // Top loop
        ((-1.0, 1.0, 1.0), (1.0, 1.0, 1.0)),
        ((1.0, 1.0, 1.0), (1.0, 1.0, -1.0)),
        ((1.0, 1.0, -1.0), (-1.0, 1.0, -1.0)),
        ((-1.0, 1.0, -1.0), (-1.0, 1.0, 1.0)),
        // Pillars
        ((1.0, -1.0, 1.0), (1.0, 1.0, 1.0)),
        ((-1.0, -1.0, -1.0), (-1.0, 1.0, -1.0)),
        ((1.0, -1.0, -1.0), (1.0, 1.0, -1.0)),
        ((-1.0, -1.0, 1.0), (-1.0, 1.0, 1.0)),
    ];

    let vertices = edges
        .iter()
        .flat_map(|&((ax, ay, az), (bx, by, bz))| [corner(ax, ay, az), corner(bx, by, bz)])
        .collect();
    Geometry::lines(vertices)
}

/// Square grid in the XY plane, lifted by `offset_z`, normals +Z
pub fn plane_grid(size: f32, divisions: u32, offset_z: f32) -> Geometry {
    let divisions = divisions.max(1);
    let step = size / divisions as f32;
    let half = size / 2.0;
    let normal = [0.0, 0.0, 1.0];
    let mut vertices = Vec::with_capacity((divisions as usize + 1) * 4);

    for i in 0..=divisions {
        let k = -half + i as f32 * step;
        vertices.push(Vertex::new([-half, k, offset_z], normal));
        vertices.push(Vertex::new([half, k, offset_z], normal));
        vertices.push(Vertex::new([k, -half, offset_z], normal));
        vertices.push(Vertex::new([k, half, offset_z], normal));
    }

    Geometry::lines(vertices)
}

/// Lazily built, reference-counted set of primitive buffers
///
/// Share one instance between debuggers with `Arc::clone` to keep a single copy
/// of each buffer; each primitive is only tessellated on first use.
#[derive(Debug, Default)]
pub struct SharedPrimitives {
    options: PrimitiveOptions,
    sphere: OnceLock<Arc<Geometry>>,
    cuboid: OnceLock<Arc<Geometry>>,
    plane: OnceLock<Arc<Geometry>>,
}

impl SharedPrimitives {
    pub fn new(options: PrimitiveOptions) -> Arc<Self> {
        Arc::new(Self {
            options,
            ..Default::default()
        })
    }

    pub fn options(&self) -> &PrimitiveOptions {
        &self.options
    }

    /// Primitive for a tag, or `None` for kinds with per-shape geometry
    pub fn get(&self, tag: ShapeTag) -> Option<Arc<Geometry>> {
        let options = &self.options;
        let geometry = match tag {
            ShapeTag::Sphere => self
                .sphere
                .get_or_init(|| Arc::new(sphere_rings(options.sphere_segments))),
            ShapeTag::Box => self.cuboid.get_or_init(|| Arc::new(box_edges())),
            ShapeTag::Plane => self.plane.get_or_init(|| {
                Arc::new(plane_grid(
                    options.plane_size,
                    options.plane_divisions,
                    options.plane_offset,
                ))
            }),
            _ => return None,
        };
        Some(Arc::clone(geometry))
    }

    /// Whether the primitive for `tag` has been tessellated yet
    pub fn is_built(&self, tag: ShapeTag) -> bool {
        match tag {
            ShapeTag::Sphere => self.sphere.get().is_some(),
            ShapeTag::Box => self.cuboid.get().is_some(),
            ShapeTag::Plane => self.plane.get().is_some(),
            _ => false,
        }
    }
}
