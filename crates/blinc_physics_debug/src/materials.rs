//! Material descriptions for debug renderables

use crate::math::Color;

/// Unlit material used for every debug renderable
///
/// `normal_offset` asks the backend to push each vertex along its normal by
/// that distance, so outlines do not z-fight with the geometry they trace.
#[derive(Clone, Debug, PartialEq)]
pub struct DebugMaterial {
    /// Base color
    pub color: Color,
    /// Draw triangle edges instead of filled faces
    pub wireframe: bool,
    /// Distance to displace vertices along their normals
    pub normal_offset: f32,
}

impl Default for DebugMaterial {
    fn default() -> Self {
        Self {
            color: Color::GREEN,
            wireframe: false,
            normal_offset: 0.0,
        }
    }
}

impl DebugMaterial {
    pub fn new() -> Self {
        Self::default()
    }

    /// Material for line-list renderables
    pub fn lines(color: Color, normal_offset: f32) -> Self {
        Self::new().color(color).normal_offset(normal_offset)
    }

    /// Material for triangle renderables, drawn as wireframe
    pub fn mesh(color: Color, normal_offset: f32) -> Self {
        Self::lines(color, normal_offset).wireframe(true)
    }

    /// Set color
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Enable wireframe
    pub fn wireframe(mut self, enabled: bool) -> Self {
        self.wireframe = enabled;
        self
    }

    /// Set normal offset
    pub fn normal_offset(mut self, offset: f32) -> Self {
        self.normal_offset = offset;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let lines = DebugMaterial::lines(Color::RED, 0.01);
        assert!(!lines.wireframe);
        assert_eq!(lines.normal_offset, 0.01);

        let mesh = DebugMaterial::mesh(Color::RED, 0.01);
        assert!(mesh.wireframe);
        assert_eq!(mesh.color, Color::RED);
    }
}
