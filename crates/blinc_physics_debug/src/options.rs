//! Debugger configuration

use crate::error::{DebugError, Result};
use crate::geometry::PrimitiveOptions;
use crate::math::Color;
use serde::Deserialize;
use std::path::Path;

/// Default distance outlines are pushed along vertex normals
pub const DEFAULT_OFFSET: f32 = 0.005;

/// Options for [`ShapeDebugger`](crate::ShapeDebugger)
///
/// Every field has a default, so a config file only needs the keys it changes:
///
/// ```toml
/// color = "#ff8800"
/// offset = 0.01
///
/// [primitives]
/// sphere_segments = 32
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DebugOptions {
    /// Color of every outline
    pub color: Color,
    /// Distance to push outlines along vertex normals
    pub offset: f32,
    /// Initial visibility of the debug container
    pub visible: bool,
    /// Tessellation of the shared primitives
    pub primitives: PrimitiveOptions,
}

impl Default for DebugOptions {
    fn default() -> Self {
        Self {
            color: Color::GREEN,
            offset: DEFAULT_OFFSET,
            visible: true,
            primitives: PrimitiveOptions::default(),
        }
    }
}

impl DebugOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load options from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| DebugError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Set color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set color from `#rrggbb` text
    pub fn with_color_str(self, color: &str) -> Result<Self> {
        Ok(self.with_color(Color::parse(color)?))
    }

    /// Set normal offset
    pub fn with_offset(mut self, offset: f32) -> Self {
        self.offset = offset;
        self
    }

    /// Set initial visibility
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_primitives(mut self, primitives: PrimitiveOptions) -> Self {
        self.primitives = primitives;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = DebugOptions::default();
        assert_eq!(options.color, Color::from_hex(0x00ff00));
        assert_eq!(options.offset, 0.005);
        assert!(options.visible);
        assert_eq!(options.primitives.sphere_segments, 64);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(DebugOptions::from_toml_str("").ok(), Some(DebugOptions::default()));
    }

    #[test]
    fn test_color_spellings() {
        let hex = DebugOptions::from_toml_str(r##"color = "#ff0000""##).ok();
        assert_eq!(hex.map(|o| o.color), Some(Color::RED));

        let packed = DebugOptions::from_toml_str("color = 0x0000ff").ok();
        assert_eq!(packed.map(|o| o.color), Some(Color::BLUE));

        let floats = DebugOptions::from_toml_str("color = [1.0, 1.0, 1.0]").ok();
        assert_eq!(floats.map(|o| o.color), Some(Color::WHITE));
    }

    #[test]
    fn test_partial_primitives() {
        let options = DebugOptions::from_toml_str(
            r#"
            offset = 0.01
            visible = false

            [primitives]
            plane_divisions = 4
            "#,
        )
        .unwrap();
        assert_eq!(options.offset, 0.01);
        assert!(!options.visible);
        assert_eq!(options.primitives.plane_divisions, 4);
        assert_eq!(options.primitives.plane_size, 100.0);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            DebugOptions::from_toml_str(r##"color = "#zzzzzz""##),
            Err(DebugError::Toml(_))
        ));
        assert!(matches!(
            DebugOptions::new().with_color_str("12"),
            Err(DebugError::Color(_))
        ));
        assert!(matches!(
            DebugOptions::load("/nonexistent/debug.toml"),
            Err(DebugError::Io { .. })
        ));
    }
}
