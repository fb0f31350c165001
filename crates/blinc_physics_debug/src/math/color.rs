//! RGBA color with config-friendly parsing

use serde::Deserialize;
use thiserror::Error;

/// RGBA color (linear space)
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "ColorValue")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create from a packed `0xRRGGBB` value
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    /// Parse `#rrggbb`, `rrggbb` or `0xrrggbb`
    pub fn parse(text: &str) -> Result<Self, ColorParseError> {
        let trimmed = text.trim();
        let digits = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .unwrap_or(trimmed);

        if digits.len() != 6 {
            return Err(ColorParseError::Length(text.to_string()));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::Digits(text.to_string()));
        }
        u32::from_str_radix(digits, 16)
            .map(Self::from_hex)
            .map_err(|_| ColorParseError::Digits(text.to_string()))
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::GREEN
    }
}

/// Errors produced while reading a color from text or config
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorParseError {
    /// Wrong number of hex digits
    #[error("color {0:?} must have exactly 6 hex digits")]
    Length(String),

    /// Non-hex characters
    #[error("color {0:?} contains non-hex digits")]
    Digits(String),

    /// Packed integer wider than 24 bits
    #[error("color value {0:#x} does not fit in 0xRRGGBB")]
    OutOfRange(u64),

    /// Float component outside 0..=1
    #[error("color component {0} is outside 0.0..=1.0")]
    Component(f32),
}

/// Accepted config spellings of a color
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorValue {
    Packed(u64),
    Text(String),
    Rgb([f32; 3]),
}

impl TryFrom<ColorValue> for Color {
    type Error = ColorParseError;

    fn try_from(value: ColorValue) -> Result<Self, Self::Error> {
        match value {
            ColorValue::Packed(hex) => u32::try_from(hex)
                .ok()
                .filter(|hex| *hex <= 0xFF_FFFF)
                .map(Color::from_hex)
                .ok_or(ColorParseError::OutOfRange(hex)),
            ColorValue::Text(text) => Color::parse(&text),
            ColorValue::Rgb([r, g, b]) => {
                if let Some(bad) = [r, g, b].into_iter().find(|c| !(0.0..=1.0).contains(c)) {
                    return Err(ColorParseError::Component(bad));
                }
                Ok(Color::rgb(r, g, b))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex(0x00ff00), Color::GREEN);
        let c = Color::from_hex(0xe60c0c);
        assert!((c.r - 230.0 / 255.0).abs() < 1e-6);
        assert!((c.g - 12.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_parse_variants() {
        assert_eq!(Color::parse("#ff0000"), Ok(Color::RED));
        assert_eq!(Color::parse("0x0000ff"), Ok(Color::BLUE));
        assert_eq!(Color::parse("ffffff"), Ok(Color::WHITE));
        assert!(matches!(Color::parse("#fff"), Err(ColorParseError::Length(_))));
        assert!(matches!(Color::parse("#gg0000"), Err(ColorParseError::Digits(_))));
    }
}
