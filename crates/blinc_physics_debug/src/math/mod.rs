//! Math utilities for debug geometry and transforms

mod color;
mod quat;
mod vec3;

pub use color::{Color, ColorParseError};
pub use quat::Quat;
pub use vec3::Vec3;
