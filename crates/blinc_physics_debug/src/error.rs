//! Error types

use crate::math::ColorParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while configuring a debugger
#[derive(Error, Debug)]
pub enum DebugError {
    /// Config file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid TOML for [`DebugOptions`](crate::DebugOptions)
    #[error("invalid debug options: {0}")]
    Toml(#[from] toml::de::Error),

    /// Color value could not be parsed
    #[error("invalid color: {0}")]
    Color(#[from] ColorParseError),
}

/// Result type for debugger configuration
pub type Result<T> = std::result::Result<T, DebugError>;
