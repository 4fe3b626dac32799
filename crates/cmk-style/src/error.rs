//! Error types for the styling system.

use std::path::PathBuf;

/// Result type alias for style operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or loading a style.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Style file could not be read.
    #[error("Failed to read style file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Style file is not valid TOML or has the wrong shape.
    #[error("Style parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A palette entry is not a hex color.
    #[error("Invalid color for '{key}': '{value}'")]
    InvalidColor { key: String, value: String },

    /// Invalid property value.
    #[error("Invalid value for property '{property}': {message}")]
    InvalidValue { property: String, message: String },
}

impl Error {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid color error.
    pub fn invalid_color(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidColor {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            property: property.into(),
            message: message.into(),
        }
    }
}
