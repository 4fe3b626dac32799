//! Error types for the render crate.

use thiserror::Error;

/// Errors that can occur during raster operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The raster backing store could not be allocated at these dimensions.
    #[error("cannot allocate canvas of {width}x{height} pixels")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
