//! Error types for the widget layer.

use crate::stage::ButtonId;

/// Result type alias for widget operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the widget layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The handle refers to a button that was destroyed or never existed.
    #[error("invalid button handle {0:?}")]
    InvalidHandle(ButtonId),

    /// A style could not be loaded.
    #[error(transparent)]
    Style(#[from] cmk_style::Error),
}
