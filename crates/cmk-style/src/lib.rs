//! Shared widget styles for CMK.
//!
//! A [`Style`] bundles the constants widgets paint with: a named color
//! palette, content padding and the bevel (corner) radius. Styles are
//! immutable once built and shared between widgets as `Arc<Style>`.
//!
//! A [`StyleContext`] carries the default style handed to newly created
//! widgets. It is passed explicitly to widget factories; there is no global
//! default.
//!
//! # Example
//!
//! ```
//! use cmk_style::{Style, StyleContext};
//!
//! let style = Style::from_toml_str(r##"
//!     name = "flat"
//!     bevel-radius = 0.0
//!
//!     [colors]
//!     primary = "#3B80AE"
//! "##).unwrap();
//!
//! let ctx = StyleContext::new(style);
//! assert_eq!(ctx.default_style().bevel_radius(), 0.0);
//! ```

mod context;
mod error;
mod palette;
mod style;

pub use context::StyleContext;
pub use error::{Error, Result};
pub use palette::ColorPalette;
pub use style::{Style, keys};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::context::StyleContext;
    pub use crate::palette::ColorPalette;
    pub use crate::style::Style;
}
