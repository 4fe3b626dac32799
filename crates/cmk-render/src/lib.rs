//! Rendering primitives for CMK.
//!
//! - [`types`]: geometry and premultiplied colors
//! - [`path`]: vector paths with cairo-style arcs
//! - [`canvas`]: an off-screen raster surface repainted on demand through an
//!   immediate-mode [`DrawContext`]

pub mod canvas;
mod error;
pub mod path;
pub mod types;

pub use canvas::{Canvas, DrawContext};
pub use error::{RenderError, RenderResult};
pub use path::{Path, PathCommand};
pub use types::{Color, Point, Rect, Size};
