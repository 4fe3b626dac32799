//! CMK - desktop widgets built on an off-screen canvas.
//!
//! This is the main crate; it re-exports the public APIs of the `cmk-*`
//! crates and provides the widget layer and the [`Stage`](stage::Stage)
//! that owns widgets.
//!
//! # Example
//!
//! ```
//! use cmk::prelude::*;
//!
//! let mut stage = Stage::new(StyleContext::default());
//! let ok = stage.create_button_with_text("OK");
//! stage.post(StageEvent::Resize { id: ok, size: Size::new(80.0, 30.0) });
//! stage.process_events();
//!
//! assert_eq!(stage.text(ok), Some("OK"));
//! assert!(stage.get(ok).unwrap().canvas().is_valid());
//! ```

pub use cmk_core::logging;
pub use cmk_core::{ConnectionGuard, ConnectionId, Object, ObjectId, Signal};

/// Graphics rendering module.
pub mod render {
    pub use cmk_render::*;
}

/// Styling module.
pub mod style {
    pub use cmk_style::*;
}

mod error;
pub mod prelude;
pub mod stage;
pub mod widget;

pub use error::{Error, Result};
