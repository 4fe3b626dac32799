//! Prelude module with commonly used types.
//!
//! ```
//! use cmk::prelude::*;
//! ```

pub use cmk_core::{ConnectionGuard, ConnectionId, Object, ObjectId, Signal};
pub use cmk_render::{Canvas, Color, Path, Point, Rect, Size};
pub use cmk_style::{ColorPalette, Style, StyleContext};

pub use crate::error::{Error, Result};
pub use crate::stage::{ButtonId, ProcessStats, Stage, StageEvent};
pub use crate::widget::widgets::{Button, ButtonState, Label};
pub use crate::widget::{
    ContentMargins, MouseButton, MousePressEvent, MouseReleaseEvent, PointerCancelEvent,
    ResizeEvent, Widget, WidgetBase, WidgetEvent,
};
