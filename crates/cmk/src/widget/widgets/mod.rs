//! Concrete widgets.

mod button;
mod label;

pub use button::{Button, ButtonState};
pub use label::Label;
