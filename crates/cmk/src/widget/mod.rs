//! Widget system for CMK.
//!
//! - [`Widget`] trait: the base trait for all UI elements
//! - [`WidgetBase`]: common implementation for widget functionality
//! - [`events`]: pointer and resize events
//! - [`layout`]: single-child margins and allocation
//! - [`widgets`]: concrete widgets ([`Button`](widgets::Button), [`Label`](widgets::Label))
//!
//! Each widget contains a [`WidgetBase`] and implements [`Widget`] by
//! delegating to it.

mod base;
pub mod events;
pub mod layout;
pub mod widgets;

pub use base::WidgetBase;
pub use events::{
    EventBase, MouseButton, MousePressEvent, MouseReleaseEvent, PointerCancelEvent, ResizeEvent,
    WidgetEvent,
};
pub use layout::{ContentMargins, bin_allocation};

use cmk_render::Rect;

/// The base trait for all widgets.
pub trait Widget {
    /// Get a reference to the widget's base.
    fn widget_base(&self) -> &WidgetBase;

    /// Get a mutable reference to the widget's base.
    fn widget_base_mut(&mut self) -> &mut WidgetBase;

    /// Handle an event.
    ///
    /// Returns `true` if the event was consumed.
    fn event(&mut self, _event: &mut WidgetEvent) -> bool {
        false
    }

    /// Repaint whatever is out of date.
    ///
    /// Returns `true` if anything was drawn.
    fn paint(&mut self) -> bool;

    fn geometry(&self) -> Rect {
        self.widget_base().geometry()
    }

    fn needs_repaint(&self) -> bool {
        self.widget_base().needs_repaint()
    }
}
