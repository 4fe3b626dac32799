//! Push button widget.
//!
//! A [`Button`] paints a rounded rectangle in the style's primary color on
//! its own off-screen canvas and hosts a [`Label`] child for its caption.
//! Pointer input drives a two-state machine:
//!
//! - `Idle --press(left, inside)--> Pressed` emits `pressed`
//! - `Pressed --release--> Idle` emits `released`, then `clicked` if the
//!   release landed inside the button
//! - `Pressed --cancel--> Idle` emits `released` only
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use cmk::prelude::*;
//!
//! let ctx = StyleContext::default();
//! let mut button = Button::with_text(&ctx, "OK");
//! button.resize(80.0, 30.0);
//!
//! let clicks = Arc::new(AtomicUsize::new(0));
//! let clicks_clone = clicks.clone();
//! button.clicked.connect(move |_| {
//!     clicks_clone.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! button.handle_mouse_press(&MousePressEvent::new(MouseButton::Left, Point::new(5.0, 5.0)));
//! button.handle_mouse_release(&MouseReleaseEvent::new(MouseButton::Left, Point::new(6.0, 5.0)));
//! assert_eq!(clicks.load(Ordering::SeqCst), 1);
//! ```

use std::sync::Arc;

use cmk_core::logging::targets;
use cmk_core::{Object, ObjectId, Signal};
use cmk_render::{Canvas, Color, DrawContext, Path, Rect, Size};
use cmk_style::{Style, StyleContext, keys};

use crate::widget::{
    ContentMargins, MouseButton, MousePressEvent, MouseReleaseEvent, Widget, WidgetBase,
    WidgetEvent,
};

use super::Label;

/// Interaction state of a [`Button`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Idle,
    /// Between a press on the button and the matching release or cancel.
    Pressed,
}

/// A clickable button with a text caption.
pub struct Button {
    base: WidgetBase,
    label: Label,
    canvas: Canvas,
    style: Arc<Style>,
    state: ButtonState,
    background_color_name: Option<String>,

    // Signals are shared so callers can hold scoped connections
    // (`Signal::connect_scoped`) to them.
    /// Emitted when a press is followed by a release inside the button.
    pub clicked: Arc<Signal<()>>,
    /// Emitted when the button is pressed down.
    pub pressed: Arc<Signal<()>>,
    /// Emitted when the button returns to idle after a press.
    pub released: Arc<Signal<()>>,
    /// Emitted with the new caption when it changes.
    pub text_changed: Arc<Signal<String>>,
    /// Emitted after the style reference is replaced.
    pub style_changed: Arc<Signal<()>>,
}

impl Button {
    /// Create a button with empty text and the context's default style.
    pub fn new(ctx: &StyleContext) -> Self {
        Self::with_text(ctx, "")
    }

    /// Create a button with the given caption.
    pub fn with_text(ctx: &StyleContext, text: impl Into<String>) -> Self {
        let style = ctx.default_style();
        let mut label = Label::new(text);
        label.set_margin(ContentMargins::uniform(style.padding()));

        let mut button = Self {
            base: WidgetBase::new(),
            label,
            canvas: Canvas::new(),
            style,
            state: ButtonState::Idle,
            background_color_name: None,
            clicked: Arc::new(Signal::new()),
            pressed: Arc::new(Signal::new()),
            released: Arc::new(Signal::new()),
            text_changed: Arc::new(Signal::new()),
            style_changed: Arc::new(Signal::new()),
        };
        button.update_label_color();
        tracing::debug!(
            target: targets::BUTTON,
            id = %button.base.object_id(),
            style = button.style.name(),
            "button created"
        );
        button
    }

    // =========================================================================
    // Text and name
    // =========================================================================

    /// The caption.
    pub fn text(&self) -> &str {
        self.label.text()
    }

    /// Replace the caption.
    ///
    /// Only the label is redrawn; the background canvas stays valid.
    pub fn set_text(&mut self, text: impl Into<String>) {
        if self.label.set_text(text) {
            self.base.update();
            self.text_changed.emit(self.label.text().to_owned());
        }
    }

    /// The display name: the explicit name if set, otherwise the caption.
    pub fn name(&self) -> &str {
        self.base.name().unwrap_or_else(|| self.label.text())
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.base.set_name(name);
    }

    /// Drop the explicit name so [`name`](Self::name) follows the caption again.
    pub fn clear_name(&mut self) {
        self.base.clear_name();
    }

    // =========================================================================
    // Style
    // =========================================================================

    pub fn style(&self) -> &Arc<Style> {
        &self.style
    }

    /// Replace the style.
    ///
    /// The previous reference is released. The background is repainted and
    /// the label picks up the new padding and text color.
    pub fn set_style(&mut self, style: Arc<Style>) {
        if Arc::ptr_eq(&self.style, &style) {
            return;
        }
        tracing::debug!(
            target: targets::BUTTON,
            id = %self.base.object_id(),
            from = self.style.name(),
            to = style.name(),
            "style replaced"
        );
        self.style = style;
        self.canvas.invalidate();
        self.label
            .set_margin(ContentMargins::uniform(self.style.padding()));
        self.label.allocate(self.base.rect());
        self.update_label_color();
        self.base.update();
        self.style_changed.emit(());
    }

    /// The semantic color key of the container behind this button, if set.
    pub fn background_color_name(&self) -> Option<&str> {
        self.background_color_name.as_deref()
    }

    /// Record the container's background color key.
    ///
    /// The button does not paint this color; it only picks a label color
    /// that contrasts with it.
    pub fn set_background_color_name(&mut self, name: impl Into<String>) {
        self.background_color_name = Some(name.into());
        self.update_label_color();
        self.base.update();
    }

    fn update_label_color(&mut self) {
        let color = match self.background_color_name.as_deref() {
            Some(key) => self.style.foreground_for(key),
            None => self.style.color(keys::FOREGROUND),
        };
        self.label.set_color(color);
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    pub fn geometry(&self) -> Rect {
        self.base.geometry()
    }

    /// Move and resize the button.
    ///
    /// A size change resizes the canvas and lays the label out again.
    pub fn set_geometry(&mut self, rect: Rect) {
        let old_size = self.base.size();
        self.base.set_geometry(rect);
        if old_size != rect.size {
            self.size_changed();
        }
    }

    pub fn size(&self) -> Size {
        self.base.size()
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        let origin = self.base.pos();
        self.set_geometry(Rect {
            origin,
            size: Size::new(width, height),
        });
    }

    fn size_changed(&mut self) {
        let (width, height) = self.base.size().to_pixels();
        if let Err(err) = self.canvas.set_size(width, height) {
            tracing::warn!(target: targets::BUTTON, id = %self.base.object_id(), %err, "canvas resize failed");
        }
        self.label.allocate(self.base.rect());
    }

    /// Enable or disable pointer input.
    pub fn set_reactive(&mut self, reactive: bool) {
        self.base.set_reactive(reactive);
    }

    pub fn is_reactive(&self) -> bool {
        self.base.is_reactive()
    }

    /// The background outline for the current size.
    pub fn background_path(&self) -> Path {
        background_path(self.base.rect(), self.style.bevel_radius())
    }

    // =========================================================================
    // Children
    // =========================================================================

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    // =========================================================================
    // Event Handling
    // =========================================================================

    pub fn state(&self) -> ButtonState {
        self.state
    }

    pub fn is_pressed(&self) -> bool {
        self.state == ButtonState::Pressed
    }

    /// Handle a mouse press event.
    ///
    /// Returns `true` if the event was consumed.
    pub fn handle_mouse_press(&mut self, event: &MousePressEvent) -> bool {
        if event.button != MouseButton::Left {
            return false;
        }
        if !self.base.is_reactive() || self.is_pressed() {
            return false;
        }
        if !self.base.contains_point(event.local_pos) {
            return false;
        }

        self.state = ButtonState::Pressed;
        tracing::trace!(target: targets::BUTTON, id = %self.base.object_id(), "pressed");
        self.pressed.emit(());
        true
    }

    /// Handle a mouse release event.
    ///
    /// Returns `true` if the event was consumed, which happens whenever the
    /// button was pressed. A click is emitted only if the release is inside.
    pub fn handle_mouse_release(&mut self, event: &MouseReleaseEvent) -> bool {
        if event.button != MouseButton::Left || !self.is_pressed() {
            return false;
        }

        let is_over = self.base.contains_point(event.local_pos);
        self.state = ButtonState::Idle;
        tracing::trace!(target: targets::BUTTON, id = %self.base.object_id(), is_over, "released");
        self.released.emit(());

        if is_over {
            self.click();
        }
        true
    }

    /// Handle a broken pointer grab.
    ///
    /// Returns `true` if the button was pressed.
    pub fn handle_cancel(&mut self) -> bool {
        if !self.is_pressed() {
            return false;
        }
        self.state = ButtonState::Idle;
        tracing::trace!(target: targets::BUTTON, id = %self.base.object_id(), "press cancelled");
        self.released.emit(());
        true
    }

    fn click(&self) {
        tracing::debug!(target: targets::BUTTON, id = %self.base.object_id(), text = self.text(), "clicked");
        self.clicked.emit(());
    }
}

impl Widget for Button {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn event(&mut self, event: &mut WidgetEvent) -> bool {
        let consumed = match event {
            WidgetEvent::MousePress(e) => self.handle_mouse_press(e),
            WidgetEvent::MouseRelease(e) => self.handle_mouse_release(e),
            WidgetEvent::PointerCancel(_) => self.handle_cancel(),
            WidgetEvent::Resize(e) => {
                let new_size = e.new_size;
                self.resize(new_size.width, new_size.height);
                false
            }
        };
        if consumed {
            event.accept();
        }
        consumed
    }

    fn paint(&mut self) -> bool {
        let style = &self.style;
        let background = self.canvas.redraw(|ctx, width, height| draw_background(ctx, width, height, style));
        let label = self.label.paint();
        self.base.clear_repaint_flag();
        background || label
    }
}

impl Object for Button {
    fn object_id(&self) -> ObjectId {
        self.base.object_id()
    }
}

impl std::fmt::Debug for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Button")
            .field("id", &self.base.object_id())
            .field("text", &self.text())
            .field("state", &self.state)
            .field("geometry", &self.base.geometry())
            .field("style", &self.style.name())
            .finish()
    }
}

/// The rounded background outline covering `rect`.
fn background_path(rect: Rect, bevel_radius: f32) -> Path {
    Path::rounded_rect(rect, bevel_radius)
}

/// Canvas draw callback: clear, then fill the rounded background.
fn draw_background(ctx: &mut DrawContext<'_>, width: u32, height: u32, style: &Style) -> bool {
    let rect = Rect::new(0.0, 0.0, width as f32, height as f32);
    ctx.clear();
    ctx.new_sub_path();
    ctx.append_path(&background_path(rect, style.bevel_radius()));
    ctx.set_source_color(primary_color(style));
    ctx.fill()
}

fn primary_color(style: &Style) -> Color {
    style.color(keys::PRIMARY)
}

static_assertions::assert_impl_all!(Button: Send, Sync);
