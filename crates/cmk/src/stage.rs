//! The stage: a flat scene graph that owns buttons by handle.
//!
//! Widgets are created into a [`Stage`] and addressed through [`ButtonId`]
//! handles afterwards. A handle goes stale when its button is destroyed;
//! stale handles are the only invalid state, and every operation taking a
//! handle is guarded against it:
//!
//! - plain operations (`set_text`, `text`, ...) log a warning and do
//!   nothing or return `None`
//! - `try_*` variants return [`Error::InvalidHandle`]
//!
//! Input and size changes are posted as [`StageEvent`]s and applied by
//! [`Stage::process_events`], which handles every resize before any pointer
//! event and repaints last.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;

use slotmap::{SlotMap, new_key_type};

use cmk_core::logging::{span_names, targets};
use cmk_render::{Point, Rect, Size};
use cmk_style::{Style, StyleContext};

use crate::error::{Error, Result};
use crate::widget::widgets::Button;
use crate::widget::{MouseButton, MousePressEvent, MouseReleaseEvent, Widget};

new_key_type! {
    /// Handle to a button owned by a [`Stage`].
    pub struct ButtonId;
}

/// Events queued on a [`Stage`].
///
/// Pointer positions are in stage coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum StageEvent {
    /// Resize a button, keeping its position.
    Resize { id: ButtonId, size: Size },
    PointerPress { button: MouseButton, pos: Point },
    PointerRelease { button: MouseButton, pos: Point },
    /// The pointer grab was broken, e.g. by a window losing focus.
    PointerCancel,
}

impl StageEvent {
    fn is_resize(&self) -> bool {
        matches!(self, Self::Resize { .. })
    }
}

/// Statistics from one [`Stage::process_events`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessStats {
    pub resizes: usize,
    pub pointer_events: usize,
    /// Pointer events some button consumed.
    pub consumed: usize,
    pub repainted: usize,
}

/// Owns buttons and routes queued events to them.
pub struct Stage {
    ctx: StyleContext,
    buttons: SlotMap<ButtonId, Button>,
    /// Stacking order, bottom first.
    order: Vec<ButtonId>,
    queue: VecDeque<StageEvent>,
    grab: Option<ButtonId>,
}

impl Stage {
    /// Create an empty stage whose buttons use `ctx` for their default style.
    pub fn new(ctx: StyleContext) -> Self {
        Self {
            ctx,
            buttons: SlotMap::with_key(),
            order: Vec::new(),
            queue: VecDeque::new(),
            grab: None,
        }
    }

    /// Create a stage with its default style loaded from a TOML file.
    pub fn from_style_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(StyleContext::from_file(path)?))
    }

    pub fn style_context(&self) -> &StyleContext {
        &self.ctx
    }

    // =========================================================================
    // Children
    // =========================================================================

    /// Add a button on top of the stacking order.
    pub fn add(&mut self, button: Button) -> ButtonId {
        let id = self.buttons.insert(button);
        self.order.push(id);
        tracing::debug!(target: targets::STAGE, ?id, "button added");
        id
    }

    /// Create a button with empty text.
    pub fn create_button(&mut self) -> ButtonId {
        let button = Button::new(&self.ctx);
        self.add(button)
    }

    /// Create a button with the given caption.
    pub fn create_button_with_text(&mut self, text: impl Into<String>) -> ButtonId {
        let button = Button::with_text(&self.ctx, text);
        self.add(button)
    }

    /// Remove a button and return it.
    ///
    /// A button holding the pointer grab has its press cancelled first, so
    /// the returned button is idle. Dropping it releases its style reference.
    pub fn destroy(&mut self, id: ButtonId) -> Option<Button> {
        let Some(mut button) = self.buttons.remove(id) else {
            warn_stale(id, "destroy");
            return None;
        };
        self.order.retain(|&other| other != id);
        if self.grab == Some(id) {
            self.grab = None;
            button.handle_cancel();
        }
        self.queue
            .retain(|event| !matches!(event, StageEvent::Resize { id: target, .. } if *target == id));
        tracing::debug!(target: targets::STAGE, ?id, "button destroyed");
        Some(button)
    }

    pub fn contains(&self, id: ButtonId) -> bool {
        self.buttons.contains_key(id)
    }

    pub fn get(&self, id: ButtonId) -> Option<&Button> {
        self.buttons.get(id)
    }

    pub fn get_mut(&mut self, id: ButtonId) -> Option<&mut Button> {
        self.buttons.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// Button handles in stacking order, bottom first.
    pub fn ids(&self) -> &[ButtonId] {
        &self.order
    }

    /// The button holding the pointer grab, if any.
    pub fn pointer_grab(&self) -> Option<ButtonId> {
        self.grab
    }

    // =========================================================================
    // Guarded operations
    // =========================================================================

    fn guarded(&self, id: ButtonId, op: &'static str) -> Option<&Button> {
        let button = self.buttons.get(id);
        if button.is_none() {
            warn_stale(id, op);
        }
        button
    }

    fn guarded_mut(&mut self, id: ButtonId, op: &'static str) -> Option<&mut Button> {
        let button = self.buttons.get_mut(id);
        if button.is_none() {
            warn_stale(id, op);
        }
        button
    }

    fn checked_mut(&mut self, id: ButtonId) -> Result<&mut Button> {
        self.buttons.get_mut(id).ok_or(Error::InvalidHandle(id))
    }

    pub fn set_text(&mut self, id: ButtonId, text: impl Into<String>) {
        if let Some(button) = self.guarded_mut(id, "set_text") {
            button.set_text(text);
        }
    }

    pub fn text(&self, id: ButtonId) -> Option<&str> {
        self.guarded(id, "text").map(Button::text)
    }

    pub fn name(&self, id: ButtonId) -> Option<&str> {
        self.guarded(id, "name").map(Button::name)
    }

    pub fn set_name(&mut self, id: ButtonId, name: impl Into<String>) {
        if let Some(button) = self.guarded_mut(id, "set_name") {
            button.set_name(name);
        }
    }

    pub fn set_background_color_name(&mut self, id: ButtonId, name: impl Into<String>) {
        if let Some(button) = self.guarded_mut(id, "set_background_color_name") {
            button.set_background_color_name(name);
        }
    }

    pub fn set_style(&mut self, id: ButtonId, style: Arc<Style>) {
        if let Some(button) = self.guarded_mut(id, "set_style") {
            button.set_style(style);
        }
    }

    /// Apply a geometry immediately, bypassing the event queue.
    pub fn set_geometry(&mut self, id: ButtonId, rect: Rect) {
        if let Some(button) = self.guarded_mut(id, "set_geometry") {
            button.set_geometry(rect);
        }
    }

    pub fn set_reactive(&mut self, id: ButtonId, reactive: bool) {
        if let Some(button) = self.guarded_mut(id, "set_reactive") {
            button.set_reactive(reactive);
        }
    }

    pub fn try_set_text(&mut self, id: ButtonId, text: impl Into<String>) -> Result<()> {
        self.checked_mut(id)?.set_text(text);
        Ok(())
    }

    pub fn try_text(&self, id: ButtonId) -> Result<&str> {
        self.buttons
            .get(id)
            .map(Button::text)
            .ok_or(Error::InvalidHandle(id))
    }

    pub fn try_name(&self, id: ButtonId) -> Result<&str> {
        self.buttons
            .get(id)
            .map(Button::name)
            .ok_or(Error::InvalidHandle(id))
    }

    pub fn try_set_name(&mut self, id: ButtonId, name: impl Into<String>) -> Result<()> {
        self.checked_mut(id)?.set_name(name);
        Ok(())
    }

    pub fn try_set_background_color_name(
        &mut self,
        id: ButtonId,
        name: impl Into<String>,
    ) -> Result<()> {
        self.checked_mut(id)?.set_background_color_name(name);
        Ok(())
    }

    pub fn try_set_style(&mut self, id: ButtonId, style: Arc<Style>) -> Result<()> {
        self.checked_mut(id)?.set_style(style);
        Ok(())
    }

    pub fn try_set_geometry(&mut self, id: ButtonId, rect: Rect) -> Result<()> {
        self.checked_mut(id)?.set_geometry(rect);
        Ok(())
    }

    // =========================================================================
    // Event queue
    // =========================================================================

    /// Queue an event for the next [`process_events`](Self::process_events).
    pub fn post(&mut self, event: StageEvent) {
        self.queue.push_back(event);
    }

    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Drain the queue.
    ///
    /// Resizes are applied first, in posting order, then pointer events in
    /// posting order, and finally every button that needs it is repainted.
    pub fn process_events(&mut self) -> ProcessStats {
        let _span = tracing::debug_span!(
            target: targets::STAGE,
            span_names::PROCESS_EVENTS,
            pending = self.queue.len()
        )
        .entered();

        let (resizes, pointer): (Vec<_>, Vec<_>) =
            self.queue.drain(..).partition(StageEvent::is_resize);

        let mut stats = ProcessStats::default();
        for event in resizes {
            if let StageEvent::Resize { id, size } = event
                && let Some(button) = self.guarded_mut(id, "resize")
            {
                button.resize(size.width, size.height);
                stats.resizes += 1;
            }
        }

        for event in pointer {
            stats.pointer_events += 1;
            if self.dispatch_pointer(event) {
                stats.consumed += 1;
            }
        }

        for &id in &self.order {
            if let Some(button) = self.buttons.get_mut(id)
                && button.needs_repaint()
                && button.paint()
            {
                stats.repainted += 1;
            }
        }

        tracing::trace!(target: targets::STAGE, ?stats, "events processed");
        stats
    }

    fn dispatch_pointer(&mut self, event: StageEvent) -> bool {
        match event {
            StageEvent::PointerPress { button, pos } => self.dispatch_press(button, pos),
            StageEvent::PointerRelease { button, pos } => self.dispatch_release(button, pos),
            StageEvent::PointerCancel => self.dispatch_cancel(),
            StageEvent::Resize { .. } => false,
        }
    }

    fn dispatch_press(&mut self, mouse_button: MouseButton, pos: Point) -> bool {
        if let Some(holder) = self.grab {
            // The grab holder is still pressed and owns the pointer until
            // release or cancel.
            tracing::trace!(target: targets::STAGE, ?holder, "press ignored while pointer is grabbed");
            return false;
        }
        for &id in self.order.iter().rev() {
            let Some(button) = self.buttons.get_mut(id) else {
                continue;
            };
            let local = button.widget_base().map_from_parent(pos);
            if button.handle_mouse_press(&MousePressEvent::new(mouse_button, local)) {
                tracing::trace!(target: targets::STAGE, ?id, "pointer grabbed");
                self.grab = Some(id);
                return true;
            }
        }
        false
    }

    fn dispatch_release(&mut self, mouse_button: MouseButton, pos: Point) -> bool {
        let target = match self.grab {
            Some(id) => Some(id),
            None => self.hit_test(pos),
        };
        let Some(id) = target else {
            return false;
        };
        let Some(button) = self.buttons.get_mut(id) else {
            return false;
        };

        let local = button.widget_base().map_from_parent(pos);
        let consumed = button.handle_mouse_release(&MouseReleaseEvent::new(mouse_button, local));
        if consumed && self.grab == Some(id) {
            tracing::trace!(target: targets::STAGE, ?id, "pointer grab released");
            self.grab = None;
        }
        consumed
    }

    fn dispatch_cancel(&mut self) -> bool {
        let Some(id) = self.grab.take() else {
            return false;
        };
        tracing::trace!(target: targets::STAGE, ?id, "pointer grab cancelled");
        self.buttons
            .get_mut(id)
            .is_some_and(|button| button.handle_cancel())
    }

    /// The topmost reactive button containing `pos` (stage coordinates).
    pub fn hit_test(&self, pos: Point) -> Option<ButtonId> {
        self.order.iter().rev().copied().find(|&id| {
            self.buttons.get(id).is_some_and(|button| {
                let base = button.widget_base();
                base.is_reactive() && base.contains_point(base.map_from_parent(pos))
            })
        })
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new(StyleContext::default())
    }
}

fn warn_stale(id: ButtonId, op: &'static str) {
    tracing::warn!(target: targets::STAGE, ?id, op, "operation on a destroyed or unknown button ignored");
}

static_assertions::assert_impl_all!(Stage: Send, Sync);
