//! Widget event types.
//!
//! Events carry positions in widget-local coordinates and an accepted flag.
//! A handler that consumes an event accepts it, which stops propagation to
//! widgets underneath.

use cmk_render::{Point, Size};

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button.
    Left,
    Right,
    Middle,
}

/// Common data shared by all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventBase {
    accepted: bool,
}

impl EventBase {
    /// Create a new, unaccepted event base.
    pub fn new() -> Self {
        Self { accepted: false }
    }

    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Accept the event, preventing further propagation.
    pub fn accept(&mut self) {
        self.accepted = true;
    }

    /// Ignore the event, allowing further propagation.
    pub fn ignore(&mut self) {
        self.accepted = false;
    }
}

/// A pointer button went down.
#[derive(Debug, Clone)]
pub struct MousePressEvent {
    pub base: EventBase,
    /// The button that was pressed.
    pub button: MouseButton,
    /// Position in widget-local coordinates.
    pub local_pos: Point,
}

impl MousePressEvent {
    pub fn new(button: MouseButton, local_pos: Point) -> Self {
        Self {
            base: EventBase::new(),
            button,
            local_pos,
        }
    }
}

/// A pointer button went up.
#[derive(Debug, Clone)]
pub struct MouseReleaseEvent {
    pub base: EventBase,
    /// The button that was released.
    pub button: MouseButton,
    /// Position in widget-local coordinates.
    pub local_pos: Point,
}

impl MouseReleaseEvent {
    pub fn new(button: MouseButton, local_pos: Point) -> Self {
        Self {
            base: EventBase::new(),
            button,
            local_pos,
        }
    }
}

/// The pointer grab was broken before a release arrived.
#[derive(Debug, Clone, Default)]
pub struct PointerCancelEvent {
    pub base: EventBase,
}

impl PointerCancelEvent {
    pub fn new() -> Self {
        Self::default()
    }
}

/// The widget's size changed.
#[derive(Debug, Clone)]
pub struct ResizeEvent {
    pub base: EventBase,
    pub old_size: Size,
    pub new_size: Size,
}

impl ResizeEvent {
    pub fn new(old_size: Size, new_size: Size) -> Self {
        Self {
            base: EventBase::new(),
            old_size,
            new_size,
        }
    }
}

/// Events delivered to a widget's [`event`](super::Widget::event) handler.
#[derive(Debug, Clone)]
pub enum WidgetEvent {
    MousePress(MousePressEvent),
    MouseRelease(MouseReleaseEvent),
    PointerCancel(PointerCancelEvent),
    Resize(ResizeEvent),
}

impl WidgetEvent {
    fn base(&self) -> &EventBase {
        match self {
            Self::MousePress(e) => &e.base,
            Self::MouseRelease(e) => &e.base,
            Self::PointerCancel(e) => &e.base,
            Self::Resize(e) => &e.base,
        }
    }

    fn base_mut(&mut self) -> &mut EventBase {
        match self {
            Self::MousePress(e) => &mut e.base,
            Self::MouseRelease(e) => &mut e.base,
            Self::PointerCancel(e) => &mut e.base,
            Self::Resize(e) => &mut e.base,
        }
    }

    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.base().is_accepted()
    }

    /// Accept the event.
    pub fn accept(&mut self) {
        self.base_mut().accept();
    }

    /// Ignore the event.
    pub fn ignore(&mut self) {
        self.base_mut().ignore();
    }
}
