//! Widget base implementation.
//!
//! `WidgetBase` holds the state every widget shares: identity and name,
//! geometry relative to the stage, the reactive flag and the repaint flag.

use cmk_core::{Object, ObjectBase, ObjectId, Signal};
use cmk_render::{Point, Rect, Size};

/// The base implementation for all widgets.
///
/// Widget implementations include this as a field and delegate common
/// operations to it.
pub struct WidgetBase {
    object_base: ObjectBase,

    /// Position relative to the parent and size.
    geometry: Rect,

    /// Whether the widget takes part in pointer hit-testing.
    reactive: bool,

    needs_repaint: bool,

    /// Emitted with the new geometry whenever it changes.
    pub geometry_changed: Signal<Rect>,
}

impl WidgetBase {
    /// Create a new, reactive widget base with empty geometry.
    pub fn new() -> Self {
        Self {
            object_base: ObjectBase::new(),
            geometry: Rect::ZERO,
            reactive: true,
            needs_repaint: true,
            geometry_changed: Signal::new(),
        }
    }

    #[inline]
    pub fn object_id(&self) -> ObjectId {
        self.object_base.id()
    }

    /// The explicitly set name, if any.
    pub fn name(&self) -> Option<&str> {
        self.object_base.name()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.object_base.set_name(name);
    }

    pub fn clear_name(&mut self) {
        self.object_base.clear_name();
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Get the widget's geometry (position and size).
    #[inline]
    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    /// Set the widget's geometry.
    ///
    /// This will emit `geometry_changed` if the geometry actually changed.
    pub fn set_geometry(&mut self, rect: Rect) {
        if self.geometry != rect {
            self.geometry = rect;
            self.needs_repaint = true;
            self.geometry_changed.emit(rect);
        }
    }

    #[inline]
    pub fn pos(&self) -> Point {
        self.geometry.origin
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.geometry.size
    }

    /// Set the widget's size, keeping its position.
    pub fn set_size(&mut self, size: Size) {
        self.set_geometry(Rect {
            origin: self.geometry.origin,
            size,
        });
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.geometry.size.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.geometry.size.height
    }

    /// The widget's local coordinate space: `(0, 0)` to its size.
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.geometry.size.width, self.geometry.size.height)
    }

    // =========================================================================
    // Input
    // =========================================================================

    #[inline]
    pub fn is_reactive(&self) -> bool {
        self.reactive
    }

    /// Enable or disable pointer input for this widget.
    pub fn set_reactive(&mut self, reactive: bool) {
        self.reactive = reactive;
    }

    // =========================================================================
    // Repaint
    // =========================================================================

    #[inline]
    pub fn needs_repaint(&self) -> bool {
        self.needs_repaint
    }

    /// Request a repaint of the widget.
    pub fn update(&mut self) {
        self.needs_repaint = true;
    }

    /// Clear the repaint flag (called after painting).
    pub(crate) fn clear_repaint_flag(&mut self) {
        self.needs_repaint = false;
    }

    // =========================================================================
    // Coordinate Mapping
    // =========================================================================

    /// Map a point from parent coordinates to widget-local coordinates.
    #[inline]
    pub fn map_from_parent(&self, point: Point) -> Point {
        Point::new(
            point.x - self.geometry.origin.x,
            point.y - self.geometry.origin.y,
        )
    }

    /// Check if a point (in local coordinates) is inside the widget.
    #[inline]
    pub fn contains_point(&self, point: Point) -> bool {
        self.rect().contains(point)
    }
}

impl Default for WidgetBase {
    fn default() -> Self {
        Self::new()
    }
}

impl Object for WidgetBase {
    fn object_id(&self) -> ObjectId {
        self.object_base.id()
    }
}
