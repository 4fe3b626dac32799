//! Label widget for text display.
//!
//! A [`Label`] holds a caption and its color and occupies the space its
//! parent allocates to it. Text shaping happens elsewhere; the label tracks
//! what is out of date so a renderer redraws only when needed.

use cmk_core::{Object, ObjectId};
use cmk_render::{Color, Rect};

use crate::widget::{ContentMargins, Widget, WidgetBase, bin_allocation};

/// A single-line text label.
pub struct Label {
    base: WidgetBase,
    text: String,
    color: Color,
    margin: ContentMargins,
    redraw_count: u64,
}

impl Label {
    /// Create a label with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::new(),
            text: text.into(),
            color: Color::BLACK,
            margin: ContentMargins::default(),
            redraw_count: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text.
    ///
    /// Returns `true` if the text changed; the label is then queued for
    /// redraw.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if self.text == text {
            return false;
        }
        self.text = text;
        self.base.update();
        true
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        if self.color != color {
            self.color = color;
            self.base.update();
        }
    }

    pub fn margin(&self) -> ContentMargins {
        self.margin
    }

    /// Set the margin kept between the label and its parent's edges.
    ///
    /// Takes effect on the next [`allocate`](Self::allocate).
    pub fn set_margin(&mut self, margin: ContentMargins) {
        self.margin = margin;
    }

    /// Lay the label out inside `parent`, given in the parent's local
    /// coordinates.
    pub fn allocate(&mut self, parent: Rect) {
        self.base.set_geometry(bin_allocation(parent, self.margin));
    }

    /// The rect assigned by the last [`allocate`](Self::allocate).
    pub fn allocation(&self) -> Rect {
        self.base.geometry()
    }

    pub fn needs_redraw(&self) -> bool {
        self.base.needs_repaint()
    }

    /// How many times the label has been drawn.
    pub fn redraw_count(&self) -> u64 {
        self.redraw_count
    }
}

impl Widget for Label {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn paint(&mut self) -> bool {
        if !self.base.needs_repaint() {
            return false;
        }
        self.base.clear_repaint_flag();
        self.redraw_count += 1;
        true
    }
}

impl Object for Label {
    fn object_id(&self) -> ObjectId {
        self.base.object_id()
    }
}
