//! Off-screen raster canvases.
//!
//! A [`Canvas`] owns an RGBA raster (premultiplied alpha) sized in whole
//! pixels. Content is produced lazily: resizing or calling
//! [`Canvas::invalidate`] marks the canvas dirty, and the next
//! [`Canvas::redraw`] hands a [`DrawContext`] to the caller's draw callback.
//!
//! # Example
//!
//! ```
//! use cmk_render::{Canvas, Color, Point};
//!
//! let mut canvas = Canvas::new();
//! canvas.set_size(32, 16).unwrap();
//! canvas.redraw(|ctx, width, height| {
//!     ctx.clear();
//!     ctx.move_to(Point::new(0.0, 0.0));
//!     ctx.line_to(Point::new(width as f32, 0.0));
//!     ctx.line_to(Point::new(width as f32, height as f32));
//!     ctx.close_path();
//!     ctx.set_source_color(Color::WHITE);
//!     ctx.fill()
//! });
//! assert!(canvas.is_valid());
//! ```

use tiny_skia::{FillRule, Paint, Pixmap, Transform};

use cmk_core::logging::{span_names, targets};

use crate::error::{RenderError, RenderResult};
use crate::path::Path;
use crate::types::{Color, Point};

/// An off-screen raster surface repainted on demand.
pub struct Canvas {
    pixmap: Option<Pixmap>,
    width: u32,
    height: u32,
    dirty: bool,
    valid: bool,
    redraw_count: u64,
}

impl Canvas {
    /// Create an empty (0x0) canvas.
    pub fn new() -> Self {
        Self {
            pixmap: None,
            width: 0,
            height: 0,
            dirty: true,
            valid: false,
            redraw_count: 0,
        }
    }

    /// Current size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Resize the canvas.
    ///
    /// Returns `Ok(true)` if the size changed, in which case the raster is
    /// reallocated (cleared) and the canvas is invalidated. A zero dimension
    /// releases the raster.
    pub fn set_size(&mut self, width: u32, height: u32) -> RenderResult<bool> {
        if self.width == width && self.height == height {
            return Ok(false);
        }

        let pixmap = if width == 0 || height == 0 {
            None
        } else {
            Some(Pixmap::new(width, height).ok_or(RenderError::InvalidDimensions { width, height })?)
        };

        tracing::trace!(target: targets::CANVAS, width, height, "canvas resized");
        self.pixmap = pixmap;
        self.width = width;
        self.height = height;
        self.valid = false;
        self.invalidate();
        Ok(true)
    }

    /// Mark the content as stale so the next [`redraw`](Self::redraw) repaints it.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Whether the canvas needs to be redrawn.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Whether the last draw callback reported valid content.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Number of times the draw callback has run.
    pub fn redraw_count(&self) -> u64 {
        self.redraw_count
    }

    /// Run the draw callback if the canvas is dirty.
    ///
    /// The callback receives a drawing context and the pixel dimensions and
    /// returns whether the produced content is valid. Returns `true` if the
    /// callback ran. A canvas without a raster (zero size) is never drawn.
    pub fn redraw<F>(&mut self, draw: F) -> bool
    where
        F: FnOnce(&mut DrawContext<'_>, u32, u32) -> bool,
    {
        if !self.dirty {
            return false;
        }
        self.dirty = false;

        let (width, height) = (self.width, self.height);
        let Some(pixmap) = self.pixmap.as_mut() else {
            self.valid = false;
            return false;
        };

        let _span = tracing::trace_span!(target: targets::CANVAS, span_names::CANVAS_REDRAW, width, height)
            .entered();
        let mut ctx = DrawContext::new(pixmap);
        self.valid = draw(&mut ctx, width, height);
        self.redraw_count += 1;
        true
    }

    /// Read back one pixel as a premultiplied color.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let px = self.pixmap.as_ref()?.pixel(x, y)?;
        Some(Color::new(
            px.red() as f32 / 255.0,
            px.green() as f32 / 255.0,
            px.blue() as f32 / 255.0,
            px.alpha() as f32 / 255.0,
        ))
    }

    /// Raw premultiplied RGBA bytes, row-major.
    pub fn data(&self) -> Option<&[u8]> {
        self.pixmap.as_ref().map(|p| p.data())
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("dirty", &self.dirty)
            .field("valid", &self.valid)
            .finish()
    }
}

/// Immediate-mode drawing context handed to canvas draw callbacks.
///
/// Path construction mirrors the [`Path`] API; [`fill`](Self::fill) paints
/// the accumulated path with the source color and starts a fresh path.
pub struct DrawContext<'a> {
    pixmap: &'a mut Pixmap,
    path: Path,
    source: Color,
}

impl<'a> DrawContext<'a> {
    fn new(pixmap: &'a mut Pixmap) -> Self {
        Self {
            pixmap,
            path: Path::new(),
            source: Color::BLACK,
        }
    }

    /// Clear the whole surface to transparent.
    pub fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    /// Set the color used by [`fill`](Self::fill).
    pub fn set_source_color(&mut self, color: Color) {
        self.source = color;
    }

    /// The current source color.
    pub fn source_color(&self) -> Color {
        self.source
    }

    /// Begin a new subpath without a current point.
    pub fn new_sub_path(&mut self) {
        self.path.new_sub_path();
    }

    /// Move to a point without drawing.
    pub fn move_to(&mut self, p: Point) {
        self.path.move_to(p);
    }

    /// Add a line to a point.
    pub fn line_to(&mut self, p: Point) {
        self.path.line_to(p);
    }

    /// Add a circular arc. See [`Path::arc`].
    pub fn arc(&mut self, center: Point, radius: f32, angle1: f32, angle2: f32) {
        self.path.arc(center, radius, angle1, angle2);
    }

    /// Close the current subpath.
    pub fn close_path(&mut self) {
        self.path.close();
    }

    /// Append a prebuilt path.
    pub fn append_path(&mut self, path: &Path) {
        self.path.extend(path);
    }

    /// The path accumulated since the last fill.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fill the current path with the source color (non-zero winding,
    /// anti-aliased) and clear the path.
    ///
    /// Returns `false` if the path had no drawable geometry.
    pub fn fill(&mut self) -> bool {
        let skia_path = self.path.to_skia_path();
        self.path.clear();

        let Some(skia_path) = skia_path else {
            return false;
        };

        let [r, g, b, a] = self.source.to_rgba8();
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;

        self.pixmap
            .fill_path(&skia_path, &paint, FillRule::Winding, Transform::identity(), None);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rect;

    #[test]
    fn test_new_canvas_is_empty() {
        let mut canvas = Canvas::new();
        assert_eq!(canvas.size(), (0, 0));
        assert!(canvas.data().is_none());
        assert!(!canvas.redraw(|_, _, _| true));
        assert_eq!(canvas.redraw_count(), 0);
    }

    #[test]
    fn test_set_size_invalidates_only_on_change() {
        let mut canvas = Canvas::new();
        assert_eq!(canvas.set_size(10, 10), Ok(true));
        assert!(canvas.redraw(|_, w, h| {
            assert_eq!((w, h), (10, 10));
            true
        }));
        assert!(!canvas.is_dirty());

        assert_eq!(canvas.set_size(10, 10), Ok(false));
        assert!(!canvas.is_dirty());

        assert_eq!(canvas.set_size(20, 5), Ok(true));
        assert!(canvas.is_dirty());
    }

    #[test]
    fn test_redraw_only_when_dirty() {
        let mut canvas = Canvas::new();
        canvas.set_size(4, 4).unwrap();
        assert!(canvas.redraw(|_, _, _| true));
        assert!(!canvas.redraw(|_, _, _| true));
        canvas.invalidate();
        assert!(canvas.redraw(|_, _, _| false));
        assert!(!canvas.is_valid());
        assert_eq!(canvas.redraw_count(), 2);
    }

    #[test]
    fn test_fill_and_clear() {
        let mut canvas = Canvas::new();
        canvas.set_size(20, 20).unwrap();
        canvas.redraw(|ctx, w, h| {
            ctx.append_path(&Path::rounded_rect(
                Rect::new(0.0, 0.0, w as f32, h as f32),
                0.0,
            ));
            ctx.set_source_color(Color::WHITE);
            ctx.fill()
        });
        let center = canvas.pixel(10, 10).unwrap();
        assert_eq!(center, Color::WHITE);

        canvas.invalidate();
        canvas.redraw(|ctx, _, _| {
            ctx.clear();
            true
        });
        assert_eq!(canvas.pixel(10, 10).unwrap(), Color::TRANSPARENT);
    }

    #[test]
    fn test_fill_empty_path_reports_nothing_drawn() {
        let mut canvas = Canvas::new();
        canvas.set_size(2, 2).unwrap();
        canvas.redraw(|ctx, _, _| {
            assert!(!ctx.fill());
            true
        });
    }

    #[test]
    fn test_zero_size_releases_raster() {
        let mut canvas = Canvas::new();
        canvas.set_size(8, 8).unwrap();
        assert!(canvas.data().is_some());
        canvas.set_size(0, 8).unwrap();
        assert!(canvas.data().is_none());
        assert!(!canvas.redraw(|_, _, _| true));
    }
}
