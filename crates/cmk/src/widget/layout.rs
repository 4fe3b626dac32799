//! Single-child ("bin") layout helpers.

use cmk_render::{Point, Rect, Size};

/// Content margins around a child.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContentMargins {
    /// Left margin.
    pub left: f32,
    /// Top margin.
    pub top: f32,
    /// Right margin.
    pub right: f32,
    /// Bottom margin.
    pub bottom: f32,
}

impl ContentMargins {
    /// Create new content margins.
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create uniform margins (same value on all sides).
    pub fn uniform(margin: f32) -> Self {
        Self::new(margin, margin, margin, margin)
    }

    /// Total horizontal margin (left + right).
    #[inline]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Total vertical margin (top + bottom).
    #[inline]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// Allocate the single child of a container.
///
/// The child gets the container rect shrunk by `margins`. When the margins
/// do not fit, the child collapses to zero along that axis at the
/// container's center.
pub fn bin_allocation(container: Rect, margins: ContentMargins) -> Rect {
    let width = container.width() - margins.horizontal();
    let height = container.height() - margins.vertical();

    let center = container.center();
    let x = if width >= 0.0 {
        container.left() + margins.left
    } else {
        center.x
    };
    let y = if height >= 0.0 {
        container.top() + margins.top
    } else {
        center.y
    };

    Rect {
        origin: Point::new(x, y),
        size: Size::new(width.max(0.0), height.max(0.0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bin_allocation_deflates() {
        let alloc = bin_allocation(
            Rect::new(0.0, 0.0, 120.0, 40.0),
            ContentMargins::uniform(10.0),
        );
        assert_eq!(alloc, Rect::new(10.0, 10.0, 100.0, 20.0));
        assert_eq!(alloc.center(), Point::new(60.0, 20.0));
    }

    #[test]
    fn test_bin_allocation_collapses_centered() {
        let alloc = bin_allocation(
            Rect::new(0.0, 0.0, 10.0, 40.0),
            ContentMargins::uniform(10.0),
        );
        assert_eq!(alloc.width(), 0.0);
        assert_eq!(alloc.left(), 5.0);
        assert_eq!(alloc.height(), 20.0);
    }

    #[test]
    fn test_zero_margins() {
        let rect = Rect::new(3.0, 4.0, 5.0, 6.0);
        assert_eq!(bin_allocation(rect, ContentMargins::default()), rect);
    }
}
