//! The style context passed to widget factories.

use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::style::Style;

/// Holds the default style for newly created widgets.
///
/// Cloning a context is cheap and shares the same default style.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use cmk_style::{Style, StyleContext};
///
/// let ctx = StyleContext::default();
/// let a = ctx.default_style();
/// let b = ctx.default_style();
/// assert!(Arc::ptr_eq(&a, &b));
/// assert_eq!(a.name(), Style::builtin().name());
/// ```
#[derive(Debug, Clone)]
pub struct StyleContext {
    default_style: Arc<Style>,
}

impl StyleContext {
    /// Create a context with `style` as the default.
    pub fn new(style: Style) -> Self {
        Self::from_shared(Arc::new(style))
    }

    /// Create a context around an already shared style.
    pub fn from_shared(style: Arc<Style>) -> Self {
        Self {
            default_style: style,
        }
    }

    /// Create a context whose default style is loaded from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(Style::from_file(path)?))
    }

    /// A new reference to the default style.
    pub fn default_style(&self) -> Arc<Style> {
        Arc::clone(&self.default_style)
    }

    /// Replace the default style for widgets created from now on.
    pub fn set_default_style(&mut self, style: Arc<Style>) {
        self.default_style = style;
    }
}

impl Default for StyleContext {
    fn default() -> Self {
        Self::new(Style::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style_is_shared() {
        let ctx = StyleContext::default();
        let style = ctx.default_style();
        // Held by the context and by `style`.
        assert_eq!(Arc::strong_count(&style), 2);
        drop(style);
        assert_eq!(Arc::strong_count(&ctx.default_style()), 2);
    }

    #[test]
    fn test_set_default_style() {
        let mut ctx = StyleContext::default();
        ctx.set_default_style(Arc::new(Style::new("other")));
        assert_eq!(ctx.default_style().name(), "other");
    }
}
