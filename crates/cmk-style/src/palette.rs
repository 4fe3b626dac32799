//! Color palette definitions.

use std::collections::BTreeMap;

use cmk_render::Color;

/// A color palette keyed by semantic color name.
///
/// Keys are free-form (`"primary"`, `"background"`, `"primary-foreground"`)
/// so style files can introduce new roles without code changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorPalette {
    colors: BTreeMap<String, Color>,
}

impl ColorPalette {
    /// Create an empty palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// The default CMK palette: a blue primary on a dark surface.
    pub fn builtin() -> Self {
        Self::new()
            .with("primary", Color::from_rgb8(0x3B, 0x80, 0xAE))
            .with("primary-foreground", Color::WHITE)
            .with("secondary", Color::from_rgb8(0x5F, 0x5F, 0x5F))
            .with("background", Color::from_rgb8(0x33, 0x33, 0x33))
            .with("foreground", Color::WHITE)
            .with("error", Color::from_rgb8(0xC6, 0x28, 0x28))
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, color: Color) -> Self {
        self.set(key, color);
        self
    }

    /// Insert or replace a color.
    pub fn set(&mut self, key: impl Into<String>, color: Color) {
        self.colors.insert(key.into(), color);
    }

    /// Look up a color.
    pub fn get(&self, key: &str) -> Option<Color> {
        self.colors.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.colors.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Color)> {
        self.colors.iter().map(|(k, c)| (k.as_str(), *c))
    }

    /// Overlay `other` on top of this palette; entries in `other` win.
    pub fn merge(&mut self, other: &ColorPalette) {
        for (key, color) in other.iter() {
            self.set(key, color);
        }
    }
}
