//! The shared style object.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use cmk_core::logging::targets;
use cmk_render::Color;

use crate::error::{Error, Result};
use crate::palette::ColorPalette;

/// Well-known palette keys.
pub mod keys {
    /// Fill color of button backgrounds.
    pub const PRIMARY: &str = "primary";
    /// Container background.
    pub const BACKGROUND: &str = "background";
    /// Default text color.
    pub const FOREGROUND: &str = "foreground";
    /// Suffix for the text color paired with a background key.
    pub const FOREGROUND_SUFFIX: &str = "-foreground";
}

const DEFAULT_PADDING: f32 = 10.0;
const DEFAULT_BEVEL_RADIUS: f32 = 3.0;

/// Luminance above which dark text is used.
const LIGHT_BACKGROUND_THRESHOLD: f32 = 0.5;

/// Colors, padding and corner radius shared by widgets.
///
/// Styles are immutable after construction; widgets hold them through
/// `Arc<Style>` and swap the whole reference to restyle.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    name: String,
    colors: ColorPalette,
    padding: f32,
    bevel_radius: f32,
}

impl Style {
    /// Create a style with the builtin palette and metrics under a new name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            colors: ColorPalette::builtin(),
            padding: DEFAULT_PADDING,
            bevel_radius: DEFAULT_BEVEL_RADIUS,
        }
    }

    /// The style used when nothing else is configured.
    pub fn builtin() -> Self {
        Self::new("default")
    }

    /// Set the content padding. Negative values clamp to zero.
    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding.max(0.0);
        self
    }

    /// Set the corner radius. Negative values clamp to zero.
    pub fn with_bevel_radius(mut self, radius: f32) -> Self {
        self.bevel_radius = radius.max(0.0);
        self
    }

    /// Add or replace a palette color.
    pub fn with_color(mut self, key: impl Into<String>, color: Color) -> Self {
        self.colors.set(key, color);
        self
    }

    /// Replace the whole palette.
    pub fn with_palette(mut self, colors: ColorPalette) -> Self {
        self.colors = colors;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Padding between a widget's edge and its content, in pixels.
    pub fn padding(&self) -> f32 {
        self.padding
    }

    /// Corner rounding radius, in pixels.
    pub fn bevel_radius(&self) -> f32 {
        self.bevel_radius
    }

    pub fn palette(&self) -> &ColorPalette {
        &self.colors
    }

    /// Look up a palette color.
    ///
    /// Unknown keys log a warning and resolve to black.
    pub fn color(&self, key: &str) -> Color {
        match self.colors.get(key) {
            Some(color) => color,
            None => {
                tracing::warn!(target: targets::STYLE, style = %self.name, key, "unknown color, using black");
                Color::BLACK
            }
        }
    }

    /// Look up a palette color without the fallback.
    pub fn try_color(&self, key: &str) -> Option<Color> {
        self.colors.get(key)
    }

    /// The text color to use on top of the background named `background_key`.
    ///
    /// Prefers an explicit `"<key>-foreground"` entry. Otherwise picks black
    /// or white by the luminance of the background. Unknown backgrounds use
    /// the `"foreground"` color.
    pub fn foreground_for(&self, background_key: &str) -> Color {
        let paired = format!("{background_key}{}", keys::FOREGROUND_SUFFIX);
        if let Some(color) = self.colors.get(&paired) {
            return color;
        }

        match self.colors.get(background_key) {
            Some(bg) if bg.luminance() > LIGHT_BACKGROUND_THRESHOLD => Color::BLACK,
            Some(_) => Color::WHITE,
            None => {
                tracing::debug!(
                    target: targets::STYLE,
                    key = background_key,
                    "unknown background color, using foreground"
                );
                self.color(keys::FOREGROUND)
            }
        }
    }

    /// Parse a style from TOML.
    ///
    /// Fields that are absent keep their builtin values, and `[colors]`
    /// entries are layered over the builtin palette.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: StyleFile = toml::from_str(source)?;
        file.into_style()
    }

    /// Load a style from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let style = Self::from_toml_str(&source)?;
        tracing::debug!(
            target: targets::STYLE,
            path = %path.display(),
            name = %style.name,
            "loaded style"
        );
        Ok(style)
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::builtin()
    }
}

/// On-disk shape of a style file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct StyleFile {
    name: Option<String>,
    padding: Option<f32>,
    bevel_radius: Option<f32>,
    #[serde(default)]
    colors: BTreeMap<String, String>,
}

impl StyleFile {
    fn into_style(self) -> Result<Style> {
        let mut style = Style::builtin();
        if let Some(name) = self.name {
            style.name = name;
        }
        if let Some(padding) = self.padding {
            style.padding = non_negative("padding", padding)?;
        }
        if let Some(radius) = self.bevel_radius {
            style.bevel_radius = non_negative("bevel-radius", radius)?;
        }
        let mut overrides = ColorPalette::new();
        for (key, value) in self.colors {
            let color = Color::from_hex(&value).ok_or_else(|| Error::invalid_color(&key, &value))?;
            overrides.set(key, color);
        }
        style.colors.merge(&overrides);
        Ok(style)
    }
}

fn non_negative(property: &str, value: f32) -> Result<f32> {
    if !value.is_finite() {
        return Err(Error::invalid_value(property, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(Error::invalid_value(property, "must be non-negative"));
    }
    Ok(value)
}
