//! Configuration enum types.

use crate::draw::{Color, color};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - either a named color or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// default_color = "red"
///
/// # Custom RGB color (0-255 per component)
/// default_color = [255, 128, 0]  # Orange
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color: red, green, blue, yellow, orange, pink, white, black
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`] struct.
    ///
    /// Unknown color names default to red with a warning.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => color::named(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using red", name);
                color::RED
            }),
            ColorSpec::Rgb([r, g, b]) => Color::from_rgb8(*r, *g, *b),
        }
    }
}

/// Horizontal placement of text inside its box.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlignment {
    pub fn to_pango(self) -> pango::Alignment {
        match self {
            TextAlignment::Left => pango::Alignment::Left,
            TextAlignment::Center => pango::Alignment::Center,
            TextAlignment::Right => pango::Alignment::Right,
        }
    }

    /// Parses "left", "center"/"centre" or "right".
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "left" => Some(TextAlignment::Left),
            "center" | "centre" => Some(TextAlignment::Center),
            "right" => Some(TextAlignment::Right),
            _ => None,
        }
    }
}

/// Encoded image format for saved exports.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    #[serde(alias = "jpeg")]
    Jpg,
    Bmp,
}

impl ExportFormat {
    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpg => "jpg",
            ExportFormat::Bmp => "bmp",
        }
    }

    /// Recognises png, jpg/jpeg and bmp (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(ExportFormat::Png),
            "jpg" | "jpeg" => Some(ExportFormat::Jpg),
            "bmp" => Some(ExportFormat::Bmp),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_spec_converts_to_opaque_color() {
        let color = ColorSpec::Rgb([255, 0, 0]).to_color();
        assert_eq!(color, color::RED);
    }

    #[test]
    fn unknown_color_name_falls_back_to_red() {
        let color = ColorSpec::Name("mauve-ish".into()).to_color();
        assert_eq!(color, color::RED);
    }

    #[test]
    fn export_format_from_extension() {
        assert_eq!(ExportFormat::from_extension("JPEG"), Some(ExportFormat::Jpg));
        assert_eq!(ExportFormat::from_extension("bmp"), Some(ExportFormat::Bmp));
        assert_eq!(ExportFormat::from_extension("tiff"), None);
    }

    #[test]
    fn alignment_names() {
        assert_eq!(TextAlignment::from_name("Centre"), Some(TextAlignment::Center));
        assert_eq!(TextAlignment::from_name("justify"), None);
    }
}
