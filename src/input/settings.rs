//! The tool configuration shared by every drawing tool.
//!
//! A settings panel or script binds to these getters/setters. Changes only
//! affect strokes drawn afterwards; nothing already on the layer is touched.

use super::tool::Tool;
use crate::config::{DrawingConfig, TextAlignment};
use crate::draw::{Color, FontDescriptor};

pub const MIN_THICKNESS: f64 = 1.0;
pub const MAX_THICKNESS: f64 = 20.0;
pub const MIN_FONT_SIZE: f64 = 8.0;
pub const MAX_FONT_SIZE: f64 = 72.0;

/// Current tool, stroke and font configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSettings {
    tool: Tool,
    color: Color,
    thickness: f64,
    font: FontDescriptor,
    alignment: TextAlignment,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self::from_config(&DrawingConfig::default())
    }
}

impl ToolSettings {
    /// Builds the starting configuration, clamping out-of-range values.
    pub fn from_config(config: &DrawingConfig) -> Self {
        let mut settings = Self {
            tool: Tool::from_name(&config.default_tool).unwrap_or(Tool::Pen),
            color: config.default_color.to_color(),
            thickness: MIN_THICKNESS,
            font: FontDescriptor {
                family: config.font_family.clone(),
                size: MIN_FONT_SIZE,
                bold: config.font_bold,
                italic: config.font_italic,
                underline: config.font_underline,
                strikeout: config.font_strikeout,
            },
            alignment: config.text_alignment,
        };
        settings.set_thickness(config.default_thickness);
        settings.set_font_size(config.font_size);
        settings
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn font(&self) -> &FontDescriptor {
        &self.font
    }

    pub fn alignment(&self) -> TextAlignment {
        self.alignment
    }

    pub(crate) fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Sets the stroke thickness, clamped to 1-20.
    pub fn set_thickness(&mut self, thickness: f64) {
        let clamped = thickness.clamp(MIN_THICKNESS, MAX_THICKNESS);
        if clamped != thickness {
            log::debug!("Thickness {:.1} clamped to {:.1}", thickness, clamped);
        }
        self.thickness = clamped;
    }

    pub fn adjust_thickness(&mut self, delta: f64) {
        self.set_thickness(self.thickness + delta);
    }

    /// Sets the font size, clamped to 8-72.
    pub fn set_font_size(&mut self, size: f64) {
        let clamped = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        if clamped != size {
            log::debug!("Font size {:.1} clamped to {:.1}", size, clamped);
        }
        self.font.size = clamped;
    }

    pub fn adjust_font_size(&mut self, delta: f64) {
        self.set_font_size(self.font.size + delta);
    }

    pub fn set_font_family(&mut self, family: &str) {
        let family = family.trim();
        if !family.is_empty() {
            self.font.family = family.to_string();
        }
    }

    pub fn set_font_style(&mut self, bold: bool, italic: bool, underline: bool, strikeout: bool) {
        self.font.bold = bold;
        self.font.italic = italic;
        self.font.underline = underline;
        self.font.strikeout = strikeout;
    }

    pub fn set_alignment(&mut self, alignment: TextAlignment) {
        self.alignment = alignment;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColorSpec;

    #[test]
    fn defaults_match_drawing_config() {
        let settings = ToolSettings::default();
        assert_eq!(settings.tool(), Tool::Pen);
        assert_eq!(settings.color(), crate::draw::RED);
        assert_eq!(settings.thickness(), 3.0);
        assert_eq!(settings.font().size, 16.0);
        assert_eq!(settings.alignment(), TextAlignment::Left);
    }

    #[test]
    fn setters_clamp_to_ranges() {
        let mut settings = ToolSettings::default();
        settings.set_thickness(0.0);
        assert_eq!(settings.thickness(), 1.0);
        settings.adjust_thickness(100.0);
        assert_eq!(settings.thickness(), 20.0);

        settings.set_font_size(200.0);
        assert_eq!(settings.font().size, 72.0);
        settings.adjust_font_size(-100.0);
        assert_eq!(settings.font().size, 8.0);
    }

    #[test]
    fn from_config_uses_custom_values() {
        let config = DrawingConfig {
            default_tool: "arrow".into(),
            default_color: ColorSpec::Rgb([0, 0, 255]),
            default_thickness: 7.0,
            font_bold: true,
            ..DrawingConfig::default()
        };
        let settings = ToolSettings::from_config(&config);
        assert_eq!(settings.tool(), Tool::Arrow);
        assert_eq!(settings.color(), crate::draw::BLUE);
        assert_eq!(settings.thickness(), 7.0);
        assert!(settings.font().bold);
    }

    #[test]
    fn blank_font_family_is_ignored() {
        let mut settings = ToolSettings::default();
        settings.set_font_family("  ");
        assert_eq!(settings.font().family, "Sans");
        settings.set_font_family("Monospace");
        assert_eq!(settings.font().family, "Monospace");
    }
}
