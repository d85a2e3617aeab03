//! Configuration type definitions.

use super::enums::{ColorSpec, ExportFormat, TextAlignment};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the tool configuration a session starts with. Users can change
/// these values at runtime using keybindings or script events.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Tool selected when editing starts: pen, marker, line, rectangle,
    /// ellipse, arrow, text, counter, pixelate
    #[serde(default = "default_tool")]
    pub default_tool: String,

    /// Default stroke color - either a named color (red, green, blue, yellow, orange, pink, white, black)
    /// or an RGB array like `[255, 0, 0]` for red
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Default stroke thickness in pixels (valid range: 1 - 20)
    #[serde(default = "default_thickness")]
    pub default_thickness: f64,

    /// Font family name for the text and counter tools (e.g., "Sans", "Monospace")
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font size in points (valid range: 8 - 72)
    #[serde(default = "default_font_size")]
    pub font_size: f64,

    #[serde(default)]
    pub font_bold: bool,

    #[serde(default)]
    pub font_italic: bool,

    #[serde(default)]
    pub font_underline: bool,

    #[serde(default)]
    pub font_strikeout: bool,

    /// Horizontal alignment for the text tool: left, center, right
    #[serde(default)]
    pub text_alignment: TextAlignment,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_tool: default_tool(),
            default_color: default_color(),
            default_thickness: default_thickness(),
            font_family: default_font_family(),
            font_size: default_font_size(),
            font_bold: false,
            font_italic: false,
            font_underline: false,
            font_strikeout: false,
            text_alignment: TextAlignment::default(),
        }
    }
}

/// Undo/redo settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HistoryConfig {
    /// Maximum snapshots kept in each of the undo and redo stacks (valid range: 1 - 100)
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

/// Region selection settings.
///
/// Selections smaller than the minimum in either direction cancel the session.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SelectionConfig {
    #[serde(default = "default_min_size")]
    pub min_width: i32,

    #[serde(default = "default_min_size")]
    pub min_height: i32,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            min_width: default_min_size(),
            min_height: default_min_size(),
        }
    }
}

/// Per-tool drawing constants.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ToolsConfig {
    /// Alpha (0-255) forced onto marker strokes
    #[serde(default = "default_marker_alpha")]
    pub marker_alpha: u8,

    /// Arrowhead segment length as a multiple of thickness
    #[serde(default = "default_arrow_size_multiplier")]
    pub arrow_size_multiplier: f64,

    /// Angle between each arrowhead segment and the shaft
    #[serde(default = "default_arrow_angle_degrees")]
    pub arrow_angle_degrees: f64,

    /// Counter bubble radius as a multiple of thickness
    #[serde(default = "default_counter_size_multiplier")]
    pub counter_size_multiplier: f64,

    /// Counter number font size is `counter_font_base + thickness * counter_font_multiplier`
    #[serde(default = "default_counter_font_base")]
    pub counter_font_base: f64,

    #[serde(default = "default_counter_font_multiplier")]
    pub counter_font_multiplier: f64,

    /// Smallest pixelation block edge in pixels
    #[serde(default = "default_pixelate_min_block")]
    pub pixelate_min_block: i32,

    /// Inner padding of the text-entry box, in pixels
    #[serde(default = "default_text_padding")]
    pub text_padding: f64,

    /// Width of the text-entry box, in pixels
    #[serde(default = "default_text_entry_width")]
    pub text_entry_width: f64,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            marker_alpha: default_marker_alpha(),
            arrow_size_multiplier: default_arrow_size_multiplier(),
            arrow_angle_degrees: default_arrow_angle_degrees(),
            counter_size_multiplier: default_counter_size_multiplier(),
            counter_font_base: default_counter_font_base(),
            counter_font_multiplier: default_counter_font_multiplier(),
            pixelate_min_block: default_pixelate_min_block(),
            text_padding: default_text_padding(),
            text_entry_width: default_text_entry_width(),
        }
    }
}

/// Save-to-file settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Directory for saved images (`~` is expanded)
    #[serde(default = "default_save_directory")]
    pub save_directory: String,

    /// chrono format string for generated file names, without extension
    #[serde(default = "default_filename_template")]
    pub filename_template: String,

    /// Format used when the target path has no recognised extension
    #[serde(default)]
    pub format: ExportFormat,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            save_directory: default_save_directory(),
            filename_template: default_filename_template(),
            format: ExportFormat::default(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_tool() -> String {
    "pen".to_string()
}

fn default_color() -> ColorSpec {
    ColorSpec::Name("red".to_string())
}

fn default_thickness() -> f64 {
    3.0
}

fn default_font_family() -> String {
    "Sans".to_string()
}

fn default_font_size() -> f64 {
    16.0
}

fn default_max_depth() -> usize {
    20
}

fn default_min_size() -> i32 {
    5
}

fn default_marker_alpha() -> u8 {
    50
}

fn default_arrow_size_multiplier() -> f64 {
    3.0
}

fn default_arrow_angle_degrees() -> f64 {
    30.0
}

fn default_counter_size_multiplier() -> f64 {
    10.0
}

fn default_counter_font_base() -> f64 {
    14.0
}

fn default_counter_font_multiplier() -> f64 {
    2.0
}

fn default_pixelate_min_block() -> i32 {
    3
}

fn default_text_padding() -> f64 {
    5.0
}

fn default_text_entry_width() -> f64 {
    200.0
}

fn default_save_directory() -> String {
    "~/Pictures/Snipmark".to_string()
}

fn default_filename_template() -> String {
    "snip_%Y-%m-%d_%H%M%S".to_string()
}
