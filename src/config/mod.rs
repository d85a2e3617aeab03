//! Configuration file support for snipmark.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/snipmark/config.toml`. Settings include tool defaults,
//! history depth, selection limits, per-tool constants, export options and keybindings.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod keybindings;
pub mod types;

// Re-export commonly used types at module level
pub use enums::{ColorSpec, ExportFormat, TextAlignment};
pub use keybindings::{Action, KeyBinding, KeybindingsConfig};
pub use types::{DrawingConfig, ExportConfig, HistoryConfig, SelectionConfig, ToolsConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::input::Tool;

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_tool = "arrow"
/// default_color = "red"
/// default_thickness = 3.0
/// font_size = 16.0
///
/// [history]
/// max_depth = 20
///
/// [export]
/// save_directory = "~/Pictures/Snipmark"
/// format = "png"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Tool defaults (tool, color, thickness, font, alignment)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Undo/redo depth
    #[serde(default)]
    pub history: HistoryConfig,

    /// Minimum selection size
    #[serde(default)]
    pub selection: SelectionConfig,

    /// Per-tool constants (marker alpha, arrowhead, counter, pixelation, text box)
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Save-to-file options
    #[serde(default)]
    pub export: ExportConfig,

    /// Keyboard shortcuts
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `default_thickness`: 1.0 - 20.0
    /// - `font_size`: 8.0 - 72.0
    /// - `history.max_depth`: 1 - 100
    /// - `selection.min_width` / `min_height`: at least 1
    /// - `tools.pixelate_min_block`: at least 1
    pub fn validate_and_clamp(&mut self) {
        // Thickness: 1.0 - 20.0
        if !(1.0..=20.0).contains(&self.drawing.default_thickness) {
            log::warn!(
                "Invalid default_thickness {:.1}, clamping to 1.0-20.0 range",
                self.drawing.default_thickness
            );
            self.drawing.default_thickness = self.drawing.default_thickness.clamp(1.0, 20.0);
        }

        // Font size: 8.0 - 72.0
        if !(8.0..=72.0).contains(&self.drawing.font_size) {
            log::warn!(
                "Invalid font_size {:.1}, clamping to 8.0-72.0 range",
                self.drawing.font_size
            );
            self.drawing.font_size = self.drawing.font_size.clamp(8.0, 72.0);
        }

        if Tool::from_name(&self.drawing.default_tool).is_none() {
            log::warn!(
                "Unknown default_tool '{}', falling back to 'pen'",
                self.drawing.default_tool
            );
            self.drawing.default_tool = "pen".to_string();
        }

        if !(1..=100).contains(&self.history.max_depth) {
            log::warn!(
                "Invalid history max_depth {}, clamping to 1-100 range",
                self.history.max_depth
            );
            self.history.max_depth = self.history.max_depth.clamp(1, 100);
        }

        if self.selection.min_width < 1 || self.selection.min_height < 1 {
            log::warn!(
                "Invalid minimum selection {}x{}, using at least 1x1",
                self.selection.min_width,
                self.selection.min_height
            );
            self.selection.min_width = self.selection.min_width.max(1);
            self.selection.min_height = self.selection.min_height.max(1);
        }

        if self.tools.pixelate_min_block < 1 {
            log::warn!(
                "Invalid pixelate_min_block {}, using 1",
                self.tools.pixelate_min_block
            );
            self.tools.pixelate_min_block = 1;
        }

        // Arrow angle: 5.0 - 85.0 degrees
        if !(5.0..=85.0).contains(&self.tools.arrow_angle_degrees) {
            log::warn!(
                "Invalid arrow angle {:.1}°, clamping to 5.0-85.0° range",
                self.tools.arrow_angle_degrees
            );
            self.tools.arrow_angle_degrees = self.tools.arrow_angle_degrees.clamp(5.0, 85.0);
        }

        if self.tools.text_padding < 0.0 {
            log::warn!("Negative text_padding {:.1}, using 0", self.tools.text_padding);
            self.tools.text_padding = 0.0;
        }

        if self.tools.text_entry_width <= 2.0 * self.tools.text_padding {
            log::warn!(
                "text_entry_width {:.1} leaves no room inside padding, using 200",
                self.tools.text_entry_width
            );
            self.tools.text_entry_width = 200.0;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/snipmark/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("snipmark");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    ///
    /// Unlike [`Config::load`], a missing file is an error.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config = Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        config.validate_and_clamp();
        Ok(config)
    }

    /// Parses TOML text without validation.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
