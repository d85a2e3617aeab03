//! Keybinding configuration types and parsing.
//!
//! This module defines the configurable keybinding system that allows users
//! to customize keyboard shortcuts for every session action.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All possible actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // Exit and cancellation
    Exit,

    // History
    Undo,
    Redo,

    // Export
    CopyToClipboard,
    SaveToFile,

    // Thickness and font controls
    IncreaseThickness,
    DecreaseThickness,
    IncreaseFontSize,
    DecreaseFontSize,

    // Tool selection
    SelectPen,
    SelectMarker,
    SelectLine,
    SelectRectangle,
    SelectEllipse,
    SelectArrow,
    SelectText,
    SelectCounter,
    SelectPixelate,
}

/// A single keybinding: a key name with optional modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    /// Parse a keybinding string like "Ctrl+Shift+Z" or "Escape".
    /// Modifiers can appear in any order and may be surrounded by spaces.
    /// The key itself may be '+', e.g. "Ctrl+Shift++".
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty keybinding string".to_string());
        }

        let normalized = s.replace(" + ", "+").replace("+ ", "+").replace(" +", "+");

        let mut ctrl = false;
        let mut shift = false;
        let mut alt = false;
        let mut key_parts = Vec::new();

        for part in normalized.split('+') {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => ctrl = true,
                "shift" => shift = true,
                "alt" => alt = true,
                _ => key_parts.push(part),
            }
        }

        if key_parts.is_empty() {
            return Err(format!("No key specified in: {}", s));
        }

        // "Ctrl++" splits into ["Ctrl", "", ""]; the empty tail is the '+' key
        let key = key_parts.join("+");
        let key = if key.chars().all(|c| c == '+') {
            "+".to_string()
        } else {
            key
        };

        Ok(Self {
            key,
            ctrl,
            shift,
            alt,
        })
    }

    /// Check if this keybinding matches the current input state.
    pub fn matches(&self, key: &str, ctrl: bool, shift: bool, alt: bool) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == ctrl
            && self.shift == shift
            && self.alt == alt
    }
}

/// Configuration for all keybindings.
///
/// Each action can have multiple keybindings. Users specify them in config.toml as:
/// ```toml
/// [keybindings]
/// exit = ["Escape"]
/// undo = ["Ctrl+Z"]
/// select_pixelate = ["X"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeybindingsConfig {
    #[serde(default = "default_exit")]
    pub exit: Vec<String>,

    #[serde(default = "default_undo")]
    pub undo: Vec<String>,

    #[serde(default = "default_redo")]
    pub redo: Vec<String>,

    #[serde(default = "default_copy_to_clipboard")]
    pub copy_to_clipboard: Vec<String>,

    #[serde(default = "default_save_to_file")]
    pub save_to_file: Vec<String>,

    #[serde(default = "default_increase_thickness")]
    pub increase_thickness: Vec<String>,

    #[serde(default = "default_decrease_thickness")]
    pub decrease_thickness: Vec<String>,

    #[serde(default = "default_increase_font_size")]
    pub increase_font_size: Vec<String>,

    #[serde(default = "default_decrease_font_size")]
    pub decrease_font_size: Vec<String>,

    #[serde(default = "default_select_pen")]
    pub select_pen: Vec<String>,

    #[serde(default = "default_select_marker")]
    pub select_marker: Vec<String>,

    #[serde(default = "default_select_line")]
    pub select_line: Vec<String>,

    #[serde(default = "default_select_rectangle")]
    pub select_rectangle: Vec<String>,

    #[serde(default = "default_select_ellipse")]
    pub select_ellipse: Vec<String>,

    #[serde(default = "default_select_arrow")]
    pub select_arrow: Vec<String>,

    #[serde(default = "default_select_text")]
    pub select_text: Vec<String>,

    #[serde(default = "default_select_counter")]
    pub select_counter: Vec<String>,

    #[serde(default = "default_select_pixelate")]
    pub select_pixelate: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            exit: default_exit(),
            undo: default_undo(),
            redo: default_redo(),
            copy_to_clipboard: default_copy_to_clipboard(),
            save_to_file: default_save_to_file(),
            increase_thickness: default_increase_thickness(),
            decrease_thickness: default_decrease_thickness(),
            increase_font_size: default_increase_font_size(),
            decrease_font_size: default_decrease_font_size(),
            select_pen: default_select_pen(),
            select_marker: default_select_marker(),
            select_line: default_select_line(),
            select_rectangle: default_select_rectangle(),
            select_ellipse: default_select_ellipse(),
            select_arrow: default_select_arrow(),
            select_text: default_select_text(),
            select_counter: default_select_counter(),
            select_pixelate: default_select_pixelate(),
        }
    }
}

impl KeybindingsConfig {
    /// Build a lookup map from keybindings to actions for efficient matching.
    /// Returns an error if any keybinding string is invalid or if duplicates are detected.
    pub fn build_action_map(&self) -> Result<HashMap<KeyBinding, Action>, String> {
        let mut map = HashMap::new();

        let groups: [(&[String], Action); 18] = [
            (&self.exit, Action::Exit),
            (&self.undo, Action::Undo),
            (&self.redo, Action::Redo),
            (&self.copy_to_clipboard, Action::CopyToClipboard),
            (&self.save_to_file, Action::SaveToFile),
            (&self.increase_thickness, Action::IncreaseThickness),
            (&self.decrease_thickness, Action::DecreaseThickness),
            (&self.increase_font_size, Action::IncreaseFontSize),
            (&self.decrease_font_size, Action::DecreaseFontSize),
            (&self.select_pen, Action::SelectPen),
            (&self.select_marker, Action::SelectMarker),
            (&self.select_line, Action::SelectLine),
            (&self.select_rectangle, Action::SelectRectangle),
            (&self.select_ellipse, Action::SelectEllipse),
            (&self.select_arrow, Action::SelectArrow),
            (&self.select_text, Action::SelectText),
            (&self.select_counter, Action::SelectCounter),
            (&self.select_pixelate, Action::SelectPixelate),
        ];

        for (bindings, action) in groups {
            for binding_str in bindings {
                let binding = KeyBinding::parse(binding_str)?;
                if let Some(existing_action) = map.insert(binding, action) {
                    return Err(format!(
                        "Duplicate keybinding '{}' assigned to both {:?} and {:?}",
                        binding_str, existing_action, action
                    ));
                }
            }
        }

        Ok(map)
    }
}

// =============================================================================
// Default keybinding functions
// =============================================================================

fn default_exit() -> Vec<String> {
    vec!["Escape".to_string()]
}

fn default_undo() -> Vec<String> {
    vec!["Ctrl+Z".to_string()]
}

fn default_redo() -> Vec<String> {
    vec!["Ctrl+Y".to_string(), "Ctrl+Shift+Z".to_string()]
}

fn default_copy_to_clipboard() -> Vec<String> {
    vec!["Ctrl+C".to_string()]
}

fn default_save_to_file() -> Vec<String> {
    vec!["Ctrl+S".to_string()]
}

fn default_increase_thickness() -> Vec<String> {
    vec!["+".to_string(), "=".to_string()]
}

fn default_decrease_thickness() -> Vec<String> {
    vec!["-".to_string(), "_".to_string()]
}

fn default_increase_font_size() -> Vec<String> {
    vec!["Ctrl+Shift++".to_string(), "Ctrl+Shift+=".to_string()]
}

fn default_decrease_font_size() -> Vec<String> {
    vec!["Ctrl+Shift+-".to_string(), "Ctrl+Shift+_".to_string()]
}

fn default_select_pen() -> Vec<String> {
    vec!["P".to_string()]
}

fn default_select_marker() -> Vec<String> {
    vec!["M".to_string()]
}

fn default_select_line() -> Vec<String> {
    vec!["L".to_string()]
}

fn default_select_rectangle() -> Vec<String> {
    vec!["R".to_string()]
}

fn default_select_ellipse() -> Vec<String> {
    vec!["O".to_string()]
}

fn default_select_arrow() -> Vec<String> {
    vec!["A".to_string()]
}

fn default_select_text() -> Vec<String> {
    vec!["T".to_string()]
}

fn default_select_counter() -> Vec<String> {
    vec!["N".to_string()]
}

fn default_select_pixelate() -> Vec<String> {
    vec!["X".to_string()]
}
