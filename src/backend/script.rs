//! Scripted input for the headless shell.
//!
//! Scripts are TOML files holding a list of `[[events]]` tables:
//!
//! ```toml
//! [[events]]
//! type = "pointer_down"
//! x = 40
//! y = 30
//!
//! [[events]]
//! type = "key"
//! key = "Ctrl+Z"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::config::{ColorSpec, KeyBinding, TextAlignment};
use crate::input::Key;

/// One synthesized input or setting change.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    PointerDown {
        x: i32,
        y: i32,
    },
    PointerMove {
        x: i32,
        y: i32,
    },
    PointerUp {
        x: i32,
        y: i32,
    },
    /// Key combination in keybinding syntax, e.g. "Ctrl+Shift+Z" or "Return"
    Key {
        key: String,
    },
    /// Characters typed one by one
    Text {
        text: String,
    },
    SetTool {
        tool: String,
    },
    SetColor {
        color: ColorSpec,
    },
    SetThickness {
        thickness: f64,
    },
    SetFontSize {
        size: f64,
    },
    SetFontFamily {
        family: String,
    },
    SetAlignment {
        alignment: TextAlignment,
    },
    SetFontStyle {
        #[serde(default)]
        bold: bool,
        #[serde(default)]
        italic: bool,
        #[serde(default)]
        underline: bool,
        #[serde(default)]
        strikeout: bool,
    },
}

/// A parsed event script.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

impl Script {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse event script")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        let script = Self::from_toml(&text)
            .with_context(|| format!("Invalid script {}", path.display()))?;
        log::info!("Loaded {} script events from {}", script.events.len(), path.display());
        Ok(script)
    }
}

/// Key sequence for a combination string: modifiers down, the key, then
/// everything released in reverse order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyStroke {
    pub modifiers: Vec<Key>,
    pub key: Key,
}

impl KeyStroke {
    pub fn parse(combo: &str) -> Result<Self, String> {
        let binding = KeyBinding::parse(combo)?;
        let key = Key::from_name(&binding.key);
        if key == Key::Unknown {
            return Err(format!("Unknown key '{}' in '{}'", binding.key, combo));
        }

        let mut modifiers = Vec::new();
        if binding.ctrl {
            modifiers.push(Key::Ctrl);
        }
        if binding.shift {
            modifiers.push(Key::Shift);
        }
        if binding.alt {
            modifiers.push(Key::Alt);
        }
        Ok(Self { modifiers, key })
    }
}
