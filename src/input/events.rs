//! Generic input event types for cross-backend compatibility.

/// Generic key representation for cross-backend compatibility.
///
/// Shells map their native key codes to these generic values before
/// feeding them to [`InputState`](super::InputState).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Escape key
    Escape,
    /// Return/Enter key
    Return,
    /// Backspace key
    Backspace,
    /// Tab key
    Tab,
    /// Space bar
    Space,
    /// Shift modifier
    Shift,
    /// Ctrl modifier
    Ctrl,
    /// Alt modifier
    Alt,
    /// Unmapped or unrecognized key
    Unknown,
}

impl Key {
    /// Parses a key name as used in keybinding strings ("Escape", "Return", "a", "+").
    pub fn from_name(name: &str) -> Key {
        match name.to_lowercase().as_str() {
            "escape" | "esc" => Key::Escape,
            "return" | "enter" => Key::Return,
            "backspace" => Key::Backspace,
            "tab" => Key::Tab,
            "space" => Key::Space,
            "shift" => Key::Shift,
            "ctrl" | "control" => Key::Ctrl,
            "alt" => Key::Alt,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Unknown,
                }
            }
        }
    }

    /// Name used for keybinding lookup, or `None` for modifiers and unknown keys.
    pub fn binding_name(&self) -> Option<String> {
        match self {
            Key::Char(c) => Some(c.to_string()),
            Key::Escape => Some("Escape".to_string()),
            Key::Return => Some("Return".to_string()),
            Key::Backspace => Some("Backspace".to_string()),
            Key::Tab => Some("Tab".to_string()),
            Key::Space => Some("Space".to_string()),
            Key::Shift | Key::Ctrl | Key::Alt | Key::Unknown => None,
        }
    }
}

/// Mouse button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Left mouse button (selection and drawing)
    Left,
    /// Right mouse button (currently unused)
    Right,
    /// Middle mouse button (currently unused)
    Middle,
}
