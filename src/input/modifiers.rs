//! Keyboard modifier state tracking.

use super::events::Key;

/// Keyboard modifier state.
///
/// Tracks which modifier keys (Shift, Ctrl, Alt) are currently pressed.
/// Used for keybinding lookup and to tell typed characters from shortcuts
/// while a text entry is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key pressed
    pub shift: bool,
    /// Ctrl key pressed
    pub ctrl: bool,
    /// Alt key pressed
    pub alt: bool,
}

impl Modifiers {
    /// Creates a new Modifiers instance with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the tracked state for a modifier key. Returns false for other keys.
    pub fn set(&mut self, key: Key, pressed: bool) -> bool {
        match key {
            Key::Shift => self.shift = pressed,
            Key::Ctrl => self.ctrl = pressed,
            Key::Alt => self.alt = pressed,
            _ => return false,
        }
        true
    }

    /// True when Ctrl or Alt is held, i.e. a character key is a shortcut rather than text.
    pub fn command_held(&self) -> bool {
        self.ctrl || self.alt
    }

    /// Releases every modifier.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
