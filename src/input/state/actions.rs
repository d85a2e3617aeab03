use crate::config::Action;
use crate::input::{events::Key, tool::Tool};

use super::{CloseReason, DrawingState, EditState, ExportRequest, InputState};

impl InputState {
    /// Processes a key press event.
    ///
    /// Handles all keyboard input including:
    /// - Modifier key tracking
    /// - Text entry editing (typing, Backspace, Return to commit, Escape to cancel)
    /// - Configurable actions (exit, undo/redo, export, thickness, font size, tools)
    pub fn on_key_press(&mut self, key: Key) {
        if self.modifiers.set(key, true) {
            return;
        }
        if self.is_closed() {
            return;
        }

        // While typing, plain characters are text. Only special keys and
        // Ctrl/Alt combinations may trigger actions.
        if self.text_entry().is_some() {
            let may_trigger = match key {
                Key::Escape => true,
                Key::Char(_) | Key::Space | Key::Backspace | Key::Return => {
                    self.modifiers.command_held()
                }
                _ => self.modifiers.command_held(),
            };

            if may_trigger
                && let Some(action) = key.binding_name().and_then(|name| self.find_action(&name))
            {
                self.handle_action(action);
                return;
            }

            match key {
                Key::Char(c) if !self.modifiers.command_held() => self.insert_text(&c.to_string()),
                Key::Space if !self.modifiers.command_held() => self.insert_text(" "),
                Key::Backspace => self.delete_text_char(),
                Key::Return if !self.modifiers.shift => self.commit_text_entry(),
                Key::Escape => self.cancel_text_entry(),
                _ => {}
            }
            return;
        }

        if let Some(action) = key.binding_name().and_then(|name| self.find_action(&name)) {
            self.handle_action(action);
        }
    }

    /// Handle an action triggered by a keybinding.
    pub fn handle_action(&mut self, action: Action) {
        if self.is_closed() {
            return;
        }

        match action {
            Action::Exit => {
                if self.text_entry().is_some() {
                    self.cancel_text_entry();
                } else {
                    self.close(CloseReason::Cancelled);
                }
            }
            Action::Undo => {
                if self.is_drawing() {
                    return;
                }
                if self.text_entry().is_some() {
                    self.commit_text_entry();
                }
                if let Some(canvas) = self.canvas.as_mut()
                    && canvas.undo()
                {
                    log::debug!("Undo ({} left)", canvas.history().undo_len());
                    self.needs_redraw = true;
                }
            }
            Action::Redo => {
                if self.is_drawing() {
                    return;
                }
                if self.text_entry().is_some() {
                    self.commit_text_entry();
                }
                if let Some(canvas) = self.canvas.as_mut()
                    && canvas.redo()
                {
                    log::debug!("Redo ({} left)", canvas.history().redo_len());
                    self.needs_redraw = true;
                }
            }
            Action::CopyToClipboard => self.request_export(ExportRequest::CopyToClipboard),
            Action::SaveToFile => self.request_export(ExportRequest::SaveToFile),
            Action::IncreaseThickness => {
                self.settings.adjust_thickness(1.0);
                log::debug!("Thickness {:.0}", self.settings.thickness());
                self.needs_redraw = true;
            }
            Action::DecreaseThickness => {
                self.settings.adjust_thickness(-1.0);
                log::debug!("Thickness {:.0}", self.settings.thickness());
                self.needs_redraw = true;
            }
            Action::IncreaseFontSize => {
                self.settings.adjust_font_size(2.0);
                log::debug!("Font size {:.0}", self.settings.font().size);
                self.needs_redraw = true;
            }
            Action::DecreaseFontSize => {
                self.settings.adjust_font_size(-2.0);
                log::debug!("Font size {:.0}", self.settings.font().size);
                self.needs_redraw = true;
            }
            Action::SelectPen => self.set_tool(Tool::Pen),
            Action::SelectMarker => self.set_tool(Tool::Marker),
            Action::SelectLine => self.set_tool(Tool::Line),
            Action::SelectRectangle => self.set_tool(Tool::Rectangle),
            Action::SelectEllipse => self.set_tool(Tool::Ellipse),
            Action::SelectArrow => self.set_tool(Tool::Arrow),
            Action::SelectText => self.set_tool(Tool::Text),
            Action::SelectCounter => self.set_tool(Tool::Counter),
            Action::SelectPixelate => self.set_tool(Tool::Pixelate),
        }
    }

    /// Processes a key release event.
    ///
    /// Currently only tracks modifier key releases to update the modifier state.
    pub fn on_key_release(&mut self, key: Key) {
        self.modifiers.set(key, false);
    }

    fn is_drawing(&self) -> bool {
        matches!(
            self.state,
            DrawingState::Editing(EditState::Drawing { .. })
        )
    }
}
