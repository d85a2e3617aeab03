//! Text-entry overlay: a sub-state of editing with its own commit/cancel paths.

use crate::draw::{Shape, line_height};
use crate::util::Rect;

use super::{DrawingState, EditState, InputState, TextEntry};

impl InputState {
    /// Opens an empty entry with its top-left corner at the layer-local point.
    ///
    /// Height fits one line of the current font plus padding on both sides.
    pub(super) fn open_text_entry(&mut self, lx: i32, ly: i32) {
        let padding = self.tools.text_padding;
        let line = match line_height(self.settings.font()) {
            Ok(height) => height,
            Err(err) => {
                self.fail(err.into());
                return;
            }
        };

        let entry = TextEntry {
            x: lx,
            y: ly,
            width: self.tools.text_entry_width.round() as i32,
            height: (line + 2.0 * padding).ceil() as i32,
            buffer: String::new(),
        };
        log::debug!(
            "Text entry opened at ({}, {}) {}x{}",
            entry.x,
            entry.y,
            entry.width,
            entry.height
        );
        self.state = DrawingState::Editing(EditState::TextInput(entry));
        self.needs_redraw = true;
    }

    /// Closes the open entry, painting its text as one undoable edit.
    ///
    /// An empty buffer closes the entry without touching the layer or history.
    pub fn commit_text_entry(&mut self) {
        let DrawingState::Editing(EditState::TextInput(entry)) =
            std::mem::replace(&mut self.state, DrawingState::Editing(EditState::Ready))
        else {
            return;
        };
        self.needs_redraw = true;

        if entry.buffer.is_empty() {
            log::debug!("Empty text entry closed");
            return;
        }

        let shape = Shape::Text {
            bounds: Rect {
                x: entry.x,
                y: entry.y,
                width: entry.width,
                height: entry.height,
            },
            padding: self.tools.text_padding,
            text: entry.buffer,
            color: self.settings.color(),
            font: self.settings.font().clone(),
            alignment: self.settings.alignment(),
        };
        self.commit_shape(&shape);
    }

    /// Discards the open entry without painting.
    pub fn cancel_text_entry(&mut self) {
        if self.text_entry().is_some() {
            log::debug!("Text entry cancelled");
            self.state = DrawingState::Editing(EditState::Ready);
            self.needs_redraw = true;
        }
    }

    /// Appends typed text to the open entry. Line breaks are dropped.
    pub fn insert_text(&mut self, text: &str) {
        if let DrawingState::Editing(EditState::TextInput(entry)) = &mut self.state {
            entry.buffer.extend(text.chars().filter(|c| *c != '\n' && *c != '\r'));
            self.needs_redraw = true;
        }
    }

    pub(super) fn delete_text_char(&mut self) {
        if let DrawingState::Editing(EditState::TextInput(entry)) = &mut self.state {
            entry.buffer.pop();
            self.needs_redraw = true;
        }
    }
}
