//! Headless shell: drives a capture session from synthesized events.
//!
//! Plays the role a display backend would: it feeds pointer and key events
//! into [`InputState`], fulfils export requests with the composited image
//! and reports how the session ended.

use anyhow::{Result, anyhow};
use std::fmt;
use std::path::PathBuf;

use crate::capture::{
    ExportDependencies, ExportDestination, ExportOutcome, FileSaveConfig, export_image,
};
use crate::config::{Action, Config};
use crate::draw::Screenshot;
use crate::input::{CloseReason, DrawingState, ExportRequest, InputState, Key, MouseButton};
use crate::util::Rect;

use super::script::{KeyStroke, Script, ScriptEvent};

/// How a headless session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Saved(PathBuf),
    Copied,
    SelectionCancelled,
    Closed,
}

impl fmt::Display for SessionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionOutcome::Saved(path) => write!(f, "Saved to {}", path.display()),
            SessionOutcome::Copied => write!(f, "Copied to clipboard"),
            SessionOutcome::SelectionCancelled => write!(f, "Selection cancelled"),
            SessionOutcome::Closed => write!(f, "Session closed"),
        }
    }
}

pub struct HeadlessSession {
    input_state: InputState,
    save_config: FileSaveConfig,
    dependencies: ExportDependencies,
    /// Target for save requests; `None` generates a name in the save directory
    save_path: Option<PathBuf>,
    exported: Option<ExportOutcome>,
    last_error: Option<String>,
    selection_cancelled: bool,
}

impl HeadlessSession {
    pub fn new(
        screenshot: Screenshot,
        config: &Config,
        dependencies: ExportDependencies,
    ) -> Result<Self> {
        let action_map = config
            .keybindings
            .build_action_map()
            .map_err(|e| anyhow!("Invalid keybindings: {}", e))?;

        Ok(Self {
            input_state: InputState::new(screenshot, config, action_map),
            save_config: FileSaveConfig::from_config(&config.export),
            dependencies,
            save_path: None,
            exported: None,
            last_error: None,
            selection_cancelled: false,
        })
    }

    pub fn with_save_path(mut self, path: Option<PathBuf>) -> Self {
        self.save_path = path;
        self
    }

    pub fn input_state(&self) -> &InputState {
        &self.input_state
    }

    pub fn input_state_mut(&mut self) -> &mut InputState {
        &mut self.input_state
    }

    /// Message of the most recent failed export, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Synthesizes the selection drag for `region`.
    pub fn select_region(&mut self, region: Rect) {
        log::debug!("Synthesizing selection {:?}", region);
        self.dispatch(&ScriptEvent::PointerDown {
            x: region.x,
            y: region.y,
        });
        self.dispatch(&ScriptEvent::PointerMove {
            x: region.right(),
            y: region.bottom(),
        });
        self.dispatch(&ScriptEvent::PointerUp {
            x: region.right(),
            y: region.bottom(),
        });
    }

    pub fn run_script(&mut self, script: &Script) {
        for event in &script.events {
            if self.input_state.is_closed() {
                log::debug!("Session closed; skipping remaining script events");
                break;
            }
            self.dispatch(event);
        }
    }

    /// Feeds one event into the state machine and fulfils any export it queued.
    pub fn dispatch(&mut self, event: &ScriptEvent) {
        let was_selecting = matches!(self.input_state.state, DrawingState::Selecting { .. });
        let state = &mut self.input_state;

        match event {
            ScriptEvent::PointerDown { x, y } => state.on_mouse_press(MouseButton::Left, *x, *y),
            ScriptEvent::PointerMove { x, y } => state.on_mouse_motion(*x, *y),
            ScriptEvent::PointerUp { x, y } => state.on_mouse_release(MouseButton::Left, *x, *y),
            ScriptEvent::Key { key } => match KeyStroke::parse(key) {
                Ok(stroke) => {
                    for modifier in &stroke.modifiers {
                        state.on_key_press(*modifier);
                    }
                    state.on_key_press(stroke.key);
                    state.on_key_release(stroke.key);
                    for modifier in stroke.modifiers.iter().rev() {
                        state.on_key_release(*modifier);
                    }
                }
                Err(err) => log::warn!("Skipping key event: {}", err),
            },
            ScriptEvent::Text { text } => {
                for c in text.chars() {
                    let key = if c == ' ' { Key::Space } else { Key::Char(c) };
                    state.on_key_press(key);
                    state.on_key_release(key);
                }
            }
            ScriptEvent::SetTool { tool } => {
                state.set_tool_by_name(tool);
            }
            ScriptEvent::SetColor { color } => state.settings_mut().set_color(color.to_color()),
            ScriptEvent::SetThickness { thickness } => {
                state.settings_mut().set_thickness(*thickness)
            }
            ScriptEvent::SetFontSize { size } => state.settings_mut().set_font_size(*size),
            ScriptEvent::SetFontFamily { family } => state.settings_mut().set_font_family(family),
            ScriptEvent::SetAlignment { alignment } => {
                state.settings_mut().set_alignment(*alignment)
            }
            ScriptEvent::SetFontStyle {
                bold,
                italic,
                underline,
                strikeout,
            } => state
                .settings_mut()
                .set_font_style(*bold, *italic, *underline, *strikeout),
        }

        if was_selecting && self.input_state.close_reason() == Some(CloseReason::Cancelled) {
            self.selection_cancelled = true;
        }

        if let Some(request) = self.input_state.take_pending_export() {
            self.fulfil(request);
        }
    }

    /// Issues an export as if its keybinding had been pressed.
    ///
    /// Returns whether the export succeeded.
    pub fn request_export(&mut self, request: ExportRequest) -> bool {
        let action = match request {
            ExportRequest::CopyToClipboard => Action::CopyToClipboard,
            ExportRequest::SaveToFile => Action::SaveToFile,
        };
        self.input_state.handle_action(action);
        match self.input_state.take_pending_export() {
            Some(pending) => self.fulfil(pending),
            None => false,
        }
    }

    fn fulfil(&mut self, request: ExportRequest) -> bool {
        let image = match self.input_state.composite() {
            Some(Ok(image)) => image,
            Some(Err(err)) => {
                log::error!("Compositing failed: {}", err);
                self.input_state.close(CloseReason::Failed);
                return false;
            }
            None => return false,
        };

        let destination = match request {
            ExportRequest::CopyToClipboard => ExportDestination::Clipboard,
            ExportRequest::SaveToFile => ExportDestination::File {
                path: self.save_path.clone(),
            },
        };

        match export_image(&image, &destination, &self.save_config, &self.dependencies) {
            Ok(outcome) => {
                self.exported = Some(outcome);
                self.input_state.finish_export(true);
                true
            }
            Err(err) => {
                log::error!("Export failed: {}", err);
                self.last_error = Some(err.to_string());
                self.input_state.finish_export(false);
                false
            }
        }
    }

    /// Ends the session, closing it as cancelled when still open.
    ///
    /// A session left open after a failed export reports that failure.
    pub fn finish(mut self) -> Result<SessionOutcome> {
        match self.input_state.close_reason() {
            Some(CloseReason::Exported) => match self.exported.take() {
                Some(ExportOutcome::Saved(path)) => Ok(SessionOutcome::Saved(path)),
                Some(ExportOutcome::Copied) => Ok(SessionOutcome::Copied),
                None => Ok(SessionOutcome::Closed),
            },
            Some(CloseReason::Cancelled) if self.selection_cancelled => {
                Ok(SessionOutcome::SelectionCancelled)
            }
            Some(CloseReason::Cancelled) => Ok(SessionOutcome::Closed),
            Some(CloseReason::Failed) => Err(anyhow!("Session failed while painting")),
            None => {
                if let Some(err) = self.last_error.take() {
                    return Err(anyhow!("Export failed: {}", err));
                }
                self.input_state.close(CloseReason::Cancelled);
                Ok(SessionOutcome::Closed)
            }
        }
    }
}
