//! Session state machine and input state management.

use crate::config::{Action, Config, KeyBinding, SelectionConfig, ToolsConfig};
use crate::draw::{Canvas, RasterError, Screenshot, Shape};
use crate::input::{modifiers::Modifiers, settings::ToolSettings, tool::Tool};
use crate::util::Rect;
use std::collections::HashMap;

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// Escape, or a selection below the minimum size
    Cancelled,
    /// The composited image was saved or copied
    Exported,
    /// A raster allocation or paint failed
    Failed,
}

/// Export requested by a keybinding, waiting for the shell to fulfil it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportRequest {
    CopyToClipboard,
    SaveToFile,
}

/// Ephemeral single-line text box over the canvas (layer-local coordinates).
#[derive(Debug, Clone, PartialEq)]
pub struct TextEntry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub buffer: String,
}

impl TextEntry {
    pub fn bounds(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.bounds().contains(x, y)
    }
}

/// Sub-state while a finalized region is being annotated.
#[derive(Debug, Clone, PartialEq)]
pub enum EditState {
    /// Waiting for the next gesture
    Ready,
    /// Pointer held down with a stroke or drag tool (layer-local points)
    Drawing {
        tool: Tool,
        start_x: i32,
        start_y: i32,
        last_x: i32,
        last_y: i32,
    },
    /// A text entry is open and receives typed characters
    TextInput(TextEntry),
}

/// Session state machine.
///
/// `Idle` waits for the first drag, `Selecting` tracks the region drag in
/// screen coordinates, `Editing` annotates a finalized region and `Closed`
/// is terminal.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingState {
    Idle,
    Selecting {
        start_x: i32,
        start_y: i32,
        current_x: i32,
        current_y: i32,
    },
    Editing(EditState),
    Closed(CloseReason),
}

/// Main input state containing all capture session state.
///
/// Owns the screenshot, the canvas of the current selection and the tool
/// configuration. Shells feed pointer and key events in, then read
/// `needs_redraw`, `state` and any pending export back out.
pub struct InputState {
    pub(super) screenshot: Screenshot,
    /// Canvas of the finalized selection, if any
    pub(super) canvas: Option<Canvas>,
    /// Tool/stroke/font configuration
    pub(super) settings: ToolSettings,
    /// Per-tool constants (from config)
    pub(super) tools: ToolsConfig,
    /// Minimum selection size (from config)
    pub(super) selection: SelectionConfig,
    /// Snapshot depth for each new canvas
    pub(super) max_depth: usize,
    /// Last number placed by the counter tool; reset per selection
    pub(super) counter: u32,
    /// Current modifier key state
    pub modifiers: Modifiers,
    /// Current session state
    pub state: DrawingState,
    /// Whether the display needs to be redrawn
    pub needs_redraw: bool,
    /// Last pointer position in screen coordinates
    pub(super) pointer: (i32, i32),
    /// Keybinding action map for efficient lookup
    action_map: HashMap<KeyBinding, Action>,
    /// Export waiting for the shell
    pending_export: Option<ExportRequest>,
}

impl InputState {
    /// Creates a session over `screenshot` using `config` for tool defaults and limits.
    pub fn new(
        screenshot: Screenshot,
        config: &Config,
        action_map: HashMap<KeyBinding, Action>,
    ) -> Self {
        log::info!(
            "Session started on {}x{} screenshot",
            screenshot.width(),
            screenshot.height()
        );
        Self {
            screenshot,
            canvas: None,
            settings: ToolSettings::from_config(&config.drawing),
            tools: config.tools.clone(),
            selection: config.selection.clone(),
            max_depth: config.history.max_depth,
            counter: 0,
            modifiers: Modifiers::new(),
            state: DrawingState::Idle,
            needs_redraw: true,
            pointer: (0, 0),
            action_map,
            pending_export: None,
        }
    }

    pub fn screenshot(&self) -> &Screenshot {
        &self.screenshot
    }

    pub fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    /// Mutable access for a settings panel. Use [`InputState::set_tool`] to switch tools.
    pub fn settings_mut(&mut self) -> &mut ToolSettings {
        self.needs_redraw = true;
        &mut self.settings
    }

    pub fn tools_config(&self) -> &ToolsConfig {
        &self.tools
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, DrawingState::Closed(_))
    }

    pub fn close_reason(&self) -> Option<CloseReason> {
        match self.state {
            DrawingState::Closed(reason) => Some(reason),
            _ => None,
        }
    }

    /// The open text entry, if any.
    pub fn text_entry(&self) -> Option<&TextEntry> {
        match &self.state {
            DrawingState::Editing(EditState::TextInput(entry)) => Some(entry),
            _ => None,
        }
    }

    /// Current selection drag rectangle, normalized, while selecting.
    pub fn selection_preview(&self) -> Option<Rect> {
        match self.state {
            DrawingState::Selecting {
                start_x,
                start_y,
                current_x,
                current_y,
            } => Some(Rect::from_corners(start_x, start_y, current_x, current_y)),
            _ => None,
        }
    }

    /// Live preview of the shape being dragged (layer-local), never painted onto the layer.
    pub fn preview_shape(&self) -> Option<Shape> {
        match self.state {
            DrawingState::Editing(EditState::Drawing {
                tool,
                start_x,
                start_y,
                last_x,
                last_y,
            }) if tool.is_drag_shape() => {
                self.preview_for(tool, (start_x, start_y), (last_x, last_y))
            }
            _ => None,
        }
    }

    /// Switches the active tool. An open text entry is committed first.
    pub fn set_tool(&mut self, tool: Tool) {
        if self.text_entry().is_some() {
            self.commit_text_entry();
        }
        if self.settings.tool() != tool {
            log::debug!("Tool changed to {}", tool.name());
        }
        self.settings.set_tool(tool);
        self.needs_redraw = true;
    }

    /// Switches tools by name. Unknown names are ignored with a warning.
    ///
    /// Returns false when the name was not recognised.
    pub fn set_tool_by_name(&mut self, name: &str) -> bool {
        match Tool::from_name(name) {
            Some(tool) => {
                self.set_tool(tool);
                true
            }
            None => {
                log::warn!("Ignoring unknown tool '{}'", name);
                false
            }
        }
    }

    /// Look up the action bound to `key_str` under the current modifiers.
    ///
    /// Symbol keys ('+', '_') usually need Shift to type, so a binding that
    /// omits Shift still matches them when Shift is held.
    pub(super) fn find_action(&self, key_str: &str) -> Option<Action> {
        let Modifiers { ctrl, shift, alt } = self.modifiers;
        let lookup = |shift: bool| {
            self.action_map
                .iter()
                .find(|(binding, _)| binding.matches(key_str, ctrl, shift, alt))
                .map(|(_, action)| *action)
        };

        lookup(shift).or_else(|| {
            let is_symbol = key_str.chars().count() == 1
                && key_str.chars().all(|c| !c.is_alphanumeric());
            if shift && is_symbol { lookup(false) } else { None }
        })
    }

    /// Takes and clears any pending export request.
    ///
    /// Called by the shell, which composites and exports, then reports back
    /// through [`InputState::finish_export`].
    pub fn take_pending_export(&mut self) -> Option<ExportRequest> {
        self.pending_export.take()
    }

    pub(super) fn request_export(&mut self, request: ExportRequest) {
        if self.canvas.is_none() || !matches!(self.state, DrawingState::Editing(_)) {
            log::debug!("Ignoring {:?} without a selection", request);
            return;
        }
        if self.text_entry().is_some() {
            self.commit_text_entry();
        }
        if self.is_closed() {
            return;
        }
        log::debug!("Export {:?} pending for shell", request);
        self.pending_export = Some(request);
    }

    /// Reports the outcome of an export. Success closes the session;
    /// failure leaves the layer and history untouched.
    pub fn finish_export(&mut self, success: bool) {
        if success {
            self.close(CloseReason::Exported);
        } else {
            log::warn!("Export failed; session stays open");
        }
    }

    /// Composites the current selection for export.
    pub fn composite(&self) -> Option<Result<cairo::ImageSurface, RasterError>> {
        self.canvas
            .as_ref()
            .map(|canvas| canvas.composite(&self.screenshot))
    }

    /// Ends the session and releases the canvas.
    pub fn close(&mut self, reason: CloseReason) {
        if self.is_closed() {
            return;
        }
        log::info!("Session closed: {:?}", reason);
        self.canvas = None;
        self.pending_export = None;
        self.state = DrawingState::Closed(reason);
        self.needs_redraw = true;
    }

    /// Treats a raster failure as fatal for the session.
    pub(super) fn fail(&mut self, err: RasterError) {
        log::error!("Raster operation failed: {}", err);
        self.close(CloseReason::Failed);
    }
}
