use crate::draw::{Canvas, Shape, pixelate};
use crate::input::{events::MouseButton, tool::Tool};
use crate::util::Rect;

use super::{CloseReason, DrawingState, EditState, InputState};

impl InputState {
    /// Processes a mouse button press event.
    ///
    /// # Arguments
    /// * `button` - Which mouse button was pressed
    /// * `x` - Mouse X coordinate (screen)
    /// * `y` - Mouse Y coordinate (screen)
    ///
    /// # Behavior
    /// - Before a region exists: starts the selection drag
    /// - Outside the current region: commits any text entry and starts a new selection
    /// - Inside the region: starts a stroke/drag, places a counter, or opens a text entry
    pub fn on_mouse_press(&mut self, button: MouseButton, x: i32, y: i32) {
        if button != MouseButton::Left {
            return;
        }
        self.pointer = (x, y);

        match &self.state {
            DrawingState::Closed(_) | DrawingState::Selecting { .. } => {}
            DrawingState::Idle => self.start_selection(x, y),
            DrawingState::Editing(edit) => {
                let Some(canvas) = &self.canvas else {
                    self.start_selection(x, y);
                    return;
                };
                let region = canvas.region();
                let (lx, ly) = canvas.to_local(x, y);

                if !region.contains(x, y) {
                    if matches!(edit, EditState::TextInput(_)) {
                        self.commit_text_entry();
                        if self.is_closed() {
                            return;
                        }
                    }
                    self.start_selection(x, y);
                    return;
                }

                match edit {
                    EditState::Drawing { .. } => {}
                    EditState::TextInput(entry) => {
                        if self.settings.tool() != Tool::Text {
                            // Click only dismisses the entry
                            self.commit_text_entry();
                        } else if !entry.contains(lx, ly) {
                            self.commit_text_entry();
                            if !self.is_closed() {
                                self.open_text_entry(lx, ly);
                            }
                        }
                    }
                    EditState::Ready => self.start_tool(lx, ly),
                }
            }
        }
    }

    /// Processes mouse motion events.
    ///
    /// # Behavior
    /// - While selecting: updates the selection rectangle
    /// - Pen/marker: paints a segment from the previous point to this one
    /// - Drag tools: moves the preview end point
    pub fn on_mouse_motion(&mut self, x: i32, y: i32) {
        self.pointer = (x, y);

        match &mut self.state {
            DrawingState::Selecting {
                current_x,
                current_y,
                ..
            } => {
                *current_x = x;
                *current_y = y;
                self.needs_redraw = true;
            }
            DrawingState::Editing(EditState::Drawing {
                tool,
                last_x,
                last_y,
                ..
            }) => {
                let Some(canvas) = self.canvas.as_mut() else {
                    return;
                };
                let (lx, ly) = canvas.to_local(x, y);
                let tool = *tool;
                let (px, py) = (*last_x, *last_y);
                *last_x = lx;
                *last_y = ly;

                if tool.is_freehand() {
                    let segment = self.segment_for(tool, (px, py), (lx, ly));
                    let result = match self.canvas.as_mut() {
                        Some(canvas) => canvas.draw(&segment),
                        None => Ok(()),
                    };
                    if let Err(err) = result {
                        self.fail(err);
                        return;
                    }
                }
                self.needs_redraw = true;
            }
            _ => {}
        }
    }

    /// Processes mouse button release events.
    ///
    /// # Behavior
    /// - Ends the selection drag: too small cancels the session, otherwise a
    ///   fresh canvas is created and the counter resets
    /// - Drag tools paint their shape (or pixelate) exactly once
    pub fn on_mouse_release(&mut self, button: MouseButton, x: i32, y: i32) {
        if button != MouseButton::Left {
            return;
        }
        self.pointer = (x, y);

        match self.state {
            DrawingState::Selecting {
                start_x, start_y, ..
            } => self.finish_selection(Rect::from_corners(start_x, start_y, x, y)),
            DrawingState::Editing(EditState::Drawing {
                tool,
                start_x,
                start_y,
                ..
            }) => {
                self.state = DrawingState::Editing(EditState::Ready);
                self.needs_redraw = true;

                let Some(canvas) = &self.canvas else {
                    return;
                };
                let end = canvas.to_local(x, y);
                if tool.is_drag_shape() {
                    self.finish_drag(tool, (start_x, start_y), end);
                }
            }
            _ => {}
        }
    }

    fn start_selection(&mut self, x: i32, y: i32) {
        self.state = DrawingState::Selecting {
            start_x: x,
            start_y: y,
            current_x: x,
            current_y: y,
        };
        self.needs_redraw = true;
    }

    /// Validates a dragged region and creates its canvas.
    pub(super) fn finish_selection(&mut self, mut region: Rect) {
        region.clamp_to_bounds(self.screenshot.width(), self.screenshot.height());

        if region.width < self.selection.min_width || region.height < self.selection.min_height {
            log::info!(
                "Selection {}x{} below minimum {}x{}; cancelling",
                region.width,
                region.height,
                self.selection.min_width,
                self.selection.min_height
            );
            self.close(CloseReason::Cancelled);
            return;
        }

        match Canvas::new(region, self.max_depth) {
            Ok(canvas) => {
                log::info!(
                    "Region finalized at ({}, {}) {}x{}",
                    region.x,
                    region.y,
                    region.width,
                    region.height
                );
                self.canvas = Some(canvas);
                self.counter = 0;
                self.state = DrawingState::Editing(EditState::Ready);
                self.needs_redraw = true;
            }
            Err(err) => self.fail(err),
        }
    }

    /// Pointer-down inside the region with no entry open.
    fn start_tool(&mut self, lx: i32, ly: i32) {
        let tool = self.settings.tool();
        match tool {
            Tool::Text => self.open_text_entry(lx, ly),
            Tool::Counter => {
                self.counter += 1;
                let shape = self.counter_shape(lx, ly, self.counter);
                self.commit_shape(&shape);
            }
            Tool::Pen | Tool::Marker => {
                // Nothing is painted until the pointer moves
                let result = match self.canvas.as_mut() {
                    Some(canvas) => canvas.begin_edit(),
                    None => Ok(()),
                };
                if let Err(err) = result {
                    self.fail(err);
                    return;
                }
                self.enter_drawing(tool, lx, ly);
            }
            Tool::Line | Tool::Rectangle | Tool::Ellipse | Tool::Arrow | Tool::Pixelate => {
                self.enter_drawing(tool, lx, ly);
            }
        }
    }

    fn enter_drawing(&mut self, tool: Tool, lx: i32, ly: i32) {
        self.state = DrawingState::Editing(EditState::Drawing {
            tool,
            start_x: lx,
            start_y: ly,
            last_x: lx,
            last_y: ly,
        });
        self.needs_redraw = true;
    }

    /// Destructive write for drag tools: one `begin_edit` plus one paint.
    fn finish_drag(&mut self, tool: Tool, start: (i32, i32), end: (i32, i32)) {
        if tool == Tool::Pixelate {
            let target = Rect::from_corners(start.0, start.1, end.0, end.1);
            let block = pixelate::block_size(self.settings.thickness(), self.tools.pixelate_min_block);
            let result = match self.canvas.as_mut() {
                Some(canvas) => canvas.pixelate(&self.screenshot, target, block),
                None => Ok(None),
            };
            match result {
                Ok(Some(blocks)) => log::debug!("Pixelated {:?} in {} blocks", target, blocks),
                Ok(None) => log::debug!("Pixelate target {:?} empty; nothing written", target),
                Err(err) => self.fail(err),
            }
            return;
        }

        match self.shape_for(tool, start, end) {
            Some(shape) => self.commit_shape(&shape),
            None => log::warn!("No shape for tool {}; ignoring gesture", tool.name()),
        }
    }

    pub(super) fn commit_shape(&mut self, shape: &Shape) {
        let result = match self.canvas.as_mut() {
            Some(canvas) => canvas.commit(shape),
            None => Ok(()),
        };
        match result {
            Ok(()) => self.needs_redraw = true,
            Err(err) => self.fail(err),
        }
    }

    /// Builds the raster edit for a drag tool from its two points.
    ///
    /// Returns `None` for tools that do not produce a two-point shape.
    pub fn shape_for(&self, tool: Tool, start: (i32, i32), end: (i32, i32)) -> Option<Shape> {
        let color = self.settings.color();
        let thick = self.settings.thickness();
        let (x1, y1) = start;
        let (x2, y2) = end;

        match tool {
            Tool::Line => Some(Shape::Line {
                x1,
                y1,
                x2,
                y2,
                color,
                thick,
            }),
            Tool::Rectangle => Some(Shape::Rect {
                x1,
                y1,
                x2,
                y2,
                color,
                thick,
            }),
            Tool::Ellipse => Some(Shape::Ellipse {
                x1,
                y1,
                x2,
                y2,
                color,
                thick,
            }),
            Tool::Arrow => Some(Shape::Arrow {
                x1,
                y1,
                x2,
                y2,
                color,
                thick,
                head_length: thick * self.tools.arrow_size_multiplier,
                head_angle: self.tools.arrow_angle_degrees.to_radians(),
            }),
            Tool::Pen | Tool::Marker => Some(self.segment_for(tool, start, end)),
            Tool::Text | Tool::Counter | Tool::Pixelate => None,
        }
    }

    /// Preview drawn during a drag; pixelation previews as a thin rectangle.
    pub(super) fn preview_for(&self, tool: Tool, start: (i32, i32), end: (i32, i32)) -> Option<Shape> {
        if tool == Tool::Pixelate {
            return Some(Shape::Rect {
                x1: start.0,
                y1: start.1,
                x2: end.0,
                y2: end.1,
                color: self.settings.color(),
                thick: 1.0,
            });
        }
        self.shape_for(tool, start, end)
    }

    fn segment_for(&self, tool: Tool, from: (i32, i32), to: (i32, i32)) -> Shape {
        let color = if tool == Tool::Marker {
            self.settings.color().with_alpha_u8(self.tools.marker_alpha)
        } else {
            self.settings.color()
        };
        Shape::Segment {
            x1: from.0,
            y1: from.1,
            x2: to.0,
            y2: to.1,
            color,
            thick: self.settings.thickness(),
        }
    }

    fn counter_shape(&self, x: i32, y: i32, number: u32) -> Shape {
        let thick = self.settings.thickness();
        let mut font = self.settings.font().clone();
        font.size = self.tools.counter_font_base + thick * self.tools.counter_font_multiplier;
        font.underline = false;
        font.strikeout = false;
        Shape::Counter {
            x,
            y,
            number,
            color: self.settings.color(),
            radius: thick * self.tools.counter_size_multiplier,
            font,
        }
    }
}
