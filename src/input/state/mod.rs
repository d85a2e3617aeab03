mod actions;
mod core;
mod mouse;
mod text;

pub use core::{CloseReason, DrawingState, EditState, ExportRequest, InputState, TextEntry};
