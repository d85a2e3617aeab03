//! Input handling and the session state machine.
//!
//! This module translates shell keyboard and pointer events into selection,
//! drawing and export actions. It owns the tool configuration and drives the
//! canvas through the idle, selecting, editing and closed states.

pub mod events;
pub mod modifiers;
pub mod settings;
pub mod state;
pub mod tool;

// Re-export commonly used types at module level
pub use events::{Key, MouseButton};
pub use modifiers::Modifiers;
pub use settings::ToolSettings;
pub use state::{CloseReason, DrawingState, EditState, ExportRequest, InputState, TextEntry};
pub use tool::Tool;
