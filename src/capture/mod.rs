//! External collaborators of a capture session.
//!
//! This module provides:
//! - Screen capture providers (PNG file, grim)
//! - Image encoding (PNG, JPEG, BMP)
//! - File saving and clipboard sinks
//! - The export pipeline the shells call with a composited image

pub mod clipboard;
pub mod encode;
pub mod file;
pub mod source;
pub mod types;

mod dependencies;
mod pipeline;
#[cfg(test)]
mod tests;

pub use dependencies::{ExportDependencies, ImageClipboard, ImageFileSaver};
pub use file::FileSaveConfig;
pub use pipeline::export_image;
pub use source::{GrimSource, PngFileSource, ScreenSource};
pub use types::{CaptureError, EncodedImage, ExportDestination, ExportOutcome};
