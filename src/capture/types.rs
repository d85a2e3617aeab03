//! Data types for screen capture and export.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ExportFormat;
use crate::draw::RasterError;

/// Where a composited image should be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportDestination {
    /// Copy PNG bytes to the Wayland clipboard.
    Clipboard,
    /// Save to `path`, or to a generated name in the configured directory.
    File { path: Option<PathBuf> },
}

/// Result of a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Saved(PathBuf),
    Copied,
}

/// Errors that can occur while capturing or exporting.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Screen capture unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to save image: {0}")]
    Io(#[from] std::io::Error),

    #[error("Clipboard operation failed: {0}")]
    Clipboard(String),

    #[error("Image encoding failed: {0}")]
    Encode(String),

    #[error("Unsupported image format for {0}")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Raster(#[from] RasterError),
}

/// Encoded image ready for a sink.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub format: ExportFormat,
}
