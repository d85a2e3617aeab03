use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::capture::{clipboard, file, types::CaptureError};

/// Abstraction over writing encoded images to disk.
pub trait ImageFileSaver: Send + Sync {
    fn save(&self, image_data: &[u8], path: &Path) -> Result<PathBuf, CaptureError>;
}

/// Abstraction over copying PNG bytes to the clipboard.
pub trait ImageClipboard: Send + Sync {
    fn copy(&self, png_data: &[u8]) -> Result<(), CaptureError>;
}

/// Bundle of sinks used by the export pipeline. Each component can be mocked in tests.
#[derive(Clone)]
pub struct ExportDependencies {
    pub saver: Arc<dyn ImageFileSaver>,
    pub clipboard: Arc<dyn ImageClipboard>,
}

impl Default for ExportDependencies {
    fn default() -> Self {
        Self {
            saver: Arc::new(DefaultFileSaver),
            clipboard: Arc::new(DefaultClipboard),
        }
    }
}

struct DefaultFileSaver;
struct DefaultClipboard;

impl ImageFileSaver for DefaultFileSaver {
    fn save(&self, image_data: &[u8], path: &Path) -> Result<PathBuf, CaptureError> {
        file::write_image(path, image_data)
    }
}

impl ImageClipboard for DefaultClipboard {
    fn copy(&self, png_data: &[u8]) -> Result<(), CaptureError> {
        clipboard::copy_to_clipboard(png_data)
    }
}
