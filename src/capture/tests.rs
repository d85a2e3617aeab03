use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use tempfile::TempDir;

use super::{
    dependencies::{ExportDependencies, ImageClipboard, ImageFileSaver},
    file::FileSaveConfig,
    pipeline::export_image,
    types::{CaptureError, ExportDestination, ExportOutcome},
};
use crate::config::ExportFormat;
use crate::draw::Screenshot;

#[derive(Clone, Default)]
struct MockSaver {
    should_fail: bool,
    calls: Arc<Mutex<usize>>,
    last: Arc<Mutex<Option<(PathBuf, Vec<u8>)>>>,
}

impl ImageFileSaver for MockSaver {
    fn save(&self, image_data: &[u8], path: &Path) -> Result<PathBuf, CaptureError> {
        *self.calls.lock().unwrap() += 1;
        if self.should_fail {
            return Err(CaptureError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "save failed",
            )));
        }
        *self.last.lock().unwrap() = Some((path.to_path_buf(), image_data.to_vec()));
        Ok(path.to_path_buf())
    }
}

#[derive(Clone, Default)]
struct MockClipboard {
    should_fail: bool,
    calls: Arc<Mutex<usize>>,
    last: Arc<Mutex<Vec<u8>>>,
}

impl ImageClipboard for MockClipboard {
    fn copy(&self, png_data: &[u8]) -> Result<(), CaptureError> {
        *self.calls.lock().unwrap() += 1;
        if self.should_fail {
            return Err(CaptureError::Clipboard("clipboard failure".to_string()));
        }
        *self.last.lock().unwrap() = png_data.to_vec();
        Ok(())
    }
}

fn dependencies(saver: &MockSaver, clipboard: &MockClipboard) -> ExportDependencies {
    ExportDependencies {
        saver: Arc::new(saver.clone()),
        clipboard: Arc::new(clipboard.clone()),
    }
}

fn test_image() -> cairo::ImageSurface {
    Screenshot::solid(16, 12, 0.9, 0.1, 0.1)
        .unwrap()
        .crop(&crate::util::Rect::new(2, 2, 10, 8).unwrap())
        .unwrap()
}

fn save_config(dir: &Path) -> FileSaveConfig {
    FileSaveConfig {
        save_directory: dir.to_path_buf(),
        filename_template: "snip_test".to_string(),
        format: ExportFormat::Png,
    }
}

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

#[test]
fn test_clipboard_export_sends_png() {
    let temp = TempDir::new().unwrap();
    let saver = MockSaver::default();
    let clipboard = MockClipboard::default();

    let outcome = export_image(
        &test_image(),
        &ExportDestination::Clipboard,
        &save_config(temp.path()),
        &dependencies(&saver, &clipboard),
    )
    .unwrap();

    assert_eq!(outcome, ExportOutcome::Copied);
    assert_eq!(*clipboard.calls.lock().unwrap(), 1);
    assert_eq!(*saver.calls.lock().unwrap(), 0);
    assert_eq!(&clipboard.last.lock().unwrap()[0..8], &PNG_SIGNATURE);
}

#[test]
fn test_file_export_generates_name_in_directory() {
    let temp = TempDir::new().unwrap();
    let saver = MockSaver::default();
    let clipboard = MockClipboard::default();

    let outcome = export_image(
        &test_image(),
        &ExportDestination::File { path: None },
        &save_config(temp.path()),
        &dependencies(&saver, &clipboard),
    )
    .unwrap();

    let ExportOutcome::Saved(path) = outcome else {
        panic!("expected a saved path");
    };
    assert_eq!(path.file_name().unwrap(), "snip_test.png");
    let (_, bytes) = saver.last.lock().unwrap().clone().unwrap();
    assert_eq!(&bytes[0..8], &PNG_SIGNATURE);
    assert_eq!(*clipboard.calls.lock().unwrap(), 0);
}

#[test]
fn test_file_export_format_follows_extension() {
    let temp = TempDir::new().unwrap();
    let saver = MockSaver::default();
    let clipboard = MockClipboard::default();
    let target = temp.path().join("annotated.jpg");

    export_image(
        &test_image(),
        &ExportDestination::File {
            path: Some(target.clone()),
        },
        &save_config(temp.path()),
        &dependencies(&saver, &clipboard),
    )
    .unwrap();

    let (path, bytes) = saver.last.lock().unwrap().clone().unwrap();
    assert_eq!(path, target);
    assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
}

#[test]
fn test_save_failure_is_reported() {
    let temp = TempDir::new().unwrap();
    let saver = MockSaver {
        should_fail: true,
        ..MockSaver::default()
    };
    let clipboard = MockClipboard::default();

    let err = export_image(
        &test_image(),
        &ExportDestination::File { path: None },
        &save_config(temp.path()),
        &dependencies(&saver, &clipboard),
    )
    .unwrap_err();

    assert!(matches!(err, CaptureError::Io(_)));
    assert_eq!(*saver.calls.lock().unwrap(), 1);
}

#[test]
fn test_clipboard_failure_is_reported() {
    let temp = TempDir::new().unwrap();
    let saver = MockSaver::default();
    let clipboard = MockClipboard {
        should_fail: true,
        ..MockClipboard::default()
    };

    let err = export_image(
        &test_image(),
        &ExportDestination::Clipboard,
        &save_config(temp.path()),
        &dependencies(&saver, &clipboard),
    )
    .unwrap_err();

    assert!(matches!(err, CaptureError::Clipboard(_)));
}

#[test]
fn test_default_saver_writes_file() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("real.bmp");

    let outcome = export_image(
        &test_image(),
        &ExportDestination::File {
            path: Some(target.clone()),
        },
        &save_config(temp.path()),
        &ExportDependencies::default(),
    )
    .unwrap();

    assert_eq!(outcome, ExportOutcome::Saved(target.clone()));
    let bytes = std::fs::read(&target).unwrap();
    assert_eq!(&bytes[0..2], b"BM");
}
