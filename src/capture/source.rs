//! Screen capture providers.
//!
//! A session needs exactly one full-screen image. Providers return it as a
//! normalized [`Screenshot`] (opaque ARGB32), whatever they read it from.

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::capture::types::CaptureError;
use crate::draw::Screenshot;

/// Abstraction over where the full-screen image comes from.
pub trait ScreenSource {
    fn capture(&self) -> Result<Screenshot, CaptureError>;
}

/// Reads a previously captured PNG from disk.
#[derive(Debug, Clone)]
pub struct PngFileSource {
    pub path: PathBuf,
}

impl PngFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScreenSource for PngFileSource {
    fn capture(&self) -> Result<Screenshot, CaptureError> {
        log::debug!("Loading screenshot from {}", self.path.display());
        let file = File::open(&self.path)?;
        let mut reader = BufReader::new(file);
        let screenshot = Screenshot::from_png(&mut reader)?;
        log::info!(
            "Loaded {}x{} screenshot from {}",
            screenshot.width(),
            screenshot.height(),
            self.path.display()
        );
        Ok(screenshot)
    }
}

/// Captures all outputs with `grim -`, which writes a PNG to stdout.
#[derive(Debug, Clone, Default)]
pub struct GrimSource {
    /// Optional output name passed as `grim -o <name>`
    pub output: Option<String>,
}

impl ScreenSource for GrimSource {
    fn capture(&self) -> Result<Screenshot, CaptureError> {
        let mut command = Command::new("grim");
        if let Some(output) = &self.output {
            command.args(["-o", output]);
        }
        command.arg("-");

        log::debug!("Capturing screen via grim");
        let output = command
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                CaptureError::Unavailable(format!("Failed to run grim (is it installed?): {}", e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CaptureError::Unavailable(format!(
                "grim failed: {}",
                stderr.trim()
            )));
        }

        if output.stdout.is_empty() {
            return Err(CaptureError::Unavailable(
                "grim returned empty screenshot".into(),
            ));
        }

        log::info!("grim returned {} bytes", output.stdout.len());
        Ok(Screenshot::from_png(&mut Cursor::new(output.stdout))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn png_file_source_loads_opaque_screenshot() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("screen.png");

        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 12, 8).unwrap();
        {
            let ctx = cairo::Context::new(&surface).unwrap();
            ctx.set_source_rgba(0.0, 0.0, 1.0, 0.5);
            ctx.paint().unwrap();
        }
        let mut file = File::create(&path).unwrap();
        surface.write_to_png(&mut file).unwrap();
        drop(file);

        let screenshot = PngFileSource::new(&path).capture().unwrap();
        assert_eq!((screenshot.width(), screenshot.height()), (12, 8));
        let px = crate::draw::surface_pixel(screenshot.surface(), 3, 3)
            .unwrap()
            .unwrap();
        assert_eq!(px >> 24, 0xFF);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = PngFileSource::new("/nonexistent/snipmark/screen.png")
            .capture()
            .unwrap_err();
        assert!(matches!(err, CaptureError::Io(_)));
    }

    #[test]
    fn garbage_file_is_raster_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();

        let err = PngFileSource::new(&path).capture().unwrap_err();
        assert!(matches!(err, CaptureError::Raster(_)));
    }
}
