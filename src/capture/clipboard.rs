//! Clipboard integration for copying exported images.

use super::types::CaptureError;
use std::process::{Command, Stdio};
use wl_clipboard_rs::copy::{MimeType, Options, ServeRequests, Source};

const PNG_MIME: &str = "image/png";

/// Copy PNG bytes to the Wayland clipboard.
///
/// Uses the `wl-copy` command when installed and falls back to the
/// wl-clipboard-rs library otherwise.
pub fn copy_to_clipboard(png_data: &[u8]) -> Result<(), CaptureError> {
    log::debug!("Copying image to clipboard ({} bytes)", png_data.len());

    match copy_via_command(png_data) {
        Ok(()) => {
            log::info!("Copied to clipboard via wl-copy");
            Ok(())
        }
        Err(cmd_err) => {
            log::warn!(
                "wl-copy command path failed ({}). Falling back to wl-clipboard-rs",
                cmd_err
            );
            match copy_via_library(png_data) {
                Ok(()) => {
                    log::info!("Copied to clipboard via wl-clipboard-rs");
                    Ok(())
                }
                Err(lib_err) => Err(CaptureError::Clipboard(format!(
                    "wl-copy failed: {} ; wl-clipboard-rs failed: {}",
                    cmd_err, lib_err
                ))),
            }
        }
    }
}

fn copy_via_library(png_data: &[u8]) -> Result<(), CaptureError> {
    let mut opts = Options::new();
    // Serve one paste, then let the process exit
    opts.serve_requests(ServeRequests::Only(1));

    opts.copy(
        Source::Bytes(png_data.into()),
        MimeType::Specific(PNG_MIME.to_string()),
    )
    .map_err(|e| CaptureError::Clipboard(format!("wl-clipboard-rs error: {}", e)))
}

fn copy_via_command(png_data: &[u8]) -> Result<(), CaptureError> {
    use std::io::Write;

    let mut child = Command::new("wl-copy")
        .args(["--type", PNG_MIME])
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            CaptureError::Clipboard(format!("Failed to spawn wl-copy (is it installed?): {}", e))
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(png_data).map_err(|e| {
            CaptureError::Clipboard(format!("Failed to write to wl-copy stdin: {}", e))
        })?;
    }

    let output = child
        .wait_with_output()
        .map_err(|e| CaptureError::Clipboard(format!("Failed to wait for wl-copy: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CaptureError::Clipboard(format!(
            "wl-copy failed: {}",
            stderr.trim()
        )));
    }

    Ok(())
}
