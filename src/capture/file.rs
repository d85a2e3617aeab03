//! Saving exported images to disk.

use super::types::CaptureError;
use crate::config::{ExportConfig, ExportFormat};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for file saving.
#[derive(Debug, Clone)]
pub struct FileSaveConfig {
    /// Directory for generated file names.
    pub save_directory: PathBuf,
    /// Filename template (supports chrono format specifiers).
    pub filename_template: String,
    /// Format used when the target has no recognised extension.
    pub format: ExportFormat,
}

impl Default for FileSaveConfig {
    fn default() -> Self {
        Self::from_config(&ExportConfig::default())
    }
}

impl FileSaveConfig {
    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            save_directory: expand_tilde(&config.save_directory),
            filename_template: config.filename_template.clone(),
            format: config.format,
        }
    }
}

/// Generate a filename based on the template and current time.
///
/// # Arguments
/// * `template` - Template string with chrono format specifiers
/// * `format` - File extension (e.g., "png")
pub fn generate_filename(template: &str, format: &str) -> String {
    let now = Local::now();
    let filename = now.format(template).to_string();
    format!("{}.{}", filename, format)
}

/// Picks the destination path and format for a save.
///
/// An explicit path keeps its name; its extension selects the format when
/// recognised, otherwise the configured format is used. Without a path a
/// name is generated in the save directory.
pub fn resolve_target(
    explicit: Option<&Path>,
    config: &FileSaveConfig,
) -> Result<(PathBuf, ExportFormat), CaptureError> {
    match explicit {
        Some(path) => {
            let format = path
                .extension()
                .and_then(|ext| ext.to_str())
                .and_then(ExportFormat::from_extension)
                .unwrap_or(config.format);
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                ensure_directory_exists(parent)?;
            }
            Ok((path.to_path_buf(), format))
        }
        None => {
            let directory = ensure_directory_exists(&config.save_directory)?;
            let filename = generate_filename(&config.filename_template, config.format.extension());
            Ok((directory.join(filename), config.format))
        }
    }
}

/// Ensure the save directory exists, creating it if necessary.
///
/// # Returns
/// The canonicalized path to the directory
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, CaptureError> {
    if !directory.exists() {
        log::info!("Creating save directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Writes encoded bytes to `path` with user-only permissions.
pub fn write_image(path: &Path, bytes: &[u8]) -> Result<PathBuf, CaptureError> {
    log::info!("Saving image to: {} ({} bytes)", path.display(), bytes.len());

    fs::write(path, bytes)?;

    let written_size = fs::metadata(path)?.len();
    log::debug!("File written: {} bytes", written_size);

    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, Permissions::from_mode(0o600))?;
    }

    Ok(path.to_path_buf())
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}
