use cairo::ImageSurface;

use crate::capture::{
    dependencies::ExportDependencies,
    encode,
    file::{self, FileSaveConfig},
    types::{CaptureError, ExportDestination, ExportOutcome},
};

/// Delivers a composited image to its destination.
///
/// Encoding happens here so sinks only ever see bytes. Errors are returned
/// to the caller, which keeps the session open.
pub fn export_image(
    image: &ImageSurface,
    destination: &ExportDestination,
    save_config: &FileSaveConfig,
    dependencies: &ExportDependencies,
) -> Result<ExportOutcome, CaptureError> {
    log::info!(
        "Exporting {}x{} image to {:?}",
        image.width(),
        image.height(),
        destination
    );

    match destination {
        ExportDestination::Clipboard => {
            let png = encode::encode_png(image)?;
            dependencies.clipboard.copy(&png).inspect_err(|e| {
                log::error!("Failed to copy to clipboard: {}", e);
            })?;
            Ok(ExportOutcome::Copied)
        }
        ExportDestination::File { path } => {
            let (target, format) = file::resolve_target(path.as_deref(), save_config)?;
            let encoded = encode::encode_surface(image, format)?;
            let saved = dependencies
                .saver
                .save(&encoded.bytes, &target)
                .inspect_err(|e| log::error!("Failed to save {}: {}", target.display(), e))?;
            log::info!("Image saved successfully: {}", saved.display());
            Ok(ExportOutcome::Saved(saved))
        }
    }
}
