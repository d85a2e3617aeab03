//! Encoding composited surfaces into file formats.

use std::io::Cursor;

use cairo::ImageSurface;
use image::{DynamicImage, ImageOutputFormat, RgbImage};

use crate::capture::types::{CaptureError, EncodedImage};
use crate::config::ExportFormat;
use crate::draw::surface_pixels;

const JPEG_QUALITY: u8 = 90;

/// Encodes `surface` as `format`.
///
/// PNG goes through Cairo directly; JPEG and BMP are built from the
/// un-premultiplied RGB channels (exports are opaque, alpha is dropped).
pub fn encode_surface(
    surface: &ImageSurface,
    format: ExportFormat,
) -> Result<EncodedImage, CaptureError> {
    let bytes = match format {
        ExportFormat::Png => encode_png(surface)?,
        ExportFormat::Jpg => encode_with_image(surface, ImageOutputFormat::Jpeg(JPEG_QUALITY))?,
        ExportFormat::Bmp => encode_with_image(surface, ImageOutputFormat::Bmp)?,
    };
    log::debug!(
        "Encoded {}x{} surface as {} ({} bytes)",
        surface.width(),
        surface.height(),
        format.extension(),
        bytes.len()
    );
    Ok(EncodedImage { bytes, format })
}

/// PNG bytes of `surface`, as copied to the clipboard.
pub fn encode_png(surface: &ImageSurface) -> Result<Vec<u8>, CaptureError> {
    let mut buffer = Vec::new();
    surface
        .write_to_png(&mut buffer)
        .map_err(|e| CaptureError::Encode(format!("PNG encoding failed: {}", e)))?;
    Ok(buffer)
}

fn encode_with_image(
    surface: &ImageSurface,
    output: ImageOutputFormat,
) -> Result<Vec<u8>, CaptureError> {
    let rgb = to_rgb_image(surface)?;
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(rgb)
        .write_to(&mut buffer, output)
        .map_err(|e| CaptureError::Encode(e.to_string()))?;
    Ok(buffer.into_inner())
}

/// Converts premultiplied ARGB32 into straight RGB8.
pub fn to_rgb_image(surface: &ImageSurface) -> Result<RgbImage, CaptureError> {
    let width = surface.width().max(0) as u32;
    let height = surface.height().max(0) as u32;
    let pixels = surface_pixels(surface)?;

    let mut raw = Vec::with_capacity(pixels.len() * 3);
    for px in pixels {
        let [r, g, b] = unpremultiply(px);
        raw.extend_from_slice(&[r, g, b]);
    }

    RgbImage::from_raw(width, height, raw)
        .ok_or_else(|| CaptureError::Encode("pixel buffer size mismatch".into()))
}

fn unpremultiply(px: u32) -> [u8; 3] {
    let a = px >> 24;
    if a == 0 {
        return [0, 0, 0];
    }
    let channel = |shift: u32| {
        let c = (px >> shift) & 0xFF;
        ((c * 255 + a / 2) / a).min(255) as u8
    };
    [channel(16), channel(8), channel(0)]
}
