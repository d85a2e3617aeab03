//! Raster surfaces: the base screenshot and the transparent annotation layer.
//!
//! Both wrap a Cairo [`ImageSurface`] in `ARgb32` format. Pixels are
//! premultiplied, native-endian `u32` values (`0xAARRGGBB`).

use cairo::{Context, Format, ImageSurface, Operator};
use std::io::Read;
use thiserror::Error;

use crate::util::Rect;

/// Errors raised while allocating, painting or reading raster surfaces.
///
/// These are fatal for the current session; see [`crate::input::CloseReason`].
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("surface data unavailable: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("invalid surface size {width}x{height}")]
    InvalidSize { width: i32, height: i32 },
}

/// Allocates a zero-filled (fully transparent) ARGB32 surface.
pub(crate) fn create_surface(width: i32, height: i32) -> Result<ImageSurface, RasterError> {
    if width <= 0 || height <= 0 {
        return Err(RasterError::InvalidSize { width, height });
    }
    Ok(ImageSurface::create(Format::ARgb32, width, height)?)
}

/// Copies `source` onto a new surface of `width` x `height`, placing the
/// source's origin at `(offset_x, offset_y)`. Pixels are replaced, not blended.
pub(crate) fn copy_surface(
    source: &ImageSurface,
    offset_x: f64,
    offset_y: f64,
    width: i32,
    height: i32,
) -> Result<ImageSurface, RasterError> {
    let copy = create_surface(width, height)?;
    {
        let ctx = Context::new(&copy)?;
        ctx.set_operator(Operator::Source);
        ctx.set_source_surface(source, offset_x, offset_y)?;
        ctx.paint()?;
    }
    copy.flush();
    Ok(copy)
}

/// Reads every pixel of `surface` in row-major order, dropping stride padding.
pub fn surface_pixels(surface: &ImageSurface) -> Result<Vec<u32>, RasterError> {
    let width = surface.width().max(0) as usize;
    let height = surface.height().max(0) as usize;
    let stride = surface.stride().max(0) as usize;
    let mut pixels = Vec::with_capacity(width * height);

    surface.flush();
    surface.with_data(|data| {
        for row in data.chunks(stride).take(height) {
            for px in row[..width * 4].chunks_exact(4) {
                pixels.push(u32::from_ne_bytes([px[0], px[1], px[2], px[3]]));
            }
        }
    })?;

    Ok(pixels)
}

/// Reads a single premultiplied pixel, or `None` when outside the surface.
pub fn surface_pixel(surface: &ImageSurface, x: i32, y: i32) -> Result<Option<u32>, RasterError> {
    if x < 0 || y < 0 || x >= surface.width() || y >= surface.height() {
        return Ok(None);
    }
    let offset = y as usize * surface.stride() as usize + x as usize * 4;
    let mut value = None;

    surface.flush();
    surface.with_data(|data| {
        if let Some(px) = data.get(offset..offset + 4) {
            value = Some(u32::from_ne_bytes([px[0], px[1], px[2], px[3]]));
        }
    })?;

    Ok(value)
}

// ============================================================================
// Annotation Layer
// ============================================================================

/// The mutable, initially transparent raster all tools paint onto.
///
/// Coordinates are layer-local: `(0, 0)` is the top-left of the selection.
#[derive(Debug)]
pub struct Layer {
    surface: ImageSurface,
}

impl Layer {
    /// Creates a fully transparent layer.
    pub fn transparent(width: i32, height: i32) -> Result<Self, RasterError> {
        Ok(Self {
            surface: create_surface(width, height)?,
        })
    }

    pub fn width(&self) -> i32 {
        self.surface.width()
    }

    pub fn height(&self) -> i32 {
        self.surface.height()
    }

    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    /// Opens a Cairo context targeting this layer.
    ///
    /// Drop the context before snapshotting or reading pixels.
    pub fn context(&self) -> Result<Context, RasterError> {
        Ok(Context::new(&self.surface)?)
    }

    /// Deep copy used by the history stacks.
    pub fn snapshot(&self) -> Result<Layer, RasterError> {
        Ok(Self {
            surface: copy_surface(&self.surface, 0.0, 0.0, self.width(), self.height())?,
        })
    }

    pub fn pixel(&self, x: i32, y: i32) -> Result<Option<u32>, RasterError> {
        surface_pixel(&self.surface, x, y)
    }

    pub fn pixels(&self) -> Result<Vec<u32>, RasterError> {
        surface_pixels(&self.surface)
    }

    /// Bit-exact pixel comparison.
    pub fn same_pixels(&self, other: &Layer) -> Result<bool, RasterError> {
        if self.width() != other.width() || self.height() != other.height() {
            return Ok(false);
        }
        Ok(self.pixels()? == other.pixels()?)
    }

    /// True while no pixel has been painted.
    pub fn is_blank(&self) -> Result<bool, RasterError> {
        Ok(self.pixels()?.iter().all(|&px| px == 0))
    }
}

// ============================================================================
// Screenshot
// ============================================================================

/// Immutable full-screen capture, normalized to opaque ARGB32.
#[derive(Debug)]
pub struct Screenshot {
    surface: ImageSurface,
}

impl Screenshot {
    /// Wraps an existing surface, flattening any transparency onto black.
    pub fn from_surface(source: &ImageSurface) -> Result<Self, RasterError> {
        let surface = create_surface(source.width(), source.height())?;
        {
            let ctx = Context::new(&surface)?;
            ctx.set_source_rgb(0.0, 0.0, 0.0);
            ctx.paint()?;
            ctx.set_source_surface(source, 0.0, 0.0)?;
            ctx.paint()?;
        }
        surface.flush();
        Ok(Self { surface })
    }

    /// Decodes a PNG stream.
    pub fn from_png<R: Read>(reader: &mut R) -> Result<Self, RasterError> {
        let decoded =
            ImageSurface::create_from_png(reader).map_err(|e| RasterError::Decode(e.to_string()))?;
        Self::from_surface(&decoded)
    }

    /// Builds a screenshot filled with one opaque color. Mostly useful for tests.
    pub fn solid(width: i32, height: i32, r: f64, g: f64, b: f64) -> Result<Self, RasterError> {
        let surface = create_surface(width, height)?;
        {
            let ctx = Context::new(&surface)?;
            ctx.set_source_rgb(r, g, b);
            ctx.paint()?;
        }
        surface.flush();
        Ok(Self { surface })
    }

    pub fn width(&self) -> i32 {
        self.surface.width()
    }

    pub fn height(&self) -> i32 {
        self.surface.height()
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            x: 0,
            y: 0,
            width: self.width(),
            height: self.height(),
        }
    }

    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    /// Copies the pixels under `region` into a new opaque surface.
    pub fn crop(&self, region: &Rect) -> Result<ImageSurface, RasterError> {
        copy_surface(
            &self.surface,
            -f64::from(region.x),
            -f64::from(region.y),
            region.width,
            region.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_layer_is_fully_transparent() {
        let layer = Layer::transparent(8, 4).unwrap();
        assert_eq!(layer.pixels().unwrap().len(), 32);
        assert!(layer.is_blank().unwrap());
    }

    #[test]
    fn zero_sized_layer_is_rejected() {
        assert!(matches!(
            Layer::transparent(0, 10),
            Err(RasterError::InvalidSize { .. })
        ));
    }

    #[test]
    fn snapshot_is_independent_of_original() {
        let layer = Layer::transparent(10, 10).unwrap();
        let snapshot = layer.snapshot().unwrap();
        {
            let ctx = layer.context().unwrap();
            ctx.set_source_rgb(1.0, 0.0, 0.0);
            ctx.rectangle(0.0, 0.0, 2.0, 2.0);
            ctx.fill().unwrap();
        }
        assert!(!layer.is_blank().unwrap());
        assert!(snapshot.is_blank().unwrap());
    }

    #[test]
    fn screenshot_crop_reads_region_pixels() {
        let shot = Screenshot::solid(20, 20, 0.0, 0.0, 1.0).unwrap();
        let crop = shot.crop(&Rect::new(5, 5, 4, 3).unwrap()).unwrap();
        assert_eq!((crop.width(), crop.height()), (4, 3));
        let pixels = surface_pixels(&crop).unwrap();
        assert!(pixels.iter().all(|&px| px == 0xFF00_00FF));
    }

    #[test]
    fn pixel_outside_surface_is_none() {
        let layer = Layer::transparent(3, 3).unwrap();
        assert_eq!(layer.pixel(3, 0).unwrap(), None);
        assert_eq!(layer.pixel(1, 1).unwrap(), Some(0));
    }
}
