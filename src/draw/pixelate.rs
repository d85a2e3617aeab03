//! Block pixelation of a screenshot sub-rectangle.
//!
//! Each block is filled with the most frequent exact color among its source
//! pixels. Ties go to the color seen first in a row-major scan of the block,
//! which keeps the output deterministic for a given input.

use std::collections::HashMap;

use cairo::ImageSurface;

use super::layer::{RasterError, create_surface, surface_pixels};
use crate::util::Rect;

/// Smallest block edge ever used, regardless of configured thickness.
pub const MIN_BLOCK_SIZE: i32 = 3;

/// Pixelated pixels ready to be painted onto the annotation layer.
#[derive(Debug)]
pub struct PixelatePatch {
    /// Surface exactly the size of the clipped target rectangle
    pub surface: ImageSurface,
    /// Layer-local position of the surface's top-left corner
    pub x: i32,
    pub y: i32,
    /// Number of block fills performed
    pub blocks: usize,
}

/// Returns the block edge for a stroke thickness: `max(min_block, thickness)`.
pub fn block_size(thickness: f64, min_block: i32) -> i32 {
    (thickness.round() as i32).max(min_block).max(1)
}

/// Partitions a `width` x `height` area into blocks of `block` pixels.
///
/// The last row and column are clipped to the area.
pub fn block_grid(width: i32, height: i32, block: i32) -> Vec<Rect> {
    let block = block.max(1);
    let mut cells = Vec::new();
    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            if let Some(cell) = Rect::from_min_max(x, y, (x + block).min(width), (y + block).min(height)) {
                cells.push(cell);
            }
            x += block;
        }
        y += block;
    }
    cells
}

/// Pixelates `target` (source-local coordinates) using pixels from `source`.
///
/// The target is clipped to the source bounds first. Returns `Ok(None)` when
/// nothing of the target remains, which callers treat as a silent no-op.
pub fn pixelate(
    source: &ImageSurface,
    target: Rect,
    block: i32,
) -> Result<Option<PixelatePatch>, RasterError> {
    let bounds = Rect {
        x: 0,
        y: 0,
        width: source.width(),
        height: source.height(),
    };
    let Some(clipped) = target.intersect(&bounds) else {
        log::debug!("Pixelate target {:?} outside {:?}; skipping", target, bounds);
        return Ok(None);
    };

    let pixels = surface_pixels(source)?;
    let src_width = bounds.width as usize;

    let mut patch = create_surface(clipped.width, clipped.height)?;
    let stride = patch.stride() as usize;
    let cells = block_grid(clipped.width, clipped.height, block);

    {
        let mut data = patch.data()?;
        for cell in &cells {
            let color = dominant_color(&pixels, src_width, &cell.relative_to(-clipped.x, -clipped.y));
            let bytes = color.to_ne_bytes();
            for row in cell.y..cell.bottom() {
                let row_start = row as usize * stride;
                for col in cell.x..cell.right() {
                    let offset = row_start + col as usize * 4;
                    data[offset..offset + 4].copy_from_slice(&bytes);
                }
            }
        }
    }
    patch.mark_dirty();

    Ok(Some(PixelatePatch {
        surface: patch,
        x: clipped.x,
        y: clipped.y,
        blocks: cells.len(),
    }))
}

/// Most frequent pixel value inside `cell` (source coordinates).
fn dominant_color(pixels: &[u32], src_width: usize, cell: &Rect) -> u32 {
    let mut counts: HashMap<u32, usize> = HashMap::new();
    let mut order: Vec<u32> = Vec::new();

    for y in cell.y..cell.bottom() {
        let row_start = y as usize * src_width;
        for x in cell.x..cell.right() {
            let px = pixels[row_start + x as usize];
            let count = counts.entry(px).or_insert(0);
            if *count == 0 {
                order.push(px);
            }
            *count += 1;
        }
    }

    let mut best = 0;
    let mut best_count = 0;
    for px in order {
        let count = counts[&px];
        if count > best_count {
            best = px;
            best_count = count;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::layer::Screenshot;

    fn striped_source() -> ImageSurface {
        // Left half red, right half blue, 12x6
        let surface = create_surface(12, 6).unwrap();
        {
            let ctx = cairo::Context::new(&surface).unwrap();
            ctx.set_source_rgb(1.0, 0.0, 0.0);
            ctx.rectangle(0.0, 0.0, 6.0, 6.0);
            ctx.fill().unwrap();
            ctx.set_source_rgb(0.0, 0.0, 1.0);
            ctx.rectangle(6.0, 0.0, 6.0, 6.0);
            ctx.fill().unwrap();
        }
        surface
    }

    #[test]
    fn block_size_never_drops_below_minimum() {
        assert_eq!(block_size(1.0, MIN_BLOCK_SIZE), 3);
        assert_eq!(block_size(3.0, MIN_BLOCK_SIZE), 3);
        assert_eq!(block_size(12.0, MIN_BLOCK_SIZE), 12);
    }

    #[test]
    fn grid_count_matches_ceiling_partition() {
        for (w, h, b) in [(10, 10, 3), (9, 9, 3), (1, 7, 4), (25, 4, 5)] {
            let expected = ((w + b - 1) / b) * ((h + b - 1) / b);
            assert_eq!(block_grid(w, h, b).len() as i32, expected, "{w}x{h} / {b}");
        }
    }

    #[test]
    fn grid_clips_last_row_and_column() {
        let cells = block_grid(7, 5, 3);
        let last = cells.last().unwrap();
        assert_eq!(*last, Rect::new(6, 3, 1, 2).unwrap());
    }

    #[test]
    fn patch_reports_block_count() {
        let shot = Screenshot::solid(30, 20, 0.2, 0.4, 0.6).unwrap();
        let patch = pixelate(shot.surface(), Rect::new(2, 3, 10, 7).unwrap(), 4)
            .unwrap()
            .unwrap();
        assert_eq!(patch.blocks, 3 * 2);
        assert_eq!((patch.surface.width(), patch.surface.height()), (10, 7));
    }

    #[test]
    fn uniform_region_is_unchanged() {
        let shot = Screenshot::solid(16, 16, 0.1, 0.7, 0.3).unwrap();
        let target = Rect::new(1, 2, 11, 9).unwrap();
        let patch = pixelate(shot.surface(), target, 5).unwrap().unwrap();
        let original = surface_pixels(&shot.crop(&target).unwrap()).unwrap();
        assert_eq!(surface_pixels(&patch.surface).unwrap(), original);
    }

    #[test]
    fn block_takes_majority_color() {
        let source = striped_source();
        // Columns 4..8: two red columns, two blue columns -> tie, red seen first
        let tie = pixelate(&source, Rect::new(4, 0, 4, 4).unwrap(), 4)
            .unwrap()
            .unwrap();
        assert!(surface_pixels(&tie.surface).unwrap().iter().all(|&px| px == 0xFFFF_0000));

        // Columns 5..8: one red column, two blue -> blue wins
        let majority = pixelate(&source, Rect::new(5, 0, 3, 3).unwrap(), 3)
            .unwrap()
            .unwrap();
        assert!(surface_pixels(&majority.surface).unwrap().iter().all(|&px| px == 0xFF00_00FF));
    }

    #[test]
    fn target_outside_source_is_noop() {
        let shot = Screenshot::solid(10, 10, 0.0, 0.0, 0.0).unwrap();
        assert!(pixelate(shot.surface(), Rect::new(10, 0, 5, 5).unwrap(), 3)
            .unwrap()
            .is_none());
        assert!(pixelate(shot.surface(), Rect::from_corners(3, 3, 3, 8), 3)
            .unwrap()
            .is_none());
    }

    #[test]
    fn target_is_clipped_to_source() {
        let shot = Screenshot::solid(10, 10, 0.0, 0.0, 0.0).unwrap();
        let patch = pixelate(shot.surface(), Rect::from_corners(-4, 6, 5, 20), 3)
            .unwrap()
            .unwrap();
        assert_eq!((patch.x, patch.y), (0, 6));
        assert_eq!((patch.surface.width(), patch.surface.height()), (5, 4));
    }
}
