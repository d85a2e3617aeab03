//! Annotation canvas: the layer for one selection region plus its history.

use cairo::{Context, ImageSurface, Operator};

use super::history::History;
use super::layer::{Layer, RasterError, Screenshot, create_surface};
use super::pixelate::{self, PixelatePatch};
use super::render::render_shape;
use super::shape::Shape;
use crate::util::Rect;

/// Owns the annotation layer for a finalized selection region.
///
/// Every mutation goes through [`Canvas::begin_edit`] first so the layer
/// state before the edit lands on the undo stack. The layer always has the
/// exact size of `region`.
#[derive(Debug)]
pub struct Canvas {
    region: Rect,
    layer: Layer,
    history: History,
}

impl Canvas {
    /// Creates a transparent canvas for `region` with empty history.
    pub fn new(region: Rect, max_depth: usize) -> Result<Self, RasterError> {
        Ok(Self {
            region,
            layer: Layer::transparent(region.width, region.height)?,
            history: History::new(max_depth),
        })
    }

    /// Selection region in screen coordinates.
    pub fn region(&self) -> Rect {
        self.region
    }

    pub fn layer(&self) -> &Layer {
        &self.layer
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Converts a screen point into layer-local coordinates.
    pub fn to_local(&self, x: i32, y: i32) -> (i32, i32) {
        (x - self.region.x, y - self.region.y)
    }

    /// Snapshots the current layer onto the undo stack and clears redo.
    ///
    /// Must run before the mutation it guards.
    pub fn begin_edit(&mut self) -> Result<(), RasterError> {
        let snapshot = self.layer.snapshot()?;
        self.history.record(snapshot);
        Ok(())
    }

    /// Restores the previous layer state. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.layer)
    }

    /// Re-applies an undone state. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.layer)
    }

    /// Paints a shape without touching history.
    ///
    /// Continuous strokes call this for every segment after a single
    /// `begin_edit` at stroke start.
    pub fn draw(&mut self, shape: &Shape) -> Result<(), RasterError> {
        let ctx = self.layer.context()?;
        render_shape(&ctx, shape)?;
        Ok(())
    }

    /// One undoable edit: `begin_edit` followed by a single paint.
    pub fn commit(&mut self, shape: &Shape) -> Result<(), RasterError> {
        self.begin_edit()?;
        self.draw(shape)
    }

    /// Pixelates `target` (layer-local) from the screenshot crop under this region.
    ///
    /// Returns the number of blocks written, or `None` when the target does not
    /// overlap the region. A no-op leaves history untouched.
    pub fn pixelate(
        &mut self,
        screenshot: &Screenshot,
        target: Rect,
        block: i32,
    ) -> Result<Option<usize>, RasterError> {
        let crop = screenshot.crop(&self.region)?;
        let Some(patch) = pixelate::pixelate(&crop, target, block)? else {
            return Ok(None);
        };

        self.begin_edit()?;
        self.apply_patch(&patch)?;
        Ok(Some(patch.blocks))
    }

    fn apply_patch(&mut self, patch: &PixelatePatch) -> Result<(), RasterError> {
        let ctx = self.layer.context()?;
        ctx.set_operator(Operator::Source);
        ctx.set_source_surface(&patch.surface, f64::from(patch.x), f64::from(patch.y))?;
        ctx.rectangle(
            f64::from(patch.x),
            f64::from(patch.y),
            f64::from(patch.surface.width()),
            f64::from(patch.surface.height()),
        );
        ctx.fill()?;
        Ok(())
    }

    /// Produces the exportable image: screenshot crop with the layer blended on top.
    pub fn composite(&self, screenshot: &Screenshot) -> Result<ImageSurface, RasterError> {
        let output = create_surface(self.region.width, self.region.height)?;
        {
            let ctx = Context::new(&output)?;
            ctx.set_operator(Operator::Source);
            ctx.set_source_surface(
                screenshot.surface(),
                -f64::from(self.region.x),
                -f64::from(self.region.y),
            )?;
            ctx.paint()?;

            ctx.set_operator(Operator::Over);
            ctx.set_source_surface(self.layer.surface(), 0.0, 0.0)?;
            ctx.paint()?;
        }
        output.flush();
        Ok(output)
    }
}
