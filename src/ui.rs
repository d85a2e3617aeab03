/// UI rendering: dimmed backdrop, selection, annotation layer, previews and overlays
use anyhow::{Context as _, Result};
use cairo::{Context, Format, ImageSurface};
use std::fs::File;
use std::path::Path;

use crate::draw::{RasterError, WHITE, render_shape, render_text};
use crate::input::InputState;
use crate::util::Rect;

// ============================================================================
// UI Layout Constants (not configurable)
// ============================================================================

/// Alpha of the black veil over everything outside the selection
const BACKDROP_ALPHA: f64 = 120.0 / 255.0;
/// Dash length of the selection outline
const SELECTION_DASH: f64 = 4.0;
/// Background of the text entry box
const ENTRY_BG: [f64; 4] = [0.1, 0.1, 0.1, 0.6];
/// Border of the text entry box
const ENTRY_BORDER: [f64; 4] = [1.0, 1.0, 1.0, 0.8];
/// Status bar font size
const STATUS_FONT_SIZE: f64 = 13.0;
/// Background rectangle padding around status text
const STATUS_BG_PAD: f64 = 5.0;

/// Render the whole session onto a surface the size of the screenshot.
pub fn render_session(ctx: &Context, input_state: &InputState) -> Result<(), RasterError> {
    let screenshot = input_state.screenshot();

    ctx.save()?;
    ctx.set_operator(cairo::Operator::Source);
    ctx.set_source_surface(screenshot.surface(), 0.0, 0.0)?;
    ctx.paint()?;
    ctx.restore()?;

    if input_state.is_closed() {
        return Ok(());
    }

    // Dim everything, then punch the active region back through
    ctx.set_source_rgba(0.0, 0.0, 0.0, BACKDROP_ALPHA);
    ctx.paint()?;

    let highlighted = input_state
        .selection_preview()
        .or_else(|| input_state.canvas().map(|canvas| canvas.region()));
    if let Some(region) = highlighted
        && region.is_valid()
    {
        reveal_region(ctx, input_state, &region)?;
    }

    if let Some(canvas) = input_state.canvas() {
        let region = canvas.region();
        ctx.save()?;
        rect_path(ctx, &region);
        ctx.clip();
        ctx.set_source_surface(canvas.layer().surface(), f64::from(region.x), f64::from(region.y))?;
        ctx.paint()?;

        ctx.translate(f64::from(region.x), f64::from(region.y));
        if let Some(preview) = input_state.preview_shape() {
            render_shape(ctx, &preview)?;
        }
        render_text_entry(ctx, input_state)?;
        ctx.restore()?;
    }

    if let Some(selection) = input_state.selection_preview() {
        render_selection_outline(ctx, &selection)?;
    }

    render_status_bar(ctx, input_state)?;
    Ok(())
}

fn reveal_region(ctx: &Context, input_state: &InputState, region: &Rect) -> Result<(), RasterError> {
    ctx.save()?;
    ctx.set_operator(cairo::Operator::Source);
    ctx.set_source_surface(input_state.screenshot().surface(), 0.0, 0.0)?;
    rect_path(ctx, region);
    ctx.fill()?;
    ctx.restore()?;
    Ok(())
}

fn rect_path(ctx: &Context, rect: &Rect) {
    ctx.rectangle(
        f64::from(rect.x),
        f64::from(rect.y),
        f64::from(rect.width),
        f64::from(rect.height),
    );
}

/// Dashed 1 px red outline of the region being dragged.
fn render_selection_outline(ctx: &Context, selection: &Rect) -> Result<(), RasterError> {
    ctx.save()?;
    ctx.set_source_rgb(1.0, 0.0, 0.0);
    ctx.set_line_width(1.0);
    ctx.set_dash(&[SELECTION_DASH, SELECTION_DASH], 0.0);
    // Half-pixel offset keeps a 1 px line on pixel centers
    ctx.rectangle(
        f64::from(selection.x) + 0.5,
        f64::from(selection.y) + 0.5,
        f64::from(selection.width.max(1) - 1),
        f64::from(selection.height.max(1) - 1),
    );
    ctx.stroke()?;
    ctx.restore()?;
    Ok(())
}

/// Text entry box in layer-local coordinates (caller has translated).
fn render_text_entry(ctx: &Context, input_state: &InputState) -> Result<(), RasterError> {
    let Some(entry) = input_state.text_entry() else {
        return Ok(());
    };
    let bounds = entry.bounds();
    let settings = input_state.settings();

    ctx.save()?;
    rect_path(ctx, &bounds);
    ctx.set_source_rgba(ENTRY_BG[0], ENTRY_BG[1], ENTRY_BG[2], ENTRY_BG[3]);
    ctx.fill_preserve()?;
    ctx.set_source_rgba(ENTRY_BORDER[0], ENTRY_BORDER[1], ENTRY_BORDER[2], ENTRY_BORDER[3]);
    ctx.set_line_width(1.0);
    ctx.stroke()?;
    ctx.restore()?;

    if !entry.buffer.is_empty() {
        render_text(
            ctx,
            &bounds,
            input_state.tools_config().text_padding,
            &entry.buffer,
            settings.color(),
            settings.font(),
            settings.alignment(),
        )?;
    }
    Ok(())
}

/// Status line with the current tool, thickness and font size.
fn render_status_bar(ctx: &Context, input_state: &InputState) -> Result<(), RasterError> {
    let settings = input_state.settings();
    let status_text = format!(
        "[{}] [{}px] [Text {}px]",
        settings.tool().name(),
        settings.thickness() as i32,
        settings.font().size as i32
    );

    ctx.save()?;
    ctx.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    ctx.set_font_size(STATUS_FONT_SIZE);
    let extents = match ctx.text_extents(&status_text) {
        Ok(ext) => ext,
        Err(e) => {
            log::warn!("Failed to measure status bar text: {}, skipping status bar", e);
            ctx.restore()?;
            return Ok(());
        }
    };

    let x = STATUS_BG_PAD * 2.0;
    let y = STATUS_BG_PAD * 2.0 + extents.height();
    ctx.set_source_rgba(0.0, 0.0, 0.0, 0.7);
    ctx.rectangle(
        x - STATUS_BG_PAD,
        y - extents.height() - STATUS_BG_PAD,
        extents.width() + STATUS_BG_PAD * 2.0,
        extents.height() + STATUS_BG_PAD * 2.0,
    );
    ctx.fill()?;

    WHITE.apply(ctx);
    ctx.move_to(x, y);
    ctx.show_text(&status_text)?;
    ctx.restore()?;
    Ok(())
}

/// Renders the session into a new surface the size of the screenshot.
pub fn render_to_surface(input_state: &InputState) -> Result<ImageSurface, RasterError> {
    let screenshot = input_state.screenshot();
    let surface = ImageSurface::create(Format::ARgb32, screenshot.width(), screenshot.height())?;
    {
        let ctx = Context::new(&surface)?;
        render_session(&ctx, input_state)?;
    }
    surface.flush();
    Ok(surface)
}

/// Writes what the session would show on screen as a PNG.
pub fn write_preview(input_state: &InputState, path: &Path) -> Result<()> {
    let surface = render_to_surface(input_state)?;
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    surface
        .write_to_png(&mut file)
        .map_err(|e| anyhow::anyhow!("PNG encoding failed: {}", e))?;
    log::info!("Wrote session preview to {}", path.display());
    Ok(())
}
