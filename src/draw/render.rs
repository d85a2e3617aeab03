//! Cairo/Pango painters for each [`Shape`] variant.

use super::color::{Color, WHITE};
use super::font::FontDescriptor;
use super::shape::Shape;
use crate::config::TextAlignment;
use crate::util::{self, Rect};

/// Paints one shape onto the given context.
///
/// The context keeps its state between calls; every painter sets the
/// source, width and caps it needs.
pub fn render_shape(ctx: &cairo::Context, shape: &Shape) -> Result<(), cairo::Error> {
    match shape {
        Shape::Segment {
            x1,
            y1,
            x2,
            y2,
            color,
            thick,
        }
        | Shape::Line {
            x1,
            y1,
            x2,
            y2,
            color,
            thick,
        } => render_line(ctx, *x1, *y1, *x2, *y2, *color, *thick),
        Shape::Rect {
            x1,
            y1,
            x2,
            y2,
            color,
            thick,
        } => render_rect(ctx, Rect::from_corners(*x1, *y1, *x2, *y2), *color, *thick),
        Shape::Ellipse {
            x1,
            y1,
            x2,
            y2,
            color,
            thick,
        } => render_ellipse(ctx, *x1, *y1, *x2, *y2, *color, *thick),
        Shape::Arrow {
            x1,
            y1,
            x2,
            y2,
            color,
            thick,
            head_length,
            head_angle,
        } => render_arrow(
            ctx,
            *x1,
            *y1,
            *x2,
            *y2,
            *color,
            *thick,
            *head_length,
            *head_angle,
        ),
        Shape::Text {
            bounds,
            padding,
            text,
            color,
            font,
            alignment,
        } => render_text(ctx, bounds, *padding, text, *color, font, *alignment),
        Shape::Counter {
            x,
            y,
            number,
            color,
            radius,
            font,
        } => render_counter(ctx, *x, *y, *number, *color, *radius, font),
    }
}

/// Render a straight line (also used for each pen/marker segment)
fn render_line(
    ctx: &cairo::Context,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    color: Color,
    thick: f64,
) -> Result<(), cairo::Error> {
    color.apply(ctx);
    ctx.set_line_width(thick);
    ctx.set_line_cap(cairo::LineCap::Round);

    ctx.move_to(f64::from(x1), f64::from(y1));
    ctx.line_to(f64::from(x2), f64::from(y2));
    ctx.stroke()
}

/// Render a rectangle (outline)
fn render_rect(
    ctx: &cairo::Context,
    rect: Rect,
    color: Color,
    thick: f64,
) -> Result<(), cairo::Error> {
    color.apply(ctx);
    ctx.set_line_width(thick);
    ctx.set_line_join(cairo::LineJoin::Miter);

    ctx.rectangle(
        f64::from(rect.x),
        f64::from(rect.y),
        f64::from(rect.width),
        f64::from(rect.height),
    );
    ctx.stroke()
}

/// Render an ellipse using Cairo's arc with scaling
fn render_ellipse(
    ctx: &cairo::Context,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    color: Color,
    thick: f64,
) -> Result<(), cairo::Error> {
    let (cx, cy, rx, ry) = util::ellipse_bounds(x1, y1, x2, y2);
    if rx == 0.0 || ry == 0.0 {
        return Ok(());
    }

    color.apply(ctx);
    ctx.set_line_width(thick);

    ctx.save()?;
    ctx.translate(cx, cy);
    ctx.scale(rx, ry);
    ctx.arc(0.0, 0.0, 1.0, 0.0, 2.0 * std::f64::consts::PI);
    ctx.restore()?;

    ctx.stroke()
}

/// Render an arrow (shaft plus head at the end point)
#[allow(clippy::too_many_arguments)]
fn render_arrow(
    ctx: &cairo::Context,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    color: Color,
    thick: f64,
    head_length: f64,
    head_angle: f64,
) -> Result<(), cairo::Error> {
    render_line(ctx, x1, y1, x2, y2, color, thick)?;

    let [left, right] = util::calculate_arrowhead(x1, y1, x2, y2, head_length, head_angle);

    for (hx, hy) in [left, right] {
        ctx.move_to(f64::from(x2), f64::from(y2));
        ctx.line_to(hx, hy);
        ctx.stroke()?;
    }
    Ok(())
}

/// Builds a Pango layout configured with the descriptor's face and decorations.
pub(crate) fn font_layout(ctx: &cairo::Context, font: &FontDescriptor, size: f64) -> pango::Layout {
    let layout = pangocairo::functions::create_layout(ctx);
    let desc = pango::FontDescription::from_string(&font.to_pango_string_sized(size));
    layout.set_font_description(Some(&desc));
    layout.set_attributes(Some(&font.attributes()));
    layout
}

/// Renders text inside `bounds` shrunk by `padding`.
///
/// The text is laid out on a single line: horizontal placement follows
/// `alignment`, the line is centered vertically, and anything wider than
/// the box is ellipsized and clipped to it.
pub fn render_text(
    ctx: &cairo::Context,
    bounds: &Rect,
    padding: f64,
    text: &str,
    color: Color,
    font: &FontDescriptor,
    alignment: TextAlignment,
) -> Result<(), cairo::Error> {
    if text.is_empty() {
        return Ok(());
    }

    ctx.save()?;
    // Gray antialiasing; subpixel fringes on transparent surfaces
    ctx.set_antialias(cairo::Antialias::Gray);

    let inner_x = f64::from(bounds.x) + padding;
    let inner_y = f64::from(bounds.y) + padding;
    let inner_w = (f64::from(bounds.width) - 2.0 * padding).max(1.0);
    let inner_h = (f64::from(bounds.height) - 2.0 * padding).max(0.0);

    let layout = font_layout(ctx, font, font.size);
    layout.set_width((inner_w * f64::from(pango::SCALE)) as i32);
    layout.set_ellipsize(pango::EllipsizeMode::End);
    layout.set_single_paragraph_mode(true);
    layout.set_alignment(alignment.to_pango());
    layout.set_text(text);

    let (_, text_height) = layout.pixel_size();
    let top = inner_y + (inner_h - f64::from(text_height)) / 2.0;

    ctx.rectangle(inner_x, inner_y, inner_w, inner_h);
    ctx.clip();

    color.apply(ctx);
    ctx.move_to(inner_x, top);
    pangocairo::functions::show_layout(ctx, &layout);

    ctx.restore()
}

/// Renders a filled bubble with a centered white number.
fn render_counter(
    ctx: &cairo::Context,
    x: i32,
    y: i32,
    number: u32,
    color: Color,
    radius: f64,
    font: &FontDescriptor,
) -> Result<(), cairo::Error> {
    let cx = f64::from(x);
    let cy = f64::from(y);

    color.apply(ctx);
    ctx.new_path();
    ctx.arc(cx, cy, radius, 0.0, 2.0 * std::f64::consts::PI);
    ctx.fill()?;

    ctx.save()?;
    ctx.set_antialias(cairo::Antialias::Gray);
    let layout = font_layout(ctx, font, font.size);
    layout.set_text(&number.to_string());
    let (w, h) = layout.pixel_size();

    WHITE.apply(ctx);
    ctx.move_to(cx - f64::from(w) / 2.0, cy - f64::from(h) / 2.0);
    pangocairo::functions::show_layout(ctx, &layout);
    ctx.restore()
}

/// Pixel height of one line of text in `font`, as laid out by Pango.
///
/// Creates a scratch surface so it can run before any layer exists.
pub fn line_height(font: &FontDescriptor) -> Result<f64, cairo::Error> {
    let scratch = cairo::ImageSurface::create(cairo::Format::ARgb32, 1, 1)?;
    let ctx = cairo::Context::new(&scratch)?;
    let layout = font_layout(&ctx, font, font.size);
    layout.set_text("Ag");
    let (_, height) = layout.pixel_size();
    Ok(f64::from(height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::RED;
    use crate::draw::layer::Layer;

    fn painted(layer: &Layer) -> usize {
        layer
            .pixels()
            .unwrap()
            .into_iter()
            .filter(|&px| px != 0)
            .count()
    }

    #[test]
    fn degenerate_ellipse_paints_nothing() {
        let layer = Layer::transparent(40, 40).unwrap();
        let ctx = layer.context().unwrap();
        let shape = Shape::Ellipse {
            x1: 5,
            y1: 10,
            x2: 30,
            y2: 10,
            color: RED,
            thick: 3.0,
        };
        render_shape(&ctx, &shape).unwrap();
        drop(ctx);
        assert_eq!(painted(&layer), 0);
    }

    #[test]
    fn rectangle_outline_leaves_center_empty() {
        let layer = Layer::transparent(40, 40).unwrap();
        let ctx = layer.context().unwrap();
        let shape = Shape::Rect {
            x1: 30,
            y1: 30,
            x2: 10,
            y2: 10,
            color: RED,
            thick: 2.0,
        };
        render_shape(&ctx, &shape).unwrap();
        drop(ctx);
        assert_eq!(layer.pixel(20, 20).unwrap(), Some(0));
        assert_eq!(layer.pixel(10, 20).unwrap(), Some(0xFFFF_0000));
    }

    #[test]
    fn counter_fills_center_area() {
        let layer = Layer::transparent(60, 60).unwrap();
        let ctx = layer.context().unwrap();
        let shape = Shape::Counter {
            x: 30,
            y: 30,
            number: 7,
            color: RED,
            radius: 20.0,
            font: FontDescriptor::default(),
        };
        render_shape(&ctx, &shape).unwrap();
        drop(ctx);
        // Inside the bubble but away from the digit
        assert_eq!(layer.pixel(30, 14).unwrap(), Some(0xFFFF_0000));
        // Outside the bubble
        assert_eq!(layer.pixel(2, 2).unwrap(), Some(0));
    }

    /// Column and row extents of every painted pixel.
    fn ink_extents(layer: &Layer) -> Option<(i32, i32, i32, i32)> {
        let mut extents: Option<(i32, i32, i32, i32)> = None;
        for y in 0..layer.height() {
            for x in 0..layer.width() {
                if layer.pixel(x, y).unwrap() == Some(0) {
                    continue;
                }
                extents = Some(match extents {
                    None => (x, x, y, y),
                    Some((l, r, t, b)) => (l.min(x), r.max(x), t.min(y), b.max(y)),
                });
            }
        }
        extents
    }

    fn render_hi(alignment: TextAlignment, height: i32) -> Layer {
        let layer = Layer::transparent(200, height).unwrap();
        let ctx = layer.context().unwrap();
        render_text(
            &ctx,
            &Rect::new(0, 0, 200, height).unwrap(),
            5.0,
            "Hi",
            RED,
            &FontDescriptor::default(),
            alignment,
        )
        .unwrap();
        drop(ctx);
        layer
    }

    #[test]
    fn long_text_stays_inside_its_box() {
        let layer = Layer::transparent(260, 100).unwrap();
        let bounds = Rect::new(30, 35, 200, 30).unwrap();
        let ctx = layer.context().unwrap();
        let text = "The quick brown fox jumps over the lazy dog, again and again";
        assert_eq!(text.chars().count(), 60);
        render_text(
            &ctx,
            &bounds,
            5.0,
            text,
            RED,
            &FontDescriptor::default(),
            TextAlignment::Left,
        )
        .unwrap();
        drop(ctx);

        assert!(painted(&layer) > 0);
        for y in 0..layer.height() {
            for x in 0..layer.width() {
                if !bounds.contains(x, y) {
                    assert_eq!(layer.pixel(x, y).unwrap(), Some(0), "painted at ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn alignment_moves_text_across_the_box() {
        let (left, ..) = ink_extents(&render_hi(TextAlignment::Left, 40)).unwrap();
        let (center, ..) = ink_extents(&render_hi(TextAlignment::Center, 40)).unwrap();
        let (right, right_edge, ..) = ink_extents(&render_hi(TextAlignment::Right, 40)).unwrap();

        assert!(left >= 5 && left < 15, "left start {left}");
        assert!(left < center && center < right, "{left} < {center} < {right}");
        assert!((80..120).contains(&center), "center start {center}");
        assert!(right_edge < 195 && right_edge > 185, "right edge {right_edge}");
    }

    #[test]
    fn text_is_centered_vertically() {
        let (_, _, short_top, short_bottom) =
            ink_extents(&render_hi(TextAlignment::Left, 40)).unwrap();
        let (_, _, tall_top, tall_bottom) =
            ink_extents(&render_hi(TextAlignment::Left, 80)).unwrap();

        // Growing the box by 40 px moves the line down by half of that
        assert_eq!(tall_top - short_top, 20);
        assert_eq!(tall_bottom - short_bottom, 20);
        assert!(short_top >= 5 && short_bottom < 35);
    }

    #[test]
    fn empty_text_is_not_painted() {
        let layer = Layer::transparent(60, 30).unwrap();
        let ctx = layer.context().unwrap();
        render_text(
            &ctx,
            &Rect::new(0, 0, 60, 30).unwrap(),
            5.0,
            "",
            RED,
            &FontDescriptor::default(),
            TextAlignment::Left,
        )
        .unwrap();
        drop(ctx);
        assert_eq!(painted(&layer), 0);
    }
}
