//! Raster edit requests produced by the drawing tools.

use super::color::Color;
use super::font::FontDescriptor;
use crate::config::TextAlignment;
use crate::util::Rect;

/// A single immediate-mode paint operation on the annotation layer.
///
/// Shapes are not stored anywhere once painted; the layer is the only
/// record. All coordinates are layer-local.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// One piece of a pen or marker stroke between two consecutive pointer samples.
    Segment {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        /// Stroke color (the marker passes its translucent color here)
        color: Color,
        thick: f64,
    },
    /// Straight line between two points
    Line {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
        thick: f64,
    },
    /// Rectangle outline spanning two corners
    Rect {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
        thick: f64,
    },
    /// Ellipse inscribed in the box spanned by two corners
    Ellipse {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
        thick: f64,
    },
    /// Shaft from `(x1, y1)` with a two-segment head at `(x2, y2)`
    Arrow {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
        thick: f64,
        /// Length of each head segment
        head_length: f64,
        /// Angle between each head segment and the shaft, in radians
        head_angle: f64,
    },
    /// Text laid out inside a padded box, vertically centered
    Text {
        /// Box matching the text-entry overlay
        bounds: Rect,
        padding: f64,
        text: String,
        color: Color,
        font: FontDescriptor,
        alignment: TextAlignment,
    },
    /// Numbered bubble centered on a click point
    Counter {
        x: i32,
        y: i32,
        number: u32,
        color: Color,
        radius: f64,
        /// Font for the number; its size is already scaled by thickness
        font: FontDescriptor,
    },
}
