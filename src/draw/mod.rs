//! Raster primitives and the annotation canvas (Cairo-based).
//!
//! This module defines the core drawing types used for screen annotation:
//! - [`Screenshot`] and [`Layer`]: the read-only capture and the transparent annotation raster
//! - [`Canvas`]: a layer bound to a selection region, with bounded undo/redo [`History`]
//! - [`Shape`]: raster edit requests produced by the tools, painted by [`render_shape`]
//! - [`pixelate`]: mode-color block pixelation of a screenshot sub-rectangle

pub mod canvas;
pub mod color;
pub mod font;
pub mod history;
pub mod layer;
pub mod pixelate;
pub mod render;
pub mod shape;

pub use canvas::Canvas;
pub use color::Color;
pub use font::FontDescriptor;
pub use history::History;
pub use layer::{Layer, RasterError, Screenshot, surface_pixel, surface_pixels};
pub use render::{line_height, render_shape, render_text};
pub use shape::Shape;

#[allow(unused_imports)]
pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, WHITE, YELLOW};
