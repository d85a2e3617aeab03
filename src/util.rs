//! Geometry helpers shared by the canvas, the tools and the state machine.
//!
//! This module provides:
//! - [`Rect`], the axis-aligned rectangle used for selection regions and pixelation targets
//! - Arrowhead geometry calculations
//! - Ellipse bounding box calculations

// ============================================================================
// Arrowhead Geometry
// ============================================================================

/// Calculates the two arrowhead end points for an arrow ending at `(x2, y2)`.
///
/// The head is anchored at the end point and each segment leans back along the
/// shaft by `angle` radians on either side, with exactly `length` pixels.
///
/// # Arguments
/// * `x1` - Arrow tail X coordinate
/// * `y1` - Arrow tail Y coordinate
/// * `x2` - Arrowhead tip X coordinate
/// * `y2` - Arrowhead tip Y coordinate
/// * `length` - Length of each head segment in pixels
/// * `angle` - Angle between each head segment and the shaft, in radians
///
/// # Returns
/// Array of two points `[(x, y), (x, y)]`, the first rotated by `-angle`
/// and the second by `+angle` relative to the shaft direction.
pub fn calculate_arrowhead(
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    length: f64,
    angle: f64,
) -> [(f64, f64); 2] {
    let line_angle = f64::from(y2 - y1).atan2(f64::from(x2 - x1));
    let tip_x = f64::from(x2);
    let tip_y = f64::from(y2);

    let first = (
        tip_x - length * (line_angle - angle).cos(),
        tip_y - length * (line_angle - angle).sin(),
    );
    let second = (
        tip_x - length * (line_angle + angle).cos(),
        tip_y - length * (line_angle + angle).sin(),
    );

    [first, second]
}

// ============================================================================
// Geometry Utilities
// ============================================================================

/// Axis-aligned rectangle in integer pixel coordinates.
///
/// `x`/`y` are the top-left corner; `width`/`height` are exclusive extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle. Width/height must be positive.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            None
        } else {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Builds a rectangle from min/max bounds (inclusive min, exclusive max).
    pub fn from_min_max(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<Self> {
        let width = max_x - min_x;
        let height = max_y - min_y;
        Self::new(min_x, min_y, width, height)
    }

    /// Builds a normalized rectangle spanning two corner points dragged in any direction.
    ///
    /// The result may be empty (zero width or height); callers decide whether
    /// that is acceptable.
    pub fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            x: x1.min(x2),
            y: y1.min(y2),
            width: (x2 - x1).abs(),
            height: (y2 - y1).abs(),
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Returns true if the point lies inside the rectangle.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Returns the overlapping area of two rectangles, if any.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        Rect::from_min_max(
            self.x.max(other.x),
            self.y.max(other.y),
            self.right().min(other.right()),
            self.bottom().min(other.bottom()),
        )
    }

    /// Clamps the rectangle to `[0, width) x [0, height)`.
    pub fn clamp_to_bounds(&mut self, width: i32, height: i32) {
        let max_x = self.right().clamp(0, width);
        let max_y = self.bottom().clamp(0, height);
        self.x = self.x.clamp(0, width);
        self.y = self.y.clamp(0, height);
        self.width = (max_x - self.x).max(0);
        self.height = (max_y - self.y).max(0);
    }

    /// Translates the rectangle so that `(origin_x, origin_y)` becomes the new origin.
    pub fn relative_to(&self, origin_x: i32, origin_y: i32) -> Rect {
        Rect {
            x: self.x - origin_x,
            y: self.y - origin_y,
            width: self.width,
            height: self.height,
        }
    }

    /// Returns true if rectangle has a positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Calculates ellipse parameters from two corner points.
///
/// Converts a drag rectangle (from corner to corner) into the center point
/// and radii of the inscribed ellipse.
///
/// # Returns
/// Tuple `(cx, cy, rx, ry)` in floating point so odd extents stay centered.
pub fn ellipse_bounds(x1: i32, y1: i32, x2: i32, y2: i32) -> (f64, f64, f64, f64) {
    let cx = f64::from(x1 + x2) / 2.0;
    let cy = f64::from(y1 + y2) / 2.0;
    let rx = f64::from((x2 - x1).abs()) / 2.0;
    let ry = f64::from((y2 - y1).abs()) / 2.0;
    (cx, cy, rx, ry)
}
