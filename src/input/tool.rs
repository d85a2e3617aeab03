//! Drawing tool selection.

/// Drawing tool selection.
///
/// The active tool determines what a pointer gesture inside the selection
/// paints onto the annotation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// Freehand stroke, painted segment by segment while dragging
    Pen,
    /// Freehand stroke with fixed translucency
    Marker,
    /// Straight line between press and release
    Line,
    /// Rectangle outline from corner to corner
    Rectangle,
    /// Ellipse inscribed in the dragged box
    Ellipse,
    /// Line with a two-segment head at the release point
    Arrow,
    /// Click to open a text-entry box
    Text,
    /// Click to place a numbered bubble
    Counter,
    /// Drag a rectangle to pixelate the screenshot underneath
    Pixelate,
}

impl Tool {
    pub const ALL: [Tool; 9] = [
        Tool::Pen,
        Tool::Marker,
        Tool::Line,
        Tool::Rectangle,
        Tool::Ellipse,
        Tool::Arrow,
        Tool::Text,
        Tool::Counter,
        Tool::Pixelate,
    ];

    /// Parses a tool name. Returns `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Tool> {
        match name.trim().to_lowercase().as_str() {
            "pen" | "pencil" => Some(Tool::Pen),
            "marker" | "highlighter" => Some(Tool::Marker),
            "line" => Some(Tool::Line),
            "rectangle" | "rect" => Some(Tool::Rectangle),
            "ellipse" | "circle" => Some(Tool::Ellipse),
            "arrow" => Some(Tool::Arrow),
            "text" => Some(Tool::Text),
            "counter" => Some(Tool::Counter),
            "pixelate" => Some(Tool::Pixelate),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tool::Pen => "pen",
            Tool::Marker => "marker",
            Tool::Line => "line",
            Tool::Rectangle => "rectangle",
            Tool::Ellipse => "ellipse",
            Tool::Arrow => "arrow",
            Tool::Text => "text",
            Tool::Counter => "counter",
            Tool::Pixelate => "pixelate",
        }
    }

    /// Continuous tools paint while the pointer moves.
    pub fn is_freehand(self) -> bool {
        matches!(self, Tool::Pen | Tool::Marker)
    }

    /// Drag tools show a preview and paint once on release.
    pub fn is_drag_shape(self) -> bool {
        matches!(
            self,
            Tool::Line | Tool::Rectangle | Tool::Ellipse | Tool::Arrow | Tool::Pixelate
        )
    }
}
