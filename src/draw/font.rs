//! Font descriptor for text rendering.

/// Font configuration for text rendering.
///
/// Describes which font to use, including family name, size and style flags.
/// The same descriptor drives the text-entry overlay and the final raster
/// write so both measure identically.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    /// Font family name (e.g., "Sans", "Monospace", "JetBrains Mono")
    pub family: String,

    /// Point size, clamped to the configured range by the settings layer.
    pub size: f64,

    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikeout: bool,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            family: "Sans".to_string(),
            size: 16.0,
            bold: false,
            italic: false,
            underline: false,
            strikeout: false,
        }
    }
}

impl FontDescriptor {
    /// Converts this font descriptor to a Pango font description string.
    ///
    /// Format: "Family Style Weight Size"
    /// Example: "Sans Bold 32" or "Monospace Italic 24"
    ///
    /// Underline and strikeout are not part of a Pango description; see
    /// [`FontDescriptor::attributes`].
    pub fn to_pango_string(&self) -> String {
        self.to_pango_string_sized(self.size)
    }

    /// Same as [`FontDescriptor::to_pango_string`] with an overridden size.
    pub fn to_pango_string_sized(&self, size: f64) -> String {
        let mut parts = vec![self.family.clone()];

        if self.italic {
            parts.push("Italic".to_string());
        }

        if self.bold {
            parts.push("Bold".to_string());
        }

        parts.push(format!("{}", size.round() as i32));

        parts.join(" ")
    }

    /// Builds the Pango attribute list carrying underline/strikeout decoration.
    pub fn attributes(&self) -> pango::AttrList {
        let attrs = pango::AttrList::new();
        if self.underline {
            attrs.insert(pango::AttrInt::new_underline(pango::Underline::Single));
        }
        if self.strikeout {
            attrs.insert(pango::AttrInt::new_strikethrough(true));
        }
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pango_string_default() {
        let font = FontDescriptor::default();
        assert_eq!(font.to_pango_string(), "Sans 16");
    }

    #[test]
    fn test_pango_string_bold_italic() {
        let font = FontDescriptor {
            family: "Monospace".to_string(),
            size: 24.0,
            bold: true,
            italic: true,
            ..FontDescriptor::default()
        };
        assert_eq!(font.to_pango_string(), "Monospace Italic Bold 24");
    }

    #[test]
    fn test_pango_string_size_override() {
        let font = FontDescriptor {
            family: "JetBrains Mono".to_string(),
            ..FontDescriptor::default()
        };
        assert_eq!(font.to_pango_string_sized(20.4), "JetBrains Mono 20");
    }
}
