//! Viewport geometry in abstract layout units.
//!
//! The display surface measures its panes and reports a [`ViewportSize`];
//! the current font (after zoom) supplies line height and glyph width. The
//! combination is an immutable [`ViewportMetrics`] snapshot that pagination
//! and wrapping derive their limits from.

/// Space reserved at the bottom of a page, in layout units.
pub const DEFAULT_MARGIN_UNITS: u32 = 20;

/// Size of one pane as measured by the display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportSize {
    pub width_units: u32,
    pub height_units: u32,
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            width_units: 500,
            height_units: 700,
        }
    }
}

impl ViewportSize {
    pub fn new(width_units: u32, height_units: u32) -> Self {
        Self {
            width_units,
            height_units,
        }
    }
}

/// Line height and glyph width of a fixed-pitch font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontMetrics {
    pub line_height_units: u32,
    pub char_width_units: u32,
}

impl FontMetrics {
    /// Metrics of a monospace font: glyphs are 0.6em wide and lines 1.2em tall.
    pub fn for_point_size(size: u32) -> Self {
        let size = size.max(1);
        Self {
            line_height_units: (size.saturating_mul(6) / 5).max(1),
            char_width_units: (size.saturating_mul(3) / 5).max(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportMetrics {
    pub height_units: u32,
    pub width_units: u32,
    pub line_height_units: u32,
    pub char_width_units: u32,
}

impl ViewportMetrics {
    pub fn new(
        height_units: u32,
        width_units: u32,
        line_height_units: u32,
        char_width_units: u32,
    ) -> Self {
        Self {
            height_units,
            width_units,
            line_height_units,
            char_width_units,
        }
    }

    pub fn from_parts(size: ViewportSize, font: FontMetrics) -> Self {
        Self::new(
            size.height_units,
            size.width_units,
            font.line_height_units,
            font.char_width_units,
        )
    }

    /// Number of lines that fit on one page, never less than one.
    pub fn lines_per_page(&self, margin_units: u32) -> usize {
        let usable = self.height_units.saturating_sub(margin_units);
        (usable / self.line_height_units.max(1)).max(1) as usize
    }

    /// Number of character cells that fit on one row, never less than one.
    pub fn chars_per_line(&self) -> usize {
        (self.width_units / self.char_width_units.max(1)).max(1) as usize
    }
}
