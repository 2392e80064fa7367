//! Write cursor shared by every layout routine of one page.

/// Baseline position of the next glyph plus the line height of the run being
/// laid out. `y` only grows within a page; [`Cursor::reset`] starts a page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub x: f32,
    pub y: f32,
    pub line_height: f32,
    origin_x: f32,
    origin_y: f32,
}

impl Cursor {
    /// Cursor at the top-left corner of the content area.
    pub fn new(origin_x: f32, origin_y: f32, line_height: f32) -> Self {
        Self {
            x: origin_x,
            y: origin_y,
            line_height,
            origin_x,
            origin_y,
        }
    }

    /// Move to the start of the next line, `indent` px right of the content
    /// edge, `advance` px further down. A zero advance only repositions `x`.
    pub fn new_line(&mut self, advance: f32, indent: f32) {
        self.x = self.origin_x + indent.max(0.0);
        self.y += advance;
    }

    /// Back to the top-left content origin of a fresh page.
    pub fn reset(&mut self) {
        self.x = self.origin_x;
        self.y = self.origin_y;
    }

    /// Whether a line of `line_height` below the current baseline would
    /// cross `bottom`.
    pub fn overflows(&self, line_height: f32, bottom: f32) -> bool {
        self.y + line_height > bottom
    }
}
