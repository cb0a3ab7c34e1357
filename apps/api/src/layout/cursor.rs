//! Vertical layout cursor for one render pass.
//!
//! `y` is measured from the top edge of the page, growing downward. It marks the
//! top of the next line to be placed.

/// Absorbs float drift between a reserved height and the same lines placed one by one.
const FIT_TOLERANCE: f32 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderCursor {
    /// Zero-based index of the page currently being filled.
    pub page_index: usize,
    pub y: f32,
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
}

impl RenderCursor {
    pub fn new(page_width: f32, page_height: f32, margin: f32) -> Self {
        RenderCursor {
            page_index: 0,
            y: margin,
            page_width,
            page_height,
            margin,
        }
    }

    pub fn left(&self) -> f32 {
        self.margin
    }

    pub fn right(&self) -> f32 {
        self.page_width - self.margin
    }

    /// Lowest `y` any content may reach.
    pub fn bottom(&self) -> f32 {
        self.page_height - self.margin
    }

    pub fn at_page_top(&self) -> bool {
        self.y <= self.margin
    }

    pub fn fits(&self, height: f32) -> bool {
        self.y + height <= self.bottom() + FIT_TOLERANCE
    }

    pub fn advance(&mut self, height: f32) {
        self.y += height;
    }

    /// Starts a new page and resets to the top margin.
    pub fn new_page(&mut self) {
        self.page_index += 1;
        self.y = self.margin;
    }

    /// Breaks the page if `height` does not fit in what is left.
    ///
    /// Never breaks at the top of a page: a block taller than a whole page is
    /// placed anyway and overflows rather than producing endless blank pages.
    /// Returns true when a break happened.
    pub fn ensure_space(&mut self, height: f32) -> bool {
        if self.fits(height) || self.at_page_top() {
            return false;
        }
        self.new_page();
        true
    }
}
