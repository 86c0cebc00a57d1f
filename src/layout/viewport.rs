//! Viewport state for scrolling through laid-out content.

use crate::types::{Frame, Point, Size};

/// Viewport state - the visible window onto the content
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// Horizontal scroll position in content coordinates
    pub scroll_x: f32,
    /// Vertical scroll position in content coordinates
    pub scroll_y: f32,
    /// Viewport width in layout units
    pub width: f32,
    /// Viewport height in layout units
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl Viewport {
    /// Create a viewport of the given size scrolled to the origin
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width,
            height,
        }
    }

    /// Region of the content currently visible, in content coordinates
    pub fn visible_region(&self) -> Frame {
        Frame::new(self.scroll_x, self.scroll_y, self.width, self.height)
    }

    /// Convert content coordinates to viewport coordinates
    pub fn to_screen(&self, point: Point) -> Point {
        Point::new(point.x - self.scroll_x, point.y - self.scroll_y)
    }

    /// Convert viewport coordinates to content coordinates
    pub fn to_content(&self, point: Point) -> Point {
        Point::new(point.x + self.scroll_x, point.y + self.scroll_y)
    }

    /// Clamp scroll position so the viewport never leaves the content.
    ///
    /// Content smaller than the viewport pins the scroll position to 0.
    pub fn clamp_scroll(&mut self, content: Size) {
        let max_x = (content.width - self.width).max(0.0);
        let max_y = (content.height - self.height).max(0.0);

        self.scroll_x = self.scroll_x.clamp(0.0, max_x);
        self.scroll_y = self.scroll_y.clamp(0.0, max_y);
    }

    /// Scroll by delta amounts
    pub fn scroll_by(&mut self, delta_x: f32, delta_y: f32, content: Size) {
        self.scroll_x += delta_x;
        self.scroll_y += delta_y;
        self.clamp_scroll(content);
    }

    /// Set absolute scroll position
    pub fn set_scroll(&mut self, x: f32, y: f32, content: Size) {
        self.scroll_x = x;
        self.scroll_y = y;
        self.clamp_scroll(content);
    }

    /// Resize the viewport, keeping the scroll position valid
    pub fn resize(&mut self, width: f32, height: f32, content: Size) {
        self.width = width;
        self.height = height;
        self.clamp_scroll(content);
    }
}
