#![forbid(unsafe_code)]

//! Horizontal scroll offset of content wider than the viewport.

/// Translation of the table content along the x axis.
///
/// `translate_x` is always in `[-scroll_width, 0]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HorizontalScroll {
    translate_x: f64,
    viewport_width: f64,
    client_width: f64,
}

impl HorizontalScroll {
    pub fn new() -> Self {
        Self::default()
    }

    /// Width of the visible area.
    pub fn set_viewport_width(&mut self, width: f64) {
        self.viewport_width = width.max(0.0);
        self.clamp();
    }

    /// Width of the laid-out content.
    pub fn set_client_width(&mut self, width: f64) {
        self.client_width = width.max(0.0);
        self.clamp();
    }

    pub fn client_width(&self) -> f64 {
        self.client_width
    }

    /// How far the content can move.
    pub fn scroll_width(&self) -> f64 {
        (self.client_width - self.viewport_width).max(0.0)
    }

    pub fn translate_x(&self) -> f64 {
        self.translate_x
    }

    /// Whether the content overflows horizontally.
    pub fn is_scrollable(&self) -> bool {
        self.scroll_width() > 0.0
    }

    /// Move by `delta_ratio` of the scroll width.
    ///
    /// Returns `true` when the offset ends on either extreme.
    pub fn scroll_by(&mut self, delta_ratio: f64) -> bool {
        let scroll_width = self.scroll_width();
        if delta_ratio.is_nan() {
            return self.at_extreme();
        }
        self.translate_x = (self.translate_x - delta_ratio * scroll_width).clamp(-scroll_width, 0.0);
        self.at_extreme()
    }

    /// Fraction of the content that is visible.
    pub fn thumb_size_ratio(&self) -> f64 {
        if self.client_width <= 0.0 {
            return 1.0;
        }
        (self.viewport_width / self.client_width).min(1.0)
    }

    /// Normalized offset: `0.0` left, `1.0` right.
    pub fn position_ratio(&self) -> f64 {
        let scroll_width = self.scroll_width();
        if scroll_width == 0.0 {
            return 0.0;
        }
        -self.translate_x / scroll_width
    }

    fn at_extreme(&self) -> bool {
        self.translate_x == 0.0 || self.translate_x == -self.scroll_width()
    }

    fn clamp(&mut self) {
        let scroll_width = self.scroll_width();
        self.translate_x = self.translate_x.clamp(-scroll_width, 0.0);
    }
}
