#![forbid(unsafe_code)]

//! Scrollbar thumb geometry and drag handling.

use bitflags::bitflags;

bitflags! {
    /// Which scrollbars the table shows.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ScrollbarVisibility: u8 {
        const VERTICAL = 0b01;
        const HORIZONTAL = 0b10;
    }
}

/// Thumbs never shrink below this many pixels.
pub const MIN_THUMB_PX: f64 = 20.0;

/// Converts thumb drags into scroll ratios.
///
/// Movements smaller than `min_scroll_ratio` accumulate until they pass it,
/// so slow drags on long tables still scroll.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollbarDrag {
    track_px: f64,
    thumb_ratio: f64,
    min_scroll_ratio: f64,
    drag_position: Option<f64>,
}

impl ScrollbarDrag {
    pub fn new(min_scroll_ratio: f64) -> Self {
        Self {
            track_px: 0.0,
            thumb_ratio: 1.0,
            min_scroll_ratio: min_scroll_ratio.max(0.0),
            drag_position: None,
        }
    }

    /// Track length and thumb size (as a ratio of the track).
    pub fn set_geometry(&mut self, track_px: f64, thumb_ratio: f64) {
        self.track_px = track_px.max(0.0);
        self.thumb_ratio = thumb_ratio.clamp(0.0, 1.0);
    }

    pub fn set_min_scroll_ratio(&mut self, ratio: f64) {
        self.min_scroll_ratio = ratio.max(0.0);
    }

    pub fn thumb_px(&self) -> f64 {
        (self.track_px * self.thumb_ratio).max(MIN_THUMB_PX).min(self.track_px)
    }

    /// Pixels the thumb can travel.
    pub fn scroll_range_px(&self) -> f64 {
        self.track_px - self.thumb_px()
    }

    /// Thumb offset for a position ratio.
    pub fn thumb_offset_px(&self, position_ratio: f64) -> f64 {
        position_ratio.clamp(0.0, 1.0) * self.scroll_range_px()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_position.is_some()
    }

    /// The thumb was grabbed at `position`.
    pub fn begin(&mut self, position: f64) {
        self.drag_position = Some(position);
    }

    /// The pointer moved to `position`. Yields the scroll delta ratio once
    /// the accumulated movement is large enough.
    pub fn drag_to(&mut self, position: f64) -> Option<f64> {
        let anchor = self.drag_position?;
        let range = self.scroll_range_px();
        if range <= 0.0 {
            return None;
        }
        let delta_ratio = (position - anchor) / range;
        if delta_ratio.abs() < self.min_scroll_ratio {
            return None;
        }
        self.drag_position = Some(position);
        Some(delta_ratio)
    }

    pub fn end(&mut self) {
        self.drag_position = None;
    }
}
