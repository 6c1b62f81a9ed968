#![forbid(unsafe_code)]

//! Windowed range over a row collection.
//!
//! [`RangeModel`] tracks the half-open window `[start, end)` of a collection
//! of `size` elements that is currently rendered. It knows nothing about
//! pixels: callers grow the window one element at a time until their
//! surface is full, and read back normalized ratios for scrollbars.
//!
//! # Invariants
//!
//! 1. `0 <= start <= end <= size` after every operation.
//! 2. `start <= scrollable_size()` after every operation that repositions
//!    the window (`set_size`, `set_start`, `set_position_ratio`,
//!    `move_position`).
//! 3. Growing and shrinking primitives change exactly one bound by exactly
//!    one element, or nothing at all (returning `false`).
//! 4. `move_position` with a non-zero distance moves `start` by at least
//!    one element unless the window already shows everything or `start` is
//!    pinned at the boundary in the direction of travel.
//!
//! # Failure Modes
//!
//! - `set_position_ratio` rejects ratios outside `[0, 1]` with
//!   [`ScrollError::InvalidPositionRatio`] and leaves the state untouched.
//! - Everything else clamps; there is no other error path.

use crate::error::{Result, ScrollError};

/// The `[start, end)` window over `size` elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeModel {
    start: usize,
    end: usize,
    size: usize,
    last_page_count: usize,
}

impl RangeModel {
    /// Create an empty model (`size = start = end = 0`).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            start: 0,
            end: 0,
            size: 0,
            last_page_count: 0,
        }
    }

    /// Index of the first element in the window.
    #[inline]
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Index one past the last element in the window.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Total element count.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Number of elements in the window.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the window is collapsed.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Number of elements that fit when scrolled to the very end.
    #[inline]
    #[must_use]
    pub const fn last_page_count(&self) -> usize {
        self.last_page_count
    }

    /// The span over which `start` may range while the final page stays
    /// fully visible.
    #[inline]
    #[must_use]
    pub const fn scrollable_size(&self) -> usize {
        self.size.saturating_sub(self.last_page_count)
    }

    /// Whether the last element is inside the window.
    #[inline]
    #[must_use]
    pub const fn last_in_range(&self) -> bool {
        self.end == self.size
    }

    /// Normalized scroll offset: `0.0` at the top, `1.0` at the bottom.
    ///
    /// A `start` beyond the scrollable span (possible right after the last
    /// page count grew) reports `1.0`.
    #[must_use]
    pub fn position_ratio(&self) -> f64 {
        let scrollable = self.scrollable_size();
        if scrollable == 0 {
            return 0.0;
        }
        (self.start as f64 / scrollable as f64).min(1.0)
    }

    /// Fraction of the collection inside the window; `1.0` when empty.
    #[must_use]
    pub fn range_ratio(&self) -> f64 {
        if self.size == 0 {
            return 1.0;
        }
        self.len() as f64 / self.size as f64
    }

    /// Set the total size, keeping `start`/`end` where still valid.
    pub fn set_size(&mut self, size: usize) {
        self.size = size;
        self.start = self.valid_start(self.start as i64);
        self.end = self.valid_end(self.end);
    }

    /// Record how many elements occupy the final page.
    ///
    /// Only [`scrollable_size`](Self::scrollable_size) is affected.
    pub fn set_last_page_count(&mut self, count: usize) {
        self.last_page_count = count;
    }

    /// Extend the window by one element at the end.
    ///
    /// Returns `false` if the end already sits on the last element.
    pub fn try_grow_end(&mut self) -> bool {
        if self.size == 0 || self.end == self.size {
            return false;
        }
        self.end += 1;
        true
    }

    /// Extend the window by one element at the start.
    ///
    /// Returns `false` if the start already sits on the first element.
    pub fn try_grow_start(&mut self) -> bool {
        if self.size == 0 || self.start == 0 {
            return false;
        }
        self.start -= 1;
        true
    }

    /// Shrink the window by advancing the start by one element.
    ///
    /// Returns `false` if the window is collapsed or the start sits past the
    /// last element.
    pub fn try_shrink_start(&mut self) -> bool {
        if self.size == 0 || self.start == self.end || self.start == self.size {
            return false;
        }
        self.start += 1;
        true
    }

    /// Collapse the window onto its start. Callers re-grow afterwards.
    pub fn clear_range(&mut self) {
        self.end = self.valid_end(self.start);
    }

    /// Jump to a normalized position and collapse the window there.
    ///
    /// # Errors
    ///
    /// Returns [`ScrollError::InvalidPositionRatio`] if `ratio` is not in
    /// `[0, 1]`.
    pub fn set_position_ratio(&mut self, ratio: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&ratio) {
            return Err(ScrollError::InvalidPositionRatio(ratio));
        }
        let start = (ratio * self.scrollable_size() as f64).round() as i64;
        self.start = self.valid_start(start);
        self.end = self.valid_end(self.start);
        Ok(())
    }

    /// Move the position by `distance` (a ratio of the scrollable span) and
    /// collapse the window.
    ///
    /// Moves by at least one element even when `distance` is too small to
    /// change the rounded index.
    pub fn move_position(&mut self, distance: f64) {
        if distance == 0.0 || distance.is_nan() || self.range_ratio() >= 1.0 {
            return;
        }

        let ratio = (self.position_ratio() + distance).clamp(0.0, 1.0);
        let mut start = (ratio * self.scrollable_size() as f64).round() as i64;
        if start == self.start as i64 {
            start += distance.signum() as i64;
        }

        self.start = self.valid_start(start);
        self.end = self.valid_end(self.start);
    }

    /// Jump to an absolute index and collapse the window there.
    pub fn set_start(&mut self, start: usize) {
        self.start = self.valid_start(i64::try_from(start).unwrap_or(i64::MAX));
        self.end = self.valid_end(self.start);
    }

    /// The slice of `elements` inside the window.
    ///
    /// Bounds are clipped to `elements.len()` so a stale model never panics.
    #[must_use]
    pub fn apply_range<'a, T>(&self, elements: &'a [T]) -> &'a [T] {
        let end = self.end.min(elements.len());
        let start = self.start.min(end);
        &elements[start..end]
    }

    fn valid_start(&self, start: i64) -> usize {
        start.clamp(0, self.scrollable_size() as i64) as usize
    }

    fn valid_end(&self, end: usize) -> usize {
        end.min(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grow_end(model: &mut RangeModel, count: usize) {
        for _ in 0..count {
            assert!(model.try_grow_end());
        }
    }

    #[test]
    fn new_model_is_empty_and_fully_visible() {
        let model = RangeModel::new();
        assert_eq!((model.start(), model.end(), model.size()), (0, 0, 0));
        assert_eq!(model.position_ratio(), 0.0);
        assert_eq!(model.range_ratio(), 1.0);
    }

    #[test]
    fn grow_refused_on_empty_model() {
        let mut model = RangeModel::new();
        assert!(!model.try_grow_end());
        assert!(!model.try_grow_start());
        assert!(!model.try_shrink_start());
    }

    #[test]
    fn grow_end_stops_at_size() {
        let mut model = RangeModel::new();
        model.set_size(3);
        grow_end(&mut model, 3);
        assert!(!model.try_grow_end());
        assert!(model.last_in_range());
        assert_eq!(model.range_ratio(), 1.0);
    }

    #[test]
    fn grow_start_stops_at_zero() {
        let mut model = RangeModel::new();
        model.set_size(10);
        model.set_start(2);
        assert!(model.try_grow_start());
        assert!(model.try_grow_start());
        assert!(!model.try_grow_start());
        assert_eq!(model.start(), 0);
        assert_eq!(model.end(), 2);
    }

    #[test]
    fn shrink_start_refused_when_collapsed() {
        let mut model = RangeModel::new();
        model.set_size(10);
        model.set_start(4);
        assert!(!model.try_shrink_start());
        assert!(model.try_grow_end());
        assert!(model.try_shrink_start());
        assert_eq!((model.start(), model.end()), (5, 5));
    }

    #[test]
    fn clear_range_collapses_onto_start() {
        let mut model = RangeModel::new();
        model.set_size(10);
        model.set_start(3);
        grow_end(&mut model, 4);
        model.clear_range();
        assert_eq!((model.start(), model.end()), (3, 3));
    }

    #[test]
    fn last_page_count_limits_scrollable_size() {
        let mut model = RangeModel::new();
        model.set_size(100);
        model.set_last_page_count(10);
        assert_eq!(model.scrollable_size(), 90);
        model.set_position_ratio(1.0).unwrap();
        assert_eq!(model.start(), 90);
        assert_eq!(model.position_ratio(), 1.0);
    }

    #[test]
    fn invalid_position_ratio_leaves_state_untouched() {
        let mut model = RangeModel::new();
        model.set_size(10);
        model.set_start(5);
        grow_end(&mut model, 2);
        let before = model.clone();

        assert_eq!(
            model.set_position_ratio(1.01),
            Err(ScrollError::InvalidPositionRatio(1.01))
        );
        assert!(model.set_position_ratio(-0.1).is_err());
        assert!(model.set_position_ratio(f64::NAN).is_err());
        assert_eq!(model, before);
    }

    #[test]
    fn move_position_noop_when_everything_visible() {
        let mut model = RangeModel::new();
        model.set_size(5);
        grow_end(&mut model, 5);
        model.move_position(0.5);
        assert_eq!((model.start(), model.end()), (0, 5));
    }

    #[test]
    fn set_start_clamps_to_scrollable_size() {
        let mut model = RangeModel::new();
        model.set_size(10);
        model.set_last_page_count(4);
        model.set_start(100);
        assert_eq!(model.start(), 6);
        assert_eq!(model.end(), 6);
    }

    #[test]
    fn apply_range_clips_to_slice_length() {
        let mut model = RangeModel::new();
        model.set_size(10);
        model.set_start(2);
        grow_end(&mut model, 5);
        let items: Vec<u32> = (0..10).collect();
        assert_eq!(model.apply_range(&items), &[2, 3, 4, 5, 6]);
        assert_eq!(model.apply_range(&items[..4]), &[2, 3]);
        assert!(model.apply_range::<u32>(&[]).is_empty());
    }
}
