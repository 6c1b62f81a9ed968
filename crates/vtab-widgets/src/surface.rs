#![forbid(unsafe_code)]

//! The rendering surface the viewport fills.
//!
//! The viewport never computes pixel heights itself. It hands a candidate
//! window of rows to a [`Surface`], which lays them out and reports whether
//! the content overflows the visible area. The viewport grows or shrinks
//! the window one row at a time based on those answers.
//!
//! # Contract
//!
//! `measure` must be deterministic: the same rows at the same viewport size
//! always produce the same [`Overflow`]. Adding a row never turns a
//! vertical overflow back into free space. The fill loops rely on both to
//! terminate with a stable window.

use std::fmt;

/// Width and height of an area, in host units (usually pixels).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimension {
    pub width: f64,
    pub height: f64,
}

impl Dimension {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Whether laid-out content exceeds the visible area.
///
/// Content that fits exactly does not overflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overflow {
    pub vertical: bool,
    pub horizontal: bool,
}

/// Lays out rows and reports overflow.
pub trait Surface<T> {
    /// Lay out `rows` (the header, if any, is the surface's business) and
    /// report whether they overflow the viewport.
    fn measure(&mut self, rows: &[&crate::Row<T>]) -> Overflow;

    /// The current visible area.
    fn viewport(&self) -> Dimension;

    /// The visible area changed size.
    fn set_viewport(&mut self, _viewport: Dimension) {}
}

type RowHeightFn<T> = Box<dyn Fn(&crate::Row<T>) -> f64>;

/// A surface with per-row heights, a fixed header and a fixed content width.
///
/// Useful for hosts that know their row metrics up front, and for tests.
pub struct RowHeightSurface<T> {
    viewport: Dimension,
    header_height: f64,
    content_width: f64,
    row_height: RowHeightFn<T>,
    measure_count: usize,
}

impl<T> RowHeightSurface<T> {
    /// All rows `row_height` tall.
    pub fn uniform(viewport: Dimension, row_height: f64) -> Self {
        Self::new(viewport, move |_| row_height)
    }

    pub fn new(viewport: Dimension, row_height: impl Fn(&crate::Row<T>) -> f64 + 'static) -> Self {
        Self {
            viewport,
            header_height: 0.0,
            content_width: 0.0,
            row_height: Box::new(row_height),
            measure_count: 0,
        }
    }

    #[must_use]
    pub fn with_header_height(mut self, height: f64) -> Self {
        self.header_height = height;
        self
    }

    #[must_use]
    pub fn with_content_width(mut self, width: f64) -> Self {
        self.content_width = width;
        self
    }

    /// How often [`Surface::measure`] ran.
    pub fn measure_count(&self) -> usize {
        self.measure_count
    }
}

impl<T> fmt::Debug for RowHeightSurface<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowHeightSurface")
            .field("viewport", &self.viewport)
            .field("header_height", &self.header_height)
            .field("content_width", &self.content_width)
            .finish_non_exhaustive()
    }
}

impl<T> Surface<T> for RowHeightSurface<T> {
    fn measure(&mut self, rows: &[&crate::Row<T>]) -> Overflow {
        self.measure_count += 1;
        let height: f64 = self.header_height + rows.iter().map(|&row| (self.row_height)(row)).sum::<f64>();
        Overflow {
            vertical: height > self.viewport.height,
            horizontal: self.content_width > self.viewport.width,
        }
    }

    fn viewport(&self) -> Dimension {
        self.viewport
    }

    fn set_viewport(&mut self, viewport: Dimension) {
        self.viewport = viewport;
    }
}
