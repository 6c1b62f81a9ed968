#![forbid(unsafe_code)]

//! Widgets: the virtualized, sortable, filterable table.
//!
//! # Role in vtab
//! `vtab-widgets` turns rows and header criteria into the small window of
//! rows a host actually renders. It never paints anything: the host supplies
//! a [`Surface`] that lays out candidate rows and reports overflow, and the
//! [`ViewportController`] grows or shrinks the window until the surface is
//! exactly full.
//!
//! # Primary responsibilities
//! - **TableModel**: filter/sort pipeline from all rows to the ordered view.
//! - **Header**: per-column filter terms, sort criteria and strategies.
//! - **ViewportController**: fill algorithm, navigation, gesture routing.
//! - **HorizontalScroll** / **ScrollbarDrag**: pixel-space scrolling helpers.
//!
//! # How it fits in the system
//! Range, gesture, wheel and timer state machines come from `vtab-core`.
//! This crate wires them to rows and to a host surface.

pub mod filter;
pub mod header;
pub mod horizontal;
pub mod row;
pub mod scrollbar;
pub mod surface;
pub mod table_model;
pub mod viewport;

pub use filter::{CellComparator, CellFilter, FilterPattern, TextComparator, TextFilter};
pub use header::{Header, HeaderInfo, SortColumn, SortCriterion, SortDirection, TitleCell};
pub use horizontal::HorizontalScroll;
pub use row::{Row, RowId};
pub use scrollbar::{ScrollbarDrag, ScrollbarVisibility};
pub use surface::{Dimension, Overflow, RowHeightSurface, Surface};
pub use table_model::{RowChanges, TableModel};
pub use viewport::{
    NavigationKey, RenderedRow, TableConfig, TrackByFn, ViewportChangeAction,
    ViewportChangeEvent, ViewportController,
};
