#![forbid(unsafe_code)]

//! Filter/sort pipeline over a table's rows.
//!
//! [`TableModel`] owns every row and derives the filtered, sorted view the
//! viewport windows over. The view is only rebuilt by [`invalidate`]; rows
//! added or removed without invalidating keep the view consistent (removed
//! rows disappear from it, added rows are not in it yet) but stale.
//!
//! # Filtering
//!
//! A row passes when:
//! - there is no table filter, or any of its cells matches it, and
//! - every column with a filter term has a matching cell.
//!
//! Each column may override the text match with its own strategy.
//!
//! # Sorting
//!
//! Sorted columns are applied in priority order, the first non-equal
//! comparison decides. The sort is stable, so rows that compare equal keep
//! insertion order.
//!
//! [`invalidate`]: TableModel::invalidate

use std::cmp::Ordering;
use std::fmt;

use ahash::{AHashMap, AHashSet};
use tracing::debug;
use vtab_core::RangeModel;

use crate::filter::FilterPattern;
use crate::header::{Header, HeaderInfo, SortColumn, SortDirection};
use crate::row::{Row, RowId};

/// Outcome of [`TableModel::sync_rows`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowChanges {
    pub added: usize,
    pub removed: usize,
    pub updated: usize,
}

impl RowChanges {
    pub fn is_empty(&self) -> bool {
        self.added == 0 && self.removed == 0 && self.updated == 0
    }
}

/// Rows plus their filtered, sorted view.
pub struct TableModel<T> {
    rows: Vec<Row<T>>,
    /// Indices into `rows`, in view order.
    view: Vec<usize>,
    /// Row id to position in `view`.
    positions: AHashMap<RowId, usize>,
    table_filter: Option<FilterPattern>,
    header: Option<Header<T>>,
}

impl<T> Default for TableModel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for TableModel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableModel")
            .field("rows", &self.rows.len())
            .field("filtered", &self.view.len())
            .field("table_filter", &self.table_filter)
            .field("header", &self.header)
            .finish()
    }
}

impl<T> TableModel<T> {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            view: Vec::new(),
            positions: AHashMap::new(),
            table_filter: None,
            header: None,
        }
    }

    pub fn rows(&self) -> &[Row<T>] {
        &self.rows
    }

    /// Look up a row by id, whether or not it passes the filters.
    pub fn row(&self, id: RowId) -> Option<&Row<T>> {
        self.rows.iter().find(|r| r.id() == id)
    }

    /// Append a row. It joins the view on the next invalidation.
    pub fn add_row(&mut self, row: Row<T>, invalidate: bool) {
        self.rows.push(row);
        if invalidate {
            self.invalidate();
        }
    }

    /// Remove a row by id.
    pub fn remove_row(&mut self, id: RowId, invalidate: bool) -> Option<Row<T>> {
        let index = self.rows.iter().position(|r| r.id() == id)?;
        let row = self.rows.remove(index);
        self.view.retain(|&i| i != index);
        for i in &mut self.view {
            if *i > index {
                *i -= 1;
            }
        }
        if invalidate {
            self.invalidate();
        } else {
            self.rebuild_positions();
        }
        Some(row)
    }

    /// Make the row set equal to `incoming`, matching rows by id.
    ///
    /// Known ids are updated in place and keep their insertion slot, new
    /// ids are appended, missing ids are removed. Rebuilds the view.
    pub fn sync_rows(&mut self, incoming: impl IntoIterator<Item = Row<T>>) -> RowChanges {
        let incoming: Vec<Row<T>> = incoming.into_iter().collect();
        let keep: AHashSet<RowId> = incoming.iter().map(Row::id).collect();

        let before = self.rows.len();
        self.rows.retain(|r| keep.contains(&r.id()));
        let mut changes = RowChanges {
            removed: before - self.rows.len(),
            ..RowChanges::default()
        };

        let mut slots: AHashMap<RowId, usize> = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id(), i))
            .collect();
        for row in incoming {
            match slots.get(&row.id()).and_then(|&i| self.rows.get_mut(i)) {
                Some(slot) => {
                    *slot = row;
                    changes.updated += 1;
                }
                None => {
                    slots.insert(row.id(), self.rows.len());
                    self.rows.push(row);
                    changes.added += 1;
                }
            }
        }

        self.invalidate();
        changes
    }

    pub fn table_filter(&self) -> Option<&FilterPattern> {
        self.table_filter.as_ref()
    }

    /// Set the table-wide filter text and rebuild the view.
    ///
    /// Returns whether the term changed.
    pub fn set_table_filter(&mut self, text: &str) -> bool {
        let pattern = FilterPattern::parse(text);
        if pattern == self.table_filter {
            return false;
        }
        self.table_filter = pattern;
        self.invalidate();
        true
    }

    pub fn header(&self) -> Option<&Header<T>> {
        self.header.as_ref()
    }

    /// Mutable header access. Callers invalidate after changing filter or
    /// sort state.
    pub fn header_mut(&mut self) -> Option<&mut Header<T>> {
        self.header.as_mut()
    }

    /// Attach or detach the header and rebuild the view.
    pub fn set_header(&mut self, header: Option<Header<T>>) {
        self.header = header;
        self.invalidate();
    }

    /// Rebuild the filtered, sorted view.
    pub fn invalidate(&mut self) {
        let info = self.header.as_ref().map(Header::info).unwrap_or_default();
        let table_filter = self.table_filter.as_ref();

        let mut view: Vec<usize> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| passes_filters(row, table_filter, &info))
            .map(|(i, _)| i)
            .collect();

        if !info.sort_columns.is_empty() {
            let rows = &self.rows;
            view.sort_by(|&a, &b| compare_rows(&rows[a], &rows[b], &info.sort_columns));
        }

        self.view = view;
        self.rebuild_positions();
        debug!(
            rows = self.rows.len(),
            filtered = self.view.len(),
            sorted_columns = info.sort_columns.len(),
            "table view rebuilt"
        );
    }

    /// Number of rows in the view.
    pub fn filtered_len(&self) -> usize {
        self.view.len()
    }

    /// Row at `position` in the view.
    pub fn filtered_row(&self, position: usize) -> Option<&Row<T>> {
        self.view.get(position).and_then(|&i| self.rows.get(i))
    }

    /// The view, in order.
    pub fn filtered_rows(&self) -> impl Iterator<Item = &Row<T>> {
        self.view.iter().filter_map(|&i| self.rows.get(i))
    }

    /// Position of row `id` in the view.
    pub fn position_of(&self, id: RowId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// The rows inside `range`'s window over the view.
    pub fn window(&self, range: &RangeModel) -> Vec<&Row<T>> {
        range
            .apply_range(&self.view)
            .iter()
            .filter_map(|&i| self.rows.get(i))
            .collect()
    }

    fn rebuild_positions(&mut self) {
        self.positions.clear();
        self.positions.reserve(self.view.len());
        for (position, &i) in self.view.iter().enumerate() {
            if let Some(row) = self.rows.get(i) {
                self.positions.insert(row.id(), position);
            }
        }
    }
}

fn passes_filters<T>(row: &Row<T>, table_filter: Option<&FilterPattern>, info: &HeaderInfo<T>) -> bool {
    let element = row.bound_element();
    if let Some(pattern) = table_filter {
        let any = row
            .cells()
            .iter()
            .enumerate()
            .any(|(column, text)| info.filter_fn(column).matches(element, text, pattern));
        if !any {
            return false;
        }
    }
    info.column_filters().all(|(column, pattern)| {
        let text = row.cell(column).unwrap_or("");
        info.filter_fn(column).matches(element, text, pattern)
    })
}

fn compare_rows<T>(a: &Row<T>, b: &Row<T>, sort_columns: &[SortColumn<T>]) -> Ordering {
    for sort in sort_columns {
        let ordering = sort.compare.compare(
            a.bound_element(),
            b.bound_element(),
            a.cell(sort.column).unwrap_or(""),
            b.cell(sort.column).unwrap_or(""),
        );
        let ordering = match sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}
