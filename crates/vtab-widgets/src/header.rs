#![forbid(unsafe_code)]

//! Column headers: filter terms and sort criteria.
//!
//! Each [`TitleCell`] holds one column's filter term, optional custom
//! filter/compare strategies and its sort state. Sort priority between
//! columns follows the order in which they were first sorted; a column
//! keeps its priority while it stays sorted, even when its direction
//! flips.

use std::fmt;
use std::rc::Rc;

use crate::filter::{CellComparator, CellFilter, FilterPattern, TextComparator, TextFilter};

/// Sort direction of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A sort request for one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortCriterion {
    pub direction: SortDirection,
    /// Keep the other columns' sort state instead of clearing it.
    pub multi: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveSort {
    direction: SortDirection,
    order: u64,
}

/// One column header.
pub struct TitleCell<T> {
    title: String,
    filter: Option<FilterPattern>,
    filter_fn: Option<Rc<dyn CellFilter<T>>>,
    compare_fn: Option<Rc<dyn CellComparator<T>>>,
    sort: Option<ActiveSort>,
}

impl<T> TitleCell<T> {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            filter: None,
            filter_fn: None,
            compare_fn: None,
            sort: None,
        }
    }

    /// Use `filter` instead of matching the rendered text.
    #[must_use]
    pub fn with_filter_fn(mut self, filter: impl CellFilter<T> + 'static) -> Self {
        self.filter_fn = Some(Rc::new(filter));
        self
    }

    /// Use `compare` instead of the case-insensitive text order.
    #[must_use]
    pub fn with_compare_fn(mut self, compare: impl CellComparator<T> + 'static) -> Self {
        self.compare_fn = Some(Rc::new(compare));
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn filter(&self) -> Option<&FilterPattern> {
        self.filter.as_ref()
    }

    pub fn sort_direction(&self) -> Option<SortDirection> {
        self.sort.map(|s| s.direction)
    }
}

impl<T> fmt::Debug for TitleCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TitleCell")
            .field("title", &self.title)
            .field("filter", &self.filter)
            .field("custom_filter", &self.filter_fn.is_some())
            .field("custom_compare", &self.compare_fn.is_some())
            .field("sort", &self.sort)
            .finish()
    }
}

/// A sorted column, as seen by the pipeline.
pub struct SortColumn<T> {
    pub column: usize,
    pub direction: SortDirection,
    pub compare: Rc<dyn CellComparator<T>>,
}

impl<T> fmt::Debug for SortColumn<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortColumn")
            .field("column", &self.column)
            .field("direction", &self.direction)
            .finish()
    }
}

/// Snapshot of the header's filter and sort state.
pub struct HeaderInfo<T> {
    filters: Vec<Option<FilterPattern>>,
    filter_fns: Vec<Option<Rc<dyn CellFilter<T>>>>,
    /// Sorted columns, highest priority first.
    pub sort_columns: Vec<SortColumn<T>>,
}

impl<T> Default for HeaderInfo<T> {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            filter_fns: Vec::new(),
            sort_columns: Vec::new(),
        }
    }
}

impl<T> HeaderInfo<T> {
    /// Filter term of `column`, if any.
    pub fn column_filter(&self, column: usize) -> Option<&FilterPattern> {
        self.filters.get(column).and_then(Option::as_ref)
    }

    /// Columns with a non-empty filter term, with their terms.
    pub fn column_filters(&self) -> impl Iterator<Item = (usize, &FilterPattern)> {
        self.filters
            .iter()
            .enumerate()
            .filter_map(|(column, f)| f.as_ref().map(|f| (column, f)))
    }

    pub fn has_column_filters(&self) -> bool {
        self.filters.iter().any(Option::is_some)
    }

    /// Filter strategy for `column`; the text filter unless overridden.
    pub fn filter_fn(&self, column: usize) -> &dyn CellFilter<T> {
        match self.filter_fns.get(column).and_then(Option::as_deref) {
            Some(filter) => filter,
            None => &TextFilter,
        }
    }
}

/// The header row of a table.
pub struct Header<T> {
    cells: Vec<TitleCell<T>>,
    next_sort_order: u64,
}

impl<T> Default for Header<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Header<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Header").field("cells", &self.cells).finish()
    }
}

impl<T> Header<T> {
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            next_sort_order: 1,
        }
    }

    /// Build a header from its cells.
    pub fn from_cells(cells: impl IntoIterator<Item = TitleCell<T>>) -> Self {
        Self {
            cells: cells.into_iter().collect(),
            next_sort_order: 1,
        }
    }

    pub fn cells(&self) -> &[TitleCell<T>] {
        &self.cells
    }

    pub fn column_count(&self) -> usize {
        self.cells.len()
    }

    pub fn push_column(&mut self, cell: TitleCell<T>) {
        self.cells.push(cell);
    }

    /// Remove the column at `column`, if present.
    pub fn remove_column(&mut self, column: usize) -> Option<TitleCell<T>> {
        (column < self.cells.len()).then(|| self.cells.remove(column))
    }

    /// Set the filter text of `column`.
    ///
    /// Returns whether the compiled term changed. Unknown columns are
    /// ignored.
    pub fn set_column_filter(&mut self, column: usize, text: &str) -> bool {
        let Some(cell) = self.cells.get_mut(column) else {
            return false;
        };
        let pattern = FilterPattern::parse(text);
        if cell.filter == pattern {
            return false;
        }
        cell.filter = pattern;
        true
    }

    /// Set or clear the sort of `column`.
    ///
    /// A non-multi criterion clears every other column's sort first. A
    /// column that stays sorted keeps its priority.
    pub fn set_sort(&mut self, column: usize, criterion: Option<SortCriterion>) -> bool {
        if column >= self.cells.len() {
            return false;
        }
        let kept_order = self.cells[column].sort.map(|s| s.order);
        match criterion {
            None => self.cells[column].sort = None,
            Some(criterion) => {
                if !criterion.multi {
                    for cell in &mut self.cells {
                        cell.sort = None;
                    }
                }
                let order = match kept_order {
                    Some(order) if criterion.multi => order,
                    _ => self.take_sort_order(),
                };
                self.cells[column].sort = Some(ActiveSort {
                    direction: criterion.direction,
                    order,
                });
            }
        }
        true
    }

    /// Advance `column` through unsorted, ascending, descending, unsorted.
    pub fn toggle_sort(&mut self, column: usize, multi: bool) -> bool {
        let Some(cell) = self.cells.get(column) else {
            return false;
        };
        let next = match cell.sort_direction() {
            None => Some(SortDirection::Ascending),
            Some(SortDirection::Ascending) => Some(SortDirection::Descending),
            Some(SortDirection::Descending) => None,
        };
        let criterion = next.map(|direction| SortCriterion { direction, multi });
        self.set_sort(column, criterion)
    }

    /// Whether any column is sorted.
    pub fn is_sorted(&self) -> bool {
        self.cells.iter().any(|c| c.sort.is_some())
    }

    /// Snapshot the filter and sort state for the pipeline.
    pub fn info(&self) -> HeaderInfo<T> {
        let mut sorted: Vec<(u64, SortColumn<T>)> = self
            .cells
            .iter()
            .enumerate()
            .filter_map(|(column, cell)| {
                let sort = cell.sort?;
                let compare = match &cell.compare_fn {
                    Some(compare) => Rc::clone(compare),
                    None => Rc::new(TextComparator) as Rc<dyn CellComparator<T>>,
                };
                Some((
                    sort.order,
                    SortColumn {
                        column,
                        direction: sort.direction,
                        compare,
                    },
                ))
            })
            .collect();
        sorted.sort_by_key(|(order, _)| *order);

        HeaderInfo {
            filters: self.cells.iter().map(|c| c.filter.clone()).collect(),
            filter_fns: self.cells.iter().map(|c| c.filter_fn.clone()).collect(),
            sort_columns: sorted.into_iter().map(|(_, column)| column).collect(),
        }
    }

    fn take_sort_order(&mut self) -> u64 {
        let order = self.next_sort_order;
        self.next_sort_order += 1;
        order
    }
}
