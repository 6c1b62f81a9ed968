#![forbid(unsafe_code)]

//! Table rows.

use std::fmt;

/// Stable identity of a row within its collection.
///
/// Assigned by the host; the table never invents or reuses ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub u64);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row#{}", self.0)
    }
}

/// A row in a table.
///
/// Carries the rendered text of each cell and, optionally, the domain
/// element it represents. Filter and compare functions receive both.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<T> {
    id: RowId,
    element: Option<T>,
    cells: Vec<String>,
}

impl<T> Row<T> {
    /// Create a row from its cells' rendered text.
    pub fn new(id: RowId, cells: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            id,
            element: None,
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }

    /// Bind the domain element this row represents.
    #[must_use]
    pub fn element(mut self, element: T) -> Self {
        self.element = Some(element);
        self
    }

    #[inline]
    pub fn id(&self) -> RowId {
        self.id
    }

    #[inline]
    pub fn bound_element(&self) -> Option<&T> {
        self.element.as_ref()
    }

    /// Rendered text of the cell in `column`.
    pub fn cell(&self, column: usize) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_are_addressed_by_column() {
        let row: Row<()> = Row::new(RowId(1), ["Ada", "Lovelace"]);
        assert_eq!(row.cell(0), Some("Ada"));
        assert_eq!(row.cell(1), Some("Lovelace"));
        assert_eq!(row.cell(2), None);
        assert!(row.bound_element().is_none());
    }

    #[test]
    fn element_is_bound() {
        let row = Row::new(RowId(7), ["x"]).element(42u32);
        assert_eq!(row.bound_element(), Some(&42));
        assert_eq!(row.id().to_string(), "row#7");
    }
}
