use vtab_widgets::{
    Dimension, Header, Row, RowHeightSurface, RowId, SortCriterion, SortDirection, TableConfig,
    TitleCell, ViewportController,
};

type Table = ViewportController<u32, RowHeightSurface<u32>>;

fn names(table: &Table) -> Vec<&str> {
    table.visible_rows().iter().filter_map(|r| r.cell(0)).collect()
}

fn table(rows: &[(&str, u32)]) -> Table {
    let mut table = Table::new(TableConfig::default());
    table.set_header(Some(Header::from_cells([
        TitleCell::new("Name"),
        TitleCell::new("Age").with_compare_fn(|a: Option<&u32>, b: Option<&u32>, _: &str, _: &str| a.cmp(&b)),
    ])));
    table.set_rows(rows.iter().enumerate().map(|(i, (name, age))| {
        Row::new(RowId(i as u64), [name.to_string(), age.to_string()]).element(*age)
    }));
    table.attach_surface(RowHeightSurface::uniform(Dimension::new(80.0, 100.0), 10.0));
    table
}

#[test]
fn test_table_sort_ascending() {
    let mut table = table(&[("Bravo", 1), ("Alpha", 2), ("Charlie", 3)]);

    // Sort by column 0 ascending
    table.toggle_sort(0, false);

    assert_eq!(names(&table), ["Alpha", "Bravo", "Charlie"]);
}

#[test]
fn test_table_sort_descending() {
    let mut table = table(&[("Bravo", 1), ("Alpha", 2), ("Charlie", 3)]);

    table.set_sort(
        0,
        Some(SortCriterion {
            direction: SortDirection::Descending,
            multi: false,
        }),
    );

    assert_eq!(names(&table), ["Charlie", "Bravo", "Alpha"]);
}

#[test]
fn test_third_toggle_restores_insertion_order() {
    let mut table = table(&[("Bravo", 1), ("Alpha", 2), ("Charlie", 3)]);
    table.toggle_sort(0, false);
    table.toggle_sort(0, false);
    table.toggle_sort(0, false);
    assert_eq!(names(&table), ["Bravo", "Alpha", "Charlie"]);
}

#[test]
fn test_numeric_column_uses_element_comparator() {
    // As text "10" < "9"; the element comparator orders numerically.
    let mut table = table(&[("a", 10), ("b", 9), ("c", 100)]);
    table.toggle_sort(1, false);
    assert_eq!(names(&table), ["b", "a", "c"]);
}

#[test]
fn test_multi_sort_orders_by_first_sorted_column() {
    let mut table = table(&[("x", 2), ("y", 1), ("x", 1), ("y", 2)]);
    table.toggle_sort(0, false);
    table.toggle_sort(1, true);
    let pairs: Vec<(&str, Option<&str>)> = table
        .visible_rows()
        .iter()
        .map(|r| (r.cell(0).unwrap_or(""), r.cell(1)))
        .collect();
    assert_eq!(
        pairs,
        [("x", Some("1")), ("x", Some("2")), ("y", Some("1")), ("y", Some("2"))]
    );

    // a plain click on the second column drops the first
    table.toggle_sort(1, false);
    let ages: Vec<Option<&str>> = table.visible_rows().iter().map(|r| r.cell(1)).collect();
    assert_eq!(ages.first().copied().flatten(), Some("2"));
    let sorted = table.model().header().map(|h| h.info().sort_columns.len());
    assert_eq!(sorted, Some(1));
}
