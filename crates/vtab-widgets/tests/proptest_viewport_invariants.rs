//! Property-based invariant tests for the viewport fill algorithm.
//!
//! With arbitrary row heights, viewport heights, navigation, sorting and
//! data changes:
//! 1. The window never leaves free space below it unless it reaches the last row
//! 2. Dropping the window's last row always removes any overflow
//! 3. `end()` always makes the last row visible

use proptest::prelude::*;
use vtab_widgets::{
    Dimension, Header, Row, RowHeightSurface, RowId, TableConfig, TitleCell, ViewportController,
};

type Table = ViewportController<usize, RowHeightSurface<usize>>;

#[derive(Debug, Clone)]
enum Op {
    Home,
    End,
    PageUp,
    PageDown,
    LineUp,
    LineDown,
    Position(f64),
    Resize(u16),
    ToggleSort,
    Remove(u8),
    Reload,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Home),
        Just(Op::End),
        Just(Op::PageUp),
        Just(Op::PageDown),
        Just(Op::LineUp),
        Just(Op::LineDown),
        (0.0f64..=1.0).prop_map(Op::Position),
        (10u16..300).prop_map(Op::Resize),
        Just(Op::ToggleSort),
        any::<u8>().prop_map(Op::Remove),
        Just(Op::Reload),
    ]
}

fn build(heights: &[u8], viewport_height: f64) -> Table {
    let lookup: Vec<f64> = heights.iter().map(|&h| f64::from(h)).collect();
    let viewport = Dimension::new(100.0, viewport_height);
    let surface = RowHeightSurface::new(viewport, move |row: &Row<usize>| {
        row.bound_element().map_or(0.0, |&i| lookup[i])
    });
    let mut table = Table::new(TableConfig::default());
    table.set_header(Some(Header::from_cells([TitleCell::new("Index")])));
    table.set_rows(all_rows(heights.len()));
    table.attach_surface(surface);
    table
}

fn all_rows(n: usize) -> impl Iterator<Item = Row<usize>> {
    (0..n).map(|i| Row::new(RowId(i as u64), [i.to_string()]).element(i))
}

/// Heights of the rows currently in the window, in view order.
fn window_heights(table: &Table, heights: &[u8]) -> Vec<f64> {
    table
        .visible_rows()
        .iter()
        .filter_map(|row| row.bound_element())
        .map(|&i| f64::from(heights[i]))
        .collect()
}

proptest! {
    #[test]
    fn window_fills_viewport(
        heights in prop::collection::vec(1u8..40, 0..80),
        initial_height in 10u16..300,
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let mut viewport_height = f64::from(initial_height);
        let mut table = build(&heights, viewport_height);

        for op in &ops {
            match op {
                Op::Home => table.home(),
                Op::End => table.end(),
                Op::PageUp => table.page_up(),
                Op::PageDown => table.page_down(),
                Op::LineUp => table.line_up(),
                Op::LineDown => table.line_down(),
                Op::Position(r) => table.scroll_to_position(*r).unwrap(),
                Op::Resize(h) => {
                    viewport_height = f64::from(*h);
                    table.on_viewport_resize(Dimension::new(100.0, viewport_height));
                }
                Op::ToggleSort => table.toggle_sort(0, false),
                Op::Remove(k) => {
                    if !heights.is_empty() {
                        let _ = table.remove_row(RowId(u64::from(*k) % heights.len() as u64));
                    }
                }
                Op::Reload => table.set_rows(all_rows(heights.len())),
            }

            let range = table.range();
            prop_assert!(range.start() <= range.end() && range.end() <= range.size());
            prop_assert_eq!(range.size(), table.model().filtered_len());

            let window = window_heights(&table, &heights);
            prop_assert_eq!(window.len(), range.len());
            let full: f64 = window.iter().sum();
            prop_assert!(
                range.last_in_range() || full > viewport_height,
                "free space below window {}..{} after {:?}", range.start(), range.end(), op
            );
            if let Some((_, rest)) = window.split_last() {
                let trimmed: f64 = rest.iter().sum();
                prop_assert!(trimmed <= viewport_height, "window overfilled after {:?}", op);
            }
            if matches!(op, Op::End) {
                prop_assert!(range.last_in_range());
            }
        }
    }
}
