#![forbid(unsafe_code)]

//! Viewport controller: keeps the rendered row window exactly filling the
//! surface.
//!
//! [`ViewportController`] owns the [`TableModel`], a [`RangeModel`] over its
//! filtered view and the input state machines for touch, wheel and debounced
//! filter text. Every change funnels into [`update_viewport`], which
//! re-measures the surface and grows the window until it is full.
//!
//! # Update algorithm
//!
//! 1. A nested call while an update runs is dropped.
//! 2. Structural actions (everything but `Rewind`, `Forward` and `Goto`)
//!    first recompute the last page count on a scratch range scrolled to
//!    the very end.
//! 3. Grow the end while the surface has free space.
//! 4. If the last row is in the window and space is left, grow the start
//!    backwards; undo the final step if it overflowed.
//! 5. Remember the identity of the row at `start`, so later data changes
//!    keep the same record at the top.
//! 6. Notify subscribers with a [`ViewportChangeEvent`].
//!
//! Without an attached surface every update is a no-op.
//!
//! # Time
//!
//! Swipe inertia and debounced filter input are poll-driven. Hosts call
//! [`tick`] at or after [`next_deadline`]; nothing runs in the background.
//!
//! [`update_viewport`]: ViewportController::update_viewport
//! [`tick`]: ViewportController::tick
//! [`next_deadline`]: ViewportController::next_deadline

use std::fmt;

use ahash::AHashMap;
use tracing::field::Empty;
use tracing::{debug, debug_span};
use vtab_core::debounce::Debouncer;
use vtab_core::observer::{Subscribers, Subscription};
use vtab_core::wheel::WheelThrottle;
use vtab_core::{
    GestureVelocityTracker, RangeModel, Result, ScrollAxis, SwipeConfig, TouchScrollConfig,
    TouchScrollEvent, TouchScrollSource, WheelConfig,
};
use web_time::{Duration, Instant};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::header::{Header, SortCriterion, TitleCell};
use crate::horizontal::HorizontalScroll;
use crate::row::{Row, RowId};
use crate::scrollbar::ScrollbarVisibility;
use crate::surface::{Dimension, Surface};
use crate::table_model::TableModel;

/// What caused a viewport update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ViewportChangeAction {
    Rewind,
    Forward,
    Goto,
    Layout,
    DataSource,
    Filter,
    Sort,
    Header,
}

impl ViewportChangeAction {
    /// Whether the action may change how many rows fit on the last page.
    pub fn is_structural(self) -> bool {
        !matches!(self, Self::Rewind | Self::Forward | Self::Goto)
    }
}

/// Emitted after every completed viewport update.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ViewportChangeEvent {
    pub action: ViewportChangeAction,
    /// Scroll position in `[0, 1]`.
    pub position: f64,
    /// Visible fraction of the filtered rows, in `(0, 1]` for non-empty tables.
    pub range: f64,
}

/// Keyboard navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationKey {
    ArrowUp,
    ArrowDown,
    PageUp,
    PageDown,
    Home,
    End,
}

/// Table behavior settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct TableConfig {
    /// Quiet time before typed column filter text is applied (default: 50ms).
    pub filter_debounce: Duration,
    pub swipe: SwipeConfig,
    pub wheel: WheelConfig,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            filter_debounce: Duration::from_millis(50),
            swipe: SwipeConfig::default(),
            wheel: WheelConfig::default(),
        }
    }
}

impl TableConfig {
    #[must_use]
    pub fn with_filter_debounce(mut self, delay: Duration) -> Self {
        self.filter_debounce = delay;
        self
    }

    #[must_use]
    pub fn with_swipe(mut self, swipe: SwipeConfig) -> Self {
        self.swipe = swipe;
        self
    }

    #[must_use]
    pub fn with_wheel(mut self, wheel: WheelConfig) -> Self {
        self.wheel = wheel;
        self
    }
}

/// A row handed to the renderer.
#[derive(Debug)]
pub struct RenderedRow<'a, T> {
    pub row: &'a Row<T>,
    /// Kept mounted for an ongoing touch gesture but not to be shown.
    pub hidden: bool,
}

/// Maps a row's view position and element to a stable identity.
pub type TrackByFn<T> = Box<dyn Fn(usize, &T) -> u64>;

/// Windowing controller for a virtualized table.
pub struct ViewportController<T, S> {
    model: TableModel<T>,
    range: RangeModel,
    surface: Option<S>,
    config: TableConfig,
    track_by: Option<TrackByFn<T>>,
    start_identity: Option<u64>,
    updating: bool,
    held_rows: Vec<RowId>,
    horizontal: HorizontalScroll,
    vertical_touch: GestureVelocityTracker,
    horizontal_touch: GestureVelocityTracker,
    wheel: WheelThrottle,
    filter_input: AHashMap<usize, Debouncer<String>>,
    listeners: Subscribers<ViewportChangeEvent>,
}

impl<T, S> fmt::Debug for ViewportController<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportController")
            .field("model", &self.model)
            .field("range", &self.range)
            .field("attached", &self.surface.is_some())
            .field("held_rows", &self.held_rows.len())
            .field("horizontal", &self.horizontal)
            .finish_non_exhaustive()
    }
}

impl<T, S> ViewportController<T, S> {
    pub fn new(config: TableConfig) -> Self {
        Self {
            model: TableModel::new(),
            range: RangeModel::new(),
            surface: None,
            track_by: None,
            start_identity: None,
            updating: false,
            held_rows: Vec::new(),
            horizontal: HorizontalScroll::new(),
            vertical_touch: GestureVelocityTracker::new(
                TouchScrollConfig::continuous(),
                config.swipe.clone(),
            ),
            horizontal_touch: GestureVelocityTracker::new(
                TouchScrollConfig::continuous(),
                config.swipe.clone(),
            ),
            wheel: WheelThrottle::new(config.wheel.clone()),
            filter_input: AHashMap::new(),
            listeners: Subscribers::new(),
            config,
        }
    }

    /// Identify rows by `track_by` so data changes keep the top row anchored.
    #[must_use]
    pub fn with_track_by(mut self, track_by: impl Fn(usize, &T) -> u64 + 'static) -> Self {
        self.track_by = Some(Box::new(track_by));
        self
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn model(&self) -> &TableModel<T> {
        &self.model
    }

    pub fn range(&self) -> &RangeModel {
        &self.range
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Detach the surface. Updates become no-ops until one is attached.
    pub fn detach_surface(&mut self) -> Option<S> {
        self.surface.take()
    }

    pub fn horizontal(&self) -> &HorizontalScroll {
        &self.horizontal
    }

    /// Tracker for the given touch axis.
    pub fn touch_tracker(&self, axis: ScrollAxis) -> &GestureVelocityTracker {
        match axis {
            ScrollAxis::Vertical => &self.vertical_touch,
            ScrollAxis::Horizontal => &self.horizontal_touch,
        }
    }

    /// Identity of the row at the top of the window after the last update.
    pub fn start_identity(&self) -> Option<u64> {
        self.start_identity
    }

    /// Rows in the current window.
    pub fn visible_rows(&self) -> Vec<&Row<T>> {
        self.model.window(&self.range)
    }

    /// Rows to render: rows held for an ongoing touch (hidden) followed by
    /// the current window.
    pub fn rendered_rows(&self) -> Vec<RenderedRow<'_, T>> {
        let held = self
            .held_rows
            .iter()
            .filter_map(|&id| {
                self.model
                    .position_of(id)
                    .and_then(|p| self.model.filtered_row(p))
                    .or_else(|| self.model.row(id))
            })
            .map(|row| RenderedRow { row, hidden: true });
        let live = self
            .model
            .window(&self.range)
            .into_iter()
            .map(|row| RenderedRow { row, hidden: false });
        held.chain(live).collect()
    }

    /// Number of rows held for an ongoing touch gesture.
    pub fn held_row_count(&self) -> usize {
        self.held_rows.len()
    }

    /// Register for [`ViewportChangeEvent`]s. Dropping the guard unsubscribes.
    pub fn subscribe(&mut self, callback: impl Fn(&ViewportChangeEvent) + 'static) -> Subscription {
        self.listeners.subscribe(callback)
    }

    pub fn scrollbar_visibility(&self) -> ScrollbarVisibility {
        let mut visibility = ScrollbarVisibility::empty();
        visibility.set(ScrollbarVisibility::VERTICAL, self.range.range_ratio() < 1.0);
        visibility.set(ScrollbarVisibility::HORIZONTAL, self.horizontal.is_scrollable());
        visibility
    }

    /// Vertical thumb size as a ratio of the track.
    pub fn vertical_thumb_size(&self) -> f64 {
        self.range.range_ratio()
    }

    /// Vertical thumb position as a ratio of its travel.
    pub fn vertical_thumb_position(&self) -> f64 {
        self.range.position_ratio()
    }

    /// Earliest instant at which [`tick`](Self::tick) has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.vertical_touch.next_deadline(),
            self.horizontal_touch.next_deadline(),
        ]
        .into_iter()
        .chain(self.filter_input.values().map(Debouncer::next_deadline))
        .flatten()
        .min()
    }

    /// Stop inertia, drop pending filter input and subscribers. Idempotent.
    pub fn teardown(&mut self) {
        self.vertical_touch.teardown();
        self.horizontal_touch.teardown();
        for input in self.filter_input.values_mut() {
            input.cancel();
        }
        self.filter_input.clear();
        self.wheel.reset();
        self.held_rows.clear();
        self.listeners.clear();
    }

    fn identity_at(&self, position: usize) -> Option<u64> {
        let track_by = self.track_by.as_ref()?;
        let element = self.model.filtered_row(position)?.bound_element()?;
        Some(track_by(position, element))
    }

    fn vertical_touch_config(&self) -> TouchScrollConfig {
        let visible = self.range.len();
        if visible == 0 {
            return TouchScrollConfig::continuous();
        }
        let visible = visible as f64;
        TouchScrollConfig::discrete(1.0 / visible, self.range.scrollable_size() as f64 / visible)
    }
}

impl<T, S: Surface<T>> ViewportController<T, S> {
    /// Attach the surface, adopt its viewport size and lay out.
    pub fn attach_surface(&mut self, surface: S) {
        self.apply_viewport_size(surface.viewport());
        self.surface = Some(surface);
        self.layout();
    }

    /// Re-run the fill algorithm for `action` and notify subscribers.
    pub fn update_viewport(&mut self, action: ViewportChangeAction) {
        // Nested updates are dropped. Unreachable through `&mut self`.
        if self.updating {
            return;
        }
        let Some(mut surface) = self.surface.take() else {
            debug!(?action, "no surface attached; viewport update skipped");
            return;
        };
        self.updating = true;

        let span = debug_span!(
            "viewport_update",
            action = ?action,
            start = Empty,
            end = Empty,
            position = Empty,
            range = Empty
        );
        let _guard = span.enter();

        if action.is_structural() {
            let count = last_page_count(&self.model, &mut surface);
            self.range.set_last_page_count(count);
        }
        grow_end_to_fit(&self.model, &mut self.range, &mut surface);
        grow_start_to_fit(&self.model, &mut self.range, &mut surface);
        self.start_identity = self.identity_at(self.range.start());

        self.surface = Some(surface);
        self.updating = false;
        self.vertical_touch.set_config(self.vertical_touch_config());

        let event = ViewportChangeEvent {
            action,
            position: self.range.position_ratio(),
            range: self.range.range_ratio(),
        };
        span.record("start", self.range.start());
        span.record("end", self.range.end());
        span.record("position", event.position);
        span.record("range", event.range);
        self.listeners.notify(&event);
    }

    /// Rebuild the view and refill the window from its current start.
    pub fn layout(&mut self) {
        self.model.invalidate();
        self.range.set_size(self.model.filtered_len());
        self.range.clear_range();
        self.update_viewport(ViewportChangeAction::Layout);
    }

    /// The visible area changed size.
    pub fn on_viewport_resize(&mut self, viewport: Dimension) {
        if let Some(surface) = self.surface.as_mut() {
            surface.set_viewport(viewport);
        }
        self.apply_viewport_size(viewport);
        self.layout();
    }

    fn apply_viewport_size(&mut self, viewport: Dimension) {
        self.horizontal.set_viewport_width(viewport.width);
        self.vertical_touch.set_host_extent(viewport.height);
    }

    /// The laid-out content changed size.
    pub fn on_client_resize(&mut self, client: Dimension) {
        self.horizontal.set_client_width(client.width);
        self.horizontal_touch.set_host_extent(client.width);
    }

    // --- header, filter and sort ---------------------------------------

    /// Replace the header and scroll to the top.
    pub fn set_header(&mut self, header: Option<Header<T>>) {
        self.model.set_header(header);
        self.range.set_size(self.model.filtered_len());
        self.range.set_start(0);
        self.update_viewport(ViewportChangeAction::Header);
    }

    pub fn add_column(&mut self, cell: TitleCell<T>) {
        let Some(header) = self.model.header_mut() else {
            debug!("no header; column not added");
            return;
        };
        header.push_column(cell);
        self.layout();
    }

    pub fn remove_column(&mut self, column: usize) -> Option<TitleCell<T>> {
        let removed = self.model.header_mut()?.remove_column(column)?;
        self.layout();
        Some(removed)
    }

    /// Set the table-wide filter text.
    pub fn set_table_filter(&mut self, text: &str) {
        if self.model.set_table_filter(text) {
            self.apply_filter_change();
        }
    }

    /// Set a column's filter text immediately.
    pub fn set_column_filter(&mut self, column: usize, text: &str) {
        let Some(header) = self.model.header_mut() else {
            debug!(column, "no header; column filter ignored");
            return;
        };
        if header.set_column_filter(column, text) {
            self.model.invalidate();
            self.apply_filter_change();
        }
    }

    /// Record typed column filter text; applied by [`tick`](Self::tick)
    /// once input has been quiet for the configured debounce.
    pub fn input_column_filter(&mut self, column: usize, text: impl Into<String>, now: Instant) {
        let delay = self.config.filter_debounce;
        self.filter_input
            .entry(column)
            .or_insert_with(|| Debouncer::new(delay))
            .push(text.into(), now);
    }

    pub fn set_sort(&mut self, column: usize, criterion: Option<SortCriterion>) {
        let changed = self
            .model
            .header_mut()
            .is_some_and(|h| h.set_sort(column, criterion));
        if changed {
            self.apply_sort_change();
        }
    }

    /// Cycle a column through ascending, descending and unsorted.
    pub fn toggle_sort(&mut self, column: usize, multi: bool) {
        let changed = self
            .model
            .header_mut()
            .is_some_and(|h| h.toggle_sort(column, multi));
        if changed {
            self.apply_sort_change();
        }
    }

    fn apply_filter_change(&mut self) {
        self.range.set_size(self.model.filtered_len());
        self.range.set_start(0);
        self.update_viewport(ViewportChangeAction::Filter);
    }

    fn apply_sort_change(&mut self) {
        self.model.invalidate();
        self.range.clear_range();
        self.update_viewport(ViewportChangeAction::Sort);
    }

    // --- data ------------------------------------------------------------

    /// Replace the row set. Rows are matched by id: new ids are added,
    /// missing ids removed and known ids updated in place.
    pub fn set_rows(&mut self, rows: impl IntoIterator<Item = Row<T>>) {
        let changes = self.model.sync_rows(rows);
        debug!(
            added = changes.added,
            removed = changes.removed,
            updated = changes.updated,
            "rows synchronized"
        );
        if !changes.is_empty() {
            self.apply_data_change();
        }
    }

    pub fn add_row(&mut self, row: Row<T>) {
        self.model.add_row(row, true);
        self.apply_data_change();
    }

    pub fn remove_row(&mut self, id: RowId) -> Option<Row<T>> {
        let row = self.model.remove_row(id, true)?;
        self.apply_data_change();
        Some(row)
    }

    fn apply_data_change(&mut self) {
        self.range.set_size(self.model.filtered_len());
        let anchor = self.start_identity;
        if !anchor.is_some_and(|identity| self.scroll_to_identity(identity, false)) {
            self.range.clear_range();
        }
        self.update_viewport(ViewportChangeAction::DataSource);
    }

    // --- navigation ----------------------------------------------------

    /// Put the row with `identity` at the top. Returns `false` if no row in
    /// the view has it or no identity function is set.
    pub fn scroll_to_identity(&mut self, identity: u64, update: bool) -> bool {
        let Some(track_by) = self.track_by.as_ref() else {
            return false;
        };
        let position = self.model.filtered_rows().enumerate().position(|(i, row)| {
            row.bound_element()
                .is_some_and(|element| track_by(i, element) == identity)
        });
        match position {
            Some(position) => {
                self.scroll_to_row(position, update);
                true
            }
            None => false,
        }
    }

    /// Put the row at view position `position` at the top.
    pub fn scroll_to_row(&mut self, position: usize, update: bool) {
        self.range.set_start(position);
        if update {
            self.update_viewport(ViewportChangeAction::Goto);
        }
    }

    /// Jump to a normalized scroll position.
    ///
    /// # Errors
    ///
    /// Rejects ratios outside `[0, 1]`; nothing changes in that case.
    pub fn scroll_to_position(&mut self, ratio: f64) -> Result<()> {
        self.range.set_position_ratio(ratio)?;
        self.update_viewport(ViewportChangeAction::Goto);
        Ok(())
    }

    /// Move by `distance` (a ratio of the scrollable span).
    pub fn scroll_by(&mut self, distance: f64, stop_swipe: bool) {
        self.range.move_position(distance);
        let action = if distance < 0.0 {
            ViewportChangeAction::Rewind
        } else {
            ViewportChangeAction::Forward
        };
        self.update_viewport(action);
        if stop_swipe {
            self.vertical_touch.stop_swipe();
        }
    }

    pub fn line_up(&mut self) {
        if let Some(step) = self.line_step() {
            self.scroll_by(-step, true);
        }
    }

    pub fn line_down(&mut self) {
        if let Some(step) = self.line_step() {
            self.scroll_by(step, true);
        }
    }

    pub fn page_up(&mut self) {
        self.scroll_by(-self.range.range_ratio(), true);
    }

    pub fn page_down(&mut self) {
        self.scroll_by(self.range.range_ratio(), true);
    }

    pub fn home(&mut self) {
        self.range.set_start(0);
        self.update_viewport(ViewportChangeAction::Rewind);
    }

    pub fn end(&mut self) {
        self.range.set_start(usize::MAX);
        self.update_viewport(ViewportChangeAction::Forward);
    }

    pub fn on_key(&mut self, key: NavigationKey) {
        match key {
            NavigationKey::ArrowUp => self.line_up(),
            NavigationKey::ArrowDown => self.line_down(),
            NavigationKey::PageUp => self.page_up(),
            NavigationKey::PageDown => self.page_down(),
            NavigationKey::Home => self.home(),
            NavigationKey::End => self.end(),
        }
    }

    /// Feed a wheel tick with vertical delta `delta_y`.
    pub fn on_mouse_wheel(&mut self, delta_y: f64, now: Instant) {
        let Some(event) = self.wheel.push(delta_y, now) else {
            return;
        };
        let count = self.model.filtered_len();
        if count == 0 {
            return;
        }
        let distance = event.speed / count as f64;
        self.scroll_by(event.signum * distance.min(self.range.range_ratio()), true);
    }

    /// Apply a scrollbar drag delta (see [`ScrollbarDrag`](crate::scrollbar::ScrollbarDrag)).
    pub fn on_scrollbar_scroll(&mut self, axis: ScrollAxis, delta_ratio: f64) {
        match axis {
            ScrollAxis::Vertical => self.scroll_by(delta_ratio, true),
            ScrollAxis::Horizontal => self.on_horizontal_scroll(delta_ratio),
        }
    }

    /// Move the content horizontally by `delta_ratio` of the scroll width.
    pub fn on_horizontal_scroll(&mut self, delta_ratio: f64) {
        if self.horizontal.scroll_by(delta_ratio) {
            self.horizontal_touch.stop_swipe();
        }
    }

    // --- touch -----------------------------------------------------------

    /// A touch began at `(x, y)`. Holds the current rows until touch end.
    pub fn on_touch_start(&mut self, x: f64, y: f64) {
        self.held_rows = self.model.window(&self.range).iter().map(|r| r.id()).collect();
        self.update_viewport(ViewportChangeAction::Layout);
        self.vertical_touch.on_start(y);
        self.horizontal_touch.on_start(x);
    }

    pub fn on_touch_move(&mut self, x: f64, y: f64, now: Instant) {
        if let Some(event) = self.vertical_touch.on_move(y, now) {
            self.on_vertical_touch_scroll(event);
        }
        if let Some(event) = self.horizontal_touch.on_move(x, now) {
            self.on_horizontal_touch_scroll(event);
        }
    }

    /// The touch ended. Fast releases start swipe inertia.
    pub fn on_touch_end(&mut self, now: Instant) {
        self.vertical_touch.on_end(now);
        self.horizontal_touch.on_end(now);
        self.held_rows.clear();
        self.update_viewport(ViewportChangeAction::Layout);
    }

    /// Run everything due at `now`: swipe inertia and debounced filters.
    pub fn tick(&mut self, now: Instant) {
        for event in self.vertical_touch.poll(now) {
            if self.on_vertical_touch_scroll(event) {
                break;
            }
        }
        for event in self.horizontal_touch.poll(now) {
            if self.on_horizontal_touch_scroll(event) {
                break;
            }
        }

        let mut due: Vec<(usize, String)> = self
            .filter_input
            .iter_mut()
            .filter_map(|(&column, input)| input.poll(now).map(|text| (column, text)))
            .collect();
        due.sort_unstable_by_key(|(column, _)| *column);
        for (column, text) in due {
            self.set_column_filter(column, &text);
        }
    }

    /// Returns `true` if the swipe was stopped.
    fn on_vertical_touch_scroll(&mut self, event: TouchScrollEvent) -> bool {
        let swipe = event.source == TouchScrollSource::Swipe;
        let scrollable = self.range.scrollable_size();
        if scrollable == 0 {
            if swipe {
                self.vertical_touch.stop_swipe();
            }
            return swipe;
        }
        let clip = self.range.len() as f64 / scrollable as f64;
        self.scroll_by(event.delta_ratio * clip, false);

        let position = self.range.position_ratio();
        let stop = swipe && (position == 0.0 || position == 1.0);
        if stop {
            self.vertical_touch.stop_swipe();
        }
        stop
    }

    /// Returns `true` if the swipe was stopped.
    fn on_horizontal_touch_scroll(&mut self, event: TouchScrollEvent) -> bool {
        if !self.horizontal.is_scrollable() {
            return false;
        }
        let delta_px = event.delta_ratio * self.horizontal.client_width();
        let at_extreme = self.horizontal.scroll_by(delta_px / self.horizontal.scroll_width());
        if at_extreme {
            self.horizontal_touch.stop_swipe();
        }
        at_extreme
    }

    fn line_step(&self) -> Option<f64> {
        let count = self.model.filtered_len();
        (count > 0).then(|| 1.0 / count as f64)
    }
}

impl<T: PartialEq, S: Surface<T>> ViewportController<T, S> {
    /// Put the row bound to `element` at the top. Returns `false` if no row
    /// in the view is bound to it.
    pub fn scroll_to_element(&mut self, element: &T) -> bool {
        let position = self
            .model
            .filtered_rows()
            .position(|row| row.bound_element() == Some(element));
        match position {
            Some(position) => {
                self.scroll_to_row(position, true);
                true
            }
            None => false,
        }
    }
}

impl<T, S> Drop for ViewportController<T, S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn measure_vertical<T, S: Surface<T>>(model: &TableModel<T>, range: &RangeModel, surface: &mut S) -> bool {
    surface.measure(&model.window(range)).vertical
}

fn grow_end_to_fit<T, S: Surface<T>>(model: &TableModel<T>, range: &mut RangeModel, surface: &mut S) {
    while !measure_vertical(model, range, surface) && range.try_grow_end() {}
}

fn grow_start_to_fit<T, S: Surface<T>>(model: &TableModel<T>, range: &mut RangeModel, surface: &mut S) {
    if !range.last_in_range() {
        return;
    }
    let mut grown = false;
    loop {
        if measure_vertical(model, range, surface) {
            if grown {
                range.try_shrink_start();
            }
            return;
        }
        if !range.try_grow_start() {
            return;
        }
        grown = true;
    }
}

/// Rows that fit when scrolled to the very end; at least one for a
/// non-empty view so the end is always reachable.
fn last_page_count<T, S: Surface<T>>(model: &TableModel<T>, surface: &mut S) -> usize {
    let size = model.filtered_len();
    let mut probe = RangeModel::new();
    probe.set_size(size);
    probe.set_start(size);
    grow_start_to_fit(model, &mut probe, surface);
    probe.len().max(usize::from(size > 0))
}
