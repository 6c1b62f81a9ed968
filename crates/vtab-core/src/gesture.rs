#![forbid(unsafe_code)]

//! Drag and swipe tracking along one axis.
//!
//! [`GestureVelocityTracker`] turns a sequence of one-dimensional pointer
//! positions (already reduced from touch or mouse events by the host) into
//! scroll delta ratios, and turns a fast release into an inertial
//! [`SwipeInertia`] sequence.
//!
//! # State Machine
//!
//! ```text
//!   Idle --start--> Dragging --end (slow)--> Idle
//!                      |
//!                      +--end (swipe)--> Inertial --exhausted/cancel--> Idle
//!   Inertial --start--> Dragging   (the running sequence is cancelled)
//! ```
//!
//! # Invariants
//!
//! 1. At most one inertial sequence is live; starting a gesture, calling
//!    [`stop_swipe`](GestureVelocityTracker::stop_swipe) or tearing down
//!    cancels it.
//! 2. Drag events never carry a zero delta.
//! 3. In discrete mode, drag deltas are whole multiples of the step size;
//!    the unconsumed remainder carries over to the next move.
//! 4. The sample buffer only holds samples of the current gesture that are
//!    younger than the sample window.
//!
//! # Failure Modes
//!
//! - A host extent of zero (surface not measured yet) suppresses all
//!   emission rather than dividing by zero.

use std::collections::VecDeque;

use tracing::{debug, trace};
use web_time::Instant;

use crate::cancellation::CancellationSource;
use crate::config::{SwipeConfig, TouchScrollConfig};
use crate::inertia::SwipeInertia;

/// Axis a tracker or scroll operation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollAxis {
    /// Rows; windowed by the range model.
    Vertical,
    /// Columns; a clamped pixel offset.
    Horizontal,
}

/// What produced a [`TouchScrollEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchScrollSource {
    /// Direct pointer movement.
    Drag,
    /// Inertial continuation after release.
    Swipe,
}

/// A scroll request expressed as a ratio of the host extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchScrollEvent {
    /// Positive scrolls forward (content moves towards the start).
    pub delta_ratio: f64,
    /// Drag or swipe.
    pub source: TouchScrollSource,
}

/// Coarse tracker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    /// No pointer down and no inertia running.
    Idle,
    /// Pointer down.
    Dragging,
    /// Pointer released, inertial sequence running.
    Inertial,
}

#[derive(Debug, Clone, Copy)]
struct DragSample {
    timestamp: Instant,
    delta: f64,
}

/// Converts pointer samples on one axis into scroll delta ratios.
#[derive(Debug)]
pub struct GestureVelocityTracker {
    config: TouchScrollConfig,
    swipe: SwipeConfig,
    host_extent: f64,
    dragging: bool,
    last_position: f64,
    // Position where the gesture started or last produced a drag event.
    anchor: f64,
    samples: VecDeque<DragSample>,
    inertia: Option<SwipeInertia>,
    cancel: CancellationSource,
}

impl GestureVelocityTracker {
    /// Create an idle tracker.
    #[must_use]
    pub fn new(config: TouchScrollConfig, swipe: SwipeConfig) -> Self {
        Self {
            config,
            swipe,
            host_extent: 0.0,
            dragging: false,
            last_position: 0.0,
            anchor: 0.0,
            samples: VecDeque::with_capacity(16),
            inertia: None,
            cancel: CancellationSource::new(),
        }
    }

    /// Current touch scroll parameters.
    #[must_use]
    pub fn config(&self) -> TouchScrollConfig {
        self.config
    }

    /// Replace the touch scroll parameters. A running inertial sequence
    /// keeps the parameters it started with.
    pub fn set_config(&mut self, config: TouchScrollConfig) {
        self.config = config;
    }

    /// Set the host's extent along this axis, in pixels.
    pub fn set_host_extent(&mut self, extent: f64) {
        self.host_extent = extent.max(0.0);
    }

    /// Host extent along this axis, in pixels.
    #[must_use]
    pub fn host_extent(&self) -> f64 {
        self.host_extent
    }

    /// Coarse state.
    #[must_use]
    pub fn state(&self) -> GestureState {
        if self.dragging {
            GestureState::Dragging
        } else if self.inertia.as_ref().is_some_and(|i| !i.is_finished()) {
            GestureState::Inertial
        } else {
            GestureState::Idle
        }
    }

    /// Whether a pointer is down.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Begin a gesture at `position`. Cancels any running inertia.
    pub fn on_start(&mut self, position: f64) {
        self.stop_swipe();
        self.samples.clear();
        self.dragging = true;
        self.last_position = position;
        self.anchor = position;
    }

    /// Feed a pointer move. Returns a drag event once the accumulated
    /// movement is worth at least one emitted delta.
    pub fn on_move(&mut self, position: f64, now: Instant) -> Option<TouchScrollEvent> {
        if !self.dragging {
            return None;
        }

        let delta = self.last_position - position;
        if self.config.is_discrete() && delta.abs() < self.swipe.noise_threshold {
            return None;
        }

        self.record(DragSample {
            timestamp: now,
            delta,
        });
        self.last_position = position;
        self.drag_to(position)
    }

    /// Release the gesture. Starts an inertial sequence and returns `true`
    /// if the trailing samples qualify as a swipe.
    pub fn on_end(&mut self, now: Instant) -> bool {
        if !self.dragging {
            return false;
        }
        self.dragging = false;

        let window = self.swipe.sample_window;
        let recent: f64 = self
            .samples
            .iter()
            .filter(|s| now.saturating_duration_since(s.timestamp) <= window)
            .map(|s| s.delta)
            .sum();
        self.samples.clear();

        if recent.abs() <= self.swipe.min_swipe_distance || self.host_extent <= 0.0 {
            return false;
        }

        let initial = (recent / self.host_extent) / self.swipe.ticks_per_window()
            * self.config.swipe_scroll_speed;
        debug!(
            recent_px = recent,
            initial_ratio = initial,
            step_size = self.config.step_size,
            "swipe detected"
        );

        self.cancel = CancellationSource::new();
        self.inertia = Some(SwipeInertia::start(
            initial,
            self.config.step_size,
            self.swipe.clone(),
            now,
            self.cancel.token(),
        ));
        true
    }

    /// Drain inertial events that are due at `now`.
    pub fn poll(&mut self, now: Instant) -> Vec<TouchScrollEvent> {
        let Some(inertia) = self.inertia.as_mut() else {
            return Vec::new();
        };
        let events = inertia
            .poll(now)
            .into_iter()
            .map(|delta_ratio| TouchScrollEvent {
                delta_ratio,
                source: TouchScrollSource::Swipe,
            })
            .collect();
        if inertia.is_finished() {
            self.inertia = None;
        }
        events
    }

    /// When the next inertial event becomes due, if one is scheduled.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.inertia.as_ref().and_then(SwipeInertia::next_deadline)
    }

    /// Cancel the running inertial sequence, if any. Idempotent.
    pub fn stop_swipe(&mut self) {
        if self.inertia.take().is_some() {
            debug!("swipe cancelled");
        }
        self.cancel.cancel();
    }

    /// Cancel inertia and forget the current gesture. Idempotent.
    pub fn teardown(&mut self) {
        self.stop_swipe();
        self.samples.clear();
        self.dragging = false;
    }

    fn record(&mut self, sample: DragSample) {
        let window = self.swipe.sample_window;
        while self
            .samples
            .front()
            .is_some_and(|s| sample.timestamp.saturating_duration_since(s.timestamp) > window)
        {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    fn drag_to(&mut self, position: f64) -> Option<TouchScrollEvent> {
        if self.host_extent <= 0.0 {
            return None;
        }

        let step = self.config.step_size;
        let delta_px = self.anchor - position;
        if delta_px.abs() < step * self.host_extent {
            return None;
        }

        let mut delta_ratio = delta_px / self.host_extent;
        if self.config.is_discrete() {
            delta_ratio = (delta_ratio / step).trunc() * step;
        }
        if delta_ratio == 0.0 {
            return None;
        }

        self.anchor -= delta_ratio * self.host_extent;
        trace!(delta_ratio, anchor = self.anchor, "drag");
        Some(TouchScrollEvent {
            delta_ratio,
            source: TouchScrollSource::Drag,
        })
    }
}

impl Drop for GestureVelocityTracker {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use web_time::Duration;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn tracker(config: TouchScrollConfig, extent: f64) -> GestureVelocityTracker {
        let mut tracker = GestureVelocityTracker::new(config, SwipeConfig::default());
        tracker.set_host_extent(extent);
        tracker
    }

    #[test]
    fn continuous_drag_emits_every_move() {
        let t0 = Instant::now();
        let mut tracker = tracker(TouchScrollConfig::continuous(), 200.0);
        tracker.on_start(100.0);

        let event = tracker.on_move(90.0, t0).unwrap();
        assert_eq!(event.source, TouchScrollSource::Drag);
        assert!((event.delta_ratio - 0.05).abs() < 1e-12);

        let event = tracker.on_move(110.0, t0 + ms(10)).unwrap();
        assert!((event.delta_ratio + 0.1).abs() < 1e-12);
    }

    #[test]
    fn move_without_start_is_ignored() {
        let mut tracker = tracker(TouchScrollConfig::continuous(), 200.0);
        assert!(tracker.on_move(10.0, Instant::now()).is_none());
        assert_eq!(tracker.state(), GestureState::Idle);
    }

    #[test]
    fn discrete_drag_drops_noise() {
        let t0 = Instant::now();
        let mut tracker = tracker(TouchScrollConfig::discrete(0.1, 1.0), 100.0);
        tracker.on_start(50.0);
        assert!(tracker.on_move(47.0, t0).is_none());
    }

    #[test]
    fn discrete_drag_truncates_to_whole_steps_and_carries_remainder() {
        let t0 = Instant::now();
        // step = 10px
        let mut tracker = tracker(TouchScrollConfig::discrete(0.1, 1.0), 100.0);
        tracker.on_start(100.0);

        // 6px: below one step
        assert!(tracker.on_move(94.0, t0).is_none());
        // 25px total: two steps, 5px carried
        let event = tracker.on_move(75.0, t0 + ms(10)).unwrap();
        assert!((event.delta_ratio - 0.2).abs() < 1e-12);
        // 5px carried + 5px more = one step
        let event = tracker.on_move(70.0, t0 + ms(20)).unwrap();
        assert!((event.delta_ratio - 0.1).abs() < 1e-12);
    }

    #[test]
    fn discrete_drag_rounds_toward_zero_backwards() {
        let t0 = Instant::now();
        let mut tracker = tracker(TouchScrollConfig::discrete(0.1, 1.0), 100.0);
        tracker.on_start(0.0);
        let event = tracker.on_move(19.0, t0).unwrap();
        assert!((event.delta_ratio + 0.1).abs() < 1e-12);
    }

    #[test]
    fn zero_extent_suppresses_emission() {
        let t0 = Instant::now();
        let mut tracker = tracker(TouchScrollConfig::continuous(), 0.0);
        tracker.on_start(0.0);
        assert!(tracker.on_move(-50.0, t0).is_none());
        assert!(!tracker.on_end(t0 + ms(10)));
    }

    #[test]
    fn slow_release_does_not_swipe() {
        let t0 = Instant::now();
        let mut tracker = tracker(TouchScrollConfig::continuous(), 300.0);
        tracker.on_start(300.0);
        tracker.on_move(280.0, t0);
        tracker.on_move(260.0, t0 + ms(20));
        // only the last 100ms count: 10px
        tracker.on_move(250.0, t0 + ms(200));
        assert!(!tracker.on_end(t0 + ms(210)));
        assert_eq!(tracker.state(), GestureState::Idle);
    }

    #[test]
    fn fast_release_starts_inertia() {
        let t0 = Instant::now();
        let mut tracker = tracker(TouchScrollConfig::continuous(), 300.0);
        tracker.on_start(300.0);
        for (i, pos) in [290.0, 280.0, 270.0, 260.0].into_iter().enumerate() {
            tracker.on_move(pos, t0 + ms(20 * i as u64));
        }
        let release = t0 + ms(70);
        assert!(tracker.on_end(release));
        assert_eq!(tracker.state(), GestureState::Inertial);

        let events = tracker.poll(release);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].source, TouchScrollSource::Swipe);
        assert!((events[0].delta_ratio - (40.0 / 300.0) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn new_gesture_cancels_inertia() {
        let t0 = Instant::now();
        let mut tracker = tracker(TouchScrollConfig::continuous(), 100.0);
        tracker.on_start(100.0);
        tracker.on_move(50.0, t0);
        assert!(tracker.on_end(t0 + ms(10)));
        assert!(tracker.next_deadline().is_some());

        tracker.on_start(0.0);
        assert_eq!(tracker.state(), GestureState::Dragging);
        assert!(tracker.poll(t0 + ms(500)).is_empty());
        assert_eq!(tracker.next_deadline(), None);
    }

    #[test]
    fn teardown_is_idempotent() {
        let t0 = Instant::now();
        let mut tracker = tracker(TouchScrollConfig::continuous(), 100.0);
        tracker.on_start(100.0);
        tracker.on_move(0.0, t0);
        assert!(tracker.on_end(t0));
        tracker.teardown();
        tracker.teardown();
        assert_eq!(tracker.state(), GestureState::Idle);
        assert!(tracker.poll(t0 + ms(100)).is_empty());
    }
}
