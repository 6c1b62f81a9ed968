#![forbid(unsafe_code)]

//! Mouse wheel throttling with burst acceleration.
//!
//! Wheel hardware reports wildly different delta magnitudes across devices,
//! so only the direction of a tick is used. Speed comes from the burst
//! length instead: the first tick after a quiet period is emitted at once
//! with speed 1; ticks arriving inside the throttle window are buffered and
//! the next emitted event carries `speed_base ^ (buffered - 1)`.

use web_time::Instant;

use crate::config::WheelConfig;

/// A throttled wheel scroll request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelScrollEvent {
    /// Number of rows to scroll (before clamping to a page).
    pub speed: f64,
    /// Direction: `1.0` forward, `-1.0` backward, `0.0` none.
    pub signum: f64,
}

/// Buffers wheel ticks and emits at most one event per throttle window.
#[derive(Debug, Clone)]
pub struct WheelThrottle {
    config: WheelConfig,
    buffered: u32,
    window_end: Option<Instant>,
}

impl WheelThrottle {
    /// Create a throttle with no pending ticks.
    #[must_use]
    pub fn new(config: WheelConfig) -> Self {
        Self {
            config,
            buffered: 0,
            window_end: None,
        }
    }

    /// Record a wheel tick with vertical delta `delta_y` at `now`.
    pub fn push(&mut self, delta_y: f64, now: Instant) -> Option<WheelScrollEvent> {
        self.buffered = self.buffered.saturating_add(1);
        if self.window_end.is_some_and(|end| now < end) {
            return None;
        }

        let exponent = i32::try_from(self.buffered - 1).unwrap_or(i32::MAX);
        let event = WheelScrollEvent {
            speed: self.config.speed_base.powi(exponent),
            signum: if delta_y == 0.0 || delta_y.is_nan() {
                0.0
            } else {
                delta_y.signum()
            },
        };
        self.buffered = 0;
        self.window_end = Some(now + self.config.throttle);
        Some(event)
    }

    /// Drop buffered ticks and reopen the window.
    pub fn reset(&mut self) {
        self.buffered = 0;
        self.window_end = None;
    }
}

impl Default for WheelThrottle {
    fn default() -> Self {
        Self::new(WheelConfig::default())
    }
}
