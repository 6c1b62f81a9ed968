#![forbid(unsafe_code)]

//! Tuning knobs for gesture, inertia and wheel handling.
//!
//! All structs implement `Default` with the values the table ships with and
//! offer `with_*` builders. With the `serde` feature enabled they
//! deserialize from partial documents; missing fields take their defaults.

use web_time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Swipe detection and inertial decay parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct SwipeConfig {
    /// Trailing window of drag samples inspected on release (default: 100ms).
    pub sample_window: Duration,
    /// Interval between inertia ticks (default: 50ms).
    pub tick_interval: Duration,
    /// Pixel distance the trailing samples must exceed to count as a swipe
    /// (default: 30.0).
    pub min_swipe_distance: f64,
    /// Per-tick multiplier applied to the inertia ratio (default: 0.8).
    pub decay_factor: f64,
    /// Threshold ending the decay phase in continuous mode (default: 0.0001).
    pub continuous_threshold: f64,
    /// Per-tick growth of the ease-out delay in discrete mode (default: 1.2).
    pub ease_out_growth: f64,
    /// Ease-out stops once the next delay would reach this (default: 400ms).
    pub ease_out_max_delay: Duration,
    /// Pixel moves below this are dropped in discrete mode (default: 5.0).
    pub noise_threshold: f64,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            sample_window: Duration::from_millis(100),
            tick_interval: Duration::from_millis(50),
            min_swipe_distance: 30.0,
            decay_factor: 0.8,
            continuous_threshold: 0.0001,
            ease_out_growth: 1.2,
            ease_out_max_delay: Duration::from_millis(400),
            noise_threshold: 5.0,
        }
    }
}

impl SwipeConfig {
    /// Set the tick interval (builder pattern).
    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Set the minimum swipe distance in pixels (builder pattern).
    #[must_use]
    pub fn with_min_swipe_distance(mut self, pixels: f64) -> Self {
        self.min_swipe_distance = pixels.abs();
        self
    }

    /// Set the decay factor (builder pattern). Clamped to `[0, 0.99]` so the
    /// sequence always converges.
    #[must_use]
    pub fn with_decay_factor(mut self, factor: f64) -> Self {
        self.decay_factor = factor.clamp(0.0, 0.99);
        self
    }

    /// Number of inertia ticks that fit into the sample window.
    #[must_use]
    pub fn ticks_per_window(&self) -> f64 {
        let tick = self.tick_interval.as_secs_f64();
        if tick <= 0.0 {
            return 1.0;
        }
        (self.sample_window.as_secs_f64() / tick).max(1.0)
    }
}

/// Per-axis touch scroll parameters.
///
/// The vertical table axis recomputes this after every viewport update; the
/// horizontal axis uses [`TouchScrollConfig::continuous`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct TouchScrollConfig {
    /// `0.0` scrolls continuously; `0 < step_size < 1` scrolls in whole
    /// steps of this ratio of the host extent.
    pub step_size: f64,
    /// Multiplier applied to the initial swipe ratio.
    pub swipe_scroll_speed: f64,
}

impl Default for TouchScrollConfig {
    fn default() -> Self {
        Self::continuous()
    }
}

impl TouchScrollConfig {
    /// Continuous scrolling at unit speed.
    #[must_use]
    pub const fn continuous() -> Self {
        Self {
            step_size: 0.0,
            swipe_scroll_speed: 1.0,
        }
    }

    /// Discrete scrolling in steps of `step_size`.
    #[must_use]
    pub fn discrete(step_size: f64, swipe_scroll_speed: f64) -> Self {
        Self {
            step_size: step_size.clamp(0.0, 1.0),
            swipe_scroll_speed,
        }
    }

    /// Whether scrolling snaps to whole steps.
    #[inline]
    #[must_use]
    pub fn is_discrete(&self) -> bool {
        self.step_size > 0.0
    }
}

/// Mouse wheel throttling parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct WheelConfig {
    /// Minimum time between two emitted wheel events (default: 50ms).
    pub throttle: Duration,
    /// Base of the exponential speed-up for bursts (default: 3.0).
    pub speed_base: f64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            throttle: Duration::from_millis(50),
            speed_base: 3.0,
        }
    }
}
