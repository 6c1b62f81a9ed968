#![forbid(unsafe_code)]

//! Inertial continuation of a swipe gesture.
//!
//! [`SwipeInertia`] produces the synthetic delta ratios that keep a list
//! scrolling after a fast release. It is a poll-driven task: the owner calls
//! [`poll`](SwipeInertia::poll) with the current time (typically on every
//! frame or tick) and receives every delta that became due since the last
//! poll. Nothing runs in the background.
//!
//! # Phases
//!
//! 1. **Decay**: the initial ratio is emitted immediately, then multiplied by
//!    `decay_factor` every `tick_interval` and emitted again, until its
//!    magnitude is at or below the threshold (`max(step_size,
//!    continuous_threshold)`). The value that crosses the threshold is still
//!    emitted.
//! 2. **Ease-out** (discrete mode only): the signed single-step ratio is
//!    emitted after a delay that starts at `tick_interval` and grows by
//!    `ease_out_growth` per emission. The sequence ends once the next delay
//!    would reach `ease_out_max_delay`.
//!
//! # Invariants
//!
//! 1. Decay-phase magnitudes strictly decrease.
//! 2. Every emitted delta has the sign of the initial ratio.
//! 3. Once finished or cancelled, `poll` returns nothing, forever.

use web_time::{Duration, Instant};

use crate::cancellation::CancellationToken;
use crate::config::SwipeConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Decay { ratio: f64 },
    EaseOut { ratio: f64, delay: Duration },
    Done,
}

/// A cancellable, time-driven sequence of inertial scroll deltas.
#[derive(Debug, Clone)]
pub struct SwipeInertia {
    phase: Phase,
    next_due: Instant,
    step_size: f64,
    threshold: f64,
    config: SwipeConfig,
    token: CancellationToken,
}

impl SwipeInertia {
    /// Start a sequence at `now` with the given initial delta ratio.
    ///
    /// `step_size` is the discrete step ratio (`0.0` in continuous mode).
    #[must_use]
    pub fn start(
        initial_ratio: f64,
        step_size: f64,
        config: SwipeConfig,
        now: Instant,
        token: CancellationToken,
    ) -> Self {
        let step_size = step_size.abs();
        let threshold = step_size.max(config.continuous_threshold);
        let phase = if initial_ratio == 0.0 || initial_ratio.is_nan() {
            Phase::Done
        } else {
            Phase::Decay {
                ratio: initial_ratio,
            }
        };
        Self {
            phase,
            next_due: now,
            step_size,
            threshold,
            config,
            token,
        }
    }

    /// Whether the sequence has ended, by exhaustion or cancellation.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Done || self.token.is_cancelled()
    }

    /// When the next delta becomes due, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        if self.is_finished() {
            None
        } else {
            Some(self.next_due)
        }
    }

    /// Drain every delta that is due at `now`.
    pub fn poll(&mut self, now: Instant) -> Vec<f64> {
        let mut out = Vec::new();
        loop {
            if self.token.is_cancelled() {
                self.phase = Phase::Done;
            }
            if self.phase == Phase::Done || now < self.next_due {
                break;
            }
            out.push(self.advance());
        }
        out
    }

    /// Emit the current delta and move to the next state.
    fn advance(&mut self) -> f64 {
        let tick = self.config.tick_interval;
        match self.phase {
            Phase::Decay { ratio } => {
                if ratio.abs() <= self.threshold {
                    if self.step_size > 0.0 {
                        self.phase = Phase::EaseOut {
                            ratio: ratio.signum() * self.step_size,
                            delay: tick,
                        };
                        self.next_due += tick;
                    } else {
                        self.phase = Phase::Done;
                    }
                } else {
                    self.phase = Phase::Decay {
                        ratio: ratio * self.config.decay_factor,
                    };
                    self.next_due += tick;
                }
                ratio
            }
            Phase::EaseOut { ratio, delay } => {
                let next_delay = delay.mul_f64(self.config.ease_out_growth);
                if next_delay >= self.config.ease_out_max_delay {
                    self.phase = Phase::Done;
                } else {
                    self.phase = Phase::EaseOut {
                        ratio,
                        delay: next_delay,
                    };
                    self.next_due += next_delay;
                }
                ratio
            }
            Phase::Done => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancellation::CancellationSource;

    const TICK: Duration = Duration::from_millis(50);

    fn drain(inertia: &mut SwipeInertia, start: Instant) -> Vec<f64> {
        let mut out = Vec::new();
        let mut now = start;
        while let Some(deadline) = inertia.next_deadline() {
            now = now.max(deadline);
            out.extend(inertia.poll(now));
        }
        out
    }

    #[test]
    fn first_delta_is_emitted_immediately() {
        let now = Instant::now();
        let source = CancellationSource::new();
        let mut inertia =
            SwipeInertia::start(0.1, 0.0, SwipeConfig::default(), now, source.token());
        assert_eq!(inertia.poll(now), vec![0.1]);
        assert!(inertia.poll(now).is_empty());
        let second = inertia.poll(now + TICK);
        assert_eq!(second.len(), 1);
        assert!((second[0] - 0.08).abs() < 1e-12);
    }

    #[test]
    fn continuous_sequence_decays_and_stops() {
        let now = Instant::now();
        let source = CancellationSource::new();
        let mut inertia =
            SwipeInertia::start(-0.05, 0.0, SwipeConfig::default(), now, source.token());
        let deltas = drain(&mut inertia, now);

        assert!(deltas.len() > 2);
        for pair in deltas.windows(2) {
            assert!(pair[1].abs() < pair[0].abs());
            assert!(pair[1] < 0.0);
        }
        assert!(deltas.last().unwrap().abs() <= 0.0001);
        assert!(inertia.is_finished());
    }

    #[test]
    fn discrete_sequence_eases_out_with_single_steps() {
        let now = Instant::now();
        let source = CancellationSource::new();
        let step = 0.1;
        let mut inertia =
            SwipeInertia::start(0.5, step, SwipeConfig::default(), now, source.token());
        let deltas = drain(&mut inertia, now);

        let ease_out: Vec<f64> = deltas.iter().copied().skip_while(|d| *d > step).collect();
        // 0.5 decays 0.4, 0.32, 0.256, 0.2048, 0.16384, 0.131072, 0.1048576, 0.0838...
        assert!(ease_out[0] < step);
        // delays 50, 60, 72, 86.4, 103.68, ..., stop before 400ms
        let steps = &ease_out[1..];
        assert!(!steps.is_empty());
        assert!(steps.iter().all(|d| *d == step));
    }

    #[test]
    fn ease_out_delays_grow_until_limit() {
        let now = Instant::now();
        let source = CancellationSource::new();
        let mut inertia =
            SwipeInertia::start(0.1, 0.1, SwipeConfig::default(), now, source.token());
        assert_eq!(inertia.poll(now), vec![0.1]);

        let mut last = now;
        let mut delays = Vec::new();
        while let Some(deadline) = inertia.next_deadline() {
            delays.push(deadline - last);
            last = deadline;
            assert_eq!(inertia.poll(deadline), vec![0.1]);
        }
        assert_eq!(delays[0], TICK);
        for pair in delays.windows(2) {
            assert!(pair[1] > pair[0]);
        }
        assert!(delays.iter().all(|d| *d < Duration::from_millis(400)));
    }

    #[test]
    fn late_poll_catches_up() {
        let now = Instant::now();
        let source = CancellationSource::new();
        let mut inertia =
            SwipeInertia::start(1.0, 0.0, SwipeConfig::default(), now, source.token());
        let burst = inertia.poll(now + TICK * 3);
        assert_eq!(burst.len(), 4);
    }

    #[test]
    fn cancellation_stops_emission() {
        let now = Instant::now();
        let source = CancellationSource::new();
        let mut inertia =
            SwipeInertia::start(0.3, 0.0, SwipeConfig::default(), now, source.token());
        assert_eq!(inertia.poll(now).len(), 1);
        source.cancel();
        assert!(inertia.poll(now + TICK * 10).is_empty());
        assert!(inertia.is_finished());
        assert_eq!(inertia.next_deadline(), None);
    }

    #[test]
    fn zero_ratio_never_emits() {
        let now = Instant::now();
        let source = CancellationSource::new();
        let mut inertia =
            SwipeInertia::start(0.0, 0.1, SwipeConfig::default(), now, source.token());
        assert!(inertia.is_finished());
        assert!(inertia.poll(now).is_empty());
    }
}
