#![forbid(unsafe_code)]

//! Trailing-edge debounce for text input.
//!
//! Each [`push`](Debouncer::push) restarts the quiet period. Once it has
//! elapsed, [`poll`](Debouncer::poll) yields the latest value, unless it
//! equals the value delivered last time.

use web_time::{Duration, Instant};

/// Delivers the last pushed value after a quiet period.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
    last_delivered: Option<T>,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    /// Create a debouncer with the given quiet period.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            last_delivered: None,
        }
    }

    /// Record a new value at `now`, replacing any pending one.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// Whether a value is waiting for its quiet period to elapse.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes deliverable.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, due)| *due)
    }

    /// Deliver the pending value if its quiet period has elapsed and it
    /// differs from the previously delivered one.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self.pending.as_ref().is_some_and(|(_, due)| now >= *due);
        if !due {
            return None;
        }
        let (value, _) = self.pending.take()?;
        if self.last_delivered.as_ref() == Some(&value) {
            return None;
        }
        self.last_delivered = Some(value.clone());
        Some(value)
    }

    /// Drop the pending value without delivering it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(50);

    #[test]
    fn delivers_after_quiet_period() {
        let t0 = Instant::now();
        let mut input = Debouncer::new(DELAY);
        input.push("jo".to_string(), t0);
        assert_eq!(input.poll(t0 + Duration::from_millis(49)), None);
        assert_eq!(input.poll(t0 + DELAY), Some("jo".to_string()));
        assert!(!input.is_pending());
    }

    #[test]
    fn typing_restarts_the_quiet_period() {
        let t0 = Instant::now();
        let mut input = Debouncer::new(DELAY);
        input.push("j".to_string(), t0);
        input.push("jo".to_string(), t0 + Duration::from_millis(40));
        assert_eq!(input.poll(t0 + DELAY), None);
        assert_eq!(
            input.poll(t0 + Duration::from_millis(90)),
            Some("jo".to_string())
        );
    }

    #[test]
    fn unchanged_value_is_not_redelivered() {
        let t0 = Instant::now();
        let mut input = Debouncer::new(DELAY);
        input.push(1, t0);
        assert_eq!(input.poll(t0 + DELAY), Some(1));
        input.push(1, t0 + DELAY);
        assert_eq!(input.poll(t0 + DELAY * 2), None);
    }

    #[test]
    fn cancel_drops_pending_value() {
        let t0 = Instant::now();
        let mut input = Debouncer::new(DELAY);
        input.push(7, t0);
        input.cancel();
        assert_eq!(input.next_deadline(), None);
        assert_eq!(input.poll(t0 + DELAY), None);
    }
}
