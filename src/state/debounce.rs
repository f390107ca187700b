//! Keystroke debouncing (pure timing logic).
//!
//! The clock is injected: callers pass `now` explicitly, so the debouncer is
//! testable without sleeping and the UI loop can compute its poll timeout
//! from [`Debouncer::deadline`].

use std::time::{Duration, Instant};

/// Default quiet interval before a typed query is propagated.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Last-value-wins debouncer.
///
/// A value is emitted once no newer value has been pushed for `delay`.
/// Pushing replaces any pending value and restarts the interval, so
/// intermediate values are never emitted.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given quiet interval.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Quiet interval.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record a new raw value observed at `now`, superseding any pending one.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            deadline: now + self.delay,
        });
    }

    /// Emit the pending value if its quiet interval has elapsed by `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self.pending.as_ref().is_some_and(|p| now >= p.deadline);
        if due {
            self.pending.take().map(|p| p.value)
        } else {
            None
        }
    }

    /// Emit the pending value immediately, regardless of the interval.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Drop the pending value without emitting it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// When the pending value becomes due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Whether a value is waiting for its interval to elapse.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn nothing_emitted_before_interval() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(500));
        d.push("l", t0);
        assert_eq!(d.poll(t0 + ms(499)), None);
        assert!(d.is_pending());
    }

    #[test]
    fn value_emitted_once_after_interval() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(500));
        d.push("luke", t0);
        assert_eq!(d.poll(t0 + ms(500)), Some("luke"));
        assert_eq!(d.poll(t0 + ms(1500)), None);
    }

    #[test]
    fn newer_value_restarts_interval_and_wins() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(500));
        d.push("l", t0);
        d.push("lu", t0 + ms(300));
        assert_eq!(d.poll(t0 + ms(600)), None, "interval restarted at 300ms");
        assert_eq!(d.poll(t0 + ms(800)), Some("lu"));
    }

    #[test]
    fn cleared_input_emits_empty_string() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(500));
        d.push(String::from("vader"), t0);
        d.push(String::new(), t0 + ms(100));
        assert_eq!(d.poll(t0 + ms(600)), Some(String::new()));
    }

    #[test]
    fn flush_emits_immediately() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(500));
        d.push("leia", t0);
        assert_eq!(d.flush(), Some("leia"));
        assert_eq!(d.poll(t0 + ms(1000)), None);
    }

    #[test]
    fn cancel_drops_pending_value() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(500));
        d.push("han", t0);
        d.cancel();
        assert_eq!(d.deadline(), None);
        assert_eq!(d.poll(t0 + ms(1000)), None);
    }

    #[test]
    fn deadline_tracks_latest_push() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(500));
        assert_eq!(d.deadline(), None);
        d.push(1, t0);
        d.push(2, t0 + ms(50));
        assert_eq!(d.deadline(), Some(t0 + ms(550)));
    }

    #[test]
    fn default_interval_is_half_a_second() {
        let d: Debouncer<String> = Debouncer::default();
        assert_eq!(d.delay(), ms(500));
    }
}
