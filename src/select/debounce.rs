//! Single-slot cancellable delay for the search key.
//!
//! Time is passed in by the caller (milliseconds from any monotonic clock),
//! so the debouncer works the same under a browser timer, a native event
//! loop or a test. Scheduling while a value is pending replaces it and
//! restarts the delay; at most one value is ever outstanding.

use log::trace;

/// Delay between the last keystroke and the filter update.
pub const DEFAULT_SEARCH_DELAY_MS: f64 = 200.0;

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay_ms: f64,
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    due_ms: f64,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DELAY_MS)
    }
}

impl<T> Debouncer<T> {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms: if delay_ms.is_finite() { delay_ms.max(0.0) } else { 0.0 },
            pending: None,
        }
    }

    pub fn delay_ms(&self) -> f64 {
        self.delay_ms
    }

    /// Cancel any pending value and start the delay for `value`.
    pub fn schedule(&mut self, value: T, now_ms: f64) {
        let due_ms = now_ms + self.delay_ms;
        if self.pending.is_some() {
            trace!("debounce: restart, due at {due_ms:.0}ms");
        }
        self.pending = Some(Pending { value, due_ms });
    }

    /// Take the pending value if its delay has elapsed at `now_ms`.
    pub fn poll(&mut self, now_ms: f64) -> Option<T> {
        match &self.pending {
            Some(p) if now_ms >= p.due_ms => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Take the pending value immediately.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Drop the pending value. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes due.
    pub fn deadline(&self) -> Option<f64> {
        self.pending.as_ref().map(|p| p.due_ms)
    }
}
