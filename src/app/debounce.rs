//! Search-as-you-type debouncing over non-cancellable host timers.
//!
//! Every edit schedules a fresh timer. Because scheduled timers cannot be
//! withdrawn, the debouncer counts how many are still outstanding and only
//! releases the pending query when the last one fires:
//!
//! ```text
//! touch("j")   → timer A     outstanding = 1
//! touch("jf")  → timer B     outstanding = 2
//! A fires                    outstanding = 1  → nothing
//! B fires                    outstanding = 0  → Some("jf")
//! ```

use std::time::Duration;

/// Default idle delay before an edited query is searched.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Accepted range for a configured delay.
pub const MIN_DEBOUNCE: Duration = Duration::from_millis(300);
pub const MAX_DEBOUNCE: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    outstanding: u32,
    pending: Option<String>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    /// Creates a debouncer; `delay` is clamped to the accepted range.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay: delay.clamp(MIN_DEBOUNCE, MAX_DEBOUNCE),
            outstanding: 0,
            pending: None,
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Records an edit and returns the delay of the timer to schedule.
    pub fn touch(&mut self, query: &str) -> Duration {
        self.outstanding += 1;
        self.pending = Some(query.to_string());
        tracing::trace!(outstanding = self.outstanding, "debounce timer scheduled");
        self.delay
    }

    /// Handles one elapsed timer, returning the settled query if this was the last one.
    pub fn on_timer(&mut self) -> Option<String> {
        self.outstanding = self.outstanding.saturating_sub(1);
        if self.outstanding > 0 {
            return None;
        }
        self.pending.take()
    }

    /// Drops the pending query; outstanding timers will resolve to nothing.
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            tracing::trace!("pending debounced query cancelled");
        }
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
