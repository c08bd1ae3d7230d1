//! Trailing-edge debounce with injected time.
//!
//! The caller feeds every new value with `update` and drives emission with
//! `poll` from its event loop. Time is passed in so tests never sleep.

use std::time::{Duration, Instant};

/// Delay used to gate suggestion lookups while typing.
pub const SUGGESTION_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
    last_emitted: Option<T>,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            last_emitted: None,
        }
    }

    /// Record a new value. A value different from the pending one restarts
    /// the timer; an identical value leaves the timer running.
    pub fn update(&mut self, value: T, now: Instant) {
        match &self.pending {
            Some((pending, _)) if *pending == value => {}
            _ => self.pending = Some((value, now)),
        }
    }

    /// Emit the pending value once it has been stable for the full delay.
    ///
    /// A value equal to the last emitted one settles silently.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let ready = matches!(
            &self.pending,
            Some((_, since)) if now.saturating_duration_since(*since) >= self.delay
        );
        if !ready {
            return None;
        }
        let (value, _) = self.pending.take()?;
        if self.last_emitted.as_ref() == Some(&value) {
            return None;
        }
        self.last_emitted = Some(value.clone());
        Some(value)
    }

    /// Drop any pending value without emitting it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Drop the pending value and forget the last emission, so the next
    /// settled value is emitted even if it repeats an earlier one.
    pub fn reset(&mut self) {
        self.pending = None;
        self.last_emitted = None;
    }
}
