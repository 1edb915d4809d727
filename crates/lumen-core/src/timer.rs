#![forbid(unsafe_code)]

//! One-shot timer queue driven by host time.
//!
//! Stands in for `setTimeout`: a controller schedules a payload at a
//! deadline and later drains whatever is due. Nothing here sleeps or spawns;
//! the host decides when to call [`TimerQueue::pop_due`].
//!
//! A fired timer reports its own deadline, so its continuation runs at the
//! logical time it was scheduled for even when the host wakes late.
//!
//! # Invariants
//!
//! 1. Timers fire in deadline order.
//! 2. Timers sharing a deadline fire in the order they were scheduled.
//! 3. A timer fires at most once.

use core::time::Duration;

#[derive(Debug, Clone)]
struct Entry<T> {
    deadline: Duration,
    payload: T,
}

/// Pending one-shot timers ordered by deadline.
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    entries: Vec<Entry<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Create an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Schedule `payload` to fire `delay` after `now`.
    pub fn schedule(&mut self, now: Duration, delay: Duration, payload: T) {
        let deadline = now.saturating_add(delay);
        // Insert after every entry with deadline <= ours to keep FIFO ties.
        let at = self.entries.partition_point(|e| e.deadline <= deadline);
        self.entries.insert(at, Entry { deadline, payload });
    }

    /// Remove the earliest timer whose deadline is `<= now`, returning its
    /// deadline and payload.
    pub fn pop_due(&mut self, now: Duration) -> Option<(Duration, T)> {
        match self.entries.first() {
            Some(first) if first.deadline <= now => {
                let entry = self.entries.remove(0);
                Some((entry.deadline, entry.payload))
            }
            _ => None,
        }
    }

    /// Deadline of the earliest pending timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.first().map(|e| e.deadline)
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no timers are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
