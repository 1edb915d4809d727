#![forbid(unsafe_code)]

//! Monotonic time sources.
//!
//! The core never reads wall-clock time on its own. Every controller is
//! handed the current instant by [`Site`](crate::site::Site), which in turn
//! reads it from an injected [`Clock`]. Tests use [`DeterministicClock`] and
//! move time forward explicitly.

use core::time::Duration;

/// A monotonic time source measured from an arbitrary origin.
pub trait Clock {
    /// Time elapsed since the clock's origin.
    fn now(&self) -> Duration;
}

/// [`Clock`] that only moves when told to.
///
/// Drives [`Site`](crate::site::Site) in tests and in hosts that step the
/// page from their own frame loop.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Jump to `now`. Moving backwards is allowed; the site treats it as
    /// a zero-length step.
    pub fn set(&mut self, now: Duration) {
        self.now = now;
    }

    /// Move forward by `dt`, saturating at `Duration::MAX`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}

impl Clock for DeterministicClock {
    fn now(&self) -> Duration {
        self.now
    }
}

/// Shared handle so a test can keep advancing a clock the site owns.
impl<C: Clock> Clock for std::rc::Rc<std::cell::RefCell<C>> {
    fn now(&self) -> Duration {
        self.borrow().now()
    }
}
