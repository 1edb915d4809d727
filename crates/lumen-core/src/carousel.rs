#![forbid(unsafe_code)]

//! Looping review carousel.
//!
//! The track holds the original items followed by one clone of each, so the
//! strip can wrap without a visible jump. [`CarouselNavigator`] keeps the
//! logical index and turns navigation into horizontal scroll requests on the
//! track.
//!
//! Wrapping forward snaps to the start of the clone block (which looks like
//! item 0) and then, after a short correction delay, animates to index 1.
//! Wrapping backward snaps straight to the last original item with no
//! follow-up animation.
//!
//! # Invariants
//!
//! 1. Once any pending correction has fired, `current_index` is in
//!    `[0, item_count)`.
//! 2. Only a forward wrap schedules a timer.

use core::time::Duration;

use crate::config::CarouselConfig;
use crate::element::{Element, ScrollBehavior};
use crate::error::SetupError;
use crate::timer::TimerQueue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CarouselTimer {
    /// Animate from the clone block onto index 1 after a forward wrap.
    ForwardCorrection,
}

/// Index-based navigation over a duplicated strip of items.
#[derive(Debug)]
pub struct CarouselNavigator<E: Element> {
    track: E,
    item_count: usize,
    item_width: f64,
    correction_delay: Duration,
    current: i64,
    timers: TimerQueue<CarouselTimer>,
}

impl<E: Element> CarouselNavigator<E> {
    /// Build a navigator over `track`, cloning its children to form the
    /// wrap-around strip.
    ///
    /// `item_count` is the number of original items; zero is rejected and
    /// nothing is cloned.
    pub fn mount(track: E, item_count: usize, config: &CarouselConfig) -> Result<Self, SetupError> {
        if item_count == 0 {
            return Err(SetupError::EmptyCarousel);
        }
        let item_width = config.item_width_px;
        if !item_width.is_finite() || item_width <= 0.0 {
            return Err(SetupError::InvalidItemWidth(item_width));
        }
        let cloned = track.append_child_clones();
        tracing::debug!(item_count, cloned, item_width, "carousel mounted");
        Ok(Self {
            track,
            item_count,
            item_width,
            correction_delay: config.correction_delay(),
            current: 0,
            timers: TimerQueue::new(),
        })
    }

    fn count(&self) -> i64 {
        self.item_count as i64
    }

    /// Scroll the track so `index` is at the leading edge.
    pub fn scroll_to_index(&self, index: i64, animated: bool) {
        let behavior = if animated {
            ScrollBehavior::Smooth
        } else {
            ScrollBehavior::Instant
        };
        self.track
            .set_scroll_left(index as f64 * self.item_width, behavior);
    }

    /// Move one item forward, wrapping through the clone block.
    pub fn next(&mut self, now: Duration) {
        self.current += 1;
        if self.current >= self.count() {
            tracing::debug!(item_count = self.item_count, "carousel wrapping forward");
            self.scroll_to_index(self.count(), false);
            self.current = 0;
            self.timers
                .schedule(now, self.correction_delay, CarouselTimer::ForwardCorrection);
        } else {
            self.scroll_to_index(self.current, true);
        }
    }

    /// Move one item back, snapping to the last item from the first.
    pub fn previous(&mut self) {
        self.current -= 1;
        if self.current < 0 {
            tracing::debug!(item_count = self.item_count, "carousel wrapping backward");
            self.current = self.count() - 1;
            self.scroll_to_index(self.current, false);
        } else {
            self.scroll_to_index(self.current, true);
        }
    }

    /// Fire the pending wrap correction if it is due.
    pub fn fire_due(&mut self, now: Duration) {
        while let Some((_, timer)) = self.timers.pop_due(now) {
            match timer {
                CarouselTimer::ForwardCorrection => {
                    // A single item has no index 1 to land on.
                    self.current = 1_i64.min(self.count() - 1);
                    self.scroll_to_index(self.current, true);
                }
            }
        }
    }

    /// Logical index of the leading item.
    #[must_use]
    pub const fn current_index(&self) -> i64 {
        self.current
    }

    /// Number of original items.
    #[must_use]
    pub const fn item_count(&self) -> usize {
        self.item_count
    }

    /// Deadline of the pending wrap correction.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }
}
