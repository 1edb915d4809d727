#![forbid(unsafe_code)]

//! Tween primitives for page transitions.
//!
//! Time-based animations advanced by explicit `tick(dt)` calls. Nothing here
//! reads a clock; the [`Site`](crate::site::Site) forwards the delta between
//! two host frames.
//!
//! Easing names follow the conventional web vocabulary: `power2` is a cubic
//! curve, which is what page authors usually mean by "power2.out".

use core::time::Duration;

// ---------------------------------------------------------------------------
// Easing functions
// ---------------------------------------------------------------------------

/// Easing function signature: maps `t` in [0, 1] to output in [0, 1].
pub type EasingFn = fn(f64) -> f64;

/// Identity easing (constant velocity).
#[inline]
pub fn linear(t: f64) -> f64 {
    t.clamp(0.0, 1.0)
}

/// Cubic ease-out (fast start, slow end).
#[inline]
pub fn power2_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Cubic ease-in-out (slow start and end).
#[inline]
pub fn power2_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

// ---------------------------------------------------------------------------
// Animation trait
// ---------------------------------------------------------------------------

/// A time-based animation producing a current value.
pub trait Animation {
    /// Advance the animation by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Current output value.
    fn value(&self) -> f64;
}

// ---------------------------------------------------------------------------
// Tween
// ---------------------------------------------------------------------------

/// Interpolates an `f64` between `from` and `to` over a duration.
///
/// Tracks elapsed time as [`Duration`] for drift-free accumulation. A zero
/// duration completes on the first tick.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    from: f64,
    to: f64,
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl Tween {
    /// Create a tween with linear easing.
    #[must_use]
    pub fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            easing: linear,
        }
    }

    /// Set the easing function (builder).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Raw linear progress (before easing), in [0.0, 1.0].
    #[must_use]
    pub fn progress(&self) -> f64 {
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// End value.
    #[must_use]
    pub const fn target(&self) -> f64 {
        self.to
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f64 {
        if self.is_complete() {
            return self.to;
        }
        self.from + (self.to - self.from) * (self.easing)(self.progress())
    }
}

// ---------------------------------------------------------------------------
// Scrub
// ---------------------------------------------------------------------------

/// Follows a moving target with a fixed lag, for scroll-linked effects.
///
/// Each tick closes `dt / lag` of the remaining gap, so a still target is
/// reached after roughly `lag`. A zero lag tracks the target exactly.
#[derive(Debug, Clone, Copy)]
pub struct Scrub {
    current: f64,
    target: f64,
    lag: Duration,
}

/// Gap below which the follower snaps onto its target.
const SCRUB_EPSILON: f64 = 1e-4;

impl Scrub {
    /// Create a follower resting at `value`.
    #[must_use]
    pub fn new(value: f64, lag: Duration) -> Self {
        Self {
            current: value,
            target: value,
            lag,
        }
    }

    /// Move the target; the value catches up over subsequent ticks.
    pub fn set_target(&mut self, target: f64) {
        self.target = target;
        if self.lag.is_zero() {
            self.current = target;
        }
    }

    /// Current target.
    #[must_use]
    pub const fn target(&self) -> f64 {
        self.target
    }
}

impl Animation for Scrub {
    fn tick(&mut self, dt: Duration) {
        if self.is_complete() {
            return;
        }
        let alpha = if self.lag.is_zero() {
            1.0
        } else {
            (dt.as_secs_f64() / self.lag.as_secs_f64()).min(1.0)
        };
        self.current += (self.target - self.current) * alpha;
        if (self.target - self.current).abs() < SCRUB_EPSILON {
            self.current = self.target;
        }
    }

    fn is_complete(&self) -> bool {
        self.current == self.target
    }

    fn value(&self) -> f64 {
        self.current
    }
}
