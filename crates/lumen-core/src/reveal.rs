#![forbid(unsafe_code)]

//! Preload reveal: keep the page hidden until the hero image is ready.
//!
//! The page starts with a `preload` body class that the stylesheet uses to
//! hide it. [`PreloadReveal`] removes that gate once the hero image settles
//! (loaded *or* failed) or `max_wait` elapses, whichever comes first, but
//! never before `min_hold` has passed since start.
//!
//! # Invariants
//!
//! 1. The reveal transition begins at most once.
//! 2. It never begins earlier than `min_hold` after start.
//! 3. Without any image outcome it begins at `max_wait` after start.
//! 4. An image failure is handled exactly like a success.
//!
//! The visual transition is a [`RevealTransition`] strategy picked at mount
//! time: [`FadeReveal`] when script animation is available, otherwise
//! [`InstantReveal`], which leaves the fade to the stylesheet.

use core::time::Duration;

use crate::animation::{Animation, Tween, power2_out};
use crate::config::PreloadConfig;
use crate::element::Element;
use crate::timer::TimerQueue;

/// Body class that keeps the page hidden.
pub const PRELOAD_CLASS: &str = "preload";

/// Whether the page has been revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealState {
    /// Still gated on the hero image.
    #[default]
    Preloading,
    /// Visible.
    Revealed,
}

/// How the hero image load ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOutcome {
    /// The image decoded.
    Loaded,
    /// The image failed (network error, blocked, bad data).
    Failed,
}

/// Request for the host to start loading an image, fire-and-forget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    /// Image to load.
    pub url: String,
}

/// Strategy for making the hidden page visible.
pub trait RevealTransition<E: Element> {
    /// Begin revealing `body`. Returns `true` if the page is already visible.
    fn begin(&mut self, body: &E) -> bool;

    /// Advance a running transition by `dt`. Returns `true` once finished.
    fn tick(&mut self, body: &E, dt: Duration) -> bool;
}

/// Script-driven opacity fade.
///
/// Holds an inline opacity override while running; on completion the gate
/// class and the override are both removed so the stylesheet owns opacity
/// again.
#[derive(Debug, Clone)]
pub struct FadeReveal {
    duration: Duration,
    tween: Option<Tween>,
}

impl FadeReveal {
    /// Fade over `duration`.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            tween: None,
        }
    }
}

impl<E: Element> RevealTransition<E> for FadeReveal {
    fn begin(&mut self, body: &E) -> bool {
        let tween = Tween::new(0.0, 1.0, self.duration).easing(power2_out);
        body.set_opacity(Some(tween.value()));
        self.tween = Some(tween);
        false
    }

    fn tick(&mut self, body: &E, dt: Duration) -> bool {
        let Some(tween) = self.tween.as_mut() else {
            return true;
        };
        tween.tick(dt);
        if tween.is_complete() {
            self.tween = None;
            body.remove_class(PRELOAD_CLASS);
            body.set_opacity(None);
            return true;
        }
        body.set_opacity(Some(tween.value()));
        false
    }
}

/// Drop the gate class and let the stylesheet transition take over.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantReveal;

impl<E: Element> RevealTransition<E> for InstantReveal {
    fn begin(&mut self, body: &E) -> bool {
        body.remove_class(PRELOAD_CLASS);
        true
    }

    fn tick(&mut self, _body: &E, _dt: Duration) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RevealTimer {
    /// `max_wait` elapsed without an image outcome.
    MaxWait,
    /// The minimum hold is over; run the transition.
    Reveal,
}

/// Gates the page reveal on the hero image.
pub struct PreloadReveal<E: Element> {
    body: E,
    config: PreloadConfig,
    started_at: Duration,
    state: RevealState,
    triggered: bool,
    transitioning: bool,
    reveal_began_at: Option<Duration>,
    transition: Box<dyn RevealTransition<E>>,
    timers: TimerQueue<RevealTimer>,
}

impl<E: Element + core::fmt::Debug> core::fmt::Debug for PreloadReveal<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PreloadReveal")
            .field("body", &self.body)
            .field("state", &self.state)
            .field("triggered", &self.triggered)
            .field("transitioning", &self.transitioning)
            .field("pending_timers", &self.timers.len())
            .finish()
    }
}

impl<E: Element> PreloadReveal<E> {
    /// Start the preload at `now`.
    ///
    /// Returns the controller and the hero image the host should begin
    /// loading. The `max_wait` fallback is armed immediately.
    pub fn start(
        body: E,
        hero_url: &str,
        config: PreloadConfig,
        transition: Box<dyn RevealTransition<E>>,
        now: Duration,
    ) -> (Self, ImageRequest) {
        let mut timers = TimerQueue::new();
        timers.schedule(now, config.max_wait(), RevealTimer::MaxWait);
        tracing::debug!(
            hero_url,
            max_wait_ms = config.max_wait_ms,
            min_hold_ms = config.min_hold_ms,
            "preload started"
        );
        let reveal = Self {
            body,
            config,
            started_at: now,
            state: RevealState::Preloading,
            triggered: false,
            transitioning: false,
            reveal_began_at: None,
            transition,
            timers,
        };
        let request = ImageRequest {
            url: hero_url.to_owned(),
        };
        (reveal, request)
    }

    /// The hero image settled at `now`.
    pub fn image_settled(&mut self, outcome: ImageOutcome, now: Duration) {
        match outcome {
            ImageOutcome::Loaded => tracing::debug!("hero image loaded"),
            ImageOutcome::Failed => tracing::debug!("hero image failed; revealing anyway"),
        }
        self.maybe_reveal(now);
    }

    /// Schedule the reveal, at most once, respecting the minimum hold.
    pub fn maybe_reveal(&mut self, now: Duration) {
        if self.triggered {
            return;
        }
        self.triggered = true;
        let elapsed = now.saturating_sub(self.started_at);
        let remaining = self.config.min_hold().saturating_sub(elapsed);
        tracing::debug!(
            remaining_ms = remaining.as_millis() as u64,
            "reveal scheduled"
        );
        self.timers.schedule(now, remaining, RevealTimer::Reveal);
    }

    /// Begin the reveal transition at `now` unless one already began.
    pub fn reveal(&mut self, now: Duration) {
        if self.state == RevealState::Revealed || self.transitioning {
            return;
        }
        self.reveal_began_at = Some(now);
        if self.transition.begin(&self.body) {
            self.finish();
        } else {
            self.transitioning = true;
        }
    }

    /// Fire every timer due at or before `now`.
    pub fn fire_due(&mut self, now: Duration) {
        while let Some((at, timer)) = self.timers.pop_due(now) {
            match timer {
                RevealTimer::MaxWait => self.maybe_reveal(at),
                RevealTimer::Reveal => self.reveal(at),
            }
        }
    }

    /// Advance a running transition by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        if self.transitioning && self.transition.tick(&self.body, dt) {
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.transitioning = false;
        self.state = RevealState::Revealed;
        tracing::debug!("page revealed");
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> RevealState {
        self.state
    }

    /// Whether the page is fully visible.
    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.state == RevealState::Revealed
    }

    /// When the reveal transition began, if it has.
    #[must_use]
    pub const fn reveal_began_at(&self) -> Option<Duration> {
        self.reveal_began_at
    }

    /// Whether a fade is in progress.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.transitioning
    }

    /// Deadline of the next pending timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }
}
