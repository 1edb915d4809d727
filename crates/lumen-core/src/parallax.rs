#![forbid(unsafe_code)]

//! Scroll-linked hero background drift.
//!
//! While the hero scrolls from "top at viewport top" to "bottom at viewport
//! top", its background position moves from `from_y` to `to_y`. The effect
//! trails the scroll position through a [`Scrub`] so fast flicks glide
//! instead of jumping.

use core::time::Duration;

use crate::animation::{Animation, Scrub};
use crate::config::ParallaxConfig;
use crate::element::Element;

/// Progress of `scroll_y` through a section spanning `[top, top + height]`.
#[must_use]
pub fn scroll_progress(scroll_y: f64, top: f64, height: f64) -> f64 {
    if height <= 0.0 {
        return if scroll_y >= top { 1.0 } else { 0.0 };
    }
    ((scroll_y - top) / height).clamp(0.0, 1.0)
}

/// Background drift on the hero section.
#[derive(Debug)]
pub struct HeroParallax<E: Element> {
    hero: E,
    x_percent: f64,
    from_y: f64,
    to_y: f64,
    scrub: Scrub,
}

impl<E: Element> HeroParallax<E> {
    /// Attach to `hero`, settled on the current scroll position.
    pub fn mount(hero: E, scroll_y: f64, config: &ParallaxConfig) -> Self {
        let progress = scroll_progress(scroll_y, hero.page_top(), hero.height());
        let parallax = Self {
            hero,
            x_percent: config.x_percent,
            from_y: config.from_y_percent,
            to_y: config.to_y_percent,
            scrub: Scrub::new(progress, config.scrub()),
        };
        parallax.apply();
        parallax
    }

    fn apply(&self) {
        let y = self.from_y + (self.to_y - self.from_y) * self.scrub.value();
        self.hero.set_background_position(self.x_percent, y);
    }

    /// The window scrolled to `scroll_y`.
    pub fn on_scroll(&mut self, scroll_y: f64) {
        let progress = scroll_progress(scroll_y, self.hero.page_top(), self.hero.height());
        self.scrub.set_target(progress);
        if self.scrub.is_complete() {
            self.apply();
        }
    }

    /// Let the effect catch up by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        if self.scrub.is_complete() {
            return;
        }
        self.scrub.tick(dt);
        self.apply();
    }

    /// Whether the effect is still catching up.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.scrub.is_complete()
    }
}
