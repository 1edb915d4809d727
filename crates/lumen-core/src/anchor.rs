#![forbid(unsafe_code)]

//! Smooth scrolling for in-page `#anchor` links.
//!
//! Only links whose `href` starts with `#` take part. A bare `#` or an id
//! that does not resolve leaves the click to the browser.

use core::time::Duration;

use crate::animation::{Animation, Tween, power2_in_out};
use crate::config::AnchorConfig;
use crate::element::{Element, ScrollBehavior, Window};
use crate::event::EventOutcome;

/// Strategy for bringing an anchor target into view.
pub trait ScrollStrategy<W: Window> {
    /// Start scrolling towards `target`.
    fn scroll_to(&mut self, window: &W, target: &W::Element);

    /// Advance a running scroll by `dt`.
    fn tick(&mut self, window: &W, dt: Duration);

    /// Whether a scroll is in progress.
    fn is_active(&self) -> bool;
}

/// Script-driven eased window scroll, stopping `offset_y` above the target
/// so a fixed header does not cover it.
///
/// A new request replaces a running one, starting from wherever the window
/// currently is.
#[derive(Debug, Clone)]
pub struct EasedScroll {
    offset_y: f64,
    duration: Duration,
    tween: Option<Tween>,
}

impl EasedScroll {
    /// Build from anchor settings.
    #[must_use]
    pub fn new(config: &AnchorConfig) -> Self {
        Self {
            offset_y: config.offset_y_px,
            duration: config.duration(),
            tween: None,
        }
    }
}

impl<W: Window> ScrollStrategy<W> for EasedScroll {
    fn scroll_to(&mut self, window: &W, target: &W::Element) {
        let from = window.scroll_y();
        let to = (target.page_top() - self.offset_y).max(0.0);
        tracing::trace!(from, to, "anchor scroll started");
        self.tween = Some(Tween::new(from, to, self.duration).easing(power2_in_out));
    }

    fn tick(&mut self, window: &W, dt: Duration) {
        let Some(tween) = self.tween.as_mut() else {
            return;
        };
        tween.tick(dt);
        window.scroll_to(tween.value());
        if tween.is_complete() {
            self.tween = None;
        }
    }

    fn is_active(&self) -> bool {
        self.tween.is_some()
    }
}

/// Hand the scroll to the browser's native smooth scrolling.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeScroll;

impl<W: Window> ScrollStrategy<W> for NativeScroll {
    fn scroll_to(&mut self, _window: &W, target: &W::Element) {
        target.scroll_into_view(ScrollBehavior::Smooth);
    }

    fn tick(&mut self, _window: &W, _dt: Duration) {}

    fn is_active(&self) -> bool {
        false
    }
}

/// In-page anchor links and the strategy used to follow them.
pub struct AnchorScroll<W: Window> {
    anchors: Vec<W::Element>,
    strategy: Box<dyn ScrollStrategy<W>>,
}

impl<W: Window> core::fmt::Debug for AnchorScroll<W>
where
    W::Element: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AnchorScroll")
            .field("anchors", &self.anchors.len())
            .field("scrolling", &self.strategy.is_active())
            .finish()
    }
}

/// The selector an `href` points at, if it names an in-page target.
#[must_use]
pub fn in_page_target(href: &str) -> Option<&str> {
    if href.starts_with('#') && href.len() > 1 {
        Some(href)
    } else {
        None
    }
}

impl<W: Window> AnchorScroll<W> {
    /// Keep the links whose `href` starts with `#`.
    pub fn mount(anchors: Vec<W::Element>, strategy: Box<dyn ScrollStrategy<W>>) -> Self {
        let anchors: Vec<_> = anchors
            .into_iter()
            .filter(|a| a.attribute("href").is_some_and(|h| h.starts_with('#')))
            .collect();
        tracing::debug!(count = anchors.len(), "anchor links mounted");
        Self { anchors, strategy }
    }

    /// React to a click anywhere on the page.
    pub fn on_click(&mut self, window: &W, target: &W::Element) -> EventOutcome {
        let Some(anchor) = self.anchors.iter().find(|a| a.contains(target)) else {
            return EventOutcome::IGNORED;
        };
        let Some(href) = anchor.attribute("href") else {
            return EventOutcome::IGNORED;
        };
        let Some(selector) = in_page_target(&href) else {
            return EventOutcome::IGNORED;
        };
        let Some(destination) = window.query(selector) else {
            tracing::debug!(selector, "anchor target not found");
            return EventOutcome::IGNORED;
        };
        self.strategy.scroll_to(window, &destination);
        EventOutcome::HANDLED
    }

    /// Advance a running scroll.
    pub fn tick(&mut self, window: &W, dt: Duration) {
        self.strategy.tick(window, dt);
    }

    /// Whether a scroll is in progress.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.strategy.is_active()
    }
}
