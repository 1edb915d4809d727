#![forbid(unsafe_code)]

//! Host capability flags.
//!
//! Decided once by the host before mounting. Each feature picks its
//! strategy from these flags at mount time instead of probing at runtime.

use bitflags::bitflags;

bitflags! {
    /// Optional behaviours the host is willing to run.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct HostCapabilities: u8 {
        /// Script-driven tweens (opacity fade, eased scrolling).
        const ANIMATION      = 0b001;
        /// Tweening the window's scroll position.
        const SCROLL_TO      = 0b010;
        /// Scroll-linked effects (parallax).
        const SCROLL_TRIGGER = 0b100;
    }
}

impl HostCapabilities {
    /// Everything enabled.
    #[must_use]
    pub const fn full() -> Self {
        Self::all()
    }

    /// Nothing enabled: stylesheet transitions and native scrolling only.
    #[must_use]
    pub const fn css_only() -> Self {
        Self::empty()
    }

    /// Whether the page reveal should fade in by script.
    #[must_use]
    pub const fn animated_reveal(self) -> bool {
        self.contains(Self::ANIMATION)
    }

    /// Whether anchor clicks should tween the window scroll.
    #[must_use]
    pub const fn animated_scroll(self) -> bool {
        self.contains(Self::ANIMATION.union(Self::SCROLL_TO))
    }

    /// Whether scroll-linked decoration is allowed.
    #[must_use]
    pub const fn scroll_linked(self) -> bool {
        self.contains(Self::ANIMATION.union(Self::SCROLL_TRIGGER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_only_disables_everything() {
        let caps = HostCapabilities::css_only();
        assert!(!caps.animated_reveal());
        assert!(!caps.animated_scroll());
        assert!(!caps.scroll_linked());
    }

    #[test]
    fn scroll_plugins_need_animation() {
        let caps = HostCapabilities::SCROLL_TO | HostCapabilities::SCROLL_TRIGGER;
        assert!(!caps.animated_scroll());
        assert!(!caps.scroll_linked());

        let caps = caps | HostCapabilities::ANIMATION;
        assert!(caps.animated_scroll());
        assert!(caps.scroll_linked());
    }

    #[test]
    fn animation_alone_only_fades() {
        let caps = HostCapabilities::ANIMATION;
        assert!(caps.animated_reveal());
        assert!(!caps.animated_scroll());
        assert!(!caps.scroll_linked());
    }
}
