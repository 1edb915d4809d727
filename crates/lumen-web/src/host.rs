#![forbid(unsafe_code)]

//! Target-independent pieces of the browser host.

use core::time::Duration;

use lumen_core::{Clock, ConfigError, HostCapabilities, SiteConfig};
use tracing::level_filters::LevelFilter;
use web_time::Instant;

/// Page markup the host looks for.
pub mod selectors {
    pub const NAV_TOGGLE: &str = ".mobile-nav-toggle";
    pub const NAV_LINKS: &str = ".nav-links";
    pub const NAV_ANCHORS: &str = ".nav-links a";
    pub const DROPDOWN: &str = ".nav-links .dropdown";
    /// Relative to the dropdown root.
    pub const DROPDOWN_TRIGGER: &str = "a";
    /// Relative to the dropdown root.
    pub const DROPDOWN_MENU: &str = ".dropdown-menu";
    /// Relative to the dropdown menu.
    pub const DROPDOWN_FIRST_ITEM: &str = "a";
    pub const MORE_AREAS_TOGGLE: &str = ".more-areas-toggle";
    pub const MORE_AREAS_LIST: &str = ".more-areas-list";
    pub const CAROUSEL_TRACK: &str = ".reviews-track";
    pub const CAROUSEL_PREV: &str = ".reviews-prev";
    pub const CAROUSEL_NEXT: &str = ".reviews-next";
    pub const IN_PAGE_ANCHORS: &str = "a[href^=\"#\"]";
    pub const HERO: &str = ".hero";
    pub const REDUCED_MOTION: &str = "(prefers-reduced-motion: reduce)";
}

/// Monotonic clock measured from page boot.
#[derive(Debug, Clone, Copy)]
pub struct WebClock {
    origin: Instant,
}

impl WebClock {
    /// Start counting from now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for WebClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WebClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Capabilities for a browser honouring the user's motion preference.
#[must_use]
pub fn capabilities_for(reduced_motion: bool) -> HostCapabilities {
    if reduced_motion {
        HostCapabilities::css_only()
    } else {
        HostCapabilities::full()
    }
}

/// Parse the JSON form of the boot options. Absent or `null` options mean
/// defaults.
pub fn parse_options(json: Option<&str>) -> Result<SiteConfig, ConfigError> {
    match json.map(str::trim) {
        None | Some("" | "null" | "undefined") => Ok(SiteConfig::default()),
        Some(json) => SiteConfig::from_json(json),
    }
}

/// Console filter for a validated level name.
#[must_use]
pub fn level_filter(level: &str) -> LevelFilter {
    level.parse().unwrap_or(LevelFilter::INFO)
}
