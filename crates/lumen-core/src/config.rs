#![forbid(unsafe_code)]

//! Site configuration.
//!
//! [`SiteConfig::default`] reproduces the constants the page shipped with.
//! With the `serde` feature the host may override any subset of fields from
//! a JSON document; omitted fields keep their defaults. Durations travel as
//! integer milliseconds.

use core::time::Duration;

use crate::error::ConfigError;

/// Hero image selection.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct HeroConfig {
    /// Hero shown on the home page.
    pub home_url: String,
    /// Hero shown everywhere else.
    pub alt_url: String,
    /// Body class marking the home page.
    pub home_class: String,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            home_url: "https://i.postimg.cc/kXjd4WYB/Pro-Clean-One-Backgroun.jpg".to_owned(),
            alt_url: "alt_hero_image.png".to_owned(),
            home_class: "home".to_owned(),
        }
    }
}

/// Preload reveal timing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct PreloadConfig {
    /// Never wait longer than this before revealing.
    pub max_wait_ms: u64,
    /// Never reveal sooner than this after start.
    pub min_hold_ms: u64,
    /// Length of the opacity fade.
    pub fade_ms: u64,
}

impl Default for PreloadConfig {
    fn default() -> Self {
        Self {
            max_wait_ms: 1500,
            min_hold_ms: 200,
            fade_ms: 800,
        }
    }
}

impl PreloadConfig {
    /// Upper bound on the preload hold.
    #[must_use]
    pub const fn max_wait(&self) -> Duration {
        Duration::from_millis(self.max_wait_ms)
    }

    /// Lower bound on the preload hold.
    #[must_use]
    pub const fn min_hold(&self) -> Duration {
        Duration::from_millis(self.min_hold_ms)
    }

    /// Fade length.
    #[must_use]
    pub const fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }
}

/// Mobile navigation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct NavConfig {
    /// Viewport width at or below which the menu is collapsible. Must match
    /// the stylesheet's nav breakpoint.
    pub collapse_breakpoint_px: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            collapse_breakpoint_px: 1200.0,
        }
    }
}

/// Review carousel geometry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct CarouselConfig {
    /// Width of one item including the gap after it.
    pub item_width_px: f64,
    /// Pause between the wrap snap and the forward animation.
    pub correction_delay_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            item_width_px: 320.0,
            correction_delay_ms: 10,
        }
    }
}

impl CarouselConfig {
    /// Wrap correction delay.
    #[must_use]
    pub const fn correction_delay(&self) -> Duration {
        Duration::from_millis(self.correction_delay_ms)
    }
}

/// In-page anchor scrolling.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct AnchorConfig {
    /// Space left above the target, for the fixed header.
    pub offset_y_px: f64,
    /// Length of the eased scroll.
    pub duration_ms: u64,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            offset_y_px: 70.0,
            duration_ms: 1000,
        }
    }
}

impl AnchorConfig {
    /// Scroll length.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Hero background parallax.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct ParallaxConfig {
    /// Horizontal background position, held constant.
    pub x_percent: f64,
    /// Vertical background position with the hero at the top of the viewport.
    pub from_y_percent: f64,
    /// Vertical background position once the hero has scrolled out.
    pub to_y_percent: f64,
    /// How far the effect lags behind the scroll position.
    pub scrub_ms: u64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            x_percent: 50.0,
            from_y_percent: 50.0,
            to_y_percent: 70.0,
            scrub_ms: 500,
        }
    }
}

impl ParallaxConfig {
    /// Scrub lag.
    #[must_use]
    pub const fn scrub(&self) -> Duration {
        Duration::from_millis(self.scrub_ms)
    }
}

/// Labels for the "more areas" toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct MoreAreasConfig {
    /// Label while the extra list is collapsed.
    pub more_label: String,
    /// Label while the extra list is expanded.
    pub fewer_label: String,
}

impl Default for MoreAreasConfig {
    fn default() -> Self {
        Self {
            more_label: "More areas".to_owned(),
            fewer_label: "Fewer areas".to_owned(),
        }
    }
}

/// Everything the page behaviours read at mount time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct SiteConfig {
    /// Hero image selection.
    pub hero: HeroConfig,
    /// Reveal timing.
    pub preload: PreloadConfig,
    /// Mobile nav.
    pub nav: NavConfig,
    /// Reviews carousel.
    pub carousel: CarouselConfig,
    /// Anchor scrolling.
    pub anchor: AnchorConfig,
    /// Hero parallax.
    pub parallax: ParallaxConfig,
    /// "More areas" labels.
    pub more_areas: MoreAreasConfig,
    /// Console log level: `trace`, `debug`, `info`, `warn` or `error`.
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            hero: HeroConfig::default(),
            preload: PreloadConfig::default(),
            nav: NavConfig::default(),
            carousel: CarouselConfig::default(),
            anchor: AnchorConfig::default(),
            parallax: ParallaxConfig::default(),
            more_areas: MoreAreasConfig::default(),
            log_level: "info".to_owned(),
        }
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl SiteConfig {
    /// Parse a JSON options document and validate it.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no behaviour can work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = self.carousel.item_width_px;
        if !w.is_finite() || w <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "carousel.item_width_px",
                reason: "must be a positive number",
            });
        }
        let bp = self.nav.collapse_breakpoint_px;
        if !bp.is_finite() || bp < 0.0 {
            return Err(ConfigError::Invalid {
                field: "nav.collapse_breakpoint_px",
                reason: "must be a non-negative number",
            });
        }
        if !self.anchor.offset_y_px.is_finite() {
            return Err(ConfigError::Invalid {
                field: "anchor.offset_y_px",
                reason: "must be finite",
            });
        }
        let p = &self.parallax;
        if ![p.x_percent, p.from_y_percent, p.to_y_percent]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(ConfigError::Invalid {
                field: "parallax",
                reason: "positions must be finite",
            });
        }
        if self.hero.home_url.is_empty() || self.hero.alt_url.is_empty() {
            return Err(ConfigError::Invalid {
                field: "hero",
                reason: "image urls must not be empty",
            });
        }
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::Invalid {
                field: "log_level",
                reason: "expected trace, debug, info, warn or error",
            });
        }
        Ok(())
    }

    /// Hero url for a page whose body does or does not carry the home class.
    #[must_use]
    pub fn hero_url(&self, is_home: bool) -> &str {
        if is_home {
            &self.hero.home_url
        } else {
            &self.hero.alt_url
        }
    }
}
