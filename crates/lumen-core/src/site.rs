#![forbid(unsafe_code)]

//! Host-driven page runner.
//!
//! [`Site`] owns every mounted behaviour plus the injected window and clock.
//! The host drives it:
//!
//! 1. [`Site::mount`] once the document is ready; start loading the returned
//!    hero image.
//! 2. Report the image outcome via [`Site::image_settled`].
//! 3. Forward clicks, key presses and scrolls via [`Site::dispatch`] and
//!    honour the returned [`EventOutcome`].
//! 4. Call [`Site::advance`] every frame (or at [`Site::next_deadline`]) to
//!    fire timers and step animations.
//!
//! Each behaviour mounts independently: a missing part disables only the
//! behaviour that needs it.

use core::time::Duration;

use crate::anchor::{AnchorScroll, EasedScroll, NativeScroll, ScrollStrategy};
use crate::capabilities::HostCapabilities;
use crate::carousel::CarouselNavigator;
use crate::clock::Clock;
use crate::config::SiteConfig;
use crate::dropdown::Dropdown;
use crate::element::{Element, Window};
use crate::event::{EventOutcome, PageEvent};
use crate::more_areas::MoreAreas;
use crate::nav::MobileNav;
use crate::parallax::HeroParallax;
use crate::reveal::{
    FadeReveal, ImageOutcome, ImageRequest, InstantReveal, PreloadReveal, RevealTransition,
};

/// Dropdown handles.
#[derive(Debug, Clone)]
pub struct DropdownParts<E> {
    /// The `.dropdown` item.
    pub root: E,
    /// Its first link, which opens the menu.
    pub trigger: E,
    /// The `.dropdown-menu` list.
    pub menu: Option<E>,
    /// First link inside the menu.
    pub first_item: Option<E>,
}

/// "More areas" handles.
#[derive(Debug, Clone)]
pub struct MoreAreasParts<E> {
    /// Button that expands the list.
    pub toggle: E,
    /// The extra areas list.
    pub list: E,
}

/// Carousel handles.
#[derive(Debug, Clone)]
pub struct CarouselParts<E> {
    /// Horizontally scrolling container of review cards.
    pub track: E,
    /// Number of original review cards.
    pub item_count: usize,
    /// "Previous" control.
    pub prev: Option<E>,
    /// "Next" control.
    pub next: Option<E>,
}

/// Everything the host found on the page.
#[derive(Debug, Clone)]
pub struct PageParts<E> {
    /// The `<body>`, gated by the `preload` class.
    pub body: E,
    /// Hamburger button.
    pub nav_toggle: Option<E>,
    /// Container the hamburger opens.
    pub nav_links: Option<E>,
    /// Links inside `nav_links`.
    pub nav_anchors: Vec<E>,
    /// Service-areas dropdown.
    pub dropdown: Option<DropdownParts<E>>,
    /// Extra areas toggle and list.
    pub more_areas: Option<MoreAreasParts<E>>,
    /// Reviews track and controls.
    pub carousel: Option<CarouselParts<E>>,
    /// Every link on the page whose `href` starts with `#`.
    pub anchors: Vec<E>,
    /// Section carrying the parallax background.
    pub hero: Option<E>,
}

impl<E> PageParts<E> {
    /// A page with a body and nothing else.
    #[must_use]
    pub fn new(body: E) -> Self {
        Self {
            body,
            nav_toggle: None,
            nav_links: None,
            nav_anchors: Vec::new(),
            dropdown: None,
            more_areas: None,
            carousel: None,
            anchors: Vec::new(),
            hero: None,
        }
    }
}

struct Carousel<E: Element> {
    navigator: CarouselNavigator<E>,
    prev: Option<E>,
    next: Option<E>,
}

/// Which behaviours mounted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mounted {
    /// Mobile nav toggle.
    pub nav: bool,
    /// Service-areas dropdown.
    pub dropdown: bool,
    /// "More areas" toggle.
    pub more_areas: bool,
    /// Reviews carousel.
    pub carousel: bool,
    /// In-page anchor scrolling.
    pub anchors: bool,
    /// Hero parallax.
    pub parallax: bool,
}

/// All page behaviours, driven by the host.
pub struct Site<W: Window, C: Clock> {
    window: W,
    clock: C,
    last_now: Duration,
    reveal: PreloadReveal<W::Element>,
    nav: Option<MobileNav<W::Element>>,
    dropdown: Option<Dropdown<W::Element>>,
    more_areas: Option<MoreAreas<W::Element>>,
    carousel: Option<Carousel<W::Element>>,
    anchors: Option<AnchorScroll<W>>,
    parallax: Option<HeroParallax<W::Element>>,
}

impl<W: Window, C: Clock> core::fmt::Debug for Site<W, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Site")
            .field("last_now", &self.last_now)
            .field("revealed", &self.reveal.is_revealed())
            .field("mounted", &self.mounted())
            .finish()
    }
}

impl<W: Window, C: Clock> Site<W, C> {
    /// Mount every behaviour whose parts are present.
    ///
    /// Strategies are fixed here from `caps`. Returns the hero image the
    /// host should start loading.
    pub fn mount(
        parts: PageParts<W::Element>,
        config: &SiteConfig,
        caps: HostCapabilities,
        window: W,
        clock: C,
    ) -> (Self, ImageRequest) {
        let now = clock.now();

        let is_home = parts.body.has_class(&config.hero.home_class);
        let transition: Box<dyn RevealTransition<W::Element>> = if caps.animated_reveal() {
            Box::new(FadeReveal::new(config.preload.fade()))
        } else {
            Box::new(InstantReveal)
        };
        let (reveal, request) = PreloadReveal::start(
            parts.body,
            config.hero_url(is_home),
            config.preload.clone(),
            transition,
            now,
        );

        let nav = match (parts.nav_toggle, parts.nav_links) {
            (Some(toggle), Some(links)) => Some(MobileNav::mount(
                toggle,
                links,
                parts.nav_anchors,
                parts.dropdown.as_ref().map(|d| d.root.clone()),
                parts.dropdown.as_ref().and_then(|d| d.menu.clone()),
                &config.nav,
            )),
            _ => None,
        };

        let dropdown = parts
            .dropdown
            .map(|d| Dropdown::mount(d.root, d.trigger, d.first_item));

        let more_areas = parts
            .more_areas
            .map(|m| MoreAreas::mount(m.toggle, m.list, &config.more_areas));

        let carousel = parts.carousel.and_then(|c| {
            match CarouselNavigator::mount(c.track, c.item_count, &config.carousel) {
                Ok(navigator) => Some(Carousel {
                    navigator,
                    prev: c.prev,
                    next: c.next,
                }),
                Err(err) => {
                    tracing::warn!(error = %err, "carousel disabled");
                    None
                }
            }
        });

        let anchors = if parts.anchors.is_empty() {
            None
        } else {
            let strategy: Box<dyn ScrollStrategy<W>> = if caps.animated_scroll() {
                Box::new(EasedScroll::new(&config.anchor))
            } else {
                Box::new(NativeScroll)
            };
            Some(AnchorScroll::mount(parts.anchors, strategy))
        };

        let parallax = match parts.hero {
            Some(hero) if caps.scroll_linked() => Some(HeroParallax::mount(
                hero,
                window.scroll_y(),
                &config.parallax,
            )),
            _ => None,
        };

        let site = Self {
            window,
            clock,
            last_now: now,
            reveal,
            nav,
            dropdown,
            more_areas,
            carousel,
            anchors,
            parallax,
        };
        let mounted = site.mounted();
        tracing::info!(
            nav = mounted.nav,
            dropdown = mounted.dropdown,
            more_areas = mounted.more_areas,
            carousel = mounted.carousel,
            anchors = mounted.anchors,
            parallax = mounted.parallax,
            "site mounted"
        );
        (site, request)
    }

    /// Which behaviours are active.
    #[must_use]
    pub fn mounted(&self) -> Mounted {
        Mounted {
            nav: self.nav.is_some(),
            dropdown: self.dropdown.is_some(),
            more_areas: self.more_areas.is_some(),
            carousel: self.carousel.is_some(),
            anchors: self.anchors.is_some(),
            parallax: self.parallax.is_some(),
        }
    }

    /// The hero image settled.
    pub fn image_settled(&mut self, outcome: ImageOutcome) {
        let now = self.clock.now();
        self.reveal.image_settled(outcome, now);
    }

    /// Route one page event to every behaviour that listens for it.
    ///
    /// Tweens started here run from the event's time, not from the last
    /// [`Site::advance`].
    pub fn dispatch(&mut self, event: PageEvent<W::Element>) -> EventOutcome {
        if !self.is_animating() {
            self.last_now = self.clock.now();
        }
        match event {
            PageEvent::Click { target } => self.on_click(&target),
            PageEvent::KeyDown { target, key } => {
                tracing::trace!(?key, "keydown");
                self.dropdown
                    .as_ref()
                    .map_or(EventOutcome::IGNORED, |d| d.on_key(&target, &key))
            }
            PageEvent::Scroll => {
                if let Some(parallax) = self.parallax.as_mut() {
                    parallax.on_scroll(self.window.scroll_y());
                }
                EventOutcome::IGNORED
            }
        }
    }

    fn on_click(&mut self, target: &W::Element) -> EventOutcome {
        let mut outcome = EventOutcome::IGNORED;
        if let Some(nav) = &self.nav {
            outcome = outcome.merge(nav.on_click(target, self.window.inner_width()));
        }
        if let Some(dropdown) = &self.dropdown {
            outcome = outcome.merge(dropdown.on_click(target));
        }
        if let Some(more) = &self.more_areas {
            outcome = outcome.merge(more.on_click(target));
        }
        if let Some(anchors) = self.anchors.as_mut() {
            outcome = outcome.merge(anchors.on_click(&self.window, target));
        }
        if let Some(carousel) = self.carousel.as_mut() {
            let now = self.clock.now();
            if carousel.prev.as_ref().is_some_and(|b| b.contains(target)) {
                carousel.navigator.previous();
            } else if carousel.next.as_ref().is_some_and(|b| b.contains(target)) {
                carousel.navigator.next(now);
            }
        }
        outcome
    }

    /// Fire due timers and step running animations up to the clock's now.
    pub fn advance(&mut self) {
        let now = self.clock.now();
        let dt = now.saturating_sub(self.last_now);
        self.last_now = now;

        let fading = self.reveal.is_animating();
        self.reveal.fire_due(now);
        if let Some(carousel) = self.carousel.as_mut() {
            carousel.navigator.fire_due(now);
        }

        // A fade begun by a timer in this call runs from the timer's deadline.
        let fade_dt = match self.reveal.reveal_began_at() {
            Some(began) if !fading => now.saturating_sub(began),
            _ => dt,
        };
        self.reveal.tick(fade_dt);
        if let Some(anchors) = self.anchors.as_mut() {
            anchors.tick(&self.window, dt);
        }
        if let Some(parallax) = self.parallax.as_mut() {
            parallax.tick(dt);
        }
    }

    /// Earliest pending timer across all behaviours.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        let carousel = self
            .carousel
            .as_ref()
            .and_then(|c| c.navigator.next_deadline());
        match (self.reveal.next_deadline(), carousel) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Whether any animation wants another frame.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.reveal.is_animating()
            || self.anchors.as_ref().is_some_and(AnchorScroll::is_animating)
            || self.parallax.as_ref().is_some_and(HeroParallax::is_animating)
    }

    /// Whether the page is fully visible.
    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.reveal.is_revealed()
    }

    /// The preload controller.
    #[must_use]
    pub const fn reveal(&self) -> &PreloadReveal<W::Element> {
        &self.reveal
    }

    /// The carousel navigator, if mounted.
    #[must_use]
    pub fn carousel(&self) -> Option<&CarouselNavigator<W::Element>> {
        self.carousel.as_ref().map(|c| &c.navigator)
    }

    /// The injected window.
    #[must_use]
    pub const fn window(&self) -> &W {
        &self.window
    }
}
