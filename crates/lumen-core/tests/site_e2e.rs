//! End-to-end runs of a fully wired page against the headless host.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use lumen_core::headless::{HeadlessElement, HeadlessWindow};
use lumen_core::site::{CarouselParts, DropdownParts, MoreAreasParts, Mounted};
use lumen_core::{
    DeterministicClock, Element, EventOutcome, HostCapabilities, ImageOutcome, Key, PageEvent,
    PageParts, ScrollBehavior, Site, SiteConfig, Window,
};
use pretty_assertions::assert_eq;

type Clock = Rc<RefCell<DeterministicClock>>;

const fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

struct Page {
    window: HeadlessWindow,
    body: HeadlessElement,
    toggle: HeadlessElement,
    links: HeadlessElement,
    about: HeadlessElement,
    trigger: HeadlessElement,
    first_suburb: HeadlessElement,
    more_toggle: HeadlessElement,
    more_list: HeadlessElement,
    track: HeadlessElement,
    prev: HeadlessElement,
    next: HeadlessElement,
    hero: HeadlessElement,
    services: HeadlessElement,
    main: HeadlessElement,
}

fn page(width: f64) -> (Page, PageParts<HeadlessElement>) {
    let window = HeadlessWindow::new(width);
    let body = HeadlessElement::new("body")
        .with_class("preload")
        .with_class("home");

    let header = body.append(HeadlessElement::new("header"));
    let toggle = header.append(HeadlessElement::new("button").with_class("mobile-nav-toggle"));
    let links = header.append(HeadlessElement::new("ul").with_class("nav-links"));
    let about = links.append(HeadlessElement::new("a").with_attribute("href", "#about"));
    let dropdown = links.append(HeadlessElement::new("li").with_class("dropdown"));
    let trigger = dropdown.append(HeadlessElement::new("a").with_attribute("href", "#"));
    let menu = dropdown.append(HeadlessElement::new("ul").with_class("dropdown-menu"));
    let first_suburb = menu.append(HeadlessElement::new("a").with_attribute("href", "/north"));
    let more_toggle = menu.append(HeadlessElement::new("button").with_class("more-areas-toggle"));
    let more_list = menu.append(HeadlessElement::new("ul").with_attribute("id", "more-areas"));

    let hero = body.append(HeadlessElement::new("section").with_geometry(0.0, 800.0));
    let services = body.append(HeadlessElement::new("section").with_geometry(1270.0, 500.0));
    window.register("#services", &services);
    let cta = hero.append(HeadlessElement::new("a").with_attribute("href", "#services"));

    let reviews = body.append(HeadlessElement::new("section"));
    let track = reviews.append(HeadlessElement::new("div").with_class("reviews-track"));
    for _ in 0..5 {
        track.append(HeadlessElement::new("article"));
    }
    let prev = reviews.append(HeadlessElement::new("button"));
    let next = reviews.append(HeadlessElement::new("button"));
    let main = body.append(HeadlessElement::new("main"));

    let mut parts = PageParts::new(body.clone());
    parts.nav_toggle = Some(toggle.clone());
    parts.nav_links = Some(links.clone());
    parts.nav_anchors = vec![about.clone(), trigger.clone(), first_suburb.clone()];
    parts.dropdown = Some(DropdownParts {
        root: dropdown,
        trigger: trigger.clone(),
        menu: Some(menu),
        first_item: Some(first_suburb.clone()),
    });
    parts.more_areas = Some(MoreAreasParts {
        toggle: more_toggle.clone(),
        list: more_list.clone(),
    });
    parts.carousel = Some(CarouselParts {
        track: track.clone(),
        item_count: 5,
        prev: Some(prev.clone()),
        next: Some(next.clone()),
    });
    parts.anchors = vec![about.clone(), trigger.clone(), cta];
    parts.hero = Some(hero.clone());

    let page = Page {
        window,
        body,
        toggle,
        links,
        about,
        trigger,
        first_suburb,
        more_toggle,
        more_list,
        track,
        prev,
        next,
        hero,
        services,
        main,
    };
    (page, parts)
}

fn mount(
    width: f64,
    caps: HostCapabilities,
) -> (Page, Site<HeadlessWindow, Clock>, Clock, String) {
    let (page, parts) = page(width);
    let clock: Clock = Rc::new(RefCell::new(DeterministicClock::new()));
    let (site, request) = Site::mount(
        parts,
        &SiteConfig::default(),
        caps,
        page.window.clone(),
        Rc::clone(&clock),
    );
    (page, site, clock, request.url)
}

fn step(site: &mut Site<HeadlessWindow, Clock>, clock: &Clock, dt: Duration) {
    clock.borrow_mut().advance(dt);
    site.advance();
}

fn click(site: &mut Site<HeadlessWindow, Clock>, target: &HeadlessElement) -> EventOutcome {
    site.dispatch(PageEvent::Click {
        target: target.clone(),
    })
}

#[test]
fn everything_mounts_on_a_full_page() {
    let (_, site, _, url) = mount(1400.0, HostCapabilities::full());
    assert_eq!(
        site.mounted(),
        Mounted {
            nav: true,
            dropdown: true,
            more_areas: true,
            carousel: true,
            anchors: true,
            parallax: true,
        }
    );
    assert!(url.ends_with(".jpg"), "home page uses the home hero");
}

#[test]
fn css_only_host_skips_parallax() {
    let (page, site, _, _) = mount(1400.0, HostCapabilities::css_only());
    assert!(!site.mounted().parallax);
    assert_eq!(page.hero.background_position(), None);
}

#[test]
fn bare_page_mounts_reveal_only() {
    let body = HeadlessElement::new("body").with_class("preload");
    let clock: Clock = Rc::new(RefCell::new(DeterministicClock::new()));
    let (mut site, request) = Site::mount(
        PageParts::new(body.clone()),
        &SiteConfig::default(),
        HostCapabilities::full(),
        HeadlessWindow::new(1024.0),
        Rc::clone(&clock),
    );
    assert_eq!(site.mounted(), Mounted::default());
    assert_eq!(request.url, "alt_hero_image.png");

    let outcome = site.dispatch(PageEvent::Click {
        target: body.clone(),
    });
    assert_eq!(outcome, EventOutcome::IGNORED);

    step(&mut site, &clock, ms(1500));
    assert!(site.reveal().reveal_began_at().is_some());
}

#[test]
fn empty_carousel_does_not_mount() {
    let (page, mut parts) = page(1400.0);
    if let Some(c) = parts.carousel.as_mut() {
        c.item_count = 0;
    }
    let clock: Clock = Rc::new(RefCell::new(DeterministicClock::new()));
    let (site, _) = Site::mount(
        parts,
        &SiteConfig::default(),
        HostCapabilities::full(),
        page.window.clone(),
        clock,
    );
    assert!(!site.mounted().carousel);
    assert!(site.mounted().nav);
    assert_eq!(page.track.children().len(), 5);
}

#[test]
fn instant_image_reveals_after_min_hold_with_fade() {
    let (page, mut site, clock, _) = mount(1400.0, HostCapabilities::full());

    step(&mut site, &clock, ms(50));
    site.image_settled(ImageOutcome::Loaded);
    assert_eq!(site.next_deadline(), Some(ms(200)));

    step(&mut site, &clock, ms(100));
    assert!(site.reveal().reveal_began_at().is_none());

    step(&mut site, &clock, ms(50));
    assert_eq!(site.reveal().reveal_began_at(), Some(ms(200)));
    assert!(site.is_animating());
    assert!(page.body.opacity().is_some());

    for _ in 0..60 {
        step(&mut site, &clock, ms(16));
    }
    assert!(site.is_revealed());
    assert_eq!(page.body.opacity(), None);
    assert!(!page.body.has_class("preload"));
}

#[test]
fn failed_image_reveals_like_loaded() {
    let (page, mut site, clock, _) = mount(1400.0, HostCapabilities::css_only());
    step(&mut site, &clock, ms(300));
    site.image_settled(ImageOutcome::Failed);
    step(&mut site, &clock, Duration::ZERO);
    assert!(site.is_revealed());
    assert!(!page.body.has_class("preload"));
}

#[test]
fn stalled_image_reveals_at_max_wait() {
    let (_, mut site, clock, _) = mount(1400.0, HostCapabilities::css_only());
    step(&mut site, &clock, ms(1499));
    assert!(!site.is_revealed());
    step(&mut site, &clock, ms(1));
    assert!(site.is_revealed());
    assert_eq!(site.reveal().reveal_began_at(), Some(ms(1500)));

    // The late image changes nothing.
    site.image_settled(ImageOutcome::Loaded);
    step(&mut site, &clock, ms(500));
    assert_eq!(site.reveal().reveal_began_at(), Some(ms(1500)));
    assert_eq!(site.next_deadline(), None);
}

#[test]
fn carousel_buttons_drive_navigation() {
    let (page, mut site, clock, _) = mount(1400.0, HostCapabilities::full());

    for _ in 0..5 {
        let _ = click(&mut site, &page.next);
    }
    assert_eq!(
        page.track.scroll_log().last(),
        Some(&(1600.0, ScrollBehavior::Instant))
    );
    step(&mut site, &clock, ms(10));
    assert_eq!(
        page.track.scroll_log().last(),
        Some(&(320.0, ScrollBehavior::Smooth))
    );
    assert_eq!(site.carousel().map(|c| c.current_index()), Some(1));

    let _ = click(&mut site, &page.prev);
    let _ = click(&mut site, &page.prev);
    assert_eq!(site.carousel().map(|c| c.current_index()), Some(4));
    assert_eq!(
        page.track.scroll_log().last(),
        Some(&(1280.0, ScrollBehavior::Instant))
    );
}

#[test]
fn mobile_menu_and_dropdown_cooperate() {
    let (page, mut site, _, _) = mount(800.0, HostCapabilities::full());

    let _ = click(&mut site, &page.toggle);
    assert!(page.links.has_class("active"));

    // Opening the submenu keeps the mobile menu open and suppresses the `#`.
    assert_eq!(click(&mut site, &page.trigger), EventOutcome::HANDLED);
    assert!(page.links.has_class("active"));
    assert_eq!(page.trigger.attribute("aria-expanded").as_deref(), Some("true"));

    // Expanding more areas keeps both open.
    assert_eq!(click(&mut site, &page.more_toggle), EventOutcome::HANDLED);
    assert!(page.more_list.has_class("expanded"));
    assert!(page.links.has_class("active"));
    assert_eq!(page.trigger.attribute("aria-expanded").as_deref(), Some("true"));

    // A suburb link closes the mobile menu but not the dropdown.
    assert_eq!(click(&mut site, &page.first_suburb), EventOutcome::IGNORED);
    assert!(!page.links.has_class("active"));
    assert_eq!(page.toggle.attribute("aria-expanded").as_deref(), Some("false"));

    // Clicking the page body closes the dropdown.
    let _ = click(&mut site, &page.main);
    assert_eq!(page.trigger.attribute("aria-expanded").as_deref(), Some("false"));
}

#[test]
fn keyboard_opens_dropdown() {
    let (page, mut site, _, _) = mount(1400.0, HostCapabilities::full());
    let outcome = site.dispatch(PageEvent::KeyDown {
        target: page.trigger.clone(),
        key: Key::ArrowDown,
    });
    assert_eq!(outcome, EventOutcome::HANDLED);
    assert_eq!(page.first_suburb.focus_count(), 1);

    let _ = site.dispatch(PageEvent::KeyDown {
        target: page.trigger.clone(),
        key: Key::Escape,
    });
    assert_eq!(page.trigger.attribute("aria-expanded").as_deref(), Some("false"));
}

#[test]
fn anchor_click_eases_window_scroll() {
    let (page, mut site, clock, _) = mount(1400.0, HostCapabilities::full());
    let cta = page.hero.children()[0].clone();

    assert_eq!(click(&mut site, &cta), EventOutcome::HANDLED);
    assert!(site.is_animating());
    for _ in 0..70 {
        step(&mut site, &clock, ms(16));
    }
    assert_eq!(page.window.scroll_y(), 1200.0);
    assert!(page.services.scroll_into_view_log().is_empty());
}

#[test]
fn anchor_without_target_is_left_to_browser() {
    let (page, mut site, _, _) = mount(1400.0, HostCapabilities::full());
    assert_eq!(click(&mut site, &page.about), EventOutcome::IGNORED);
    assert!(page.window.scroll_log().is_empty());
}

#[test]
fn anchor_click_without_animation_uses_native_scroll() {
    let (page, mut site, _, _) = mount(1400.0, HostCapabilities::css_only());
    let cta = page.hero.children()[0].clone();
    assert_eq!(click(&mut site, &cta), EventOutcome::HANDLED);
    assert_eq!(
        page.services.scroll_into_view_log(),
        vec![ScrollBehavior::Smooth]
    );
}

#[test]
fn hero_background_follows_scroll() {
    let (page, mut site, clock, _) = mount(1400.0, HostCapabilities::full());
    assert_eq!(page.hero.background_position(), Some((50.0, 50.0)));

    page.window.user_scroll(400.0);
    let _ = site.dispatch(PageEvent::Scroll);
    for _ in 0..400 {
        step(&mut site, &clock, ms(16));
    }
    let (x, y) = page.hero.background_position().unwrap_or_default();
    assert_eq!(x, 50.0);
    assert!((y - 60.0).abs() < 1e-3, "y = {y}");
}

fn settle(site: &mut Site<HeadlessWindow, Clock>, clock: &Clock) {
    step(site, clock, ms(1500));
    for _ in 0..200 {
        if !site.is_animating() {
            break;
        }
        step(site, clock, ms(16));
    }
    assert!(site.is_revealed());
    assert!(!site.is_animating());
}

#[test]
fn anchor_scroll_after_idle_starts_from_the_click() {
    let (page, mut site, clock, _) = mount(1400.0, HostCapabilities::full());
    settle(&mut site, &clock);

    // The frame loop sleeps; nothing calls advance for ten seconds.
    clock.borrow_mut().advance(Duration::from_secs(10));
    let cta = page.hero.children()[0].clone();
    assert_eq!(click(&mut site, &cta), EventOutcome::HANDLED);

    step(&mut site, &clock, ms(16));
    let y = page.window.scroll_y();
    assert!(y > 0.0 && y < 12.0, "first frame should barely move: {y}");
    assert!(site.is_animating());

    for _ in 0..70 {
        step(&mut site, &clock, ms(16));
    }
    assert_eq!(page.window.scroll_y(), 1200.0);
    assert!(page.window.scroll_log().len() > 60);
}

#[test]
fn parallax_after_idle_keeps_its_lag() {
    let (page, mut site, clock, _) = mount(1400.0, HostCapabilities::full());
    settle(&mut site, &clock);

    clock.borrow_mut().advance(Duration::from_secs(10));
    page.window.user_scroll(400.0);
    let _ = site.dispatch(PageEvent::Scroll);

    step(&mut site, &clock, ms(16));
    let (_, y) = page.hero.background_position().unwrap_or_default();
    assert!(y > 50.0 && y < 51.0, "first frame should trail the scroll: {y}");
    assert!(site.is_animating());
}

#[test]
fn fade_woken_late_runs_from_its_deadline() {
    let (page, mut site, clock, _) = mount(1400.0, HostCapabilities::full());
    site.image_settled(ImageOutcome::Loaded);
    assert_eq!(site.next_deadline(), Some(ms(200)));

    // The host wakes only at deadlines, and this one 50ms late.
    clock.borrow_mut().set(ms(250));
    site.advance();
    assert_eq!(site.reveal().reveal_began_at(), Some(ms(200)));
    let opacity = page.body.opacity().unwrap_or(1.0);
    assert!(opacity > 0.0 && opacity < 0.3, "fade covers 50ms only: {opacity}");
    assert!(site.is_animating());
}

#[test]
fn rewound_clock_is_a_zero_step() {
    let (page, mut site, clock, _) = mount(1400.0, HostCapabilities::full());
    page.window.user_scroll(400.0);
    let _ = site.dispatch(PageEvent::Scroll);
    step(&mut site, &clock, ms(100));
    let before = page.hero.background_position();

    clock.borrow_mut().set(ms(50));
    site.advance();
    assert_eq!(page.hero.background_position(), before);
    assert!(site.reveal().reveal_began_at().is_none());
}
