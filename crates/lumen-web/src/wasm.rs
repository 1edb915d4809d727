#![forbid(unsafe_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use lumen_core::site::{CarouselParts, DropdownParts, MoreAreasParts};
use lumen_core::{EventOutcome, ImageOutcome, Key, PageEvent, PageParts, Site, Window};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlImageElement, KeyboardEvent};

use crate::console;
use crate::dom::{DomElement, DomWindow};
use crate::host::{self, WebClock, selectors};

type SharedSite = Rc<RefCell<Site<DomWindow, WebClock>>>;

/// Mount every page behaviour on the current document.
///
/// `options` is an optional plain object in the shape of `SiteConfig`;
/// omitted fields keep their defaults. Rejects on invalid options or a
/// host without `window`/`document`/`body`.
#[wasm_bindgen]
pub fn boot(options: Option<JsValue>) -> Result<(), JsValue> {
    let json = match options {
        Some(value) if !value.is_null() && !value.is_undefined() => {
            Some(String::from(js_sys::JSON::stringify(&value)?))
        }
        _ => None,
    };
    let config =
        host::parse_options(json.as_deref()).map_err(|err| JsValue::from_str(&err.to_string()))?;
    console::install(host::level_filter(&config.log_level));

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no document body"))?;
    let dom = DomWindow::new(window, document);

    let caps = host::capabilities_for(dom.media_matches(selectors::REDUCED_MOTION));
    tracing::debug!(?caps, "host capabilities");

    let parts = collect_parts(&dom, DomElement::new(body.into()));
    let (site, request) = Site::mount(parts, &config, caps, dom.clone(), WebClock::new());
    let site: SharedSite = Rc::new(RefCell::new(site));

    let frames = FrameLoop::new(dom.window().clone(), Rc::clone(&site));
    load_hero(&request.url, &site, &frames)?;
    listen(&dom, &site, &frames)?;
    frames.kick();
    Ok(())
}

fn collect_parts(dom: &DomWindow, body: DomElement) -> PageParts<DomElement> {
    let mut parts = PageParts::new(body);
    parts.nav_toggle = dom.query(selectors::NAV_TOGGLE);
    parts.nav_links = dom.query(selectors::NAV_LINKS);
    parts.nav_anchors = dom.query_all(selectors::NAV_ANCHORS);
    parts.dropdown = dom.query(selectors::DROPDOWN).and_then(|root| {
        let trigger = root.query(selectors::DROPDOWN_TRIGGER)?;
        let menu = root.query(selectors::DROPDOWN_MENU);
        let first_item = menu
            .as_ref()
            .and_then(|m| m.query(selectors::DROPDOWN_FIRST_ITEM));
        Some(DropdownParts {
            root,
            trigger,
            menu,
            first_item,
        })
    });
    parts.more_areas = match (
        dom.query(selectors::MORE_AREAS_TOGGLE),
        dom.query(selectors::MORE_AREAS_LIST),
    ) {
        (Some(toggle), Some(list)) => Some(MoreAreasParts { toggle, list }),
        _ => None,
    };
    parts.carousel = dom.query(selectors::CAROUSEL_TRACK).map(|track| CarouselParts {
        item_count: track.child_count(),
        track,
        prev: dom.query(selectors::CAROUSEL_PREV),
        next: dom.query(selectors::CAROUSEL_NEXT),
    });
    parts.anchors = dom.query_all(selectors::IN_PAGE_ANCHORS);
    parts.hero = dom.query(selectors::HERO);
    parts
}

/// `requestAnimationFrame` driver that runs while the site has pending
/// timers or animations and sleeps otherwise.
#[derive(Clone)]
struct FrameLoop {
    inner: Rc<FrameInner>,
}

struct FrameInner {
    window: web_sys::Window,
    site: SharedSite,
    scheduled: Cell<bool>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl FrameLoop {
    fn new(window: web_sys::Window, site: SharedSite) -> Self {
        let inner = Rc::new(FrameInner {
            window,
            site,
            scheduled: Cell::new(false),
            callback: RefCell::new(None),
        });
        let weak = Rc::downgrade(&inner);
        let callback = Closure::wrap(Box::new(move |_timestamp: f64| {
            if let Some(inner) = weak.upgrade() {
                FrameLoop { inner }.on_frame();
            }
        }) as Box<dyn FnMut(f64)>);
        *inner.callback.borrow_mut() = Some(callback);
        Self { inner }
    }

    /// Make sure a frame is queued.
    fn kick(&self) {
        if self.inner.scheduled.replace(true) {
            return;
        }
        let requested = self.inner.callback.borrow().as_ref().map(|cb| {
            self.inner
                .window
                .request_animation_frame(cb.as_ref().unchecked_ref())
        });
        if let Some(Err(err)) = requested {
            self.inner.scheduled.set(false);
            tracing::warn!(error = ?err, "requestAnimationFrame failed");
        }
    }

    fn on_frame(&self) {
        self.inner.scheduled.set(false);
        let busy = match self.inner.site.try_borrow_mut() {
            Ok(mut site) => {
                site.advance();
                site.is_animating() || site.next_deadline().is_some()
            }
            Err(_) => true,
        };
        if busy {
            self.kick();
        }
    }
}

fn dispatch(site: &SharedSite, frames: &FrameLoop, event: PageEvent<DomElement>) -> EventOutcome {
    let outcome = match site.try_borrow_mut() {
        Ok(mut site) => site.dispatch(event),
        Err(_) => {
            tracing::warn!("event dropped while the site was busy");
            EventOutcome::IGNORED
        }
    };
    frames.kick();
    outcome
}

fn load_hero(url: &str, site: &SharedSite, frames: &FrameLoop) -> Result<(), JsValue> {
    let image = HtmlImageElement::new()?;
    let settle = |outcome: ImageOutcome| {
        let site = Rc::clone(site);
        let frames = frames.clone();
        Closure::wrap(Box::new(move || {
            if let Ok(mut site) = site.try_borrow_mut() {
                site.image_settled(outcome);
            }
            frames.kick();
        }) as Box<dyn FnMut()>)
    };
    let on_load = settle(ImageOutcome::Loaded);
    let on_error = settle(ImageOutcome::Failed);
    image.set_onload(Some(on_load.as_ref().unchecked_ref()));
    image.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    on_load.forget();
    on_error.forget();
    image.set_src(url);
    Ok(())
}

fn listen(dom: &DomWindow, site: &SharedSite, frames: &FrameLoop) -> Result<(), JsValue> {
    let click_site = Rc::clone(site);
    let click_frames = frames.clone();
    let click_cb = Closure::wrap(Box::new(move |event: Event| {
        let Some(target) = DomElement::from_target(event.target()) else {
            return;
        };
        let outcome = dispatch(&click_site, &click_frames, PageEvent::Click { target });
        if outcome.prevent_default {
            event.prevent_default();
        }
    }) as Box<dyn FnMut(_)>);
    dom.document()
        .add_event_listener_with_callback("click", click_cb.as_ref().unchecked_ref())?;
    click_cb.forget();

    let key_site = Rc::clone(site);
    let key_frames = frames.clone();
    let key_cb = Closure::wrap(Box::new(move |event: Event| {
        let Some(keyboard) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let Some(target) = DomElement::from_target(event.target()) else {
            return;
        };
        let key = Key::from_dom(&keyboard.key());
        let outcome = dispatch(&key_site, &key_frames, PageEvent::KeyDown { target, key });
        if outcome.prevent_default {
            event.prevent_default();
        }
    }) as Box<dyn FnMut(_)>);
    dom.document()
        .add_event_listener_with_callback("keydown", key_cb.as_ref().unchecked_ref())?;
    key_cb.forget();

    let scroll_site = Rc::clone(site);
    let scroll_frames = frames.clone();
    let scroll_cb = Closure::wrap(Box::new(move |_event: Event| {
        let _ = dispatch(&scroll_site, &scroll_frames, PageEvent::Scroll);
    }) as Box<dyn FnMut(_)>);
    dom.window()
        .add_event_listener_with_callback("scroll", scroll_cb.as_ref().unchecked_ref())?;
    scroll_cb.forget();

    Ok(())
}
