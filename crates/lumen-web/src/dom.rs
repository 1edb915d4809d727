#![forbid(unsafe_code)]

//! `web_sys` implementations of the core's element and window handles.

use lumen_core::{Element, ScrollBehavior, Window};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, EventTarget, HtmlElement, Node, ScrollIntoViewOptions, ScrollToOptions};

fn js_behavior(behavior: ScrollBehavior) -> web_sys::ScrollBehavior {
    match behavior {
        ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
    }
}

fn log_failure(op: &'static str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        tracing::warn!(op, error = ?err, "DOM call failed");
    }
}

/// A live DOM element.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DomElement(web_sys::Element);

impl DomElement {
    pub(crate) fn new(element: web_sys::Element) -> Self {
        Self(element)
    }

    /// The element an event was dispatched to, if it is one.
    pub(crate) fn from_target(target: Option<EventTarget>) -> Option<Self> {
        target?.dyn_into::<web_sys::Element>().ok().map(Self)
    }

    /// First descendant matching `selector`.
    pub(crate) fn query(&self, selector: &str) -> Option<Self> {
        self.0.query_selector(selector).ok().flatten().map(Self)
    }

    /// Number of direct children.
    pub(crate) fn child_count(&self) -> usize {
        self.0.child_element_count() as usize
    }

    fn html(&self) -> Option<&HtmlElement> {
        self.0.dyn_ref::<HtmlElement>()
    }

    fn set_style(&self, property: &str, value: Option<&str>) {
        let Some(html) = self.html() else {
            return;
        };
        let style = html.style();
        let result = match value {
            Some(value) => style.set_property(property, value),
            None => style.remove_property(property).map(drop),
        };
        log_failure("style", result);
    }
}

impl Element for DomElement {
    fn add_class(&self, name: &str) {
        log_failure("classList.add", self.0.class_list().add_1(name));
    }

    fn remove_class(&self, name: &str) {
        log_failure("classList.remove", self.0.class_list().remove_1(name));
    }

    fn toggle_class(&self, name: &str) -> bool {
        match self.0.class_list().toggle(name) {
            Ok(present) => present,
            Err(err) => {
                tracing::warn!(error = ?err, "classList.toggle failed");
                self.has_class(name)
            }
        }
    }

    fn has_class(&self, name: &str) -> bool {
        self.0.class_list().contains(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        log_failure("setAttribute", self.0.set_attribute(name, value));
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn contains(&self, other: &Self) -> bool {
        let node: &Node = &other.0;
        self.0.contains(Some(node))
    }

    fn focus(&self) {
        if let Some(html) = self.html() {
            log_failure("focus", html.focus());
        }
    }

    fn set_opacity(&self, opacity: Option<f64>) {
        let value = opacity.map(|o| o.to_string());
        self.set_style("opacity", value.as_deref());
    }

    fn set_scroll_left(&self, offset: f64, behavior: ScrollBehavior) {
        let options = ScrollToOptions::new();
        options.set_left(offset);
        options.set_behavior(js_behavior(behavior));
        self.0.scroll_to_with_scroll_to_options(&options);
    }

    fn scroll_into_view(&self, behavior: ScrollBehavior) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(js_behavior(behavior));
        options.set_block(web_sys::ScrollLogicalPosition::Start);
        self.0
            .scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn set_background_position(&self, x_percent: f64, y_percent: f64) {
        let value = format!("{x_percent}% {y_percent}%");
        self.set_style("background-position", Some(&value));
    }

    fn page_top(&self) -> f64 {
        let scroll_y = web_sys::window()
            .and_then(|w| w.scroll_y().ok())
            .unwrap_or(0.0);
        self.0.get_bounding_client_rect().top() + scroll_y
    }

    fn height(&self) -> f64 {
        self.0.get_bounding_client_rect().height()
    }

    fn append_child_clones(&self) -> usize {
        let children = self.0.children();
        let originals: Vec<web_sys::Element> =
            (0..children.length()).filter_map(|i| children.item(i)).collect();
        let mut cloned = 0;
        for child in originals {
            let copy = match child.clone_node_with_deep(true) {
                Ok(copy) => copy,
                Err(err) => {
                    tracing::warn!(error = ?err, "cloneNode failed");
                    continue;
                }
            };
            if let Some(el) = copy.dyn_ref::<web_sys::Element>() {
                log_failure("setAttribute", el.set_attribute("aria-hidden", "true"));
            }
            match self.0.append_child(&copy) {
                Ok(_) => cloned += 1,
                Err(err) => tracing::warn!(error = ?err, "appendChild failed"),
            }
        }
        cloned
    }
}

/// The browser window and its document.
#[derive(Debug, Clone)]
pub(crate) struct DomWindow {
    window: web_sys::Window,
    document: Document,
}

impl DomWindow {
    pub(crate) fn new(window: web_sys::Window, document: Document) -> Self {
        Self { window, document }
    }

    pub(crate) fn window(&self) -> &web_sys::Window {
        &self.window
    }

    pub(crate) fn document(&self) -> &Document {
        &self.document
    }

    /// Every element matching `selector`.
    pub(crate) fn query_all(&self, selector: &str) -> Vec<DomElement> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            tracing::warn!(selector, "invalid selector");
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .map(DomElement)
            .collect()
    }

    /// Whether `query` currently matches.
    pub(crate) fn media_matches(&self, query: &str) -> bool {
        self.window
            .match_media(query)
            .ok()
            .flatten()
            .is_some_and(|m| m.matches())
    }
}

impl Window for DomWindow {
    type Element = DomElement;

    fn inner_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0)
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scroll_to(&self, y: f64) {
        // The caller tweens per frame; each step must land immediately.
        let options = ScrollToOptions::new();
        options.set_top(y);
        options.set_behavior(web_sys::ScrollBehavior::Instant);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn query(&self, selector: &str) -> Option<DomElement> {
        self.document.query_selector(selector).ok().flatten().map(DomElement)
    }
}
