#![forbid(unsafe_code)]

//! In-memory page for deterministic tests and host-less runs.
//!
//! [`HeadlessElement`] and [`HeadlessWindow`] implement the injected handle
//! traits and record every mutation the behaviours make, so tests can assert
//! on attributes, classes, scroll offsets and focus without a browser.
//!
//! Handles are reference counted: cloning a handle yields another reference
//! to the same node, matching DOM semantics.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::{Rc, Weak};

use crate::element::{Element, ScrollBehavior, Window};

#[derive(Debug, Default)]
struct Node {
    name: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    opacity: Option<f64>,
    scroll_left: f64,
    scroll_log: Vec<(f64, ScrollBehavior)>,
    scroll_into_view_log: Vec<ScrollBehavior>,
    background_position: Option<(f64, f64)>,
    focus_count: u32,
    page_top: f64,
    height: f64,
    parent: Weak<RefCell<Node>>,
    children: Vec<HeadlessElement>,
}

/// A recorded page node.
#[derive(Clone)]
pub struct HeadlessElement {
    node: Rc<RefCell<Node>>,
}

impl core::fmt::Debug for HeadlessElement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let node = self.node.borrow();
        f.debug_struct("HeadlessElement")
            .field("name", &node.name)
            .field("classes", &node.classes)
            .field("children", &node.children.len())
            .finish()
    }
}

impl PartialEq for HeadlessElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }
}

impl HeadlessElement {
    /// Create a detached node. `name` only shows up in debug output.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            node: Rc::new(RefCell::new(Node {
                name: name.to_owned(),
                ..Node::default()
            })),
        }
    }

    /// Add a class (builder).
    #[must_use]
    pub fn with_class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Set an attribute (builder).
    #[must_use]
    pub fn with_attribute(self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Set layout geometry (builder).
    #[must_use]
    pub fn with_geometry(self, page_top: f64, height: f64) -> Self {
        {
            let mut node = self.node.borrow_mut();
            node.page_top = page_top;
            node.height = height;
        }
        self
    }

    /// Attach `child` as the last child of this node and return it.
    pub fn append(&self, child: HeadlessElement) -> HeadlessElement {
        child.node.borrow_mut().parent = Rc::downgrade(&self.node);
        self.node.borrow_mut().children.push(child.clone());
        child
    }

    /// Current classes in insertion order.
    #[must_use]
    pub fn classes(&self) -> Vec<String> {
        self.node.borrow().classes.clone()
    }

    /// Current text content.
    #[must_use]
    pub fn text(&self) -> String {
        self.node.borrow().text.clone()
    }

    /// Inline opacity override, if any.
    #[must_use]
    pub fn opacity(&self) -> Option<f64> {
        self.node.borrow().opacity
    }

    /// Current horizontal scroll offset.
    #[must_use]
    pub fn scroll_left(&self) -> f64 {
        self.node.borrow().scroll_left
    }

    /// Every horizontal scroll request, oldest first.
    #[must_use]
    pub fn scroll_log(&self) -> Vec<(f64, ScrollBehavior)> {
        self.node.borrow().scroll_log.clone()
    }

    /// Every `scroll_into_view` request, oldest first.
    #[must_use]
    pub fn scroll_into_view_log(&self) -> Vec<ScrollBehavior> {
        self.node.borrow().scroll_into_view_log.clone()
    }

    /// Inline background position, if set.
    #[must_use]
    pub fn background_position(&self) -> Option<(f64, f64)> {
        self.node.borrow().background_position
    }

    /// How many times focus was requested.
    #[must_use]
    pub fn focus_count(&self) -> u32 {
        self.node.borrow().focus_count
    }

    /// Direct children.
    #[must_use]
    pub fn children(&self) -> Vec<HeadlessElement> {
        self.node.borrow().children.clone()
    }

    fn deep_clone(&self) -> HeadlessElement {
        let node = self.node.borrow();
        let copy = HeadlessElement {
            node: Rc::new(RefCell::new(Node {
                name: node.name.clone(),
                classes: node.classes.clone(),
                attributes: node.attributes.clone(),
                text: node.text.clone(),
                page_top: node.page_top,
                height: node.height,
                ..Node::default()
            })),
        };
        for child in &node.children {
            copy.append(child.deep_clone());
        }
        copy
    }
}

impl Element for HeadlessElement {
    fn add_class(&self, name: &str) {
        let mut node = self.node.borrow_mut();
        if !node.classes.iter().any(|c| c == name) {
            node.classes.push(name.to_owned());
        }
    }

    fn remove_class(&self, name: &str) {
        self.node.borrow_mut().classes.retain(|c| c != name);
    }

    fn has_class(&self, name: &str) -> bool {
        self.node.borrow().classes.iter().any(|c| c == name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.node
            .borrow_mut()
            .attributes
            .insert(name.to_owned(), value.to_owned());
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.node.borrow().attributes.get(name).cloned()
    }

    fn set_text(&self, text: &str) {
        text.clone_into(&mut self.node.borrow_mut().text);
    }

    fn contains(&self, other: &Self) -> bool {
        let mut cursor = Some(Rc::clone(&other.node));
        while let Some(node) = cursor {
            if Rc::ptr_eq(&node, &self.node) {
                return true;
            }
            cursor = node.borrow().parent.upgrade();
        }
        false
    }

    fn focus(&self) {
        self.node.borrow_mut().focus_count += 1;
    }

    fn set_opacity(&self, opacity: Option<f64>) {
        self.node.borrow_mut().opacity = opacity;
    }

    fn set_scroll_left(&self, offset: f64, behavior: ScrollBehavior) {
        let mut node = self.node.borrow_mut();
        node.scroll_left = offset;
        node.scroll_log.push((offset, behavior));
    }

    fn scroll_into_view(&self, behavior: ScrollBehavior) {
        self.node.borrow_mut().scroll_into_view_log.push(behavior);
    }

    fn set_background_position(&self, x_percent: f64, y_percent: f64) {
        self.node.borrow_mut().background_position = Some((x_percent, y_percent));
    }

    fn page_top(&self) -> f64 {
        self.node.borrow().page_top
    }

    fn height(&self) -> f64 {
        self.node.borrow().height
    }

    fn append_child_clones(&self) -> usize {
        let originals = self.children();
        for child in &originals {
            self.append(child.deep_clone());
        }
        originals.len()
    }
}

#[derive(Debug, Default)]
struct WindowState {
    inner_width: Cell<f64>,
    scroll_y: Cell<f64>,
    scroll_log: RefCell<Vec<f64>>,
    selectors: RefCell<HashMap<String, HeadlessElement>>,
}

/// A recorded viewport.
#[derive(Debug, Clone, Default)]
pub struct HeadlessWindow {
    state: Rc<WindowState>,
}

impl HeadlessWindow {
    /// Create a viewport of the given width, scrolled to the top.
    #[must_use]
    pub fn new(inner_width: f64) -> Self {
        let window = Self::default();
        window.state.inner_width.set(inner_width);
        window
    }

    /// Make `selector` resolve to `element`.
    pub fn register(&self, selector: &str, element: &HeadlessElement) {
        self.state
            .selectors
            .borrow_mut()
            .insert(selector.to_owned(), element.clone());
    }

    /// Resize the viewport.
    pub fn set_inner_width(&self, width: f64) {
        self.state.inner_width.set(width);
    }

    /// Simulate the user scrolling, without recording a script scroll.
    pub fn user_scroll(&self, y: f64) {
        self.state.scroll_y.set(y);
    }

    /// Every script-driven vertical scroll, oldest first.
    #[must_use]
    pub fn scroll_log(&self) -> Vec<f64> {
        self.state.scroll_log.borrow().clone()
    }
}

impl Window for HeadlessWindow {
    type Element = HeadlessElement;

    fn inner_width(&self) -> f64 {
        self.state.inner_width.get()
    }

    fn scroll_y(&self) -> f64 {
        self.state.scroll_y.get()
    }

    fn scroll_to(&self, y: f64) {
        self.state.scroll_y.set(y);
        self.state.scroll_log.borrow_mut().push(y);
    }

    fn query(&self, selector: &str) -> Option<HeadlessElement> {
        self.state.selectors.borrow().get(selector).cloned()
    }
}
