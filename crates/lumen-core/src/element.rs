#![forbid(unsafe_code)]

//! Injected UI handles.
//!
//! Controllers never reach for globals. They are handed [`Element`] handles
//! and a [`Window`] at mount time. A handle is a cheap clonable reference to
//! one node; all methods take `&self` because the node lives on the host
//! side.
//!
//! The web crate implements these over `web_sys`; [`crate::headless`]
//! implements them in memory for tests.

/// How a scroll position change should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollBehavior {
    /// Let the host animate the change.
    Smooth,
    /// Jump without animation.
    Instant,
}

/// One node of the page.
pub trait Element: Clone {
    /// Add a class.
    fn add_class(&self, name: &str);

    /// Remove a class.
    fn remove_class(&self, name: &str);

    /// Flip a class, returning whether it is now present.
    fn toggle_class(&self, name: &str) -> bool {
        if self.has_class(name) {
            self.remove_class(name);
            false
        } else {
            self.add_class(name);
            true
        }
    }

    /// Whether the class is present.
    fn has_class(&self, name: &str) -> bool;

    /// Set an attribute.
    fn set_attribute(&self, name: &str, value: &str);

    /// Read an attribute.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Replace the text content.
    fn set_text(&self, text: &str);

    /// Whether `other` is this node or one of its descendants.
    fn contains(&self, other: &Self) -> bool;

    /// Move keyboard focus here.
    fn focus(&self);

    /// Set (`Some`) or clear (`None`) the inline opacity override.
    fn set_opacity(&self, opacity: Option<f64>);

    /// Set the horizontal scroll offset of a scroll container.
    fn set_scroll_left(&self, offset: f64, behavior: ScrollBehavior);

    /// Ask the host to bring this node to the top of the viewport.
    fn scroll_into_view(&self, behavior: ScrollBehavior);

    /// Set the inline background position, in percent.
    fn set_background_position(&self, x_percent: f64, y_percent: f64);

    /// Top edge in document coordinates.
    fn page_top(&self) -> f64;

    /// Rendered height.
    fn height(&self) -> f64;

    /// Append a deep clone of every current child, returning how many were
    /// cloned.
    fn append_child_clones(&self) -> usize;
}

/// The page viewport.
pub trait Window {
    /// Handle type of nodes on this page.
    type Element: Element;

    /// Viewport width in CSS pixels.
    fn inner_width(&self) -> f64;

    /// Current vertical scroll offset.
    fn scroll_y(&self) -> f64;

    /// Jump the vertical scroll offset.
    fn scroll_to(&self, y: f64);

    /// Resolve a selector (e.g. an in-page `#id`) to a node.
    fn query(&self, selector: &str) -> Option<Self::Element>;
}
