#![forbid(unsafe_code)]

//! Mobile navigation toggle.

use crate::config::NavConfig;
use crate::element::Element;
use crate::event::EventOutcome;

/// Class marking the link container as open.
pub const ACTIVE_CLASS: &str = "active";

/// Id the toggle advertises through `aria-controls`.
pub const NAV_ID: &str = "primary-navigation";

/// The hamburger toggle and the link list it opens.
#[derive(Debug)]
pub struct MobileNav<E: Element> {
    toggle: E,
    links: E,
    anchors: Vec<E>,
    dropdown_root: Option<E>,
    dropdown_menu: Option<E>,
    collapse_breakpoint: f64,
}

impl<E: Element> MobileNav<E> {
    /// Wire the toggle to the link container.
    ///
    /// `anchors` are the links inside the container. `dropdown_root` and
    /// `dropdown_menu` identify the submenu whose trigger must not close
    /// the menu.
    pub fn mount(
        toggle: E,
        links: E,
        anchors: Vec<E>,
        dropdown_root: Option<E>,
        dropdown_menu: Option<E>,
        config: &NavConfig,
    ) -> Self {
        toggle.set_attribute("aria-controls", NAV_ID);
        toggle.set_attribute("aria-expanded", "false");
        Self {
            toggle,
            links,
            anchors,
            dropdown_root,
            dropdown_menu,
            collapse_breakpoint: config.collapse_breakpoint_px,
        }
    }

    /// Whether the menu is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.links.has_class(ACTIVE_CLASS)
    }

    /// Close the menu.
    pub fn close(&self) {
        self.links.remove_class(ACTIVE_CLASS);
        self.toggle.set_attribute("aria-expanded", "false");
    }

    fn is_dropdown_trigger(&self, anchor: &E) -> bool {
        let in_dropdown = self
            .dropdown_root
            .as_ref()
            .is_some_and(|root| root.contains(anchor));
        let in_menu = self
            .dropdown_menu
            .as_ref()
            .is_some_and(|menu| menu.contains(anchor));
        in_dropdown && !in_menu
    }

    /// React to a click anywhere on the page.
    pub fn on_click(&self, target: &E, viewport_width: f64) -> EventOutcome {
        if self.toggle.contains(target) {
            let open = self.links.toggle_class(ACTIVE_CLASS);
            self.toggle
                .set_attribute("aria-expanded", if open { "true" } else { "false" });
            tracing::trace!(open, "mobile nav toggled");
            return EventOutcome::IGNORED;
        }

        if let Some(anchor) = self.anchors.iter().find(|a| a.contains(target)) {
            if !self.is_dropdown_trigger(anchor) && viewport_width <= self.collapse_breakpoint {
                self.close();
            }
            return EventOutcome::IGNORED;
        }

        if !self.links.contains(target) && self.is_open() {
            self.close();
        }
        EventOutcome::IGNORED
    }
}
