#![forbid(unsafe_code)]

//! "More areas" toggle inside the service-areas dropdown.
//!
//! The dropdown lists the main suburbs; a toggle at its foot expands a
//! second list with the rest. The toggle sits inside the dropdown root, so
//! clicking it never counts as an outside click for the dropdown.

use crate::config::MoreAreasConfig;
use crate::element::Element;
use crate::event::EventOutcome;

/// Class on the extra list while hidden.
pub const COLLAPSED_CLASS: &str = "collapsed";

/// Class on the extra list while shown.
pub const EXPANDED_CLASS: &str = "expanded";

/// Expand/collapse toggle for the extra areas list.
#[derive(Debug)]
pub struct MoreAreas<E: Element> {
    toggle: E,
    list: E,
    more_label: String,
    fewer_label: String,
}

impl<E: Element> MoreAreas<E> {
    /// Wire `toggle` to `list`, starting collapsed.
    pub fn mount(toggle: E, list: E, config: &MoreAreasConfig) -> Self {
        toggle.set_attribute("aria-expanded", "false");
        if let Some(id) = list.attribute("id").filter(|id| !id.is_empty()) {
            toggle.set_attribute("aria-controls", &id);
        }
        list.remove_class(EXPANDED_CLASS);
        list.add_class(COLLAPSED_CLASS);
        Self {
            toggle,
            list,
            more_label: config.more_label.clone(),
            fewer_label: config.fewer_label.clone(),
        }
    }

    /// Whether the extra list is shown.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.list.has_class(EXPANDED_CLASS)
    }

    /// React to a click anywhere on the page.
    pub fn on_click(&self, target: &E) -> EventOutcome {
        if !self.toggle.contains(target) {
            return EventOutcome::IGNORED;
        }
        let expanded = self.list.toggle_class(EXPANDED_CLASS);
        if expanded {
            self.list.remove_class(COLLAPSED_CLASS);
            self.toggle.set_attribute("aria-expanded", "true");
            self.toggle.set_text(&self.fewer_label);
        } else {
            self.list.add_class(COLLAPSED_CLASS);
            self.toggle.set_attribute("aria-expanded", "false");
            self.toggle.set_text(&self.more_label);
        }
        tracing::trace!(expanded, "more areas toggled");
        EventOutcome::HANDLED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessElement;

    #[test]
    fn mount_collapses_and_links_aria() {
        let toggle = HeadlessElement::new("button");
        let list = HeadlessElement::new("ul")
            .with_attribute("id", "more-suburbs")
            .with_class(EXPANDED_CLASS);
        let more = MoreAreas::mount(toggle.clone(), list.clone(), &MoreAreasConfig::default());

        assert!(!more.is_expanded());
        assert_eq!(list.classes(), vec![COLLAPSED_CLASS.to_owned()]);
        assert_eq!(toggle.attribute("aria-controls").as_deref(), Some("more-suburbs"));
        assert_eq!(toggle.attribute("aria-expanded").as_deref(), Some("false"));
    }

    #[test]
    fn click_flips_list_and_label() {
        let toggle = HeadlessElement::new("button");
        let icon = toggle.append(HeadlessElement::new("span"));
        let list = HeadlessElement::new("ul");
        let more = MoreAreas::mount(toggle.clone(), list.clone(), &MoreAreasConfig::default());
        assert_eq!(toggle.attribute("aria-controls"), None);

        assert_eq!(more.on_click(&icon), EventOutcome::HANDLED);
        assert!(more.is_expanded());
        assert!(!list.has_class(COLLAPSED_CLASS));
        assert_eq!(toggle.text(), "Fewer areas");
        assert_eq!(toggle.attribute("aria-expanded").as_deref(), Some("true"));

        assert_eq!(more.on_click(&toggle), EventOutcome::HANDLED);
        assert!(!more.is_expanded());
        assert!(list.has_class(COLLAPSED_CLASS));
        assert_eq!(toggle.text(), "More areas");
    }

    #[test]
    fn unrelated_click_is_ignored() {
        let toggle = HeadlessElement::new("button");
        let list = HeadlessElement::new("ul");
        let more = MoreAreas::mount(toggle, list.clone(), &MoreAreasConfig::default());
        assert_eq!(more.on_click(&list), EventOutcome::IGNORED);
        assert!(!more.is_expanded());
    }
}
