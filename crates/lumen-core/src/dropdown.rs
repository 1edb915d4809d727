#![forbid(unsafe_code)]

//! Service-areas dropdown: click to open on desktop, expands inline on
//! mobile. Keyboard: `Escape` closes, `ArrowDown`/`Enter` open and focus
//! the first entry.

use crate::element::Element;
use crate::event::{EventOutcome, Key};

/// Class marking the dropdown as open.
pub const OPEN_CLASS: &str = "open";

/// A dropdown root with its trigger link and optional menu.
#[derive(Debug)]
pub struct Dropdown<E: Element> {
    root: E,
    trigger: E,
    first_item: Option<E>,
}

impl<E: Element> Dropdown<E> {
    /// Wire `trigger` to open `root`. `first_item` receives focus when the
    /// menu is opened from the keyboard.
    pub fn mount(root: E, trigger: E, first_item: Option<E>) -> Self {
        trigger.set_attribute("aria-haspopup", "true");
        trigger.set_attribute("aria-expanded", "false");
        Self {
            root,
            trigger,
            first_item,
        }
    }

    /// Whether the menu is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.root.has_class(OPEN_CLASS)
    }

    /// Close the menu.
    pub fn close(&self) {
        self.root.remove_class(OPEN_CLASS);
        self.trigger.set_attribute("aria-expanded", "false");
    }

    fn open(&self) {
        self.root.add_class(OPEN_CLASS);
        self.trigger.set_attribute("aria-expanded", "true");
    }

    /// React to a click anywhere on the page.
    pub fn on_click(&self, target: &E) -> EventOutcome {
        let mut outcome = EventOutcome::IGNORED;
        if self.trigger.contains(target) {
            let open = self.root.toggle_class(OPEN_CLASS);
            self.trigger
                .set_attribute("aria-expanded", if open { "true" } else { "false" });
            tracing::trace!(open, "dropdown toggled");
            outcome = EventOutcome::HANDLED;
        }
        if !self.root.contains(target) {
            self.close();
        }
        outcome
    }

    /// React to a key pressed while `target` has focus.
    pub fn on_key(&self, target: &E, key: &Key) -> EventOutcome {
        if !self.trigger.contains(target) {
            return EventOutcome::IGNORED;
        }
        if *key == Key::Escape {
            self.close();
        }
        if matches!(key, Key::ArrowDown | Key::Enter) && !self.is_open() {
            self.open();
            if let Some(first) = &self.first_item {
                first.focus();
            }
            return EventOutcome::HANDLED;
        }
        EventOutcome::IGNORED
    }
}
