#![forbid(unsafe_code)]

//! Page events pushed by the host.

/// A keyboard key, reduced to the ones the page reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape key.
    Escape,
    /// Enter/Return key.
    Enter,
    /// Down arrow.
    ArrowDown,
    /// Anything else, by its DOM `key` name.
    Other(String),
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Self::Escape,
            "Enter" => Self::Enter,
            "ArrowDown" | "Down" => Self::ArrowDown,
            other => Self::Other(other.to_owned()),
        }
    }
}

/// An input event delivered to the page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent<E> {
    /// A click, with the innermost node that was hit.
    Click {
        /// Node the click landed on.
        target: E,
    },
    /// A key press while `target` has focus.
    KeyDown {
        /// Focused node.
        target: E,
        /// Key pressed.
        key: Key,
    },
    /// The window scrolled.
    Scroll,
}

/// What the host should do with the native event after dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[must_use]
pub struct EventOutcome {
    /// Suppress the browser's default action (navigation, key scroll).
    pub prevent_default: bool,
}

impl EventOutcome {
    /// Let the default action happen.
    pub const IGNORED: Self = Self {
        prevent_default: false,
    };

    /// Suppress the default action.
    pub const HANDLED: Self = Self {
        prevent_default: true,
    };

    /// Combine outcomes of several listeners on the same event.
    pub const fn merge(self, other: Self) -> Self {
        Self {
            prevent_default: self.prevent_default || other.prevent_default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_keys_map() {
        assert_eq!(Key::from_dom("Escape"), Key::Escape);
        assert_eq!(Key::from_dom("Esc"), Key::Escape);
        assert_eq!(Key::from_dom("Enter"), Key::Enter);
        assert_eq!(Key::from_dom("ArrowDown"), Key::ArrowDown);
        assert_eq!(Key::from_dom("a"), Key::Other("a".into()));
    }

    #[test]
    fn merge_is_sticky() {
        assert_eq!(EventOutcome::IGNORED.merge(EventOutcome::IGNORED), EventOutcome::IGNORED);
        assert_eq!(EventOutcome::IGNORED.merge(EventOutcome::HANDLED), EventOutcome::HANDLED);
        assert_eq!(EventOutcome::HANDLED.merge(EventOutcome::IGNORED), EventOutcome::HANDLED);
    }
}
