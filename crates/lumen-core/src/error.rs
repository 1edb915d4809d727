#![forbid(unsafe_code)]

//! Error types.

/// A feature could not be mounted.
///
/// Never fatal: the site logs it and mounts the remaining features.
#[derive(Debug, Clone, PartialEq)]
pub enum SetupError {
    /// A carousel needs at least one item.
    EmptyCarousel,
    /// Item width must be finite and positive.
    InvalidItemWidth(f64),
}

impl core::fmt::Display for SetupError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::EmptyCarousel => write!(f, "carousel has no items"),
            Self::InvalidItemWidth(w) => write!(f, "invalid carousel item width: {w}"),
        }
    }
}

impl std::error::Error for SetupError {}

/// Host-supplied configuration was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The options document did not parse.
    Parse(String),
    /// A field parsed but holds an unusable value.
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: &'static str,
    },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
            Self::Invalid { field, reason } => write!(f, "invalid config `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(SetupError::EmptyCarousel.to_string(), "carousel has no items");
        assert_eq!(
            ConfigError::Invalid {
                field: "carousel.item_width",
                reason: "must be positive",
            }
            .to_string(),
            "invalid config `carousel.item_width`: must be positive"
        );
    }
}
