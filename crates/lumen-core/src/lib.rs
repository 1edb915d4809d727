#![forbid(unsafe_code)]

//! Core: page behaviours for a marketing site, driven by an injected host.
//!
//! Every behaviour works against the [`element::Element`] and
//! [`element::Window`] traits and an explicit [`clock::Clock`], so the same
//! code runs in the browser (through `lumen-web`) and deterministically in
//! tests (through [`headless`]).

pub mod anchor;
pub mod animation;
pub mod capabilities;
pub mod carousel;
pub mod clock;
pub mod config;
pub mod dropdown;
pub mod element;
pub mod error;
pub mod event;
pub mod headless;
pub mod more_areas;
pub mod nav;
pub mod parallax;
pub mod reveal;
pub mod site;
pub mod timer;

pub use capabilities::HostCapabilities;
pub use clock::{Clock, DeterministicClock};
pub use config::SiteConfig;
pub use element::{Element, ScrollBehavior, Window};
pub use error::{ConfigError, SetupError};
pub use event::{EventOutcome, Key, PageEvent};
pub use reveal::{ImageOutcome, ImageRequest, RevealState};
pub use site::{PageParts, Site};
