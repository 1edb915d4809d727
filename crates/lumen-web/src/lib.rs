#![forbid(unsafe_code)]

//! WASM frontend for lumen.
//!
//! Binds the page behaviours from `lumen-core` to the live DOM:
//! - adapts `web_sys` nodes to the core's element and window handles,
//! - loads the hero image and reports its outcome,
//! - forwards document clicks, key presses and window scrolls,
//! - drives timers and animations from `requestAnimationFrame`.
//!
//! JS calls the exported `boot(options?)` once the document is ready.

mod host;

pub use host::{WebClock, capabilities_for, level_filter, parse_options, selectors};

#[cfg(target_arch = "wasm32")]
mod console;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::boot;

/// Native builds compile this crate as a stub so `cargo check --workspace` stays
/// green on non-wasm targets. Options are still validated.
#[cfg(not(target_arch = "wasm32"))]
pub fn boot(options: Option<&str>) -> Result<(), lumen_core::ConfigError> {
    parse_options(options).map(drop)
}
