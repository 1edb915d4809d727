#![forbid(unsafe_code)]

//! `tracing` output to the browser console.

use std::io;

use tracing::{Level, Metadata};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsValue;

/// Writer factory routing each event to the console method for its level.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Console;

/// One formatted event, flushed to the console on drop.
pub(crate) struct ConsoleLine {
    level: Level,
    buf: Vec<u8>,
}

impl io::Write for ConsoleLine {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleLine {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let text = String::from_utf8_lossy(&self.buf);
        let line = JsValue::from_str(text.trim_end());
        match self.level {
            Level::ERROR => web_sys::console::error_1(&line),
            Level::WARN => web_sys::console::warn_1(&line),
            Level::INFO => web_sys::console::info_1(&line),
            _ => web_sys::console::debug_1(&line),
        }
    }
}

impl<'a> MakeWriter<'a> for Console {
    type Writer = ConsoleLine;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleLine {
            level: Level::INFO,
            buf: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleLine {
            level: *meta.level(),
            buf: Vec::new(),
        }
    }
}

/// Install the console subscriber. A second call keeps the first.
pub(crate) fn install(level: LevelFilter) {
    // Wall-clock formatting is unavailable on wasm32-unknown-unknown.
    let installed = tracing_subscriber::fmt()
        .with_writer(Console)
        .without_time()
        .with_max_level(level)
        .try_init();
    if installed.is_err() {
        tracing::debug!("console logging already installed");
    }
}
