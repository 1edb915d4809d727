#![forbid(unsafe_code)]

//! Structured logging emitted by the page behaviours.

use std::sync::{Arc, Mutex};

use lumen_core::headless::{HeadlessElement, HeadlessWindow};
use lumen_core::site::CarouselParts;
use lumen_core::{DeterministicClock, HostCapabilities, ImageOutcome, PageParts, Site, SiteConfig};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

// ============================================================================
// Test Infrastructure
// ============================================================================

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: Level,
    message: String,
    fields: Vec<(String, String)>,
}

/// A layer that records every event.
struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor {
    message: String,
    fields: Vec<(String, String)>,
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields
                .push((field.name().to_string(), format!("{value:?}")));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.fields.push((field.name().to_string(), value.to_string()));
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor {
            message: String::new(),
            fields: Vec::new(),
        };
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

fn capture<R>(f: impl FnOnce() -> R) -> (R, Vec<CapturedEvent>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(EventCapture {
        events: Arc::clone(&events),
    });
    let result = tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    (result, captured)
}

fn find<'a>(events: &'a [CapturedEvent], message: &str) -> Option<&'a CapturedEvent> {
    events.iter().find(|e| e.message == message)
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn empty_carousel_is_reported_at_warn() {
    let body = HeadlessElement::new("body").with_class("preload");
    let mut parts = PageParts::new(body);
    parts.carousel = Some(CarouselParts {
        track: HeadlessElement::new("div"),
        item_count: 0,
        prev: None,
        next: None,
    });

    let (_, events) = capture(|| {
        Site::mount(
            parts,
            &SiteConfig::default(),
            HostCapabilities::full(),
            HeadlessWindow::new(1024.0),
            DeterministicClock::new(),
        )
    });

    let warn = find(&events, "carousel disabled").expect("warn event");
    assert_eq!(warn.level, Level::WARN);
    assert!(
        warn.fields
            .iter()
            .any(|(k, v)| k == "error" && v.contains("no items")),
        "{:?}",
        warn.fields
    );

    let mounted = find(&events, "site mounted").expect("mount summary");
    assert_eq!(mounted.level, Level::INFO);
    assert!(mounted.fields.iter().any(|(k, v)| k == "carousel" && v == "false"));
}

#[test]
fn reveal_milestones_are_logged() {
    let body = HeadlessElement::new("body").with_class("preload");
    let clock = DeterministicClock::new();
    let (_, events) = capture(|| {
        let (mut site, _) = Site::mount(
            PageParts::new(body.clone()),
            &SiteConfig::default(),
            HostCapabilities::css_only(),
            HeadlessWindow::new(1024.0),
            clock,
        );
        site.image_settled(ImageOutcome::Failed);
        site.advance();
        site
    });

    assert!(find(&events, "preload started").is_some());
    let failed = find(&events, "hero image failed; revealing anyway").expect("failure logged");
    assert_eq!(failed.level, Level::DEBUG);
    let scheduled = find(&events, "reveal scheduled").expect("schedule logged");
    assert!(
        scheduled
            .fields
            .iter()
            .any(|(k, v)| k == "remaining_ms" && v == "200")
    );
}
