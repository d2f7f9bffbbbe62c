#![forbid(unsafe_code)]

//! Structured log events emitted by the controller.
//!
//!   cargo test -p treasure-core --features tracing --test tracing_events

#![cfg(feature = "tracing")]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing_subscriber::layer::SubscriberExt;
use treasure_core::{Msg, PageConfig, TreasurePage};

/// Collects event messages.
#[derive(Clone, Default)]
struct MessageCapture {
    messages: Arc<Mutex<Vec<String>>>,
}

struct MessageVisitor<'a>(&'a mut Option<String>);

impl tracing::field::Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            *self.0 = Some(format!("{value:?}"));
        }
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for MessageCapture {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut message = None;
        event.record(&mut MessageVisitor(&mut message));
        if let Some(m) = message {
            self.messages.lock().unwrap().push(m);
        }
    }
}

#[test]
fn search_and_theme_are_logged() {
    let capture = MessageCapture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());

    tracing::subscriber::with_default(subscriber, || {
        let mut page = TreasurePage::new(PageConfig::default(), 100.0, 100.0, 3);
        page.update(Msg::Input("дуб".into()), Duration::ZERO);
        page.poll(Duration::from_millis(500));
        page.update(Msg::ToggleTheme, Duration::ZERO);
    });

    let messages = capture.messages.lock().unwrap().clone();
    for expected in [
        "page mounted",
        "search scheduled",
        "search completed",
        "theme toggled",
        "particle field regenerated",
    ] {
        assert!(
            messages.iter().any(|m| m == expected),
            "missing {expected:?} in {messages:?}"
        );
    }
}
