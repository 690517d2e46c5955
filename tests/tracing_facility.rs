use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Registry;

use event_recorder::event::{AuditEventAction, EventMetadata, EventMessage, LogEventAction};
use event_recorder::{DefaultLoggerRecorder, EventRecorder, TracingFacility};

#[derive(Debug, Clone)]
struct Captured {
    level: Level,
    target: String,
    fields: BTreeMap<String, String>,
}

/// Layer that keeps every event emitted under the `event_recorder` target.
#[derive(Clone, Default)]
struct CaptureLayer {
    events: Arc<Mutex<Vec<Captured>>>,
}

struct FieldVisitor<'a> {
    fields: &'a mut BTreeMap<String, String>,
}

impl<'a> Visit for FieldVisitor<'a> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.fields.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.fields.insert(field.name().to_string(), format!("{:?}", value));
    }
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_event(&self, event: &Event, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        if meta.target() != "event_recorder" {
            return;
        }

        let mut fields = BTreeMap::new();
        event.record(&mut FieldVisitor { fields: &mut fields });
        self.events.lock().unwrap().push(Captured {
            level: *meta.level(),
            target: meta.target().to_string(),
            fields,
        });
    }
}

#[tokio::test]
async fn entries_are_emitted_at_mapped_levels() {
    let layer = CaptureLayer::default();
    let _guard = tracing::subscriber::set_default(Registry::default().with(layer.clone()));

    let recorder = DefaultLoggerRecorder::new(Arc::new(TracingFacility::new()));
    let events = [
        EventMessage::new().with_event(EventMetadata::log(LogEventAction::Warning)),
        EventMessage::new().with_event(EventMetadata::log(LogEventAction::Performance)),
        EventMessage::new().with_event(EventMetadata::audit(AuditEventAction::Ingress)),
        EventMessage::new().with_id("plain"),
    ];
    for event in events {
        assert!(recorder.record(event).await.unwrap().is_accepted());
    }

    let captured = layer.events.lock().unwrap().clone();
    let summary: Vec<(Level, &str)> = captured
        .iter()
        .map(|c| (c.level, c.fields["category"].as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (Level::WARN, "warn"),
            (Level::DEBUG, "perf"),
            (Level::INFO, "audit"),
            (Level::INFO, "info"),
        ]
    );
    assert!(captured.iter().all(|c| c.target == "event_recorder"));
    assert!(captured[3].fields["message"].contains("\"id\": \"plain\""));
}

#[tokio::test]
async fn custom_mapping_reaches_the_subscriber() {
    let layer = CaptureLayer::default();
    let _guard = tracing::subscriber::set_default(Registry::default().with(layer.clone()));

    let facility = TracingFacility::new().with_level("metrics", Level::ERROR);
    let recorder = DefaultLoggerRecorder::new(Arc::new(facility));
    let event = EventMessage::new().with_event(EventMetadata::new("metrics", "gauge"));

    assert!(recorder.record(event).await.unwrap().is_accepted());

    let captured = layer.events.lock().unwrap().clone();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].level, Level::ERROR);
    assert_eq!(captured[0].fields["category"], "metrics");
}
