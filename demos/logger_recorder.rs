use serde_json::json;
use tracing::Level;

use event_recorder::config::{env_or, RecorderConfig};
use event_recorder::event::{AuditEventAction, EventMetadata, EventMessage, EventStateMetadata, LogEventAction};
use event_recorder::init::{init_tracing, SubscriberConfig};
use event_recorder::{DefaultLoggerRecorder, EventRecorder, LogResult};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing(SubscriberConfig {
        max_level: Level::DEBUG,
        ..SubscriberConfig::default()
    })?;

    // Vocabulary can be narrowed via EVENT_RECORDER_* variables.
    let config = RecorderConfig::from_env()?;
    let facility = event_recorder::TracingFacility::new();
    let recorder = DefaultLoggerRecorder::with_config(std::sync::Arc::new(facility), config);

    let service = env_or("SERVICE_NAME", "demo-service");
    let events = [
        EventMessage::new(),
        EventMessage::new()
            .with_id("evt-1")
            .with_content("application/json", json!({ "service": service }))
            .with_event(EventMetadata::log(LogEventAction::Warning)),
        EventMessage::new()
            .with_id("evt-2")
            .with_event(EventMetadata::audit(AuditEventAction::Start).with_state(EventStateMetadata::success())),
    ];

    for event in events {
        let result = match recorder.record(event).await {
            Ok(result) => result,
            Err(never) => match never {},
        };
        if let LogResult::Error { error } = &result {
            eprintln!("failed to record: {}", error);
        }
        println!("{}", serde_json::to_string(&result)?);
    }

    Ok(())
}
