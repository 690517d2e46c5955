use std::sync::Arc;
use std::time::Instant;

use event_recorder::event::{EventMetadata, EventMessage, LogEventAction};
use event_recorder::noop::NoopFacility;
use event_recorder::{DefaultLoggerRecorder, EventRecorder};

#[tokio::main]
async fn main() {
    let recorder = DefaultLoggerRecorder::new(Arc::new(NoopFacility));

    let n: u64 = 100_000;
    let start = Instant::now();

    for i in 0..n {
        let event = EventMessage::new()
            .with_id(format!("evt-{i}"))
            .with_event(EventMetadata::log(LogEventAction::Error));
        let result = match recorder.record(event).await {
            Ok(result) => result,
            Err(never) => match never {},
        };
        if !result.is_accepted() {
            eprintln!("record {} failed: {:?}", i, result.error());
        }
    }

    let elapsed = start.elapsed();
    println!(
        "default config: recorded {} events in {:?} (~{:.0} ev/s)",
        n,
        elapsed,
        n as f64 / elapsed.as_secs_f64()
    );
}
