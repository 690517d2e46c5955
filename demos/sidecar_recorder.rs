use std::error::Error;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tracing::info;

use event_recorder::event::{EventMetadata, EventMessage, TraceEventAction};
use event_recorder::init::init_tracing_default;
use event_recorder::{DefaultSidecarRecorder, EventLoggingClient, EventRecorder};

/// Example of integrating a sidecar transport by implementing
/// `EventLoggingClient` directly. A real client would talk gRPC or HTTP to
/// the sidecar; this one prints the event and hands out sequence numbers.
#[derive(Default)]
struct PrintingClient {
    sequence: AtomicU64,
}

#[async_trait]
impl EventLoggingClient for PrintingClient {
    type Response = u64;

    async fn log(&self, event: EventMessage) -> Result<u64, Box<dyn Error + Send + Sync>> {
        println!("[sidecar] {}", serde_json::to_string(&event)?);
        Ok(self.sequence.fetch_add(1, Ordering::Relaxed))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    init_tracing_default()?;

    let recorder = DefaultSidecarRecorder::new(PrintingClient::default());

    for _ in 0..3 {
        let event = EventMessage::new().with_event(EventMetadata::trace(TraceEventAction::Span));
        let sequence = recorder.record(event).await?;
        info!(sequence, "sidecar accepted event");
    }

    Ok(())
}
