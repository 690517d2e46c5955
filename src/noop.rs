use crate::client::EventLoggingClient;
use crate::event::EventMessage;
use crate::facility::LoggingFacility;
use crate::result::LogResult;
use async_trait::async_trait;
use std::error::Error;

/// Facility that drops every entry after the recorder has rendered it.
///
/// Paired with [`crate::recorder::DefaultLoggerRecorder`] it isolates the
/// cost of level selection and JSON rendering, or silences event logging
/// in deployments that disable it.
#[derive(Clone, Default)]
pub struct NoopFacility;

impl LoggingFacility for NoopFacility {
    fn log(&self, _level: &str, _message: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }
}

/// Sidecar client that answers [`LogResult::Accepted`] without contacting
/// any sidecar. Stands in for the transport when none is configured.
#[derive(Clone, Default)]
pub struct NoopClient;

#[async_trait]
impl EventLoggingClient for NoopClient {
    type Response = LogResult;

    async fn log(&self, _event: EventMessage) -> Result<LogResult, Box<dyn Error + Send + Sync>> {
        Ok(LogResult::Accepted)
    }
}
