use crate::event::EventMessage;
use async_trait::async_trait;
use std::error::Error;

/// Transport client for a remote event logging sidecar.
///
/// The crate does not ship a network implementation; embedding systems
/// plug in their own (gRPC, HTTP, in-process channel, ...). A
/// [`crate::recorder::DefaultSidecarRecorder`] owns exactly one client and
/// may call `log` concurrently from several tasks.
#[async_trait]
pub trait EventLoggingClient: Send + Sync {
    /// Whatever the sidecar answers with, passed back to the caller of
    /// `record` untouched.
    type Response: Send;

    /// Hand one event to the sidecar.
    ///
    /// **Returns**
    /// - `Ok(response)` with the sidecar's answer.
    /// - `Err(..)` on transport or sidecar failure. The recorder does not
    ///   retry and does not swallow the error.
    async fn log(&self, event: EventMessage) -> Result<Self::Response, Box<dyn Error + Send + Sync>>;
}
