use crate::client::EventLoggingClient;
use crate::config::RecorderConfig;
use crate::error::RecordError;
use crate::event::EventMessage;
use crate::facility::{LoggingFacility, TracingFacility};
use crate::result::LogResult;
use async_trait::async_trait;
use std::convert::Infallible;
use std::error::Error;
use std::sync::Arc;

/// Uniform contract for delivering an [`EventMessage`] to a backend.
///
/// `record` always runs `pre_process`, then `deliver`, then
/// `post_process`. The hooks default to the identity and are the place for
/// recorders to enrich events or reshape backend results.
#[async_trait]
pub trait EventRecorder: Send + Sync {
    /// Value produced by the backend for an accepted event.
    type Output: Send;
    /// Failure surfaced to the caller of `record`.
    type Error: Send;

    fn pre_process(&self, event: EventMessage) -> EventMessage {
        event
    }

    fn post_process(&self, result: Self::Output) -> Self::Output {
        result
    }

    /// Hand an already pre-processed event to the backend.
    async fn deliver(&self, event: EventMessage) -> Result<Self::Output, Self::Error>;

    /// Record a single event.
    ///
    /// The event is taken by value: whatever `pre_process` does to it is
    /// never visible to the caller.
    async fn record(&self, event: EventMessage) -> Result<Self::Output, Self::Error> {
        let event = self.pre_process(event);
        let result = self.deliver(event).await?;
        Ok(self.post_process(result))
    }
}

/// Recorder that writes events to a shared [`LoggingFacility`].
///
/// Never fails from the caller's point of view: serialization and facility
/// errors come back as [`LogResult::Error`], so callers must inspect the
/// returned status.
#[derive(Clone)]
pub struct DefaultLoggerRecorder {
    facility: Arc<dyn LoggingFacility>,
    config: RecorderConfig,
}

impl Default for DefaultLoggerRecorder {
    /// Bind to the process-wide `tracing` facility with the default
    /// vocabulary.
    fn default() -> Self {
        Self::new(Arc::new(TracingFacility::default()))
    }
}

impl DefaultLoggerRecorder {
    pub fn new(facility: Arc<dyn LoggingFacility>) -> Self {
        Self::with_config(facility, RecorderConfig::default())
    }

    pub fn with_config(facility: Arc<dyn LoggingFacility>, config: RecorderConfig) -> Self {
        Self { facility, config }
    }

    /// The facility this recorder writes to.
    pub fn recorder(&self) -> &Arc<dyn LoggingFacility> {
        &self.facility
    }

    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    /// Facility level for `event`: its action when it is a recognized log
    /// action of the log category, its type otherwise.
    pub fn level_for<'a>(&'a self, event: &'a EventMessage) -> &'a str {
        let (event_type, action) = match event.event_metadata() {
            Some(meta) => (
                meta.event_type.as_deref().unwrap_or_default(),
                meta.action.as_deref().unwrap_or_default(),
            ),
            None => (self.config.log_category.as_str(), self.config.default_action.as_str()),
        };

        if event_type == self.config.log_category && self.config.is_log_action(action) {
            action
        } else {
            event_type
        }
    }

    fn write(&self, event: &EventMessage) -> Result<(), RecordError> {
        let level = self.level_for(event);
        let message = serde_json::to_string_pretty(event)?;
        self.facility.log(level, &message).map_err(RecordError::Facility)
    }
}

#[async_trait]
impl EventRecorder for DefaultLoggerRecorder {
    type Output = LogResult;
    type Error = Infallible;

    async fn deliver(&self, event: EventMessage) -> Result<LogResult, Infallible> {
        match self.write(&event) {
            Ok(()) => Ok(LogResult::Accepted),
            Err(error) => {
                tracing::warn!(event_id = ?event.id, %error, "failed to record event to logging facility");
                Ok(LogResult::Error { error })
            }
        }
    }
}

/// Recorder that forwards events to an owned [`EventLoggingClient`].
///
/// Client failures are returned to the caller unchanged.
pub struct DefaultSidecarRecorder<C> {
    client: C,
}

impl<C: EventLoggingClient> DefaultSidecarRecorder<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// The client this recorder forwards to.
    pub fn recorder(&self) -> &C {
        &self.client
    }

    pub fn into_inner(self) -> C {
        self.client
    }
}

#[async_trait]
impl<C: EventLoggingClient> EventRecorder for DefaultSidecarRecorder<C> {
    type Output = C::Response;
    type Error = Box<dyn Error + Send + Sync>;

    async fn deliver(&self, event: EventMessage) -> Result<C::Response, Self::Error> {
        tracing::debug!(event_id = ?event.id, "forwarding event to sidecar");
        self.client.log(event).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventMetadata, LogEventAction};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Captured {
        calls: Mutex<Vec<(String, String)>>,
    }

    impl LoggingFacility for Captured {
        fn log(&self, level: &str, message: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
            self.calls.lock().unwrap().push((level.to_string(), message.to_string()));
            Ok(())
        }
    }

    fn recorder() -> (Arc<Captured>, DefaultLoggerRecorder) {
        let facility = Arc::new(Captured::default());
        let recorder = DefaultLoggerRecorder::new(facility.clone());
        (facility, recorder)
    }

    #[test]
    fn level_defaults_without_event_metadata() {
        let (_, recorder) = recorder();
        assert_eq!(recorder.level_for(&EventMessage::new()), "info");
    }

    #[test]
    fn level_uses_recognized_log_action() {
        let (_, recorder) = recorder();
        let event = EventMessage::new().with_event(EventMetadata::log(LogEventAction::Error));
        assert_eq!(recorder.level_for(&event), "error");
    }

    #[test]
    fn level_falls_back_to_type() {
        let (_, recorder) = recorder();
        let audit = EventMessage::new().with_event(EventMetadata::new("audit", "warn"));
        assert_eq!(recorder.level_for(&audit), "audit");

        let unknown_action = EventMessage::new().with_event(EventMetadata::new("log", "shout"));
        assert_eq!(recorder.level_for(&unknown_action), "log");
    }

    #[test]
    fn level_with_partial_metadata_is_empty_type() {
        let (_, recorder) = recorder();
        let event = EventMessage::new().with_event(EventMetadata {
            action: Some("warn".to_string()),
            ..Default::default()
        });
        assert_eq!(recorder.level_for(&event), "");
    }

    #[test]
    fn level_respects_custom_vocabulary() {
        let facility = Arc::new(Captured::default());
        let config = RecorderConfig {
            log_category: "app".to_string(),
            default_action: "notice".to_string(),
            log_actions: ["notice".to_string()].into_iter().collect(),
        };
        let recorder = DefaultLoggerRecorder::with_config(facility, config);

        assert_eq!(recorder.level_for(&EventMessage::new()), "notice");
        let log_warn = EventMessage::new().with_event(EventMetadata::log(LogEventAction::Warning));
        assert_eq!(recorder.level_for(&log_warn), "log");
    }

    #[tokio::test]
    async fn record_writes_pretty_json() {
        let (facility, recorder) = recorder();
        let event = EventMessage::new().with_id("evt-1");

        let result = recorder.record(event.clone()).await.unwrap();
        assert!(result.is_accepted());

        let calls = facility.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "info");
        assert_eq!(calls[0].1, serde_json::to_string_pretty(&event).unwrap());
        assert!(calls[0].1.contains('\n'));
    }
}
