use std::error::Error;

/// Failure captured while recording an event through a logging facility.
///
/// It never escapes [`crate::recorder::DefaultLoggerRecorder::record`] as
/// an `Err`; it travels inside [`crate::result::LogResult::Error`] instead.
#[derive(thiserror::Error, Debug)]
pub enum RecordError {
    #[error("failed to serialize event: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("logging facility failed: {0}")]
    Facility(#[source] Box<dyn Error + Send + Sync>),
}

/// Error returned by [`crate::facility::TracingFacility`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FacilityError {
    #[error("no level mapping for log category {0:?}")]
    UnknownLevel(String),
}

/// Error returned when building a [`crate::config::RecorderConfig`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must not be empty")]
    Empty(&'static str),
}
