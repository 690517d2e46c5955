use crate::error::RecordError;
use serde::{Serialize, Serializer};
use std::fmt::Display;

/// Status vocabulary shared by recorders and sidecar responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogResponseStatus {
    Accepted,
    Error,
}

/// Outcome of a single `record` call on a logger-backed recorder.
///
/// Serializes as `{"status":"accepted"}` or
/// `{"status":"error","error":"<message>"}`.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum LogResult {
    Accepted,
    Error {
        #[serde(serialize_with = "serialize_display")]
        error: RecordError,
    },
}

impl LogResult {
    pub fn status(&self) -> LogResponseStatus {
        match self {
            LogResult::Accepted => LogResponseStatus::Accepted,
            LogResult::Error { .. } => LogResponseStatus::Error,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, LogResult::Accepted)
    }

    /// The captured error, if the record failed.
    pub fn error(&self) -> Option<&RecordError> {
        match self {
            LogResult::Accepted => None,
            LogResult::Error { error } => Some(error),
        }
    }
}

impl From<RecordError> for LogResult {
    fn from(error: RecordError) -> Self {
        LogResult::Error { error }
    }
}

fn serialize_display<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepted_serializes_status_only() {
        let result = LogResult::Accepted;
        assert_eq!(result.status(), LogResponseStatus::Accepted);
        assert!(result.error().is_none());
        assert_eq!(serde_json::to_value(&result).unwrap(), json!({ "status": "accepted" }));
    }

    #[test]
    fn error_serializes_message() {
        let result = LogResult::from(RecordError::Facility("disk full".into()));
        assert!(!result.is_accepted());
        assert_eq!(result.status(), LogResponseStatus::Error);
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "status": "error", "error": "logging facility failed: disk full" })
        );
    }
}
