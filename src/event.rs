use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Structured record describing an occurrence to be logged.
///
/// Only `metadata.event.{type, action}` drive recorder behavior; every
/// other field is carried along untouched. Keys no typed field claims are
/// kept in the `extra` map of the struct they appear in, at every level, so
/// a message survives a deserialize/serialize cycle unchanged.
///
/// `extra` must not hold keys of typed fields; use
/// [`EventMessage::with_field`] to set arbitrary keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Content type of `content`, e.g. `application/json`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MessageMetadata>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EventMessage {
    /// Empty message: no metadata, no content.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_content(mut self, content_type: impl Into<String>, content: Value) -> Self {
        self.content_type = Some(content_type.into());
        self.content = Some(content);
        self
    }

    /// Attach event metadata, keeping any trace metadata already present.
    pub fn with_event(mut self, event: EventMetadata) -> Self {
        self.metadata.get_or_insert_with(MessageMetadata::default).event = Some(event);
        self
    }

    pub fn with_trace(mut self, trace: EventTraceMetadata) -> Self {
        self.metadata.get_or_insert_with(MessageMetadata::default).trace = Some(trace);
        self
    }

    /// Set a top-level key.
    ///
    /// Keys backed by a typed field (`id`, `type`, `content`, `from`, `to`,
    /// `pp`, `encoding`, `metadata`) replace that field, so the value the
    /// recorder reads and the value it writes out never disagree. `null`
    /// clears a typed field.
    ///
    /// **Returns**
    /// - `Err(..)` if `value` does not have the shape of the typed field,
    ///   e.g. `metadata` set to a number.
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Result<Self, serde_json::Error> {
        let key = key.into();
        match key.as_str() {
            "id" => self.id = serde_json::from_value(value)?,
            "type" => self.content_type = serde_json::from_value(value)?,
            "content" => self.content = (!value.is_null()).then_some(value),
            "from" => self.from = serde_json::from_value(value)?,
            "to" => self.to = serde_json::from_value(value)?,
            "pp" => self.pp = serde_json::from_value(value)?,
            "encoding" => self.encoding = serde_json::from_value(value)?,
            "metadata" => self.metadata = serde_json::from_value(value)?,
            _ => {
                self.extra.insert(key, value);
            }
        }
        Ok(self)
    }

    /// `metadata.event`, if both levels are present.
    pub fn event_metadata(&self) -> Option<&EventMetadata> {
        self.metadata.as_ref().and_then(|m| m.event.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<EventMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<EventTraceMetadata>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Category and action of an event plus bookkeeping about its origin.
///
/// `event_type` and `action` are plain strings: the recognized vocabulary
/// is configuration (see [`crate::config::RecorderConfig`]), and unknown
/// values must still round-trip. `created_at` is kept as the raw JSON value
/// producers sent (RFC 3339 string, epoch milliseconds, ...); read it with
/// [`EventMetadata::created_at_utc`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<EventStateMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_to: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EventMetadata {
    /// Metadata for an arbitrary `(type, action)` pair, stamped with the
    /// current time.
    pub fn new(event_type: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            event_type: Some(event_type.into()),
            action: Some(action.into()),
            created_at: Some(now()),
            ..Self::default()
        }
    }

    pub fn log(action: LogEventAction) -> Self {
        Self::new(EventType::Log.as_str(), action.as_str())
    }

    pub fn audit(action: AuditEventAction) -> Self {
        Self::new(EventType::Audit.as_str(), action.as_str())
    }

    pub fn trace(action: TraceEventAction) -> Self {
        Self::new(EventType::Trace.as_str(), action.as_str())
    }

    pub fn with_state(mut self, state: EventStateMetadata) -> Self {
        self.state = Some(state);
        self
    }

    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_ref().and_then(parse_timestamp)
    }
}

/// Outcome of the operation an event describes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventStateMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EventStateMetadata {
    pub fn success() -> Self {
        Self {
            status: Some(EventStatusType::Success.as_str().to_string()),
            ..Self::default()
        }
    }

    pub fn failed(code: i64, description: impl Into<String>) -> Self {
        Self {
            status: Some(EventStatusType::Failed.as_str().to_string()),
            code: Some(Value::from(code)),
            description: Some(description.into()),
            ..Self::default()
        }
    }
}

/// Distributed-trace context attached to an event.
///
/// Timestamps and sampling flags are raw JSON values; tracers disagree on
/// their encoding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTraceMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_span_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampled: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_timestamp: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_timestamp: Option<Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub tags: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EventTraceMetadata {
    pub fn start_utc(&self) -> Option<DateTime<Utc>> {
        self.start_timestamp.as_ref().and_then(parse_timestamp)
    }

    pub fn finish_utc(&self) -> Option<DateTime<Utc>> {
        self.finish_timestamp.as_ref().and_then(parse_timestamp)
    }
}

/// Read a timestamp sent either as epoch milliseconds (number or numeric
/// string) or as an RFC 3339 string.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n.as_i64().and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        Value::String(s) => match s.trim().parse::<i64>() {
            Ok(ms) => Utc.timestamp_millis_opt(ms).single(),
            Err(_) => DateTime::parse_from_rfc3339(s).ok().map(|t| t.with_timezone(&Utc)),
        },
        _ => None,
    }
}

fn now() -> Value {
    Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true))
}

macro_rules! vocabulary {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $value)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

vocabulary! {
    /// Event categories.
    EventType {
        Log => "log",
        Audit => "audit",
        Trace => "trace",
    }
}

vocabulary! {
    /// Actions within the `log` category. These double as facility levels.
    LogEventAction {
        Info => "info",
        Debug => "debug",
        Verbose => "verbose",
        Performance => "perf",
        Warning => "warn",
        Error => "error",
    }
}

vocabulary! {
    AuditEventAction {
        Default => "default",
        Start => "start",
        Finish => "finish",
        Ingress => "ingress",
        Egress => "egress",
    }
}

vocabulary! {
    TraceEventAction {
        Span => "span",
    }
}

vocabulary! {
    /// Values of `metadata.event.state.status`.
    EventStatusType {
        Success => "success",
        Failed => "failed",
    }
}
