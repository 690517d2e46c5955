use crate::error::FacilityError;
use std::collections::HashMap;
use std::error::Error;
use tracing::Level;

/// Process-wide logging facility used by
/// [`crate::recorder::DefaultLoggerRecorder`].
///
/// A single long-lived instance is typically created at startup and shared
/// between recorders as `Arc<dyn LoggingFacility>`. Implementations must be
/// safe to call concurrently.
pub trait LoggingFacility: Send + Sync {
    /// Write one entry.
    ///
    /// **Parameters**
    /// - `level`: log level or event category, e.g. `warn` or `audit`.
    /// - `message`: fully rendered entry text.
    ///
    /// **Returns**
    /// - `Err(..)` if the facility refused or failed to write the entry.
    ///   Recorders turn this into an error result rather than propagating it.
    fn log(&self, level: &str, message: &str) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// [`LoggingFacility`] that emits every entry as a `tracing` event under the
/// `event_recorder` target.
///
/// Category names are mapped onto `tracing` levels; a name with no mapping
/// is rejected with [`FacilityError::UnknownLevel`].
#[derive(Debug, Clone)]
pub struct TracingFacility {
    levels: HashMap<String, Level>,
}

impl Default for TracingFacility {
    fn default() -> Self {
        let levels = [
            ("error", Level::ERROR),
            ("warn", Level::WARN),
            ("audit", Level::INFO),
            ("trace", Level::TRACE),
            ("info", Level::INFO),
            ("perf", Level::DEBUG),
            ("verbose", Level::DEBUG),
            ("debug", Level::DEBUG),
            ("silly", Level::TRACE),
        ]
        .into_iter()
        .map(|(name, level)| (name.to_string(), level))
        .collect();

        Self { levels }
    }
}

impl TracingFacility {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map an additional (or existing) category name to a `tracing` level.
    pub fn with_level(mut self, name: impl Into<String>, level: Level) -> Self {
        self.levels.insert(name.into(), level);
        self
    }

    pub fn level_for(&self, name: &str) -> Option<Level> {
        self.levels.get(name).copied()
    }
}

impl LoggingFacility for TracingFacility {
    fn log(&self, level: &str, message: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mapped = self
            .level_for(level)
            .ok_or_else(|| FacilityError::UnknownLevel(level.to_string()))?;

        // `tracing` needs the level at the callsite.
        match mapped {
            Level::ERROR => tracing::error!(target: "event_recorder", category = level, "{}", message),
            Level::WARN => tracing::warn!(target: "event_recorder", category = level, "{}", message),
            Level::INFO => tracing::info!(target: "event_recorder", category = level, "{}", message),
            Level::DEBUG => tracing::debug!(target: "event_recorder", category = level, "{}", message),
            _ => tracing::trace!(target: "event_recorder", category = level, "{}", message),
        }
        Ok(())
    }
}
