use crate::error::ConfigError;
use crate::event::{EventType, LogEventAction};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// Environment variable names read by `RecorderConfig::from_env`.
// Recorders themselves never touch the environment.

/// Name of the generic log category, e.g. `log`.
pub const EVENT_RECORDER_LOG_CATEGORY_ENV: &str = "EVENT_RECORDER_LOG_CATEGORY";

/// Action assumed when an event carries no `metadata.event`.
pub const EVENT_RECORDER_DEFAULT_ACTION_ENV: &str = "EVENT_RECORDER_DEFAULT_ACTION";

/// Comma separated list of recognized log actions, e.g. `info,warn,error`.
pub const EVENT_RECORDER_LOG_ACTIONS_ENV: &str = "EVENT_RECORDER_LOG_ACTIONS";

/// Vocabulary used by [`crate::recorder::DefaultLoggerRecorder`] to pick
/// the facility level for an event.
///
/// **Fields**
/// - `log_category`: the generic log category. Only events of this type
///   may use their action as the facility level.
/// - `default_action`: action substituted, together with `log_category`,
///   for events without `metadata.event`.
/// - `log_actions`: closed set of actions recognized within
///   `log_category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderConfig {
    pub log_category: String,
    pub default_action: String,
    pub log_actions: BTreeSet<String>,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            log_category: EventType::Log.as_str().to_string(),
            default_action: LogEventAction::Info.as_str().to_string(),
            log_actions: LogEventAction::ALL.iter().map(|a| a.as_str().to_string()).collect(),
        }
    }
}

impl RecorderConfig {
    pub fn is_log_action(&self, action: &str) -> bool {
        self.log_actions.contains(action)
    }

    /// Build a configuration from the `EVENT_RECORDER_*` environment
    /// variables, falling back to [`RecorderConfig::default`] for any
    /// variable that is unset.
    ///
    /// **Returns**
    /// - `Err(ConfigError::Empty(..))` if a variable is set but blank, or
    ///   the action list contains no entries.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(category) = lookup(EVENT_RECORDER_LOG_CATEGORY_ENV) {
            config.log_category = non_empty(category, EVENT_RECORDER_LOG_CATEGORY_ENV)?;
        }
        if let Some(action) = lookup(EVENT_RECORDER_DEFAULT_ACTION_ENV) {
            config.default_action = non_empty(action, EVENT_RECORDER_DEFAULT_ACTION_ENV)?;
        }
        if let Some(actions) = lookup(EVENT_RECORDER_LOG_ACTIONS_ENV) {
            config.log_actions = actions
                .split(',')
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string)
                .collect();
            if config.log_actions.is_empty() {
                return Err(ConfigError::Empty(EVENT_RECORDER_LOG_ACTIONS_ENV));
            }
        }

        Ok(config)
    }
}

fn non_empty(value: String, key: &'static str) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ConfigError::Empty(key))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Read an environment variable or fall back to a provided default.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
