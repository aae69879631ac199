//! Engine configuration.
//!
//! Configuration is fixed before the dispatcher starts. It can be built
//! fluently or loaded from JSON:
//!
//! ```rust
//! use fsm_dispatch::config::{EngineConfig, UnexpectedEventPolicy};
//!
//! let config = EngineConfig::from_json(r#"{ "unexpected_events": "flush", "max_steps": 1000 }"#).unwrap();
//! assert_eq!(config.unexpected_events, UnexpectedEventPolicy::Flush);
//! assert_eq!(config.trace_capacity, 256);
//!
//! let same = EngineConfig::new().flush_unexpected_events(true).max_steps(1000);
//! assert_eq!(config, same);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What the dispatcher does with an event that has no rule in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnexpectedEventPolicy {
    /// Discard the event and keep the current state
    Flush,

    /// Keep the event and offer it again after the next transition
    #[default]
    Hold,
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse engine configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid engine configuration: {reason}")]
    Invalid { reason: String },
}

/// Dispatcher settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Handling of events that match no rule
    pub unexpected_events: UnexpectedEventPolicy,

    /// Number of dispatch outcomes kept in the trace; zero disables tracing
    pub trace_capacity: usize,

    /// Tear the run loop down after this many dispatch steps
    pub max_steps: Option<u64>,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the flush (`true`) or hold (`false`) policy.
    pub fn flush_unexpected_events(mut self, flush: bool) -> Self {
        self.unexpected_events = if flush {
            UnexpectedEventPolicy::Flush
        } else {
            UnexpectedEventPolicy::Hold
        };
        self
    }

    pub fn trace_capacity(mut self, capacity: usize) -> Self {
        self.trace_capacity = capacity;
        self
    }

    pub fn max_steps(mut self, steps: u64) -> Self {
        self.max_steps = Some(steps);
        self
    }

    /// Parse and validate a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the run loop cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_steps == Some(0) {
            return Err(ConfigError::Invalid {
                reason: "max_steps must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            unexpected_events: UnexpectedEventPolicy::default(),
            trace_capacity: 256,
            max_steps: None,
        }
    }
}
