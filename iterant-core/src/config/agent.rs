//! Loop tuning knobs read from the optional `[agent]` table.

use super::defaults::{
    DEFAULT_COMPLETION_TIMEOUT_SECS, DEFAULT_MAX_ITERATIONS, DEFAULT_SETTLE_DELAY_MS,
    DEFAULT_SETTLE_TOOLS,
};
use super::error::ConfigError;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSettings {
    pub max_iterations: usize,
    pub completion_timeout: Duration,
    pub settle_delay: Duration,
    pub settle_tools: Vec<String>,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            completion_timeout: Duration::from_secs(DEFAULT_COMPLETION_TIMEOUT_SECS),
            settle_delay: Duration::from_millis(DEFAULT_SETTLE_DELAY_MS),
            settle_tools: DEFAULT_SETTLE_TOOLS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub(crate) struct RawAgentSettings {
    max_iterations: Option<usize>,
    completion_timeout_secs: Option<u64>,
    settle_delay_ms: Option<u64>,
    settle_tools: Option<Vec<String>>,
}

impl TryFrom<RawAgentSettings> for AgentSettings {
    type Error = ConfigError;

    fn try_from(raw: RawAgentSettings) -> Result<Self, Self::Error> {
        let defaults = AgentSettings::default();

        if raw.max_iterations == Some(0) {
            return Err(ConfigError::InvalidAgentSetting {
                field: "max_iterations",
                reason: "must be greater than zero".into(),
            });
        }

        let completion_timeout = match raw.completion_timeout_secs {
            Some(0) => {
                return Err(ConfigError::InvalidAgentSetting {
                    field: "completion_timeout_secs",
                    reason: "must be greater than zero".into(),
                });
            }
            Some(secs) => Duration::from_secs(secs),
            None => defaults.completion_timeout,
        };

        Ok(Self {
            max_iterations: raw.max_iterations.unwrap_or(defaults.max_iterations),
            completion_timeout,
            settle_delay: raw
                .settle_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.settle_delay),
            settle_tools: raw.settle_tools.unwrap_or(defaults.settle_tools),
        })
    }
}
