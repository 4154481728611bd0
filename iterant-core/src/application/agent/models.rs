use crate::application::gateway::CompletionError;
use crate::config::AgentSettings;
use crate::config::defaults::{DEFAULT_MAX_ITERATIONS, DEFAULT_SETTLE_DELAY_MS, DEFAULT_SETTLE_TOOLS};
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct AgentOptions {
    /// Preamble placed before the tool catalog in the system instructions
    pub system_prompt: Option<String>,
    pub max_iterations: usize,
    pub settle_delay: Duration,
    pub settle_tools: Vec<String>,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            system_prompt: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            settle_delay: Duration::from_millis(DEFAULT_SETTLE_DELAY_MS),
            settle_tools: DEFAULT_SETTLE_TOOLS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl AgentOptions {
    pub fn from_settings(settings: &AgentSettings, system_prompt: Option<String>) -> Self {
        Self {
            system_prompt,
            max_iterations: settings.max_iterations,
            settle_delay: settings.settle_delay,
            settle_tools: settings.settle_tools.clone(),
        }
    }
}

/// Why a run stopped.
#[derive(Debug)]
pub enum Termination {
    FinalAnswer(String),
    IterationLimit,
    CompletionFailed(CompletionError),
}

impl Termination {
    pub fn as_str(&self) -> &'static str {
        match self {
            Termination::FinalAnswer(_) => "final_answer",
            Termination::IterationLimit => "iteration_limit",
            Termination::CompletionFailed(_) => "completion_failed",
        }
    }
}

/// Everything a finished run leaves behind; the loop itself retains nothing.
#[derive(Debug)]
pub struct RunOutcome {
    pub run_id: Uuid,
    pub termination: Termination,
    pub iterations: usize,
    pub history: Vec<String>,
    pub last_result: Option<String>,
}

impl RunOutcome {
    pub fn final_answer(&self) -> Option<&str> {
        match &self.termination {
            Termination::FinalAnswer(answer) => Some(answer),
            _ => None,
        }
    }

    pub fn completion_error(&self) -> Option<&CompletionError> {
        match &self.termination {
            Termination::CompletionFailed(err) => Some(err),
            _ => None,
        }
    }
}
