use crate::application::tooling::SessionError;
use crate::domain::types::ParamKind;
use thiserror::Error;

/// Failures that prevent a run from starting.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("failed to start tool session: {0}")]
    Session(#[source] SessionError),
    #[error("failed to load tool catalog: {0}")]
    Catalog(#[source] SessionError),
}

/// Failures of a single FUNCTION_CALL; they end the current reply, not the run.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("tool not found: {0}")]
    UnknownTool(String),
    #[error("insufficient arguments for '{tool}': expected {expected}, got {provided}")]
    InsufficientArguments {
        tool: String,
        expected: usize,
        provided: usize,
    },
    #[error("invalid {kind} value '{value}' for parameter '{parameter}' of '{tool}'")]
    InvalidArgument {
        tool: String,
        parameter: String,
        kind: ParamKind,
        value: String,
    },
    #[error("failed to execute tool '{tool}': {source}")]
    Invocation {
        tool: String,
        #[source]
        source: SessionError,
    },
}

impl ToolError {
    /// True for failures raised before the session was contacted.
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            ToolError::InsufficientArguments { .. } | ToolError::InvalidArgument { .. }
        )
    }
}
