use super::errors::ToolError;
use super::models::{RunOutcome, Termination};
use super::runtime::ToolCall;
use crate::constants::NEXT_STEP_CUE;
use serde_json::Value;
use uuid::Uuid;

/// Per-run conversation memory. Created when a run starts and consumed into
/// its [`RunOutcome`]; it never outlives the run.
#[derive(Debug, Clone)]
pub struct ConversationState {
    query: String,
    body: String,
    history: Vec<String>,
    last_result: Option<String>,
    iteration: usize,
}

impl ConversationState {
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        Self {
            body: query.clone(),
            query,
            history: Vec::new(),
            last_result: None,
            iteration: 0,
        }
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn last_result(&self) -> Option<&str> {
        self.last_result.as_deref()
    }

    /// Whether a tool or calculation result exists for the next prompt to report.
    pub fn has_context(&self) -> bool {
        self.last_result.is_some()
    }

    /// Query body for the upcoming iteration. Without a prior result it is
    /// the bare task query; afterwards the previous body is extended with the
    /// full history and the next-step cue.
    pub fn next_query_body(&mut self) -> &str {
        if self.has_context() {
            self.body = format!(
                "{}\n\n{}{NEXT_STEP_CUE}",
                self.body,
                self.history.join(" ")
            );
        } else {
            self.body.clone_from(&self.query);
        }
        &self.body
    }

    pub fn record_call(&mut self, call: &ToolCall) {
        let summary = call.result.summary();
        self.history.push(format!(
            "In iteration {} you called {} with args {}, and the function returned {}.",
            self.iteration + 1,
            call.tool,
            Value::Object(call.arguments.clone()),
            summary
        ));
        self.last_result = Some(summary);
    }

    pub fn record_calculation(&mut self, line: String) {
        self.history.push(line.clone());
        self.last_result = Some(line);
    }

    pub fn record_failure(&mut self, error: &ToolError) {
        self.history
            .push(format!("Error in iteration {}: {error}", self.iteration + 1));
    }

    /// Marks the current loop body as complete.
    pub fn advance(&mut self) {
        self.iteration += 1;
    }

    pub fn finish(self, run_id: Uuid, termination: Termination) -> RunOutcome {
        RunOutcome {
            run_id,
            termination,
            iterations: self.iteration,
            history: self.history,
            last_result: self.last_result,
        }
    }
}
