use super::ToolRuntime;
use super::coercion::coerce_arguments;
use crate::application::agent::errors::ToolError;
use crate::domain::types::CallResult;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

/// A tool call that reached the session and came back with a result.
#[derive(Debug, Clone)]
pub struct ToolCall {
    pub tool: String,
    pub arguments: Map<String, Value>,
    pub result: CallResult,
}

impl ToolRuntime<'_> {
    /// Resolves, coerces and invokes one FUNCTION_CALL.
    pub async fn execute(&self, name: &str, raw_args: &[String]) -> Result<ToolCall, ToolError> {
        let Some(tool) = self.catalog.find(name) else {
            warn!(requested_tool = %name, "Unknown tool requested by model");
            return Err(ToolError::UnknownTool(name.to_string()));
        };

        let arguments = coerce_arguments(tool, raw_args)?;
        let payload = Value::Object(arguments.clone());
        debug!(tool = %tool.name, arguments = %payload, "Dispatching tool call");

        let raw = self
            .session
            .invoke(&tool.name, payload)
            .await
            .map_err(|source| {
                warn!(tool = %tool.name, %source, "Tool invocation failed");
                ToolError::Invocation {
                    tool: tool.name.clone(),
                    source,
                }
            })?;

        if raw.get("isError").and_then(Value::as_bool).unwrap_or(false) {
            warn!(tool = %tool.name, "Tool reported an error result");
        }
        let result = normalize_result(&raw);
        info!(tool = %tool.name, result = %result, "Tool executed");

        if let Some(delay) = self.settle.delay_for(&tool.name) {
            debug!(tool = %tool.name, delay_ms = delay.as_millis() as u64, "Waiting for tool to settle");
            tokio::time::sleep(delay).await;
        }

        Ok(ToolCall {
            tool: tool.name.clone(),
            arguments,
            result,
        })
    }
}

/// Flattens a raw `tools/call` result into a [`CallResult`].
pub fn normalize_result(raw: &Value) -> CallResult {
    match raw.get("content") {
        Some(Value::Array(blocks)) => CallResult::Sequence(blocks.iter().map(render_block).collect()),
        Some(content) => CallResult::Scalar(render(content)),
        None => CallResult::Scalar(render(raw)),
    }
}

fn render_block(block: &Value) -> String {
    match block.get("text") {
        Some(text) => render(text),
        None => render(block),
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
