use async_trait::async_trait;
use serde_json::Value;

use super::error::SessionError;

/// A tool entry from `tools/list`, schema left as raw JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerToolInfo {
    pub name: String,
    pub description: Option<String>,
    pub input_schema: Option<Value>,
}

/// The remote tool-invocation service used by one run.
#[async_trait]
pub trait ToolSession: Send + Sync {
    async fn list_tools(&self) -> Result<Vec<ServerToolInfo>, SessionError>;

    /// Returns the raw `tools/call` result object.
    async fn invoke(&self, tool: &str, arguments: Value) -> Result<Value, SessionError>;
}
