//! Model traits

use super::types::{ModelError, ModelRequest, ModelResponse};
use async_trait::async_trait;

/// A text-completion backend.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Identifier used in logs and errors
    fn id(&self) -> &str;

    /// Generate a completion for a single prompt
    async fn complete(&self, request: ModelRequest) -> Result<ModelResponse, ModelError>;
}
