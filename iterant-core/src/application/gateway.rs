//! Completion gateway: one prompt in, generated text out, within a deadline.

use crate::model::{ModelError, ModelProvider, ModelRequest};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion timed out after {}s", .after.as_secs_f64())]
    Timeout { after: Duration },
    #[error(transparent)]
    Service(#[from] ModelError),
}

#[derive(Clone)]
pub struct CompletionGateway {
    provider: Arc<dyn ModelProvider>,
    model: String,
    timeout: Duration,
}

impl CompletionGateway {
    pub fn new(provider: Arc<dyn ModelProvider>, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            provider,
            model: model.into(),
            timeout,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the trimmed completion text.
    pub async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = ModelRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
        };

        debug!(
            provider = self.provider.id(),
            timeout_secs = self.timeout.as_secs_f64(),
            "Starting completion"
        );
        match timeout(self.timeout, self.provider.complete(request)).await {
            Ok(Ok(response)) => Ok(response.text.trim().to_string()),
            Ok(Err(err)) => {
                warn!(provider = self.provider.id(), %err, "Completion failed");
                Err(CompletionError::Service(err))
            }
            Err(_) => {
                warn!(provider = self.provider.id(), "Completion timed out");
                Err(CompletionError::Timeout {
                    after: self.timeout,
                })
            }
        }
    }
}
