//! Ollama client implementation

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::base::HttpClientBase;
use crate::config::ModelProviderConfig;
use crate::infrastructure::model::traits::ModelProvider;
use crate::infrastructure::model::types::{ModelError, ModelRequest, ModelResponse};

/// Client for an Ollama-style `POST /api/generate` endpoint
#[derive(Clone)]
pub struct OllamaClient {
    base: HttpClientBase,
}

impl OllamaClient {
    pub fn from_config(config: &ModelProviderConfig) -> Self {
        Self {
            base: HttpClientBase::new(config.id.clone(), config.endpoint.clone(), None),
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[async_trait]
impl ModelProvider for OllamaClient {
    fn id(&self) -> &str {
        &self.base.id
    }

    async fn complete(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        let url = self.base.build_url("api/generate");
        let body = GenerateRequest {
            model: &request.model,
            prompt: &request.prompt,
            stream: false,
        };

        info!(
            provider = self.base.id.as_str(),
            model = request.model.as_str(),
            prompt_chars = request.prompt.len(),
            "Sending request to Ollama"
        );

        let response: GenerateResponse = self.base.post_no_auth(&url, &body).await?;
        debug!("Received response from Ollama");
        Ok(ModelResponse::new(response.response))
    }
}
