//! Provider factory - creates clients from config

use super::clients::{GeminiClient, OllamaClient};
use super::traits::ModelProvider;
use crate::config::ModelProviderConfig;
use std::env;
use std::sync::Arc;
use tracing::warn;

/// Resolve API key from the environment variable named in config
pub fn resolve_api_key(provider: &str, spec: Option<&str>) -> Option<String> {
    let raw = spec.map(str::trim)?;
    if raw.is_empty() {
        return None;
    }
    match env::var(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(
                provider,
                env_var = raw,
                %err,
                "API key environment variable is not set"
            );
            None
        }
    }
}

/// Factory for creating model providers from provider config.
pub struct ProviderFactory;

impl ProviderFactory {
    /// Creates a provider based on provider type.
    ///
    /// - `gemini`, `google` → Gemini `generateContent`
    /// - `ollama` → Ollama `/api/generate`
    /// - Others → Ollama-style with a warning
    pub fn create(config: &ModelProviderConfig) -> Arc<dyn ModelProvider> {
        match config.provider_type.to_lowercase().as_str() {
            "gemini" | "google" | "google-ai" => Arc::new(GeminiClient::from_config(config)),
            "ollama" | "localai" => Arc::new(OllamaClient::from_config(config)),
            other => {
                warn!(
                    provider = config.id.as_str(),
                    provider_type = other,
                    "Unknown provider type, using Ollama-compatible client"
                );
                Arc::new(OllamaClient::from_config(config))
            }
        }
    }
}
