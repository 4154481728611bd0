//! # Provider Configuration
//!
//! Connection settings for the model-completion service.
//!
//! | Type | Description | API Key Required |
//! |------|-------------|-----------------|
//! | `gemini` | Google Gemini API | Yes |
//! | `ollama` | Local Ollama server | No |

use serde::{Deserialize, Serialize};

/// Configuration for a model-completion provider.
///
/// # Example
///
/// ```toml
/// [[providers]]
/// id = "gemini"
/// type = "gemini"
/// endpoint = "https://generativelanguage.googleapis.com"
/// api_key = "GEMINI_API_KEY"
/// models = ["gemini-2.0-flash"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelProviderConfig {
    /// Unique identifier for this provider (e.g., "gemini", "ollama-local")
    pub id: String,
    /// The provider type determines API format: "gemini" or "ollama"
    #[serde(rename = "type")]
    pub provider_type: String,
    /// API endpoint URL
    pub endpoint: String,
    /// Name of the environment variable holding the API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Custom API path override (e.g., "v1beta/models" for Gemini)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_path: Option<String>,
    /// Models this provider serves; empty means any
    #[serde(default)]
    pub models: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct RawProviderConfig {
    pub(super) id: String,
    #[serde(rename = "type", default)]
    pub(super) provider_type: String,
    pub(super) endpoint: Option<String>,
    pub(super) api_key: Option<String>,
    #[serde(default)]
    pub(super) api_path: Option<String>,
    #[serde(default)]
    pub(super) models: Vec<String>,
}

impl From<RawProviderConfig> for ModelProviderConfig {
    fn from(raw: RawProviderConfig) -> Self {
        Self {
            id: raw.id,
            provider_type: raw.provider_type,
            endpoint: raw.endpoint.unwrap_or_default(),
            api_key: raw.api_key,
            api_path: raw.api_path,
            models: raw.models,
        }
    }
}

impl ModelProviderConfig {
    /// Ensure a model exists in this provider's model list
    pub fn ensure_model(&mut self, model: &str) {
        if !self.models.is_empty() && self.models.iter().all(|name| name != model) {
            self.models.push(model.to_string());
        }
    }

    pub fn supports(&self, model: &str) -> bool {
        self.models.is_empty() || self.models.iter().any(|name| name == model)
    }

    /// Check if this is an Ollama provider (case-insensitive).
    pub fn is_ollama(&self) -> bool {
        self.provider_type.eq_ignore_ascii_case("ollama")
    }

    /// Check if this is a Gemini provider (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use iterant_core::config::ModelProviderConfig;
    ///
    /// let provider = ModelProviderConfig {
    ///     id: "google".to_string(),
    ///     provider_type: "GEMINI".to_string(),
    ///     endpoint: "https://example.com".to_string(),
    ///     api_key: Some("GEMINI_API_KEY".to_string()),
    ///     api_path: None,
    ///     models: vec![],
    /// };
    /// assert!(provider.is_gemini());
    /// assert!(!provider.is_ollama());
    /// ```
    pub fn is_gemini(&self) -> bool {
        self.provider_type.eq_ignore_ascii_case("gemini")
    }
}
