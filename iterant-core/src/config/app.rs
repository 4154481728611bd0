use super::agent::AgentSettings;
use super::error::ConfigError;
use super::provider::ModelProviderConfig;
use super::server::ServerConfig;
use std::path::Path;

/// Application configuration loaded from agent.toml
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub default_provider: String,
    pub model: String,
    pub query: Option<String>,
    pub system_prompt: Option<String>,
    pub agent: AgentSettings,
    pub server: ServerConfig,
    pub providers: Vec<ModelProviderConfig>,
}

impl AppConfig {
    /// Load configuration from a file path (or default path if None)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        super::loader::load_config(path)
    }

    /// Parse configuration from TOML text without touching the filesystem
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        super::loader::parse_config(content, Path::new("<inline>"))
    }

    /// The provider named by `default_provider`
    pub fn active_provider(&self) -> Option<&ModelProviderConfig> {
        self.providers
            .iter()
            .find(|provider| provider.id == self.default_provider)
    }
}
