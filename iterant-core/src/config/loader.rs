use super::CONFIG_PATH;
use super::agent::{AgentSettings, RawAgentSettings};
use super::error::ConfigError;
use super::provider::{ModelProviderConfig, RawProviderConfig};
use super::server::{RawServer, ServerConfig};
use crate::constants::ENV_PATHS;
use dotenvy::from_filename;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Once;
use tracing::debug;

static ENV_LOADER: Once = Once::new();

/// Raw configuration structure for deserialization from TOML
#[derive(Debug, Deserialize, Default)]
pub(super) struct RawConfig {
    pub model: Option<String>,
    pub default_provider: Option<String>,
    pub query: Option<String>,
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub agent: RawAgentSettings,
    pub server: Option<RawServer>,
    #[serde(default)]
    pub providers: Vec<RawProviderConfig>,
}

/// Ensures environment variables are loaded from the known .env files
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        for path in ENV_PATHS {
            if from_filename(path).is_ok() {
                debug!(path, "Loaded environment file");
            }
        }
    });
}

/// Load and validate configuration from a file path
pub fn load_config(path: Option<&Path>) -> Result<super::AppConfig, ConfigError> {
    ensure_env_loaded();
    let config_path = path.unwrap_or_else(|| Path::new(CONFIG_PATH));
    read_config(config_path)
}

fn read_config(path: &Path) -> Result<super::AppConfig, ConfigError> {
    debug!(path = %path.display(), "Reading agent configuration file");

    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    parse_config(&content, path)
}

pub(super) fn parse_config(content: &str, path: &Path) -> Result<super::AppConfig, ConfigError> {
    let parsed: RawConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_and_build(parsed)
}

fn validate_and_build(parsed: RawConfig) -> Result<super::AppConfig, ConfigError> {
    let model = parsed.model.ok_or(ConfigError::MissingModel)?;
    let default_provider = parsed
        .default_provider
        .ok_or(ConfigError::MissingDefaultProvider)?;

    if parsed.providers.is_empty() {
        return Err(ConfigError::NoProvidersConfigured);
    }

    let mut providers: Vec<ModelProviderConfig> = Vec::new();
    for raw_provider in parsed.providers {
        if raw_provider.endpoint.is_none() {
            return Err(ConfigError::MissingEndpoint {
                provider: raw_provider.id.clone(),
            });
        }
        providers.push(ModelProviderConfig::from(raw_provider));
    }
    let Some(provider) = providers.iter_mut().find(|p| p.id == default_provider) else {
        return Err(ConfigError::ProviderNotFound {
            provider: default_provider,
        });
    };
    provider.ensure_model(&model);

    let server = parsed.server.ok_or(ConfigError::MissingServer)?;

    Ok(super::AppConfig {
        default_provider,
        model,
        query: parsed.query.filter(|q| !q.trim().is_empty()),
        system_prompt: parsed.system_prompt,
        agent: AgentSettings::try_from(parsed.agent)?,
        server: ServerConfig::from(server),
        providers,
    })
}
