// Config loading tests - AppConfig::load against files on disk
//
// Covers the validation order and the defaults applied to the [agent] table.

use iterant_core::config::{AppConfig, ConfigError};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::tempdir;

const PROVIDER: &str = r#"
[[providers]]
id = "gemini"
type = "gemini"
endpoint = "https://generativelanguage.googleapis.com"
api_key = "GEMINI_API_KEY"
models = ["gemini-1.5-flash"]
"#;

const SERVER: &str = r#"
[server]
name = "paint"
command = "python"
args = ["server.py", "dev"]
"#;

fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("agent.toml");
    fs::write(&path, content).expect("Failed to write config");
    path
}

#[test]
fn returns_error_when_file_not_found() {
    let result = AppConfig::load(Some(Path::new("/nonexistent/path/agent.toml")));
    assert!(matches!(result, Err(ConfigError::NotFound { .. })));
}

#[test]
fn returns_error_on_malformed_toml() {
    let dir = tempdir().expect("tempdir");
    let path = write_config(dir.path(), "model = \"unterminated");
    assert!(matches!(
        AppConfig::load(Some(&path)),
        Err(ConfigError::Parse { .. })
    ));
}

#[test]
fn returns_error_when_model_missing() {
    let dir = tempdir().expect("tempdir");
    let content = format!("default_provider = \"gemini\"\n{PROVIDER}{SERVER}");
    let path = write_config(dir.path(), &content);
    assert!(matches!(
        AppConfig::load(Some(&path)),
        Err(ConfigError::MissingModel)
    ));
}

#[test]
fn returns_error_when_default_provider_unknown() {
    let dir = tempdir().expect("tempdir");
    let content =
        format!("model = \"gemini-2.0-flash\"\ndefault_provider = \"ollama\"\n{PROVIDER}{SERVER}");
    let path = write_config(dir.path(), &content);
    match AppConfig::load(Some(&path)) {
        Err(ConfigError::ProviderNotFound { provider }) => assert_eq!(provider, "ollama"),
        other => panic!("expected ProviderNotFound, got {other:?}"),
    }
}

#[test]
fn returns_error_when_server_missing() {
    let dir = tempdir().expect("tempdir");
    let content = format!("model = \"gemini-2.0-flash\"\ndefault_provider = \"gemini\"\n{PROVIDER}");
    let path = write_config(dir.path(), &content);
    assert!(matches!(
        AppConfig::load(Some(&path)),
        Err(ConfigError::MissingServer)
    ));
}

#[test]
fn rejects_zero_iteration_limit() {
    let dir = tempdir().expect("tempdir");
    let content = format!(
        "model = \"gemini-2.0-flash\"\ndefault_provider = \"gemini\"\n\n[agent]\nmax_iterations = 0\n{PROVIDER}{SERVER}"
    );
    let path = write_config(dir.path(), &content);
    assert!(matches!(
        AppConfig::load(Some(&path)),
        Err(ConfigError::InvalidAgentSetting {
            field: "max_iterations",
            ..
        })
    ));
}

#[test]
fn loads_complete_config_with_agent_defaults() {
    let dir = tempdir().expect("tempdir");
    let content = format!(
        "model = \"gemini-2.0-flash\"\ndefault_provider = \"gemini\"\nquery = \"Add 2 and 3\"\n{PROVIDER}{SERVER}"
    );
    let path = write_config(dir.path(), &content);

    let config = AppConfig::load(Some(&path)).expect("config loads");
    assert_eq!(config.model, "gemini-2.0-flash");
    assert_eq!(config.query.as_deref(), Some("Add 2 and 3"));
    assert_eq!(config.agent.max_iterations, 9);
    assert_eq!(config.agent.completion_timeout, Duration::from_secs(10));
    assert_eq!(config.agent.settle_delay, Duration::from_millis(1000));
    assert_eq!(config.server.name, "paint");
    assert_eq!(config.server.args, vec!["server.py", "dev"]);

    let provider = config.active_provider().expect("active provider");
    assert!(provider.is_gemini());
    assert!(provider.supports("gemini-2.0-flash"));
    assert!(provider.supports("gemini-1.5-flash"));
}

#[test]
fn agent_table_overrides_defaults() {
    let dir = tempdir().expect("tempdir");
    let content = format!(
        r#"model = "llama3"
default_provider = "local"

[agent]
max_iterations = 4
completion_timeout_secs = 30
settle_delay_ms = 0
settle_tools = []

[[providers]]
id = "local"
type = "ollama"
endpoint = "http://127.0.0.1:11434"
{SERVER}"#
    );
    let path = write_config(dir.path(), &content);

    let config = AppConfig::load(Some(&path)).expect("config loads");
    assert_eq!(config.agent.max_iterations, 4);
    assert_eq!(config.agent.completion_timeout, Duration::from_secs(30));
    assert!(config.agent.settle_delay.is_zero());
    assert!(config.agent.settle_tools.is_empty());
    assert!(config.active_provider().expect("provider").is_ollama());
    assert_eq!(config.query, None);
}
