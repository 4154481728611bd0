use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// How to launch the MCP tool server for a run.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    pub name: String,
    pub command: PathBuf,
    pub args: Vec<String>,
    pub env: HashMap<String, String>,
    pub workdir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawServer {
    #[serde(default = "default_server_name")]
    name: String,
    command: String,
    #[serde(default)]
    args: Vec<String>,
    #[serde(default)]
    env: HashMap<String, String>,
    workdir: Option<String>,
}

fn default_server_name() -> String {
    "tools".to_string()
}

impl From<RawServer> for ServerConfig {
    fn from(raw: RawServer) -> Self {
        let expand = |s: &str| -> String {
            shellexpand::full(s)
                .map(|cow| cow.into_owned())
                .unwrap_or_else(|_| s.to_string())
        };

        Self {
            name: raw.name,
            command: PathBuf::from(expand(&raw.command)),
            args: raw.args.iter().map(|arg| expand(arg)).collect(),
            env: raw.env,
            workdir: raw.workdir.map(|d| PathBuf::from(expand(&d))),
        }
    }
}
