use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "iterant",
    version,
    about = "Runs a directive-driven agent loop against an MCP tool server"
)]
pub struct Cli {
    /// Path to agent.toml (defaults to config/agent.toml)
    #[arg(long)]
    pub config: Option<String>,
    /// Preamble for the system instructions, overriding the config file
    #[arg(long)]
    pub system: Option<String>,
    #[arg(long)]
    pub prompt_file: Option<String>,
    /// Override the iteration limit (at least 1)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_iterations: Option<u64>,
    /// Task query; read from stdin or the config file when omitted
    #[arg()]
    pub query: Vec<String>,
}
