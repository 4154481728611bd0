mod cli;

use clap::Parser;
use cli::Cli;
use iterant_core::agent::{AgentOptions, LoopController, RunOutcome};
use iterant_core::config::AppConfig;
use iterant_core::gateway::CompletionGateway;
use iterant_core::model::ProviderFactory;
use serde_json::json;
use std::error::Error;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    init_tracing();
    let cli = Cli::parse();
    debug!(config = ?cli.config, max_iterations = ?cli.max_iterations, "CLI arguments parsed");

    let config_path = cli.config.as_deref().map(Path::new);
    let config = AppConfig::load(config_path)?;
    info!(
        provider = %config.default_provider,
        model = %config.model,
        server = %config.server.name,
        "Loaded configuration"
    );

    let query = load_query(&cli, &config)?;

    let provider_config = config
        .active_provider()
        .ok_or_else(|| format!("provider '{}' is not configured", config.default_provider))?;
    if !provider_config.supports(&config.model) {
        warn!(provider = %provider_config.id, model = %config.model, "Model is not listed for provider");
    }
    let provider = ProviderFactory::create(provider_config);
    let gateway = CompletionGateway::new(provider, config.model.clone(), config.agent.completion_timeout);

    let mut options = AgentOptions::from_settings(
        &config.agent,
        cli.system.clone().or_else(|| config.system_prompt.clone()),
    );
    if let Some(max_iterations) = cli.max_iterations {
        options.max_iterations = usize::try_from(max_iterations)?;
    }

    let controller = LoopController::new(gateway, options);
    let outcome = controller.run_with_server(&config.server, &query).await?;

    println!("{}", serde_json::to_string_pretty(&report(&outcome))?);
    info!(termination = outcome.termination.as_str(), "Run finished");

    if outcome.completion_error().is_some() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_level(true)
            .with_writer(io::stderr)
            .init();
    });
}

fn load_query(cli: &Cli, config: &AppConfig) -> Result<String, Box<dyn Error>> {
    if let Some(path) = &cli.prompt_file {
        info!(path = %path, "Loading query from file");
        let content = fs::read_to_string(path)?;
        return Ok(content.trim().to_string());
    }

    if !cli.query.is_empty() {
        info!("Using query provided through CLI arguments");
        return Ok(cli.query.join(" ").trim().to_string());
    }

    if !io::stdin().is_terminal() {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        if !buffer.trim().is_empty() {
            info!("Read query from standard input");
            return Ok(buffer.trim().to_string());
        }
    }

    if let Some(query) = &config.query {
        info!("Using query from configuration");
        return Ok(query.clone());
    }

    warn!("Query not provided via arguments, file, stdin, or config");
    Err("query required via arguments, --prompt-file, stdin, or config".into())
}

fn report(outcome: &RunOutcome) -> serde_json::Value {
    json!({
        "run_id": outcome.run_id.to_string(),
        "termination": outcome.termination.as_str(),
        "final_answer": outcome.final_answer(),
        "error": outcome.completion_error().map(|err| err.to_string()),
        "iterations": outcome.iterations,
        "last_result": outcome.last_result,
        "history": outcome.history,
    })
}
