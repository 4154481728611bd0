use super::directive::Directive;
use super::errors::{AgentError, ToolError};
use super::models::{AgentOptions, RunOutcome, Termination};
use super::parser::parse_directives;
use super::runtime::{SettlePolicy, ToolRuntime, compose_prompt};
use super::state::ConversationState;
use crate::application::gateway::CompletionGateway;
use crate::application::tooling::{McpSession, ToolCatalog, ToolSession};
use crate::config::ServerConfig;
use crate::config::defaults::DEFAULT_SYSTEM_PROMPT;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

/// What applying one completion's directives amounted to.
#[derive(Debug)]
enum DirectiveOutcome {
    Continue,
    IterationFailure(ToolError),
    Final(String),
}

/// Drives runs of the directive loop. Holds configuration only; every run
/// starts from a fresh [`ConversationState`].
pub struct LoopController {
    gateway: CompletionGateway,
    options: AgentOptions,
}

impl LoopController {
    pub fn new(gateway: CompletionGateway, options: AgentOptions) -> Self {
        Self { gateway, options }
    }

    /// Starts the configured tool server, runs the loop against it and shuts
    /// the server down again, whatever the run's outcome.
    pub async fn run_with_server(
        &self,
        server: &ServerConfig,
        query: &str,
    ) -> Result<RunOutcome, AgentError> {
        let session = McpSession::connect(server)
            .await
            .map_err(AgentError::Session)?;
        let guidance = session.instructions().await;
        debug!(
            server = session.server_name(),
            has_guidance = guidance.is_some(),
            "Tool session ready"
        );

        let outcome = self.drive(&session, query, guidance.as_deref()).await;
        session.shutdown().await;
        outcome
    }

    /// Runs the loop against an already connected session.
    pub async fn run(
        &self,
        session: &dyn ToolSession,
        query: &str,
    ) -> Result<RunOutcome, AgentError> {
        self.drive(session, query, None).await
    }

    async fn drive(
        &self,
        session: &dyn ToolSession,
        query: &str,
        guidance: Option<&str>,
    ) -> Result<RunOutcome, AgentError> {
        let run_id = Uuid::new_v4();
        let span = info_span!("run", %run_id);
        self.run_loop(run_id, session, query, guidance)
            .instrument(span)
            .await
    }

    async fn run_loop(
        &self,
        run_id: Uuid,
        session: &dyn ToolSession,
        query: &str,
        guidance: Option<&str>,
    ) -> Result<RunOutcome, AgentError> {
        info!(
            model = self.gateway.model(),
            max_iterations = self.options.max_iterations,
            timeout_secs = self.gateway.timeout().as_secs(),
            "Agent run started"
        );

        let catalog = ToolCatalog::fetch(session)
            .await
            .map_err(AgentError::Catalog)?;
        let settle = SettlePolicy::new(
            self.options.settle_delay,
            self.options.settle_tools.iter().cloned(),
        );
        let runtime = ToolRuntime::new(catalog, session, settle);
        if runtime.catalog().is_empty() {
            warn!("Tool session offers no tools");
        }
        let system = runtime.compose_system_instructions(&self.preamble(guidance));

        let mut state = ConversationState::new(query);
        while state.iteration() < self.options.max_iterations {
            let iteration = state.iteration() + 1;
            info!(iteration, "Starting iteration");

            let prompt = compose_prompt(&system, state.next_query_body());
            debug!(iteration, %prompt, "Submitting prompt");

            let reply = match self.gateway.complete(&prompt).await {
                Ok(reply) => reply,
                Err(err) => {
                    warn!(iteration, error = %err, "Completion failed, ending run");
                    return Ok(state.finish(run_id, Termination::CompletionFailed(err)));
                }
            };
            debug!(iteration, %reply, "Received completion");

            match apply_directives(&runtime, &mut state, &reply).await {
                DirectiveOutcome::Continue => {}
                DirectiveOutcome::IterationFailure(err) => {
                    warn!(iteration, error = %err, "Iteration failed, skipping remaining directives");
                    state.record_failure(&err);
                }
                DirectiveOutcome::Final(answer) => {
                    state.advance();
                    info!(iteration, answer = %answer, "Agent returned final answer");
                    return Ok(state.finish(run_id, Termination::FinalAnswer(answer)));
                }
            }
            state.advance();
        }

        info!(
            iterations = state.iteration(),
            "Iteration limit reached without a final answer"
        );
        Ok(state.finish(run_id, Termination::IterationLimit))
    }

    fn preamble(&self, guidance: Option<&str>) -> String {
        let base = self
            .options
            .system_prompt
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .unwrap_or(DEFAULT_SYSTEM_PROMPT);
        match guidance.map(str::trim).filter(|text| !text.is_empty()) {
            Some(notes) => format!("{base}\n\n{notes}"),
            None => base.to_string(),
        }
    }
}

async fn apply_directives(
    runtime: &ToolRuntime<'_>,
    state: &mut ConversationState,
    reply: &str,
) -> DirectiveOutcome {
    for directive in parse_directives(reply) {
        match directive {
            Directive::FunctionCall { name, raw_args } => {
                info!(tool = %name, "Model requested tool execution");
                match runtime.execute(&name, &raw_args).await {
                    Ok(call) => state.record_call(&call),
                    Err(err) => return DirectiveOutcome::IterationFailure(err),
                }
            }
            calculation @ Directive::CalculationAnswer { .. } => {
                info!(%calculation, "Recording calculation");
                state.record_calculation(calculation.to_string());
            }
            Directive::FinalAnswer { literal_text } => {
                return DirectiveOutcome::Final(literal_text);
            }
        }
    }
    DirectiveOutcome::Continue
}
