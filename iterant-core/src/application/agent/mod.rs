//! # Agent Module
//!
//! The directive loop. Each iteration sends the system instructions plus the
//! accumulated query to the model, parses the reply line by line and applies
//! the directives it finds:
//!
//! 1. `FUNCTION_CALL: name|arg|...` coerces the arguments against the tool's
//!    schema and invokes it on the session
//! 2. `CALCULATION_ANSWER: ...` is recorded as an intermediate result
//! 3. `FINAL_ANSWER: ...` ends the run
//!
//! A failed tool call ends the current reply's directives but not the run.
//! A failed completion, or reaching the iteration limit, ends the run.

mod directive;
mod errors;
mod models;
mod parser;
mod runner;
mod runtime;
mod state;


pub use directive::Directive;
pub use errors::{AgentError, ToolError};
pub use models::{AgentOptions, RunOutcome, Termination};
pub use parser::{Directives, parse_directives};
pub use runner::LoopController;
pub use runtime::{SettlePolicy, ToolCall, ToolRuntime, coerce_arguments, normalize_result};
pub use state::ConversationState;
