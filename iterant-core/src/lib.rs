//! # iterant-core
//!
//! Drives a single-line directive protocol between a language model and an
//! MCP tool server. One run prompts the model, parses `FUNCTION_CALL`,
//! `CALCULATION_ANSWER` and `FINAL_ANSWER` lines, dispatches tool calls
//! against the session and feeds their results into the next prompt.

pub mod application;
pub mod config;
pub mod constants;
pub mod domain;
pub mod infrastructure;

pub use application::{agent, gateway, tooling};
pub use config::{AgentSettings, AppConfig, ConfigError, ModelProviderConfig, ServerConfig};
pub use domain::types;
pub use infrastructure::model;
