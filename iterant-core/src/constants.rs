//! Application constants
//!
//! Single source of truth for paths and protocol literals.

/// Default configuration file path
pub const CONFIG_PATH: &str = "config/agent.toml";

/// Environment files loaded before the configuration is read
pub const ENV_PATHS: [&str; 2] = [".env", "config/.env"];

/// Default Gemini API path (fallback when not specified in config)
pub const DEFAULT_GEMINI_API_PATH: &str = "v1beta/models";

/// MCP protocol revision announced during `initialize`
pub const MCP_PROTOCOL_VERSION: &str = "2025-06-18";

pub const FUNCTION_CALL_PREFIX: &str = "FUNCTION_CALL:";
pub const CALCULATION_ANSWER_PREFIX: &str = "CALCULATION_ANSWER:";
pub const FINAL_ANSWER_PREFIX: &str = "FINAL_ANSWER:";

/// Cue appended to the query body once the run has context to report
pub const NEXT_STEP_CUE: &str = "  What should I do next?";
