//! # Application Module
//!
//! ## Submodules
//!
//! - [`gateway`] - Timeout-bounded access to the completion provider
//! - [`tooling`] - MCP tool session, its transport and the tool catalog
//! - [`agent`] - The directive loop that ties the two together

pub mod agent;
pub mod gateway;
pub mod tooling;
