//! Model infrastructure module
//!
//! Completion providers behind a single trait, built from configuration.
//!
//! # Structure
//! - `types` - Request, Response, Error types
//! - `traits` - ModelProvider trait
//! - `factory` - Provider factory for creating clients
//! - `clients` - Individual client implementations

pub mod clients;
pub mod factory;
pub mod traits;
pub mod types;

pub use factory::ProviderFactory;
pub use traits::ModelProvider;
pub use types::{ModelError, ModelRequest, ModelResponse};
