mod error;
mod interface;
mod process;
mod registry;

pub use error::SessionError;
pub use interface::{ServerToolInfo, ToolSession};
pub use process::McpSession;
pub use registry::ToolCatalog;
