mod coercion;
mod execution;
mod instructions;

use std::collections::HashSet;
use std::time::Duration;

use crate::application::tooling::{ToolCatalog, ToolSession};

pub use coercion::coerce_arguments;
pub use execution::{ToolCall, normalize_result};
pub(super) use instructions::compose_prompt;

/// Pause applied after calls to tools that drive an external application.
#[derive(Debug, Clone, Default)]
pub struct SettlePolicy {
    delay: Duration,
    tools: HashSet<String>,
}

impl SettlePolicy {
    pub fn new<I, S>(delay: Duration, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            delay,
            tools: tools.into_iter().map(Into::into).collect(),
        }
    }

    pub fn delay_for(&self, tool: &str) -> Option<Duration> {
        (!self.delay.is_zero() && self.tools.contains(tool)).then_some(self.delay)
    }
}

/// Tool access for a single run: the catalog fetched at run start and the
/// session it came from.
pub struct ToolRuntime<'s> {
    catalog: ToolCatalog,
    session: &'s dyn ToolSession,
    settle: SettlePolicy,
}

impl<'s> ToolRuntime<'s> {
    pub fn new(catalog: ToolCatalog, session: &'s dyn ToolSession, settle: SettlePolicy) -> Self {
        Self {
            catalog,
            session,
            settle,
        }
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }
}
