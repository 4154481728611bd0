use super::error::SessionError;
use super::interface::{ServerToolInfo, ToolSession};
use crate::domain::types::{ParamKind, ToolDescriptor, ToolParameter};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{info, warn};

/// The tools a session offers, fetched once per run.
#[derive(Debug, Clone, Default)]
pub struct ToolCatalog {
    tools: Vec<ToolDescriptor>,
}

impl ToolCatalog {
    pub async fn fetch(session: &dyn ToolSession) -> Result<Self, SessionError> {
        let infos = session.list_tools().await?;
        let catalog = Self::from_infos(infos);
        info!(tools = catalog.len(), "Retrieved tool catalog");
        Ok(catalog)
    }

    pub fn from_infos(infos: Vec<ServerToolInfo>) -> Self {
        let mut seen = HashSet::new();
        let mut tools = Vec::with_capacity(infos.len());
        for info in infos {
            if !seen.insert(info.name.clone()) {
                warn!(tool = %info.name, "Duplicate tool name in catalog, keeping the first");
                continue;
            }
            tools.push(describe(info));
        }
        Self { tools }
    }

    pub fn find(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Numbered, one tool per line, for the system prompt.
    pub fn render(&self) -> String {
        self.tools
            .iter()
            .enumerate()
            .map(|(index, tool)| tool.catalog_line(index + 1))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn describe(info: ServerToolInfo) -> ToolDescriptor {
    let parameters = info
        .input_schema
        .as_ref()
        .and_then(|schema| schema.get("properties"))
        .and_then(Value::as_object)
        .map(|properties| {
            properties
                .iter()
                .map(|(name, spec)| ToolParameter {
                    name: name.clone(),
                    kind: ParamKind::from_schema_type(
                        spec.get("type").and_then(Value::as_str).unwrap_or("unknown"),
                    ),
                })
                .collect()
        })
        .unwrap_or_default();

    ToolDescriptor {
        name: info.name,
        description: info.description,
        parameters,
    }
}
