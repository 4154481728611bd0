use serde::Serialize;
use std::fmt;

/// Declared JSON-schema type of a tool parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum ParamKind {
    Integer,
    Number,
    Array,
    String,
    /// Any other declared type; coerced as a plain string.
    Other(String),
}

impl ParamKind {
    pub fn from_schema_type(value: &str) -> Self {
        match value {
            "integer" => ParamKind::Integer,
            "number" => ParamKind::Number,
            "array" => ParamKind::Array,
            "string" => ParamKind::String,
            other => ParamKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ParamKind::Integer => "integer",
            ParamKind::Number => "number",
            ParamKind::Array => "array",
            ParamKind::String => "string",
            ParamKind::Other(name) => name,
        }
    }
}

impl From<ParamKind> for String {
    fn from(kind: ParamKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolParameter {
    pub name: String,
    pub kind: ParamKind,
}

/// A callable tool as announced by the session, with parameters in declared order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: Option<String>,
    pub parameters: Vec<ToolParameter>,
}

impl ToolDescriptor {
    /// One catalog line, e.g. `3. add(a: integer, b: integer) - Add two numbers`.
    pub fn catalog_line(&self, position: usize) -> String {
        let params = if self.parameters.is_empty() {
            "no parameters".to_string()
        } else {
            self.parameters
                .iter()
                .map(|param| format!("{}: {}", param.name, param.kind))
                .collect::<Vec<_>>()
                .join(", ")
        };
        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .unwrap_or("No description available");
        format!("{position}. {}({params}) - {description}", self.name)
    }
}

/// Normalized outcome of a tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallResult {
    Scalar(String),
    Sequence(Vec<String>),
}

impl CallResult {
    /// Flat display form stored in the conversation history.
    pub fn summary(&self) -> String {
        match self {
            CallResult::Scalar(text) => text.clone(),
            CallResult::Sequence(items) => format!("[{}]", items.join(", ")),
        }
    }
}

impl fmt::Display for CallResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_summary_is_bracketed_and_comma_joined() {
        let result = CallResult::Sequence(vec!["73".into(), "78".into()]);
        assert_eq!(result.summary(), "[73, 78]");
        assert_eq!(CallResult::Scalar("5".into()).summary(), "5");
        assert_eq!(CallResult::Sequence(Vec::new()).summary(), "[]");
    }

    #[test]
    fn catalog_line_lists_parameters_in_order() {
        let tool = ToolDescriptor {
            name: "draw_rectangle".into(),
            description: Some("Draw a rectangle in Paint".into()),
            parameters: vec![
                ToolParameter {
                    name: "x1".into(),
                    kind: ParamKind::Integer,
                },
                ToolParameter {
                    name: "y1".into(),
                    kind: ParamKind::Integer,
                },
            ],
        };
        assert_eq!(
            tool.catalog_line(2),
            "2. draw_rectangle(x1: integer, y1: integer) - Draw a rectangle in Paint"
        );

        let bare = ToolDescriptor {
            name: "open_paint".into(),
            description: None,
            parameters: Vec::new(),
        };
        assert_eq!(
            bare.catalog_line(1),
            "1. open_paint(no parameters) - No description available"
        );
    }
}
