use crate::application::agent::errors::ToolError;
use crate::domain::types::{ParamKind, ToolDescriptor};
use serde_json::{Map, Number, Value};
use tracing::debug;

/// Converts positional string tokens into the tool's typed argument object,
/// keyed by parameter name in declared order.
pub fn coerce_arguments(
    tool: &ToolDescriptor,
    raw_args: &[String],
) -> Result<Map<String, Value>, ToolError> {
    let expected = tool.parameters.len();
    if raw_args.len() < expected {
        return Err(ToolError::InsufficientArguments {
            tool: tool.name.clone(),
            expected,
            provided: raw_args.len(),
        });
    }
    if raw_args.len() > expected {
        debug!(
            tool = %tool.name,
            ignored = raw_args.len() - expected,
            "Ignoring extra arguments"
        );
    }

    let mut arguments = Map::with_capacity(expected);
    for (param, raw) in tool.parameters.iter().zip(raw_args) {
        let value = coerce_value(&param.kind, raw).ok_or_else(|| ToolError::InvalidArgument {
            tool: tool.name.clone(),
            parameter: param.name.clone(),
            kind: param.kind.clone(),
            value: raw.clone(),
        })?;
        arguments.insert(param.name.clone(), value);
    }
    Ok(arguments)
}

fn coerce_value(kind: &ParamKind, raw: &str) -> Option<Value> {
    match kind {
        ParamKind::Integer => raw.trim().parse::<i64>().ok().map(Value::from),
        ParamKind::Number => raw
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number),
        ParamKind::Array => parse_integer_list(raw).map(Value::Array),
        ParamKind::String | ParamKind::Other(_) => Some(Value::String(raw.to_string())),
    }
}

fn parse_integer_list(raw: &str) -> Option<Vec<Value>> {
    let inner = raw.trim().trim_start_matches('[').trim_end_matches(']').trim();
    if inner.is_empty() {
        return Some(Vec::new());
    }
    inner
        .split(',')
        .map(|item| item.trim().parse::<i64>().ok().map(Value::from))
        .collect()
}
