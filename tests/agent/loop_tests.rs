// Agent loop tests - full runs through the public iterant_core API
//
// A scripted model drives the ASCII/exponential-sum task against an
// in-memory tool session.

use async_trait::async_trait;
use iterant_core::agent::{AgentOptions, LoopController, Termination, parse_directives};
use iterant_core::gateway::CompletionGateway;
use iterant_core::model::{ModelError, ModelProvider, ModelRequest, ModelResponse};
use iterant_core::tooling::{ServerToolInfo, SessionError, ToolSession};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;

struct ScriptedModel {
    replies: Mutex<Vec<&'static str>>,
}

impl ScriptedModel {
    fn new(mut replies: Vec<&'static str>) -> Self {
        replies.reverse();
        Self {
            replies: Mutex::new(replies),
        }
    }
}

#[async_trait]
impl ModelProvider for ScriptedModel {
    fn id(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, _request: ModelRequest) -> Result<ModelResponse, ModelError> {
        let reply = self.replies.lock().unwrap().pop().unwrap_or("");
        Ok(ModelResponse::new(reply))
    }
}

struct AsciiTools {
    calls: Mutex<Vec<(String, Value)>>,
}

#[async_trait]
impl ToolSession for AsciiTools {
    async fn list_tools(&self) -> Result<Vec<ServerToolInfo>, SessionError> {
        Ok(vec![
            ServerToolInfo {
                name: "strings_to_chars_to_int".into(),
                description: Some("Return the ASCII values of the characters in a word".into()),
                input_schema: Some(json!({
                    "type": "object",
                    "properties": {"string": {"type": "string"}}
                })),
            },
            ServerToolInfo {
                name: "int_list_to_exponential_sum".into(),
                description: Some("Return sum of exponentials of numbers in a list".into()),
                input_schema: Some(json!({
                    "type": "object",
                    "properties": {"int_list": {"type": "array"}}
                })),
            },
        ])
    }

    async fn invoke(&self, tool: &str, arguments: Value) -> Result<Value, SessionError> {
        self.calls
            .lock()
            .unwrap()
            .push((tool.to_string(), arguments.clone()));
        match tool {
            "strings_to_chars_to_int" => {
                let word = arguments["string"].as_str().unwrap_or_default();
                let content: Vec<Value> = word
                    .chars()
                    .map(|c| json!({"type": "text", "text": (c as u32).to_string()}))
                    .collect();
                Ok(json!({"content": content}))
            }
            "int_list_to_exponential_sum" => {
                let sum: f64 = arguments["int_list"]
                    .as_array()
                    .map(|items| items.iter().filter_map(Value::as_f64).map(f64::exp).sum())
                    .unwrap_or(0.0);
                Ok(json!({"content": [{"type": "text", "text": sum.to_string()}]}))
            }
            other => Err(SessionError::Rpc {
                server: "ascii".into(),
                code: -32602,
                message: format!("unknown tool {other}"),
            }),
        }
    }
}

fn controller(replies: Vec<&'static str>, max_iterations: usize) -> LoopController {
    let gateway = CompletionGateway::new(
        Arc::new(ScriptedModel::new(replies)),
        "scripted-model",
        Duration::from_secs(10),
    );
    let options = AgentOptions {
        max_iterations,
        settle_delay: Duration::ZERO,
        ..AgentOptions::default()
    };
    LoopController::new(gateway, options)
}

#[tokio::test]
async fn solves_the_ascii_exponential_task() {
    let tools = AsciiTools {
        calls: Mutex::new(Vec::new()),
    };
    let agent = controller(
        vec![
            "FUNCTION_CALL: strings_to_chars_to_int|INDIA",
            "FUNCTION_CALL: int_list_to_exponential_sum|[73, 78, 68, 73, 65]",
            "FINAL_ANSWER: [7.59982224609308e+33]",
        ],
        9,
    );

    let outcome = agent
        .run(&tools, "Find the ASCII values of characters in INDIA and then return sum of exponentials of those values.")
        .await
        .expect("run starts");

    assert_eq!(outcome.final_answer(), Some("[7.59982224609308e+33]"));
    assert_eq!(outcome.iterations, 3);
    assert_eq!(outcome.history.len(), 2);
    assert!(outcome.history[0].ends_with("the function returned [73, 78, 68, 73, 65]."));

    let calls = tools.calls.lock().unwrap();
    assert_eq!(calls[0].1, json!({"string": "INDIA"}));
    assert_eq!(calls[1].1, json!({"int_list": [73, 78, 68, 73, 65]}));
}

#[tokio::test]
async fn bad_arguments_are_reported_and_the_run_recovers() {
    let tools = AsciiTools {
        calls: Mutex::new(Vec::new()),
    };
    let agent = controller(
        vec![
            "FUNCTION_CALL: int_list_to_exponential_sum|[73, seventy]",
            "FUNCTION_CALL: int_list_to_exponential_sum|[0]",
            "FINAL_ANSWER: [1]",
        ],
        9,
    );

    let outcome = agent.run(&tools, "Sum").await.expect("run starts");

    assert_eq!(outcome.final_answer(), Some("[1]"));
    assert!(outcome.history[0].starts_with("Error in iteration 1: invalid array value"));
    assert!(outcome.history[1].starts_with("In iteration 2 you called int_list_to_exponential_sum"));
    assert_eq!(outcome.last_result.as_deref(), Some("[1]"));
    assert_eq!(tools.calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn chatter_without_directives_runs_out_the_budget() {
    let tools = AsciiTools {
        calls: Mutex::new(Vec::new()),
    };
    let agent = controller(vec!["I am not sure yet.", "Still thinking."], 3);

    let outcome = agent.run(&tools, "Sum").await.expect("run starts");

    assert!(matches!(outcome.termination, Termination::IterationLimit));
    assert_eq!(outcome.iterations, 3);
    assert!(outcome.history.is_empty());
    assert_eq!(outcome.last_result, None);
}

#[test]
fn parser_is_usable_on_its_own() {
    let names: Vec<String> = parse_directives("FUNCTION_CALL: open_paint\nnoise\nFINAL_ANSWER: [1]")
        .map(|directive| directive.to_string())
        .collect();
    assert_eq!(names, vec!["FUNCTION_CALL: open_paint", "FINAL_ANSWER: [1]"]);
}
