use super::error::SessionError;
use super::interface::{ServerToolInfo, ToolSession};
use crate::config::ServerConfig;
use crate::constants::MCP_PROTOCOL_VERSION;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::{Mutex as AsyncMutex, oneshot};
use tracing::{debug, info, warn};

type Responder = oneshot::Sender<Result<Value, SessionError>>;

/// A stdio MCP server owned by exactly one run.
///
/// The child process is killed on [`McpSession::shutdown`], and also when the
/// session is dropped without one.
pub struct McpSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    server: ServerConfig,
    child: AsyncMutex<Option<Child>>,
    writer: AsyncMutex<Option<BufWriter<ChildStdin>>>,
    pending: AsyncMutex<HashMap<String, Responder>>,
    id_counter: AtomicU64,
    instructions: AsyncMutex<Option<String>>,
}

impl McpSession {
    /// Spawn the server and complete the `initialize` handshake.
    pub async fn connect(server: &ServerConfig) -> Result<Self, SessionError> {
        info!(server = %server.name, command = %server.command.display(), "Launching MCP server");
        let mut command = Command::new(&server.command);
        command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        if let Some(dir) = &server.workdir {
            command.current_dir(dir);
        }
        command.args(&server.args);
        for (key, value) in &server.env {
            command.env(key, value);
        }

        let mut child = command.spawn().map_err(|source| SessionError::Spawn {
            server: server.name.clone(),
            source,
        })?;

        let transport_error = |message: &str| SessionError::Transport {
            server: server.name.clone(),
            message: message.to_string(),
        };
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| transport_error("failed to capture server stdin"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| transport_error("failed to capture server stdout"))?;

        let inner = Arc::new(SessionInner {
            server: server.clone(),
            child: AsyncMutex::new(Some(child)),
            writer: AsyncMutex::new(Some(BufWriter::new(stdin))),
            pending: AsyncMutex::new(HashMap::new()),
            id_counter: AtomicU64::new(1),
            instructions: AsyncMutex::new(None),
        });

        tokio::spawn(reader_loop(Arc::downgrade(&inner), stdout));

        let session = Self { inner };
        if let Err(err) = session.inner.initialize().await {
            session.shutdown().await;
            return Err(err);
        }
        debug!(server = %session.inner.server.name, "MCP session initialised");
        Ok(session)
    }

    pub fn server_name(&self) -> &str {
        &self.inner.server.name
    }

    /// Server-provided usage guidance from the `initialize` result.
    pub async fn instructions(&self) -> Option<String> {
        self.inner.instructions.lock().await.clone()
    }

    /// Kill and reap the server process; pending requests fail with `Terminated`.
    pub async fn shutdown(&self) {
        info!(server = %self.inner.server.name, "Shutting down MCP server");
        self.inner.close().await;
    }
}

#[async_trait]
impl ToolSession for McpSession {
    async fn list_tools(&self) -> Result<Vec<ServerToolInfo>, SessionError> {
        let mut tools = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let params = match &cursor {
                Some(cursor) => json!({ "cursor": cursor }),
                None => json!({}),
            };
            let result = self.inner.send_request("tools/list", params).await?;
            tools.extend(parse_tool_list(&result));
            cursor = result
                .get("nextCursor")
                .and_then(Value::as_str)
                .map(str::to_string);
            if cursor.is_none() {
                break;
            }
        }
        Ok(tools)
    }

    async fn invoke(&self, tool: &str, arguments: Value) -> Result<Value, SessionError> {
        let params = json!({
            "name": tool,
            "arguments": match arguments {
                Value::Null => Value::Object(Default::default()),
                other => other,
            }
        });
        self.inner.send_request("tools/call", params).await
    }
}

impl SessionInner {
    async fn initialize(&self) -> Result<(), SessionError> {
        let params = json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "clientInfo": {
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
            },
            "capabilities": {}
        });
        let init_result = self.send_request("initialize", params).await?;
        if let Some(text) = init_result.get("instructions").and_then(Value::as_str) {
            *self.instructions.lock().await = Some(text.to_string());
        }
        self.send_notification("notifications/initialized", json!({}))
            .await
    }

    async fn process_inbound_message(&self, value: Value) -> Result<(), SessionError> {
        let id = value.get("id").cloned();
        let method = value
            .get("method")
            .and_then(Value::as_str)
            .map(str::to_string);
        match (id, method) {
            (Some(id), Some(method)) => self.handle_server_request(id, &method).await,
            (Some(id), None) => {
                self.handle_response(id, value).await;
                Ok(())
            }
            (None, Some(method)) => {
                debug!(server = %self.server.name, method = %method, "received notification from server");
                Ok(())
            }
            (None, None) => Ok(()),
        }
    }

    async fn handle_response(&self, id: Value, value: Value) {
        let Some(key) = response_key(&id) else {
            return;
        };

        let responder = self.pending.lock().await.remove(&key);
        let Some(sender) = responder else {
            debug!(
                server = %self.server.name,
                response_id = %key,
                "received response for unknown request"
            );
            return;
        };

        let outcome = match value.get("error") {
            Some(error) => Err(SessionError::Rpc {
                server: self.server.name.clone(),
                code: error.get("code").and_then(Value::as_i64).unwrap_or(-32000),
                message: error
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown error")
                    .to_string(),
            }),
            None => Ok(value.get("result").cloned().unwrap_or(Value::Null)),
        };
        let _ = sender.send(outcome);
    }

    async fn handle_server_request(&self, id: Value, method: &str) -> Result<(), SessionError> {
        if method == "ping" {
            return self
                .write_message(&json!({ "jsonrpc": "2.0", "id": id, "result": {} }))
                .await;
        }

        warn!(server = %self.server.name, method, "server sent unsupported request");
        self.write_message(&json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": {
                "code": -32601,
                "message": format!("client does not implement method '{method}'"),
            }
        }))
        .await
    }

    async fn send_request(&self, method: &str, params: Value) -> Result<Value, SessionError> {
        let id = self.next_id();
        let (tx, rx) = oneshot::channel();
        self.pending.lock().await.insert(id.clone(), tx);

        let payload = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params
        });
        if let Err(err) = self.write_message(&payload).await {
            self.pending.lock().await.remove(&id);
            return Err(err);
        }

        match rx.await {
            Ok(outcome) => outcome,
            Err(_) => Err(SessionError::Cancelled {
                server: self.server.name.clone(),
            }),
        }
    }

    async fn send_notification(&self, method: &str, params: Value) -> Result<(), SessionError> {
        self.write_message(&json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params
        }))
        .await
    }

    async fn write_message(&self, message: &Value) -> Result<(), SessionError> {
        let mut encoded =
            serde_json::to_string(message).map_err(|source| SessionError::InvalidJson {
                server: self.server.name.clone(),
                source,
            })?;
        encoded.push('\n');

        let mut writer = self.writer.lock().await;
        let stream = writer.as_mut().ok_or_else(|| SessionError::Closed {
            server: self.server.name.clone(),
        })?;
        let transport = |source: std::io::Error| SessionError::Transport {
            server: self.server.name.clone(),
            message: source.to_string(),
        };
        stream.write_all(encoded.as_bytes()).await.map_err(transport)?;
        stream.flush().await.map_err(transport)
    }

    async fn close(&self) {
        self.writer.lock().await.take();

        if let Some(mut child) = self.child.lock().await.take() {
            if let Err(err) = child.kill().await {
                debug!(
                    server = %self.server.name,
                    %err,
                    "failed to kill MCP server process (may have already exited)"
                );
            }
        }

        let mut pending = self.pending.lock().await;
        for (_, sender) in pending.drain() {
            let _ = sender.send(Err(SessionError::Terminated {
                server: self.server.name.clone(),
            }));
        }
    }

    fn next_id(&self) -> String {
        let id = self.id_counter.fetch_add(1, Ordering::SeqCst);
        format!("req-{id}")
    }
}

async fn reader_loop(session: Weak<SessionInner>, stdout: ChildStdout) {
    let mut lines = BufReader::new(stdout).lines();
    while let Ok(Some(raw)) = lines.next_line().await {
        let Some(inner) = session.upgrade() else {
            return;
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('\u{1b}') {
            debug!(server = %inner.server.name, line = trimmed, "skipping ANSI log line from MCP server");
            continue;
        }
        match serde_json::from_str::<Value>(trimmed) {
            Ok(value) => {
                if let Err(err) = inner.process_inbound_message(value).await {
                    warn!(server = %inner.server.name, %err, "failed to process message from MCP server");
                }
            }
            Err(source) => {
                warn!(
                    server = %inner.server.name,
                    line = trimmed,
                    %source,
                    "received invalid JSON from MCP server"
                );
            }
        }
    }

    if let Some(inner) = session.upgrade() {
        debug!(server = %inner.server.name, "MCP server output closed");
        inner.close().await;
    }
}

fn response_key(id: &Value) -> Option<String> {
    match id {
        Value::String(value) => Some(value.clone()),
        Value::Number(num) => Some(num.to_string()),
        _ => None,
    }
}

fn parse_tool_list(result: &Value) -> Vec<ServerToolInfo> {
    result
        .get("tools")
        .and_then(Value::as_array)
        .map(|tools| {
            tools
                .iter()
                .filter_map(|tool| {
                    let name = tool.get("name").and_then(Value::as_str)?;
                    Some(ServerToolInfo {
                        name: name.to_string(),
                        description: tool
                            .get("description")
                            .and_then(Value::as_str)
                            .map(str::to_string),
                        input_schema: tool.get("inputSchema").cloned(),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_list_entries_without_names_are_skipped() {
        let result = json!({
            "tools": [
                {"name": "add", "description": "Add two numbers", "inputSchema": {"type": "object"}},
                {"description": "nameless"},
                {"name": "open_paint"}
            ]
        });

        let tools = parse_tool_list(&result);
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0].description.as_deref(), Some("Add two numbers"));
        assert_eq!(tools[1].name, "open_paint");
        assert!(tools[1].input_schema.is_none());
        assert!(parse_tool_list(&json!({})).is_empty());
    }

    #[test]
    fn response_keys_accept_strings_and_numbers() {
        assert_eq!(response_key(&json!("req-3")), Some("req-3".to_string()));
        assert_eq!(response_key(&json!(7)), Some("7".to_string()));
        assert_eq!(response_key(&Value::Null), None);
    }

    #[tokio::test]
    async fn missing_executable_fails_to_spawn() {
        let server = ServerConfig {
            name: "ghost".into(),
            command: "/nonexistent/iterant-test-server".into(),
            args: Vec::new(),
            env: HashMap::new(),
            workdir: None,
        };
        let err = McpSession::connect(&server).await.err().expect("spawn fails");
        assert!(matches!(err, SessionError::Spawn { ref server, .. } if server == "ghost"));
    }
}
