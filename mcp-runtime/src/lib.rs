//! MCP server exposing the Coolify REST API as tools over stdio.

use serde_json::{Map, Value, json};
use tokio::io::{self, AsyncBufRead, AsyncWrite, BufReader};
use tracing::Instrument;
use uuid::Uuid;

pub mod catalog;
pub mod client;
pub mod config;
pub mod dispatch;
mod framing;
mod util;

pub use client::{CoolifyClient, CoolifyConfig};
pub use config::{ConfigError, ConfigSources, USAGE};
pub use dispatch::{Operation, ToolError, ToolResult, dispatch};

use catalog::{ToolDefinition, tool_definitions};
use framing::{read_frame, write_frame};

const MCP_PROTOCOL_VERSION: &str = "2024-11-05";
const MCP_SERVER_NAME: &str = "coolify-mcp";
const MCP_INSTRUCTIONS: &str = "Each tool maps to one Coolify API call. Resources are addressed by \
UUID; use the list_* tools to discover them. Failed calls return isError with the Coolify status \
and message.";

/// Serve MCP on stdin/stdout until input ends. Returns the process exit code.
pub async fn run(config: CoolifyConfig) -> i32 {
    let client = match CoolifyClient::new(&config) {
        Ok(client) => client,
        Err(err) => {
            tracing::error!(error = %err, "failed to build Coolify client");
            return 1;
        }
    };
    let server = McpServer::new(client);
    tracing::info!(
        base_url = server.client.base_url(),
        tools = tool_definitions().len(),
        session_id = %server.session_id,
        version = env!("CARGO_PKG_VERSION"),
        "coolify mcp server starting"
    );

    let mut reader = BufReader::new(io::stdin());
    let mut writer = io::stdout();
    match server.serve(&mut reader, &mut writer).await {
        Ok(()) => {
            tracing::info!("stdin closed, shutting down");
            0
        }
        Err(err) => {
            tracing::error!(error = %err, "mcp transport failed");
            1
        }
    }
}

pub struct McpServer {
    client: CoolifyClient,
    session_id: String,
}

impl McpServer {
    pub fn new(client: CoolifyClient) -> Self {
        Self {
            client,
            session_id: format!("stdio-{}", Uuid::now_v7()),
        }
    }

    /// Read messages from `reader` and answer on `writer` until EOF.
    ///
    /// Each reply uses the framing of the request it answers. Only transport
    /// failures end the loop; malformed messages get a JSON-RPC error reply.
    pub async fn serve<R, W>(&self, reader: &mut R, writer: &mut W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let span = tracing::info_span!("mcp_session", session_id = %self.session_id);
        async move {
            while let Some(frame) = read_frame(&mut *reader).await? {
                let reply = match serde_json::from_slice::<Value>(&frame.payload) {
                    Ok(incoming) => self.handle_incoming_message(incoming).await,
                    Err(e) => {
                        tracing::warn!(error = %e, "unparseable mcp message");
                        Some(error_response(
                            Value::Null,
                            RpcError::parse_error(format!("Invalid JSON payload: {e}")),
                        ))
                    }
                };
                if let Some(reply) = reply {
                    write_frame(&mut *writer, &reply, frame.framing).await?;
                }
            }
            Ok::<(), io::Error>(())
        }
        .instrument(span)
        .await
    }

    /// Answer one decoded message. `None` when nothing should be sent back,
    /// e.g. for notifications or a batch made only of notifications.
    pub async fn handle_incoming_message(&self, incoming: Value) -> Option<Value> {
        let batch = match incoming {
            Value::Array(batch) => batch,
            single => return self.handle_single_message(single).await,
        };

        if batch.is_empty() {
            return Some(error_response(
                Value::Null,
                RpcError::invalid_request("Batch request must not be empty"),
            ));
        }
        let mut responses = Vec::new();
        for item in batch {
            if let Some(response) = self.handle_single_message(item).await {
                responses.push(response);
            }
        }
        (!responses.is_empty()).then_some(Value::Array(responses))
    }

    async fn handle_single_message(&self, incoming: Value) -> Option<Value> {
        let Some(obj) = incoming.as_object() else {
            return Some(error_response(
                Value::Null,
                RpcError::invalid_request("Request must be a JSON object"),
            ));
        };

        if obj.get("jsonrpc").and_then(Value::as_str) != Some("2.0") {
            tracing::warn!("rejected message without jsonrpc 2.0 marker");
            let id = obj.get("id").cloned().unwrap_or(Value::Null);
            return Some(error_response(
                id,
                RpcError::invalid_request("jsonrpc must be '2.0'"),
            ));
        }

        // No method means a client response; this server never sends requests.
        let method = obj.get("method").and_then(Value::as_str)?;

        let params = obj.get("params").cloned().unwrap_or(Value::Null);
        match obj.get("id").cloned() {
            Some(id) => Some(match self.handle_request(method, params).await {
                Ok(payload) => success_response(id, payload),
                Err(err) => {
                    tracing::warn!(method, code = err.code, error = %err.message, "rpc error");
                    error_response(id, err)
                }
            }),
            None => {
                tracing::debug!(method, "notification");
                None
            }
        }
    }

    async fn handle_request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        match method {
            "initialize" => Ok(initialize_payload()),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(tools_list_payload()),
            "tools/call" => self.handle_tools_call(params).await,
            _ => Err(RpcError::method_not_found(method)),
        }
    }

    async fn handle_tools_call(&self, params: Value) -> Result<Value, RpcError> {
        let params = params
            .as_object()
            .ok_or_else(|| RpcError::invalid_params("tools/call params must be an object"))?;

        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| RpcError::invalid_params("tools/call requires string field 'name'"))?;

        let args = match params.get("arguments") {
            Some(Value::Object(map)) => map.clone(),
            Some(Value::Null) | None => Map::new(),
            Some(_) => {
                return Err(RpcError::invalid_params(
                    "tools/call 'arguments' must be an object",
                ));
            }
        };

        tracing::debug!(tool = name, "tool call");
        Ok(dispatch(&self.client, name, &args).await.to_value())
    }
}

fn initialize_payload() -> Value {
    json!({
        "protocolVersion": MCP_PROTOCOL_VERSION,
        "capabilities": {
            "tools": {
                "listChanged": false
            }
        },
        "serverInfo": {
            "name": MCP_SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION")
        },
        "instructions": MCP_INSTRUCTIONS
    })
}

fn tools_list_payload() -> Value {
    let tools: Vec<Value> = tool_definitions()
        .iter()
        .map(ToolDefinition::to_value)
        .collect();
    json!({ "tools": tools })
}

#[derive(Debug)]
struct RpcError {
    code: i64,
    message: String,
}

impl RpcError {
    fn parse_error(message: impl Into<String>) -> Self {
        Self {
            code: -32700,
            message: message.into(),
        }
    }

    fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            code: -32600,
            message: message.into(),
        }
    }

    fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: format!("Method not found: {method}"),
        }
    }

    fn invalid_params(message: impl Into<String>) -> Self {
        Self {
            code: -32602,
            message: message.into(),
        }
    }
}

fn success_response(id: Value, result: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result
    })
}

fn error_response(id: Value, error: RpcError) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": {
            "code": error.code,
            "message": error.message
        }
    })
}
