//! JSON-RPC 2.0 types and MCP method dispatch.
//!
//! Shared by the stdio and HTTP transports. Each request is handled on its
//! own; nothing is kept between calls.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::McpServer;

/// Protocol version reported when the client does not send one.
pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

/// JSON-RPC error codes.
pub mod codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// JSON-RPC 2.0 request.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Value,
    #[serde(default)]
    pub id: Option<Value>,
}

impl JsonRpcRequest {
    /// Notifications carry no id and expect no response.
    #[must_use]
    pub fn is_notification(&self) -> bool {
        self.id.is_none() || self.method.starts_with("notifications/")
    }
}

/// JSON-RPC 2.0 response.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: Cow<'static, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    pub id: Option<Value>,
}

/// JSON-RPC 2.0 error.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    /// JSON-RPC version constant.
    const VERSION: &'static str = "2.0";

    #[must_use]
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self { jsonrpc: Cow::Borrowed(Self::VERSION), result: Some(result), error: None, id }
    }

    #[must_use]
    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: Cow::Borrowed(Self::VERSION),
            result: None,
            error: Some(JsonRpcError { code, message: message.into(), data: None }),
            id,
        }
    }

    /// Serialize `result` into a success response.
    #[must_use]
    pub fn from_serializable<T: Serialize>(id: Option<Value>, result: &T) -> Self {
        match serde_json::to_value(result) {
            Ok(value) => Self::success(id, value),
            Err(e) => Self::error(id, codes::INTERNAL_ERROR, format!("Serialization error: {e}")),
        }
    }
}

/// Parse a raw frame and dispatch it.
///
/// Returns `None` when no response should be written (notifications).
pub async fn handle_frame(server: &McpServer, frame: &str) -> Option<JsonRpcResponse> {
    match serde_json::from_str::<JsonRpcRequest>(frame) {
        Ok(request) => handle_request(server, &request).await,
        Err(e) => Some(JsonRpcResponse::error(None, codes::PARSE_ERROR, format!("Parse error: {e}"))),
    }
}

/// Dispatch a parsed request.
pub async fn handle_request(server: &McpServer, req: &JsonRpcRequest) -> Option<JsonRpcResponse> {
    tracing::debug!(method = %req.method, "Received request");

    if req.is_notification() {
        tracing::debug!(method = %req.method, "Notification received");
        return None;
    }

    let id = req.id.clone();
    let response = match req.method.as_str() {
        "initialize" => handle_initialize(server, id, &req.params),
        "ping" => JsonRpcResponse::success(id, json!({})),
        "tools/list" => handle_tools_list(server, id),
        "tools/call" => handle_tools_call(server, id, &req.params).await,
        "resources/list" => JsonRpcResponse::success(id, json!({ "resources": [] })),
        "resources/templates/list" => handle_resource_templates_list(server, id),
        "resources/read" => handle_resources_read(server, id, &req.params).await,
        "prompts/list" => handle_prompts_list(server, id),
        "prompts/get" => handle_prompts_get(server, id, &req.params),
        _ => JsonRpcResponse::error(
            id,
            codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", req.method),
        ),
    };

    Some(response)
}

fn handle_initialize(server: &McpServer, id: Option<Value>, params: &Value) -> JsonRpcResponse {
    let protocol_version = params
        .get("protocolVersion")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_PROTOCOL_VERSION);

    tracing::info!("MCP initialize: protocol version {}", protocol_version);

    JsonRpcResponse::success(
        id,
        json!({
            "protocolVersion": protocol_version,
            "capabilities": {
                "tools": {},
                "resources": {},
                "prompts": {}
            },
            "serverInfo": {
                "name": server.app_name(),
                "version": env!("CARGO_PKG_VERSION")
            }
        }),
    )
}

fn handle_tools_list(server: &McpServer, id: Option<Value>) -> JsonRpcResponse {
    let tools: Vec<Value> = server
        .tools()
        .iter()
        .map(|t| {
            json!({
                "name": t.name(),
                "description": t.description(),
                "inputSchema": t.input_schema()
            })
        })
        .collect();

    JsonRpcResponse::success(id, json!({ "tools": tools }))
}

async fn handle_tools_call(server: &McpServer, id: Option<Value>, params: &Value) -> JsonRpcResponse {
    let Some(tool_name) = params.get("name").and_then(Value::as_str) else {
        return JsonRpcResponse::error(id, codes::INVALID_PARAMS, "Missing 'name' parameter");
    };

    let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

    match server.call_tool(tool_name, arguments).await {
        Some(envelope) => JsonRpcResponse::from_serializable(id, &envelope),
        None => JsonRpcResponse::error(
            id,
            codes::INVALID_PARAMS,
            format!("Tool not found: {tool_name}"),
        ),
    }
}

fn handle_resource_templates_list(server: &McpServer, id: Option<Value>) -> JsonRpcResponse {
    let templates: Vec<Value> = server
        .resources()
        .iter()
        .map(|r| {
            json!({
                "uriTemplate": r.uri_template(),
                "name": r.name(),
                "description": r.description(),
                "mimeType": r.mime_type()
            })
        })
        .collect();

    JsonRpcResponse::success(id, json!({ "resourceTemplates": templates }))
}

async fn handle_resources_read(
    server: &McpServer,
    id: Option<Value>,
    params: &Value,
) -> JsonRpcResponse {
    let Some(uri) = params.get("uri").and_then(Value::as_str) else {
        return JsonRpcResponse::error(id, codes::INVALID_PARAMS, "Missing 'uri' parameter");
    };

    match server.read_resource(uri).await {
        Some(contents) => JsonRpcResponse::from_serializable(id, &json!({ "contents": [contents] })),
        None => JsonRpcResponse::error(id, codes::INVALID_PARAMS, format!("Resource not found: {uri}")),
    }
}

fn handle_prompts_list(server: &McpServer, id: Option<Value>) -> JsonRpcResponse {
    let prompts: Vec<Value> = server
        .prompts()
        .iter()
        .map(|p| {
            json!({
                "name": p.name(),
                "description": p.description(),
                "arguments": p.arguments()
            })
        })
        .collect();

    JsonRpcResponse::success(id, json!({ "prompts": prompts }))
}

fn handle_prompts_get(server: &McpServer, id: Option<Value>, params: &Value) -> JsonRpcResponse {
    let Some(name) = params.get("name").and_then(Value::as_str) else {
        return JsonRpcResponse::error(id, codes::INVALID_PARAMS, "Missing 'name' parameter");
    };

    let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

    let Some(prompt) = server.prompts().iter().find(|p| p.name() == name) else {
        return JsonRpcResponse::error(id, codes::INVALID_PARAMS, format!("Prompt not found: {name}"));
    };

    match prompt.get(arguments) {
        Ok(result) => JsonRpcResponse::from_serializable(id, &result),
        Err(e) => {
            tracing::warn!(prompt = %name, error = %e, "Prompt rendering failed");
            JsonRpcResponse::error(id, codes::INVALID_PARAMS, e.to_user_message())
        }
    }
}
