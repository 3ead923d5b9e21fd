//! MCP tool implementations.
//!
//! Each tool:
//! 1. Parses and validates its input parameters
//! 2. Calls the OpenAlex client
//! 3. Formats results as Markdown
//!
//! [`McpTool::call`] is the handler boundary: failures become an
//! `isError: true` envelope and never reach the transport as faults.

mod paper;
mod search;

pub use paper::GetPaperTool;
pub use search::{SearchPapersByAuthorTool, SearchPapersTool};

use std::sync::Arc;

use serde::Serialize;

use crate::client::OpenAlexClient;
use crate::error::ToolResult;

/// Tool execution context.
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// API client.
    pub client: Arc<OpenAlexClient>,
}

impl ToolContext {
    /// Create a new tool context.
    #[must_use]
    pub fn new(client: Arc<OpenAlexClient>) -> Self {
        Self { client }
    }
}

/// A single content block of a tool response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextContent {
    /// Always `"text"`.
    #[serde(rename = "type")]
    pub kind: &'static str,

    /// The text payload.
    pub text: String,
}

/// Response envelope: `{content: [{type: "text", text}], isError?: true}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallToolResult {
    /// Content blocks (always exactly one text block here).
    pub content: Vec<TextContent>,

    /// Set only on failure.
    #[serde(rename = "isError", skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl CallToolResult {
    /// Successful envelope carrying `text`.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self { content: vec![TextContent { kind: "text", text: text.into() }], is_error: false }
    }

    /// Error envelope carrying a human-readable message.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self { is_error: true, ..Self::text(message) }
    }

    /// The text of the first content block.
    #[must_use]
    pub fn first_text(&self) -> &str {
        self.content.first().map_or("", |c| c.text.as_str())
    }
}

/// Trait for MCP tools.
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Tool name (e.g., "search_papers").
    fn name(&self) -> &'static str;

    /// Tool description for LLM.
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters.
    fn input_schema(&self) -> serde_json::Value;

    /// Prefix used for error messages, e.g. "Error searching papers".
    fn error_context(&self) -> &'static str;

    /// Execute the tool with given input.
    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String>;

    /// Execute and wrap the outcome in a response envelope.
    async fn call(&self, ctx: &ToolContext, input: serde_json::Value) -> CallToolResult {
        match self.execute(ctx, input).await {
            Ok(text) => CallToolResult::text(text),
            Err(e) => {
                tracing::error!(tool = %self.name(), error = %e, "Tool execution failed");
                CallToolResult::error(e.render(self.error_context()))
            }
        }
    }
}

/// Register all tools.
#[must_use]
pub fn register_all_tools() -> Vec<Box<dyn McpTool>> {
    vec![
        Box::new(SearchPapersTool),
        Box::new(SearchPapersByAuthorTool),
        Box::new(GetPaperTool),
    ]
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_envelope_success_omits_is_error() {
        let value = serde_json::to_value(CallToolResult::text("hi")).unwrap();
        assert_eq!(value, json!({"content": [{"type": "text", "text": "hi"}]}));
    }

    #[test]
    fn test_envelope_error_sets_flag() {
        let value = serde_json::to_value(CallToolResult::error("boom")).unwrap();
        assert_eq!(value, json!({"content": [{"type": "text", "text": "boom"}], "isError": true}));
    }

    #[test]
    fn test_registered_tool_names() {
        let names: Vec<_> = register_all_tools().iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["search_papers", "search_papers_by_author", "get_paper"]);
    }
}
