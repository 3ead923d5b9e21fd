//! Paper lookup tool: get_paper.

use serde_json::json;

use super::{McpTool, ToolContext};
use crate::client::normalize_work_id;
use crate::error::{ToolError, ToolResult};
use crate::formatters;
use crate::models::GetPaperInput;

/// Full details for a single paper.
pub struct GetPaperTool;

#[async_trait::async_trait]
impl McpTool for GetPaperTool {
    fn name(&self) -> &'static str {
        "get_paper"
    }

    fn description(&self) -> &'static str {
        "Get detailed information about a specific paper: publication info, \
         authors with institutions, abstract and links. Accepts a bare OpenAlex \
         ID (W2741809807) or an OpenAlex URL."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "paper_id": {
                    "type": "string",
                    "description": "The OpenAlex ID of the paper (e.g., 'W2741809807')"
                }
            },
            "required": ["paper_id"]
        })
    }

    fn error_context(&self) -> &'static str {
        "Error fetching paper"
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: GetPaperInput = serde_json::from_value(input)?;

        tracing::info!(paper_id = %params.paper_id, "Getting paper");

        if normalize_work_id(&params.paper_id).is_empty() {
            return Err(ToolError::validation("paper_id", "Paper ID cannot be empty"));
        }

        let work = ctx.client.get_work(&params.paper_id).await?;
        Ok(formatters::format_paper_details(&work))
    }
}
