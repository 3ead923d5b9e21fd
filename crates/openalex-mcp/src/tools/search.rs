//! Search tools: search_papers, search_papers_by_author.

use serde_json::json;

use super::{McpTool, ToolContext};
use crate::config::api;
use crate::error::{ToolError, ToolResult};
use crate::formatters;
use crate::models::{SearchByAuthorInput, SearchPapersInput};

/// Free-text paper search tool.
pub struct SearchPapersTool;

#[async_trait::async_trait]
impl McpTool for SearchPapersTool {
    fn name(&self) -> &'static str {
        "search_papers"
    }

    fn description(&self) -> &'static str {
        "Search for papers matching the given query. Returns the most cited \
         matches with title, year, leading authors, citation count and a \
         paper:// resource URI for each."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search terms for finding relevant papers"
                },
                "limit": {
                    "type": "integer",
                    "default": api::DEFAULT_LIMIT,
                    "minimum": 1,
                    "maximum": api::MAX_PER_PAGE,
                    "description": "Maximum number of results to return"
                }
            },
            "required": ["query"]
        })
    }

    fn error_context(&self) -> &'static str {
        "Error searching papers"
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: SearchPapersInput = serde_json::from_value(input)?;
        let limit = params.limit.unwrap_or(api::DEFAULT_LIMIT);

        tracing::info!(query = %params.query, limit, "Searching papers");

        if params.query.trim().is_empty() {
            return Err(ToolError::validation("query", "Search query cannot be empty"));
        }

        let works = ctx.client.search_works(&params.query, limit).await?;
        Ok(formatters::format_search_summary(&params.query, &works))
    }
}

/// Search papers by author name.
pub struct SearchPapersByAuthorTool;

impl SearchPapersByAuthorTool {
    /// Build the structured author-field query sent to `/works?search=`.
    #[must_use]
    pub fn author_query(author: &str) -> String {
        format!("author.display_name:\"{}\"", author.trim())
    }
}

#[async_trait::async_trait]
impl McpTool for SearchPapersByAuthorTool {
    fn name(&self) -> &'static str {
        "search_papers_by_author"
    }

    fn description(&self) -> &'static str {
        "Search for papers by a specific author, most cited first."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "author": {
                    "type": "string",
                    "description": "Author name to search for"
                },
                "limit": {
                    "type": "integer",
                    "default": api::DEFAULT_LIMIT,
                    "minimum": 1,
                    "maximum": api::MAX_PER_PAGE,
                    "description": "Maximum number of results to return"
                }
            },
            "required": ["author"]
        })
    }

    fn error_context(&self) -> &'static str {
        "Error searching papers by author"
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: SearchByAuthorInput = serde_json::from_value(input)?;
        let limit = params.limit.unwrap_or(api::DEFAULT_LIMIT);

        tracing::info!(author = %params.author, limit, "Searching papers by author");

        let author = params.author.trim();
        if author.is_empty() {
            return Err(ToolError::validation("author", "Author name cannot be empty"));
        }

        let query = Self::author_query(author);
        let works = ctx.client.search_works(&query, limit).await?;
        Ok(formatters::format_search_summary(&format!("Papers by {author}"), &works))
    }
}
