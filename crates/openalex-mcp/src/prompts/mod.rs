//! MCP prompts.
//!
//! Prompts are pure templates: they validate arguments and return a single
//! user-role message. No network access.

use serde::Serialize;
use serde_json::Value;

use crate::client::clamp_limit;
use crate::config::api;
use crate::error::{ToolError, ToolResult};
use crate::models::{FindPapersByAuthorArgs, FindRecentPapersArgs};
use crate::tools::TextContent;

/// Argument descriptor for `prompts/list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptArgument {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

/// A single prompt message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptMessage {
    /// Always `"user"`.
    pub role: &'static str,
    pub content: TextContent,
}

impl PromptMessage {
    /// User-role text message.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: "user", content: TextContent { kind: "text", text: text.into() } }
    }
}

/// Result of `prompts/get`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetPromptResult {
    pub description: &'static str,
    pub messages: Vec<PromptMessage>,
}

/// Trait for MCP prompts.
pub trait McpPrompt: Send + Sync {
    /// Prompt name.
    fn name(&self) -> &'static str;

    /// Description for LLM.
    fn description(&self) -> &'static str;

    /// Accepted arguments.
    fn arguments(&self) -> Vec<PromptArgument>;

    /// Render the prompt text from raw arguments.
    fn render(&self, args: Value) -> ToolResult<String>;

    /// Render into a `prompts/get` result.
    fn get(&self, args: Value) -> ToolResult<GetPromptResult> {
        let text = self.render(args)?;
        Ok(GetPromptResult { description: self.description(), messages: vec![PromptMessage::user(text)] })
    }
}

/// Ask for the most cited papers of an author.
pub struct FindPapersByAuthorPrompt;

impl McpPrompt for FindPapersByAuthorPrompt {
    fn name(&self) -> &'static str {
        "find_papers_by_author"
    }

    fn description(&self) -> &'static str {
        "Generate a prompt to find papers by a specific author"
    }

    fn arguments(&self) -> Vec<PromptArgument> {
        vec![
            PromptArgument {
                name: "author_name",
                description: "Name of the author",
                required: true,
            },
            PromptArgument {
                name: "limit",
                description: "Number of papers to list (1-50, default 10)",
                required: false,
            },
        ]
    }

    fn render(&self, args: Value) -> ToolResult<String> {
        let args: FindPapersByAuthorArgs = serde_json::from_value(args)?;
        let author = args.author_name.trim();
        if author.is_empty() {
            return Err(ToolError::validation("author_name", "Author name cannot be empty"));
        }
        // Zero means "not given".
        let limit = clamp_limit(args.limit.filter(|&n| n != 0).unwrap_or(api::DEFAULT_LIMIT));

        Ok(format!(
            "Please search for research papers written by {author}. List the top {limit} papers \
             by citation count and briefly describe their contribution to the field."
        ))
    }
}

/// Ask for recent papers on a topic, optionally within a year range.
pub struct FindRecentPapersPrompt;

impl McpPrompt for FindRecentPapersPrompt {
    fn name(&self) -> &'static str {
        "find_recent_papers"
    }

    fn description(&self) -> &'static str {
        "Generate a prompt to find recent papers on a specific topic"
    }

    fn arguments(&self) -> Vec<PromptArgument> {
        vec![
            PromptArgument { name: "topic", description: "Research topic", required: true },
            PromptArgument {
                name: "year_from",
                description: "Earliest publication year",
                required: false,
            },
            PromptArgument {
                name: "year_to",
                description: "Latest publication year",
                required: false,
            },
        ]
    }

    fn render(&self, args: Value) -> ToolResult<String> {
        let args: FindRecentPapersArgs = serde_json::from_value(args)?;
        let topic = args.topic.trim();
        if topic.is_empty() {
            return Err(ToolError::validation("topic", "Topic cannot be empty"));
        }

        let mut text = format!("Please search for recent research papers about \"{topic}\"");
        let given = |year: Option<i64>| year.filter(|&y| y != 0);
        match (given(args.year_from), given(args.year_to)) {
            (Some(from), Some(to)) => text.push_str(&format!(" published between {from} and {to}")),
            (Some(from), None) => text.push_str(&format!(" published since {from}")),
            (None, Some(to)) => text.push_str(&format!(" published up to {to}")),
            (None, None) => {}
        }
        text.push_str(". Summarize the key findings and trends in this research area.");

        Ok(text)
    }
}

/// Register all prompts.
#[must_use]
pub fn register_all_prompts() -> Vec<Box<dyn McpPrompt>> {
    vec![Box::new(FindPapersByAuthorPrompt), Box::new(FindRecentPapersPrompt)]
}
