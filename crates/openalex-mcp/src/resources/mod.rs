//! MCP resources.
//!
//! Papers are exposed through the `paper://{paper_id}` URI template. Reads
//! never fail at the protocol level: problems are reported as `text/plain`
//! contents.

use serde::Serialize;

use crate::client::normalize_work_id;
use crate::error::ToolError;
use crate::formatters;
use crate::tools::ToolContext;

/// URI scheme prefix for paper resources.
pub const PAPER_URI_PREFIX: &str = "paper://";

/// Markdown MIME type.
pub const MIME_MARKDOWN: &str = "text/markdown";

/// Plain text MIME type.
pub const MIME_PLAIN: &str = "text/plain";

/// Contents returned by `resources/read`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceContents {
    /// The URI that was read.
    pub uri: String,

    /// `text/markdown` on success, `text/plain` for error text.
    #[serde(rename = "mimeType")]
    pub mime_type: &'static str,

    /// Body.
    pub text: String,
}

impl ResourceContents {
    /// Markdown contents.
    #[must_use]
    pub fn markdown(uri: &str, text: impl Into<String>) -> Self {
        Self { uri: uri.to_string(), mime_type: MIME_MARKDOWN, text: text.into() }
    }

    /// Plain text contents.
    #[must_use]
    pub fn plain(uri: &str, text: impl Into<String>) -> Self {
        Self { uri: uri.to_string(), mime_type: MIME_PLAIN, text: text.into() }
    }
}

/// Trait for URI-template resources.
#[async_trait::async_trait]
pub trait McpResourceTemplate: Send + Sync {
    /// RFC 6570 URI template.
    fn uri_template(&self) -> &'static str;

    /// Resource name.
    fn name(&self) -> &'static str;

    /// Description for LLM.
    fn description(&self) -> &'static str;

    /// MIME type of successful reads.
    fn mime_type(&self) -> &'static str;

    /// Whether this template serves `uri`.
    fn matches(&self, uri: &str) -> bool;

    /// Read the resource.
    async fn read(&self, ctx: &ToolContext, uri: &str) -> ResourceContents;
}

/// A paper as an addressable resource.
pub struct PaperResource;

impl PaperResource {
    /// Extract the paper ID from a `paper://` URI.
    #[must_use]
    pub fn paper_id(uri: &str) -> Option<&str> {
        uri.strip_prefix(PAPER_URI_PREFIX)
            .map(str::trim)
            .filter(|id| !normalize_work_id(id).is_empty())
    }
}

#[async_trait::async_trait]
impl McpResourceTemplate for PaperResource {
    fn uri_template(&self) -> &'static str {
        "paper://{paper_id}"
    }

    fn name(&self) -> &'static str {
        "paper"
    }

    fn description(&self) -> &'static str {
        "Full details of an OpenAlex paper as Markdown"
    }

    fn mime_type(&self) -> &'static str {
        MIME_MARKDOWN
    }

    fn matches(&self, uri: &str) -> bool {
        uri.starts_with(PAPER_URI_PREFIX)
    }

    async fn read(&self, ctx: &ToolContext, uri: &str) -> ResourceContents {
        let Some(paper_id) = Self::paper_id(uri) else {
            return ResourceContents::plain(uri, "Error: Invalid paper ID format");
        };

        tracing::info!(paper_id = %paper_id, "Fetching paper resource");

        match ctx.client.get_work(paper_id).await {
            Ok(work) => ResourceContents::markdown(uri, formatters::format_paper_details(&work)),
            Err(e) => {
                tracing::error!(paper_id = %paper_id, error = %e, "Error retrieving paper resource");
                ResourceContents::plain(uri, ToolError::from(e).render("Error fetching paper"))
            }
        }
    }
}

/// Register all resource templates.
#[must_use]
pub fn register_all_resources() -> Vec<Box<dyn McpResourceTemplate>> {
    vec![Box::new(PaperResource)]
}
