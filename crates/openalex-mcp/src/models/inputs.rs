//! Input models for MCP tool and prompt parameters.

use serde::{Deserialize, Serialize};

use super::lenient;

/// Input for `search_papers`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchPapersInput {
    /// Search terms.
    #[serde(default)]
    pub query: String,

    /// Maximum number of results (clamped to 1..=50).
    #[serde(default, deserialize_with = "lenient::int")]
    pub limit: Option<i64>,
}

/// Input for `search_papers_by_author`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchByAuthorInput {
    /// Author name.
    #[serde(default)]
    pub author: String,

    /// Maximum number of results (clamped to 1..=50).
    #[serde(default, deserialize_with = "lenient::int")]
    pub limit: Option<i64>,
}

/// Input for `get_paper`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetPaperInput {
    /// OpenAlex ID, bare (`W123`) or as a URL.
    #[serde(default)]
    pub paper_id: String,
}

/// Arguments for the `find_papers_by_author` prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindPapersByAuthorArgs {
    /// Author to look for.
    pub author_name: String,

    /// Number of papers to list.
    #[serde(default, deserialize_with = "lenient::int")]
    pub limit: Option<i64>,
}

/// Arguments for the `find_recent_papers` prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindRecentPapersArgs {
    /// Research topic.
    pub topic: String,

    /// Earliest publication year.
    #[serde(default, deserialize_with = "lenient::int")]
    pub year_from: Option<i64>,

    /// Latest publication year.
    #[serde(default, deserialize_with = "lenient::int")]
    pub year_to: Option<i64>,
}
