//! Output formatting for MCP responses.
//!
//! All formatters are total: any input, however incomplete, yields text.

mod markdown;

pub use markdown::{
    ABSTRACT_LIMIT, AUTHOR_LIMIT, FORMAT_ERROR_MESSAGE, PaperView, format_paper_details,
    format_paper_value, format_search_summary,
};
