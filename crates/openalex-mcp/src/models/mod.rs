//! Data models for OpenAlex entities and MCP inputs.
//!
//! OpenAlex fields are snake_case already, so no renaming is needed. Every
//! field is optional and deserialized through the [`lenient`] helpers.

mod inputs;
pub mod lenient;
mod paper;

pub use inputs::{
    FindPapersByAuthorArgs, FindRecentPapersArgs, GetPaperInput, SearchByAuthorInput,
    SearchPapersInput,
};
pub use paper::{
    AuthorRef, Authorship, Institution, Location, OpenAccess, PageMeta, Source, Work, WorksPage,
};
