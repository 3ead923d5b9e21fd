//! OpenAlex MCP Server
//!
//! A Model Context Protocol (MCP) server for the OpenAlex API. Lets LLM
//! agents search papers, search by author, fetch a single paper, and read a
//! paper as a `paper://{id}` resource.
//!
//! # Features
//!
//! - **3 MCP Tools**: `search_papers`, `search_papers_by_author`, `get_paper`
//! - **1 Resource template**: `paper://{paper_id}`
//! - **2 Prompts**: `find_papers_by_author`, `find_recent_papers`
//! - **Never-throwing handlers**: every failure becomes an `isError` envelope
//! - **Stateless**: one bounded-timeout upstream call per request, no caching
//!
//! # Example
//!
//! ```no_run
//! use openalex_mcp::{client::OpenAlexClient, config::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = OpenAlexClient::new(&config)?;
//!
//!     let works = client.search_works("graph neural networks", 5).await?;
//!     println!("{}", openalex_mcp::formatters::format_search_summary("graph neural networks", &works));
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod models;
pub mod prompts;
pub mod resources;
pub mod server;
pub mod tools;

pub use client::OpenAlexClient;
pub use config::Config;
pub use error::{ClientError, ToolError};
