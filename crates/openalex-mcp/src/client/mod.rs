//! OpenAlex API client.
//!
//! Issues at most one bounded-timeout GET per call:
//! - `search_works`: `/works?search=...` sorted by citation count
//! - `get_work`: `/works/{id}`
//!
//! Search treats 404 and an empty `results` array as "no matches"; every
//! other failure, including timeouts, is returned as a [`ClientError`].

use std::time::Duration;

use anyhow::Context;

use reqwest::{Client, StatusCode, Url};

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::models::{Work, WorksPage};

/// Sort order requested from `/works`.
const SORT_BY_CITATIONS: &str = "cited_by_count:desc";

/// OpenAlex API client.
#[derive(Clone)]
pub struct OpenAlexClient {
    /// HTTP client (carries the User-Agent and timeout).
    client: Client,

    /// API base URL.
    base_url: Url,

    /// Contact email for the polite pool.
    contact_email: String,

    /// Timeout applied to each request.
    request_timeout: Duration,
}

impl OpenAlexClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let base_url = Url::parse(config.api_base_url.trim_end_matches('/'))
            .with_context(|| format!("invalid API base URL {:?}", config.api_base_url))?;
        anyhow::ensure!(!base_url.cannot_be_a_base(), "API base URL must be hierarchical");

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout)
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            base_url,
            contact_email: config.contact_email.clone(),
            request_timeout: config.request_timeout,
        })
    }

    /// API base URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Build `{base}/works[/{id}]`, encoding `id` as a single path segment.
    fn works_url(&self, id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        // Checked hierarchical in `new`.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("works");
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }

    /// Search works matching `query`, most cited first.
    ///
    /// `limit` is clamped to `1..=50`.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a blank query, `Timeout` when the request
    /// exceeds its bound, `RemoteApi` for non-success statuses other than 404.
    pub async fn search_works(&self, query: &str, limit: i64) -> ClientResult<Vec<Work>> {
        if query.trim().is_empty() {
            return Err(ClientError::validation("Search query cannot be empty"));
        }

        let per_page = clamp_limit(limit);
        let url = self.works_url(None);
        let params = [
            ("search", query.to_string()),
            ("per_page", per_page.to_string()),
            ("sort", SORT_BY_CITATIONS.to_string()),
            ("mailto", self.contact_email.clone()),
        ];

        tracing::info!(query = %query, limit = per_page, "Searching OpenAlex");

        let response = self
            .client
            .get(url)
            .query(&params)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::warn!(query = %query, "No results found (404)");
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(ClientError::remote(status));
        }

        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;
        let page: WorksPage = serde_json::from_slice(&body)?;

        if page.results.is_empty() {
            tracing::info!(query = %query, "No results found");
        } else {
            tracing::debug!(
                returned = page.results.len(),
                total = ?page.meta.and_then(|m| m.count),
                "Search completed"
            );
        }

        Ok(page.results)
    }

    /// Get a single work by ID.
    ///
    /// Accepts a bare ID (`W123`) or a URL (`https://openalex.org/works/W123`).
    ///
    /// # Errors
    ///
    /// Returns `NotFound` on 404, `RemoteApi` for other non-success statuses,
    /// `InvalidData` when the payload has neither `id` nor `title`, and
    /// `Timeout` when the request exceeds its bound.
    pub async fn get_work(&self, raw_id: &str) -> ClientResult<Work> {
        let work_id = normalize_work_id(raw_id);
        if work_id.is_empty() {
            return Err(ClientError::validation("Paper ID cannot be empty"));
        }

        let url = self.works_url(Some(work_id));
        tracing::info!(work_id = %work_id, "Fetching paper details");

        let response = self.client.get(url).send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::not_found(work_id));
        }
        if !status.is_success() {
            return Err(ClientError::remote(status));
        }

        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;
        let value: serde_json::Value = serde_json::from_slice(&body)?;
        let work = Work::from_value(value);

        if work.id.is_none() && work.title.is_none() {
            return Err(ClientError::invalid_data("Invalid or incomplete paper data received"));
        }

        Ok(work)
    }

    fn transport_error(&self, err: reqwest::Error) -> ClientError {
        let err = ClientError::from_transport(err, self.request_timeout);
        if err.is_timeout() {
            tracing::error!("Request timeout: The OpenAlex API took too long to respond");
        }
        err
    }
}

impl std::fmt::Debug for OpenAlexClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAlexClient")
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

/// Clamp a requested page size to what OpenAlex is asked for.
#[must_use]
pub fn clamp_limit(limit: i64) -> i64 {
    limit.clamp(1, api::MAX_PER_PAGE)
}

/// Strip scheme and path prefix from an OpenAlex ID.
///
/// `https://openalex.org/W1`, `https://openalex.org/works/W1` and `W1` all
/// yield `W1`.
#[must_use]
pub fn normalize_work_id(raw: &str) -> &str {
    let trimmed = raw.trim();
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);

    // First segment is the host (or a leading path component); keep the last real one.
    match rest.split_once('/') {
        Some((_, tail)) => tail.rsplit('/').find(|segment| !segment.is_empty()).unwrap_or(""),
        None => rest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_bare_id() {
        assert_eq!(normalize_work_id("W123"), "W123");
        assert_eq!(normalize_work_id("  W123 "), "W123");
    }

    #[test]
    fn test_normalize_url_ids() {
        assert_eq!(normalize_work_id("https://openalex.org/W123"), "W123");
        assert_eq!(normalize_work_id("https://openalex.org/works/W123"), "W123");
        assert_eq!(normalize_work_id("http://api.openalex.org/works/W123/"), "W123");
    }

    #[test]
    fn test_normalize_host_only() {
        assert_eq!(normalize_work_id("https://openalex.org/"), "");
        assert_eq!(normalize_work_id(""), "");
    }

    #[test]
    fn test_works_url_encodes_id() {
        let client = OpenAlexClient::new(&Config::for_testing("http://localhost:1/api")).unwrap();
        assert_eq!(client.works_url(None).as_str(), "http://localhost:1/api/works");
        assert_eq!(
            client.works_url(Some("W1?select=x#y")).as_str(),
            "http://localhost:1/api/works/W1%3Fselect=x%23y"
        );
    }

    #[test]
    fn test_new_rejects_bad_base_url() {
        assert!(OpenAlexClient::new(&Config::for_testing("not a url")).is_err());
    }

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(1000), 50);
        assert_eq!(clamp_limit(0), 1);
        assert_eq!(clamp_limit(-5), 1);
        assert_eq!(clamp_limit(10), 10);
    }

    #[test]
    fn test_client_debug_and_base_url() {
        let client = OpenAlexClient::new(&Config::for_testing("http://localhost:1/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:1");
        assert!(format!("{client:?}").contains("OpenAlexClient"));
    }
}
