//! Error types for the OpenAlex MCP server.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::time::Duration;

/// Message shown when an upstream request exceeds its timeout.
pub const TIMEOUT_MESSAGE: &str = "Request timeout: The OpenAlex API took too long to respond";

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Work not found (404 response)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Bare ID of the missing work
        resource: String,
    },

    /// Input rejected before any request was made
    #[error("{0}")]
    Validation(String),

    /// Any other non-success HTTP status
    #[error("OpenAlex API error: {status} {reason}")]
    RemoteApi {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase
        reason: String,
    },

    /// Well-formed response missing mandatory fields
    #[error("{0}")]
    InvalidData(String),

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ClientError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a remote API error from a status code.
    #[must_use]
    pub fn remote(status: reqwest::StatusCode) -> Self {
        Self::RemoteApi {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }

    /// Create a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an invalid data error.
    #[must_use]
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData(message.into())
    }

    /// Map a transport error, separating timeouts from other failures.
    #[must_use]
    pub fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() { Self::Timeout(timeout) } else { Self::Http(err) }
    }

    /// Returns true if the request exceeded its timeout.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

/// Errors from MCP handler execution.
#[derive(thiserror::Error, Debug)]
pub enum ToolError {
    /// Error from the API client
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Input validation failed
    #[error("Validation error: {message}")]
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ToolError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    /// Convert to a user-friendly error message for MCP response.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::Client(ClientError::NotFound { resource }) => {
                format!("Paper not found: No paper exists with ID {resource}")
            }
            Self::Client(ClientError::Timeout(_)) => TIMEOUT_MESSAGE.to_string(),
            Self::Validation { field, message } => {
                format!("Invalid input for '{field}': {message}")
            }
            _ => self.to_string(),
        }
    }

    /// Render the message for an error envelope, prefixed with the handler context.
    ///
    /// Not-found and timeout messages stand on their own and are not prefixed.
    #[must_use]
    pub fn render(&self, context: &str) -> String {
        match self {
            Self::Client(ClientError::NotFound { .. } | ClientError::Timeout(_)) => {
                self.to_user_message()
            }
            _ => format!("{context}: {}", self.to_user_message()),
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for handler operations.
pub type ToolResult<T> = Result<T, ToolError>;
