//! Typed error handling for the carve toolkit
//!
//! This module provides the error type hierarchy that lets callers handle
//! failures specifically rather than dealing with generic `anyhow::Error`
//! values.
//!
//! # Error Categories
//!
//! - [`QueryError`]: Client input failures (unknown field, unknown sort key).
//!   Caught eagerly, before any data access.
//! - [`ConfigError`]: Missing or duplicate sort-mapping registrations. These are
//!   deployment defects, not per-request conditions.
//! - `Source`: Failures reported by the backing data source.
//! - `Internal`: Consistency defects inside the engine itself, such as a field
//!   that passed validation but cannot be projected. Logged and surfaced as a
//!   generic server fault, never swallowed.
//!
//! # Example
//!
//! ```rust,ignore
//! match engine.shaped_page(&source, &query, convert).await {
//!     Ok(page) => { /* serialize */ }
//!     Err(CarveError::Query(QueryError::UnknownSortKey { key })) => {
//!         println!("client sent a bad sort key: {}", key);
//!     }
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type for the carve toolkit
#[derive(Debug)]
pub enum CarveError {
    /// Client input failures caught during query validation
    Query(QueryError),

    /// Sort-mapping registration defects
    Config(ConfigError),

    /// Failures reported by the backing data source
    Source(String),

    /// Internal consistency defects (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for CarveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CarveError::Query(e) => write!(f, "{}", e),
            CarveError::Config(e) => write!(f, "{}", e),
            CarveError::Source(msg) => write!(f, "Data source error: {}", msg),
            CarveError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for CarveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CarveError::Query(e) => Some(e),
            CarveError::Config(e) => Some(e),
            CarveError::Source(_) => None,
            CarveError::Internal(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl CarveError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CarveError::Query(_) => StatusCode::BAD_REQUEST,
            CarveError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CarveError::Source(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CarveError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            CarveError::Query(e) => e.error_code(),
            CarveError::Config(e) => e.error_code(),
            CarveError::Source(_) => "SOURCE_ERROR",
            CarveError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    /// Get additional details for the error
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            CarveError::Query(QueryError::UnknownField { shape, field }) => {
                Some(serde_json::json!({
                    "shape": shape,
                    "field": field
                }))
            }
            CarveError::Query(QueryError::UnknownSortKey { key }) => {
                Some(serde_json::json!({ "key": key }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for CarveError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Query Errors
// =============================================================================

/// Client input failures caught during query validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// A requested field does not exist on the target shape
    UnknownField { shape: String, field: String },

    /// A sort key has no entry in the applicable sort mapping
    UnknownSortKey { key: String },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::UnknownField { shape, field } => {
                write!(f, "Field '{}' does not exist on shape '{}'", field, shape)
            }
            QueryError::UnknownSortKey { key } => {
                write!(f, "Sort key '{}' is not mapped", key)
            }
        }
    }
}

impl std::error::Error for QueryError {}

impl QueryError {
    pub fn error_code(&self) -> &'static str {
        match self {
            QueryError::UnknownField { .. } => "UNKNOWN_FIELD",
            QueryError::UnknownSortKey { .. } => "UNKNOWN_SORT_KEY",
        }
    }
}

impl From<QueryError> for CarveError {
    fn from(err: QueryError) -> Self {
        CarveError::Query(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Sort-mapping registration defects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No sort mapping registered for a (source, destination) pair
    MissingMapping {
        source: String,
        destination: String,
    },

    /// A sort mapping was registered twice for the same pair
    DuplicateMapping {
        source: String,
        destination: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingMapping {
                source,
                destination,
            } => {
                write!(
                    f,
                    "No sort mapping registered for <{}, {}>",
                    source, destination
                )
            }
            ConfigError::DuplicateMapping {
                source,
                destination,
            } => {
                write!(
                    f,
                    "Sort mapping for <{}, {}> is already registered",
                    source, destination
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::MissingMapping { .. } => "MISSING_SORT_MAPPING",
            ConfigError::DuplicateMapping { .. } => "DUPLICATE_SORT_MAPPING",
        }
    }
}

impl From<ConfigError> for CarveError {
    fn from(err: ConfigError) -> Self {
        CarveError::Config(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

/// Data-source implementations report failures as `anyhow::Error`
impl From<anyhow::Error> for CarveError {
    fn from(err: anyhow::Error) -> Self {
        CarveError::Source(err.to_string())
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for carve operations
pub type CarveResult<T> = Result<T, CarveError>;

// =============================================================================
// Tests
// =============================================================================
