//! Error taxonomy for the badge data service.
//!
//! # Responsibilities
//! - Classify failures (routing, validation, upstream)
//! - Map each failure to an HTTP status and response body
//!
//! # Design Decisions
//! - Response bodies are stable; the badge consumer sees them verbatim
//! - No retries anywhere: every failure maps directly to one response
//! - A batch either fully succeeds or nothing from it is cached

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::upstream::FetchError;

/// Request-level errors surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum BadgeError {
    /// The request path has fewer segments than the route shape needs.
    #[error("missing path segments")]
    MissingSegments,

    /// No data source is registered under the requested name.
    #[error("not found: {0}")]
    UnknownSource(String),

    /// The data source does not recognize the requested operation.
    #[error("not found")]
    UnknownOperation,

    /// The request listed more ids than the configured cap.
    #[error("too many IDs")]
    TooManyIds,

    /// Fetching from the upstream API failed; the whole batch was
    /// discarded and nothing was cached.
    #[error("unable to get data {0}")]
    Upstream(#[from] FetchError),
}

impl BadgeError {
    fn status(&self) -> StatusCode {
        match self {
            BadgeError::MissingSegments | BadgeError::UnknownSource(_) => StatusCode::NOT_FOUND,
            BadgeError::UnknownOperation => StatusCode::GONE,
            BadgeError::TooManyIds | BadgeError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for BadgeError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
