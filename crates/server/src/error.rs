//! Error-to-response mapping for the JSON API.
//!
//! Every failure reaching the client becomes a `{success: false, message}`
//! body. Only "not found" on direct resource lookups (product or order by
//! id) maps to 404; every other business failure is a 400 with the core's
//! own message. Nothing is silently swallowed: unexpected shapes would
//! surface as a 400 with their display text, and handlers log what they
//! need via `tracing`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cartwheel_core::ShopError;
use serde::Serialize;

/// Application-level error type for the API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A core operation failed. Always a 400: a missing product inside a
    /// cart mutation is a business failure, not a missing resource.
    #[error(transparent)]
    Shop(#[from] ShopError),

    /// A direct resource lookup (product or order by id) missed.
    #[error("{0}")]
    NotFound(String),

    /// The request itself could not be parsed (malformed body or path
    /// parameter), surfaced by the extractors in [`crate::extract`].
    #[error("{0}")]
    BadRequest(String),
}

/// The failure half of the response envelope.
#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Shop(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };
        let body = ErrorBody {
            success: false,
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Result type alias for API handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
