//! HTTP mapping for application errors
//!
//! Converts the error taxonomy into JSON responses and status codes.
//! Store and export internals never reach the client: 500-class responses
//! carry a generic message while the full error goes to the log.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use tracing::error;

use crate::utils::errors::AidtrackError;

/// Result alias for JSON API handlers.
pub type ApiResult<T> = std::result::Result<T, AidtrackError>;

impl ResponseError for AidtrackError {
    fn status_code(&self) -> StatusCode {
        match self {
            AidtrackError::Validation(_) => StatusCode::BAD_REQUEST,
            AidtrackError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AidtrackError::NotFound(_) => StatusCode::NOT_FOUND,
            AidtrackError::Database(_)
            | AidtrackError::Migration(_)
            | AidtrackError::Config(_)
            | AidtrackError::ExportFailure(_)
            | AidtrackError::PasswordHash(_)
            | AidtrackError::Session(_)
            | AidtrackError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if !self.is_client_error() {
            error!(error = %self, "request failed");
        }
        HttpResponse::build(self.status_code()).json(json!({ "error": self.client_message() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_expected_status_codes() {
        let cases = [
            (
                AidtrackError::Validation("bad".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AidtrackError::Unauthorized("no".to_string()),
                StatusCode::UNAUTHORIZED,
            ),
            (
                AidtrackError::NotFound("gone".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                AidtrackError::Database(sqlx::Error::PoolClosed),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AidtrackError::ExportFailure("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.status_code(), status);
        }
    }
}
