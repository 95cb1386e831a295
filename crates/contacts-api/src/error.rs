//! Mapping of core errors onto HTTP responses

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use contacts_core::Error;

use crate::dto::ErrorBody;

/// Handler error: always `400 {"error": message}`
///
/// The API distinguishes no error classes on the wire; constraint
/// violations, malformed bodies and store failures all arrive as one
/// message string.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self.0 {
            Error::ConstraintViolation(msg) | Error::InvalidInput(msg) => {
                tracing::warn!("Rejected write: {}", msg);
            }
            other => {
                tracing::error!("Store failure: {}", other);
            }
        }

        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}
