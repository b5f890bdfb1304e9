//! API error type with IntoResponse
//!
//! Two outward kinds only: a missing required parameter (400) and anything
//! else (500, logged, generic body).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::StoreError;
use crate::models::CoercionError;

/// Generic body for every unexpected failure
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Required query parameter absent (400)
    MissingParameter { message: &'static str },

    /// Anything else (500, logged with `context`)
    Internal {
        context: &'static str,
        source: InternalError,
    },
}

/// Causes that collapse into a 500
#[derive(Debug, thiserror::Error)]
pub enum InternalError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Coercion(#[from] CoercionError),

    #[error(transparent)]
    Body(#[from] super::extractors::BodyError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingParameter { message } => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            Self::Internal { context, source } => {
                // Log the actual error, return generic message
                tracing::error!(error = %source, "{}", context);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": INTERNAL_ERROR_MESSAGE })),
                )
                    .into_response()
            }
        }
    }
}

/// Attach a log context to a failure and turn it into `ApiError::Internal`.
pub trait OrInternal<T> {
    fn or_internal(self, context: &'static str) -> Result<T, ApiError>;
}

impl<T, E> OrInternal<T> for Result<T, E>
where
    E: Into<InternalError>,
{
    fn or_internal(self, context: &'static str) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::Internal {
            context,
            source: e.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn missing_parameter_is_400() {
        let err = ApiError::MissingParameter {
            message: "Missing metric ID",
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Missing metric ID");
    }

    #[tokio::test]
    async fn store_failure_is_generic_500() {
        let result: Result<(), StoreError> = Err(StoreError::NotFound {
            resource: "alert rule",
            id: 4,
        });
        let response = result
            .or_internal("Error deleting alert rule")
            .unwrap_err()
            .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        // Cause is logged, not leaked
        assert_eq!(body_json(response).await["error"], INTERNAL_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn coercion_failure_is_500() {
        let result: Result<(), CoercionError> = Err(CoercionError::InvalidId { raw: "x".into() });
        let response = result.or_internal("Error deleting metric").unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
