//! Custom Axum extractors

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value};

use super::error::{ApiError, InternalError};

/// Request body decoded as a JSON object, without content-type checks.
///
/// Rejections are plain 500s; take `Result<JsonObject, BodyError>` in a
/// handler to log them under the handler's own context.
#[derive(Debug)]
pub struct JsonObject(pub Map<String, Value>);

/// Why a body could not be used
#[derive(Debug, thiserror::Error)]
pub enum BodyError {
    #[error("failed to read request body: {0}")]
    Read(String),

    #[error("invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("request body is not a JSON object")]
    NotAnObject,
}

impl JsonObject {
    pub fn parse(bytes: &[u8]) -> Result<Self, BodyError> {
        match serde_json::from_slice::<Value>(bytes)? {
            Value::Object(fields) => Ok(Self(fields)),
            _ => Err(BodyError::NotAnObject),
        }
    }
}

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = BodyError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| BodyError::Read(e.body_text()))?;
        Self::parse(&bytes)
    }
}

impl IntoResponse for BodyError {
    fn into_response(self) -> Response {
        ApiError::Internal {
            context: "Error reading request body",
            source: InternalError::Body(self),
        }
        .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_objects() {
        let JsonObject(fields) = JsonObject::parse(br#"{"metricName":"cpu"}"#).unwrap();
        assert_eq!(fields["metricName"], "cpu");
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            JsonObject::parse(b"{not json").unwrap_err(),
            BodyError::Json(_)
        ));
    }

    #[test]
    fn rejects_non_objects() {
        assert!(matches!(
            JsonObject::parse(b"[1,2]").unwrap_err(),
            BodyError::NotAnObject
        ));
        assert!(matches!(
            JsonObject::parse(b"null").unwrap_err(),
            BodyError::NotAnObject
        ));
    }
}
