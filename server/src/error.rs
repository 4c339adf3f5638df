//! Typed HTTP errors and the JSON envelope they render to.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// Missing or invalid client input.
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Anything unexpected. The detail is logged, never sent to the client.
    #[error("Internal Server Error")]
    Internal(String),
}

impl HttpError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        HttpError::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        HttpError::NotFound(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::NotFound(_) => StatusCode::NOT_FOUND,
            HttpError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// `{"error":{"status":404,"message":"Todo not found"}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let HttpError::Internal(detail) = &self {
            tracing::error!(%detail, "request failed");
        }
        let envelope = ErrorEnvelope {
            error: ErrorBody {
                status: status.as_u16(),
                message: self.to_string(),
            },
        };
        (status, Json(envelope)).into_response()
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        HttpError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for HttpError {
    fn from(rejection: QueryRejection) -> Self {
        HttpError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn envelope(error: HttpError) -> (StatusCode, ErrorEnvelope) {
        let response = error.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn bad_request_renders_envelope() {
        let (status, body) = envelope(HttpError::bad_request("Todo title is required")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error.status, 400);
        assert_eq!(body.error.message, "Todo title is required");
    }

    #[tokio::test]
    async fn not_found_renders_envelope() {
        let (status, body) = envelope(HttpError::not_found("Category not found")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error.status, 404);
        assert_eq!(body.error.message, "Category not found");
    }

    #[tokio::test]
    async fn method_not_allowed_renders_envelope() {
        let (status, body) = envelope(HttpError::MethodNotAllowed).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body.error.status, 405);
        assert_eq!(body.error.message, "Method not allowed");
    }

    #[tokio::test]
    async fn internal_hides_detail() {
        let (status, body) = envelope(HttpError::Internal("kaboom".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.status, 500);
        assert_eq!(body.error.message, "Internal Server Error");
    }
}
