//! API error types and their HTTP mapping.

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use flowgate_gumloop::ProviderError;

/// Summary used for every 500 response.
pub const GENERIC_ERROR: &str = "Something went wrong!";

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad or missing input. 400.
    #[error("{0}")]
    BadRequest(String),

    /// Non-success response from an upstream service. Its status is
    /// propagated when it is an error status, 500 otherwise.
    #[error("Upstream error: {status} - {message}")]
    Upstream { status: u16, message: String },

    /// Remote run ended FAILED or TERMINATED. 400.
    #[error("{0}")]
    FlowFailed(String),

    /// Polling budget exhausted. 408.
    #[error("{0}")]
    Timeout(String),

    /// Anything else. 500.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::FlowFailed(_) => StatusCode::BAD_REQUEST,
            Self::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
            Self::Upstream { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn summary(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "Bad request",
            Self::Upstream { .. } => "Upstream request failed",
            Self::FlowFailed(_) => "Flow failed",
            Self::Timeout(_) => "Polling timeout exceeded",
            Self::Internal(_) => GENERIC_ERROR,
        }
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::InvalidArgument(message) => Self::BadRequest(message),
            ProviderError::Upstream { status, body } => Self::Upstream {
                status,
                message: body,
            },
            e @ ProviderError::FlowExecution { .. } => Self::FlowFailed(e.to_string()),
            e @ ProviderError::Timeout { .. } => Self::Timeout(e.to_string()),
            e @ (ProviderError::Protocol(_) | ProviderError::Network(_)) => {
                Self::Internal(e.to_string())
            }
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = status.as_u16(), "Request failed: {}", self);
        }

        let body = json!({
            "error": self.summary(),
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
