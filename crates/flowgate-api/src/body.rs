//! Request body content negotiation.
//!
//! JSON and YAML bodies are decoded into one canonical `serde_json::Value`
//! before any handler sees them; handlers only deal with typed requests.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// Wire format of an inbound body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    Json,
    Yaml,
}

impl BodyFormat {
    const YAML_TYPES: [&'static str; 4] = [
        "application/x-yaml",
        "application/yaml",
        "text/yaml",
        "text/x-yaml",
    ];

    /// Pick the format from `Content-Type`. Anything not YAML is JSON.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let media_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(|v| v.trim().to_ascii_lowercase())
            .unwrap_or_default();

        if Self::YAML_TYPES.contains(&media_type.as_str()) {
            Self::Yaml
        } else {
            Self::Json
        }
    }

    /// Decode a non-empty body into the canonical representation.
    pub fn decode(self, bytes: &[u8]) -> Result<Value, ApiError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(ApiError::bad_request("Request body is required"));
        }

        match self {
            Self::Json => serde_json::from_slice(bytes)
                .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {}", e))),
            Self::Yaml => {
                let text = std::str::from_utf8(bytes)
                    .map_err(|e| ApiError::bad_request(format!("Invalid YAML: {}", e)))?;
                serde_yml::from_str(text)
                    .map_err(|e| ApiError::bad_request(format!("Invalid YAML: {}", e)))
            }
        }
    }
}

/// Extractor for JSON or YAML bodies, chosen by `Content-Type`.
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let format = BodyFormat::from_headers(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        let value = format.decode(&bytes)?;
        let typed = serde_json::from_value(value)
            .map_err(|e| ApiError::bad_request(format!("Invalid request body: {}", e)))?;
        Ok(Payload(typed))
    }
}

#[cfg(test)]
#[path = "body_tests.rs"]
mod tests;
