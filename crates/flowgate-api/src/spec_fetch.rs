//! Fetches raw specification documents from a trusted host.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ApiError;

/// Fetches and parses YAML/JSON documents under a single trusted URL prefix.
#[derive(Debug, Clone)]
pub struct SpecFetcher {
    trusted_prefix: String,
    client: reqwest::Client,
}

impl SpecFetcher {
    pub fn new(trusted_prefix: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("flowgate/", env!("CARGO_PKG_VERSION")))
            // A redirect could leave the trusted prefix.
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap_or_default();

        Self {
            trusted_prefix: trusted_prefix.into(),
            client,
        }
    }

    pub fn trusted_prefix(&self) -> &str {
        &self.trusted_prefix
    }

    /// Check that `url` is present, well formed and under the trusted prefix.
    pub fn validate<'a>(&self, url: Option<&'a str>) -> Result<&'a str, ApiError> {
        let url = url
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ApiError::bad_request("URL parameter is required"))?;

        if !url.starts_with(&self.trusted_prefix) {
            return Err(ApiError::bad_request(format!(
                "URL must start with {}",
                self.trusted_prefix
            )));
        }

        url::Url::parse(url).map_err(|e| ApiError::bad_request(format!("Invalid URL: {}", e)))?;
        Ok(url)
    }

    /// Fetch `url` and parse it as YAML (which also accepts JSON).
    pub async fn fetch(&self, url: Option<&str>) -> Result<Value, ApiError> {
        let url = self.validate(url)?;
        debug!(url, "Fetching spec document");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::internal(format!("Failed to fetch content: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            warn!(url, status, "Spec document fetch failed");
            return Err(ApiError::Upstream {
                status,
                message: format!("Failed to fetch content: {}", status),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| ApiError::internal(format!("Failed to fetch content: {}", e)))?;

        serde_yml::from_str(&text).map_err(|e| {
            ApiError::bad_request(format!("Failed to parse OpenAPI specification: {}", e))
        })
    }
}

#[cfg(test)]
#[path = "spec_fetch_tests.rs"]
mod tests;
