//! Gumloop REST client.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::api::{RunDetailsQuery, StartPipelineRequest, StartPipelineResponse};
use crate::error::ProviderError;
use crate::provider::PipelineProvider;
use crate::types::{FlowConfig, RunHandle, RunLookup, RunState};

pub const DEFAULT_API_URL: &str = "https://api.gumloop.com/api/v1";

const START_PIPELINE_PATH: &str = "start_pipeline";
const GET_RUN_PATH: &str = "get_pl_run";

/// Gumloop pipeline client.
///
/// Holds no credentials; every call carries the bearer token it was given.
#[derive(Debug, Clone)]
pub struct GumloopClient {
    api_url: String,
    client: reqwest::Client,
}

impl GumloopClient {
    pub fn new() -> Self {
        Self::with_url(DEFAULT_API_URL)
    }

    /// Create a client against a custom base URL (tests, proxies).
    pub fn with_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        warn!(status, "Gumloop returned an error response");
        Err(ProviderError::Upstream { status, body })
    }
}

impl Default for GumloopClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PipelineProvider for GumloopClient {
    async fn start_flow(&self, config: &FlowConfig) -> Result<RunHandle, ProviderError> {
        let body = StartPipelineRequest {
            user_id: &config.user_id,
            saved_item_id: &config.saved_item_id,
            project_id: config.project_id.as_deref(),
            pipeline_inputs: &config.pipeline_inputs,
        };

        debug!(
            saved_item_id = %config.saved_item_id,
            inputs = config.pipeline_inputs.len(),
            "Starting Gumloop pipeline"
        );

        let response = self
            .client
            .post(self.endpoint(START_PIPELINE_PATH))
            .bearer_auth(&config.auth_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let response = Self::check_status(response).await?;
        let parsed: StartPipelineResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::protocol(format!("invalid start response: {}", e)))?;

        match parsed.run_id {
            Some(run_id) if !run_id.is_empty() => {
                info!(run_id = %run_id, saved_item_id = %config.saved_item_id, "Pipeline started");
                Ok(RunHandle { run_id })
            }
            _ => Err(ProviderError::protocol("Run ID not found in start response")),
        }
    }

    async fn get_run_status(&self, lookup: RunLookup<'_>) -> Result<RunState, ProviderError> {
        let query = RunDetailsQuery {
            run_id: lookup.run_id,
            user_id: lookup.user_id,
            project_id: lookup.project_id.filter(|p| !p.is_empty()),
        };

        let response = self
            .client
            .get(self.endpoint(GET_RUN_PATH))
            .bearer_auth(lookup.auth_token)
            .query(&query)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let response = Self::check_status(response).await?;
        let run: RunState = response
            .json()
            .await
            .map_err(|e| ProviderError::protocol(format!("invalid run details: {}", e)))?;

        debug!(run_id = lookup.run_id, state = %run.state, "Fetched run details");
        Ok(run)
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
