//! Application state.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use flowgate_config::{Config, ConfigError};
use flowgate_gumloop::{
    FlowConfig, FlowRouter, GumloopClient, PipelineInput, PipelineProvider, RunLookup,
};

use crate::spec_fetch::SpecFetcher;

/// Gumloop credentials, injected once at startup.
#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub user_id: String,
    pub project_id: Option<String>,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            user_id: user_id.into(),
            project_id: None,
        }
    }

    pub fn with_project_id(mut self, project_id: Option<String>) -> Self {
        self.project_id = project_id.filter(|p| !p.is_empty());
        self
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("project_id", &self.project_id)
            .finish()
    }
}

/// Poll interval and timeout used when a request does not set them.
#[derive(Debug, Clone, Copy)]
pub struct PollingDefaults {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for PollingDefaults {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(2_000),
            timeout: Duration::from_millis(300_000),
        }
    }
}

/// Application state shared across handlers. Read-only after startup.
pub struct AppState {
    pub provider: Arc<dyn PipelineProvider>,
    pub flows: FlowRouter,
    pub credentials: Credentials,
    pub polling: PollingDefaults,
    pub spec_fetcher: SpecFetcher,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn PipelineProvider>,
        flows: FlowRouter,
        credentials: Credentials,
        spec_fetcher: SpecFetcher,
    ) -> Self {
        Self {
            provider,
            flows,
            credentials,
            polling: PollingDefaults::default(),
            spec_fetcher,
        }
    }

    pub fn with_polling(mut self, polling: PollingDefaults) -> Self {
        self.polling = polling;
        self
    }

    /// Build the production state: a real Gumloop client plus everything
    /// the configuration names.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let api_key = config
            .gumloop
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ConfigError::MissingField("gumloop.api_key".to_string()))?;
        let user_id = config
            .gumloop
            .user_id
            .clone()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ConfigError::MissingField("gumloop.user_id".to_string()))?;

        let credentials =
            Credentials::new(api_key, user_id).with_project_id(config.gumloop.project_id.clone());
        let provider = Arc::new(GumloopClient::with_url(config.gumloop.base_url.clone()));
        let flows = FlowRouter::new(config.flows.saved_items.clone());
        let spec_fetcher = SpecFetcher::new(config.spec_fetch.trusted_prefix.clone());
        let polling = PollingDefaults {
            interval: Duration::from_millis(config.polling.interval_ms),
            timeout: Duration::from_millis(config.polling.timeout_ms),
        };

        Ok(Self::new(provider, flows, credentials, spec_fetcher).with_polling(polling))
    }

    /// Assemble a per-request flow config. Request values win over defaults.
    pub fn flow_config(
        &self,
        saved_item_id: &str,
        inputs: Vec<PipelineInput>,
        overrides: FlowOverrides,
    ) -> FlowConfig {
        let project_id = overrides
            .project_id
            .or_else(|| self.credentials.project_id.clone());

        FlowConfig::new(
            self.credentials.api_key.clone(),
            self.credentials.user_id.clone(),
            saved_item_id,
        )
        .with_project_id(project_id)
        .with_inputs(inputs)
        .with_polling_interval(
            overrides
                .polling_interval_ms
                .map(Duration::from_millis)
                .unwrap_or(self.polling.interval),
        )
        .with_timeout(
            overrides
                .timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(self.polling.timeout),
        )
    }

    /// Lookup key for a run owned by the configured user.
    pub fn lookup<'a>(&'a self, run_id: &'a str) -> RunLookup<'a> {
        RunLookup {
            auth_token: &self.credentials.api_key,
            run_id,
            user_id: &self.credentials.user_id,
            project_id: self.credentials.project_id.as_deref(),
        }
    }
}

/// Optional per-request polling and project overrides.
#[derive(Debug, Clone, Default)]
pub struct FlowOverrides {
    pub project_id: Option<String>,
    pub polling_interval_ms: Option<u64>,
    pub timeout_ms: Option<u64>,
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
