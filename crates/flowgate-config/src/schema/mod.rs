//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default Gumloop REST base URL.
pub const DEFAULT_GUMLOOP_BASE_URL: &str = "https://api.gumloop.com/api/v1";

/// Default trusted prefix for spec document passthrough.
pub const DEFAULT_TRUSTED_PREFIX: &str = "https://raw.githubusercontent.com/";

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub gumloop: GumloopConfig,

    #[serde(default)]
    pub polling: PollingConfig,

    #[serde(default)]
    pub flows: FlowsConfig,

    #[serde(default)]
    pub spec_fetch: SpecFetchConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Gumloop credentials and endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GumloopConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Workspace project; runs are scoped to the user when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for GumloopConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            user_id: None,
            project_id: None,
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_GUMLOOP_BASE_URL.to_string()
}

/// Defaults for the start-and-wait poll loop. Requests may override both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_interval_ms() -> u64 {
    2_000
}

fn default_timeout_ms() -> u64 {
    300_000
}

/// Flow type to saved-pipeline id table.
///
/// Entries given in the file replace the built-in table entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlowsConfig {
    pub saved_items: BTreeMap<String, String>,
}

impl FlowsConfig {
    pub const FULL_SPEC: &'static str = "full-spec";
    pub const AI_SEARCH: &'static str = "ai-search";
    pub const SINGLE_TOOL: &'static str = "single-tool";
}

impl Default for FlowsConfig {
    fn default() -> Self {
        let saved_items = [
            (Self::FULL_SPEC, "nxNBzbhXkF2dVHM968rfRh"),
            (Self::AI_SEARCH, "8cAwbUxMdbWMUJdQQAxuLE"),
            (Self::SINGLE_TOOL, "mawn5QYkuhJqYfaMBW5DsK"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self { saved_items }
    }
}

/// Spec document passthrough settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecFetchConfig {
    #[serde(default = "default_trusted_prefix")]
    pub trusted_prefix: String,
}

impl Default for SpecFetchConfig {
    fn default() -> Self {
        Self {
            trusted_prefix: default_trusted_prefix(),
        }
    }
}

fn default_trusted_prefix() -> String {
    DEFAULT_TRUSTED_PREFIX.to_string()
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
