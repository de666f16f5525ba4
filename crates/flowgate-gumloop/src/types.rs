//! Flow and run types shared by the client, poller and HTTP layer.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default delay between two status polls.
pub const DEFAULT_POLLING_INTERVAL: Duration = Duration::from_millis(2_000);

/// Default wall-clock budget for polling a run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(300_000);

/// A named pipeline input, as Gumloop expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineInput {
    pub input_name: String,
    pub value: String,
}

impl PipelineInput {
    pub fn new(input_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            input_name: input_name.into(),
            value: value.into(),
        }
    }
}

/// Everything needed to start one flow. Lives for a single request.
#[derive(Clone)]
pub struct FlowConfig {
    pub auth_token: String,
    pub user_id: String,
    pub saved_item_id: String,
    pub project_id: Option<String>,
    pub pipeline_inputs: Vec<PipelineInput>,
    pub polling_interval: Duration,
    pub timeout: Duration,
}

impl FlowConfig {
    pub fn new(
        auth_token: impl Into<String>,
        user_id: impl Into<String>,
        saved_item_id: impl Into<String>,
    ) -> Self {
        Self {
            auth_token: auth_token.into(),
            user_id: user_id.into(),
            saved_item_id: saved_item_id.into(),
            project_id: None,
            pipeline_inputs: Vec::new(),
            polling_interval: DEFAULT_POLLING_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Empty project ids are treated as absent.
    pub fn with_project_id(mut self, project_id: Option<String>) -> Self {
        self.project_id = project_id.filter(|p| !p.is_empty());
        self
    }

    pub fn with_inputs(mut self, inputs: Vec<PipelineInput>) -> Self {
        self.pipeline_inputs = inputs;
        self
    }

    pub fn with_polling_interval(mut self, interval: Duration) -> Self {
        self.polling_interval = interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Lookup key for a run started from this config.
    pub fn lookup<'a>(&'a self, run_id: &'a str) -> RunLookup<'a> {
        RunLookup {
            auth_token: &self.auth_token,
            run_id,
            user_id: &self.user_id,
            project_id: self.project_id.as_deref(),
        }
    }
}

impl fmt::Debug for FlowConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowConfig")
            .field("auth_token", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("saved_item_id", &self.saved_item_id)
            .field("project_id", &self.project_id)
            .field("pipeline_inputs", &self.pipeline_inputs)
            .field("polling_interval", &self.polling_interval)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Identifiers needed to fetch a run's details.
#[derive(Clone, Copy)]
pub struct RunLookup<'a> {
    pub auth_token: &'a str,
    pub run_id: &'a str,
    pub user_id: &'a str,
    pub project_id: Option<&'a str>,
}

impl fmt::Debug for RunLookup<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunLookup")
            .field("run_id", &self.run_id)
            .field("user_id", &self.user_id)
            .field("project_id", &self.project_id)
            .finish_non_exhaustive()
    }
}

/// Returned by a successful start call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunHandle {
    pub run_id: String,
}

/// Run state as reported by Gumloop.
///
/// Anything outside the four known states is kept verbatim and treated as
/// still in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RunStatus {
    Running,
    Done,
    Failed,
    Terminated,
    Other(String),
}

impl RunStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Running => "RUNNING",
            Self::Done => "DONE",
            Self::Failed => "FAILED",
            Self::Terminated => "TERMINATED",
            Self::Other(s) => s,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed | Self::Terminated)
    }
}

impl From<String> for RunStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "RUNNING" => Self::Running,
            "DONE" => Self::Done,
            "FAILED" => Self::Failed,
            "TERMINATED" => Self::Terminated,
            _ => Self::Other(s),
        }
    }
}

impl From<RunStatus> for String {
    fn from(status: RunStatus) -> Self {
        match status {
            RunStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One snapshot of a run. Re-fetched on every poll, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,

    pub state: RunStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Map<String, Value>>,

    /// Provider fields we do not model (logs, timestamps, credit cost...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RunState {
    pub fn new(state: RunStatus) -> Self {
        Self {
            run_id: None,
            state,
            outputs: None,
            extra: Map::new(),
        }
    }

    pub fn with_outputs(mut self, outputs: Map<String, Value>) -> Self {
        self.outputs = Some(outputs);
        self
    }

    pub fn is_done(&self) -> bool {
        self.state == RunStatus::Done
    }

    /// A named entry of the outputs mapping.
    pub fn output(&self, name: &str) -> Option<&Value> {
        self.outputs.as_ref().and_then(|o| o.get(name))
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
