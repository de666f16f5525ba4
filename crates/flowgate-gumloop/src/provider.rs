//! The seam between flow orchestration and the Gumloop transport.

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::types::{FlowConfig, RunHandle, RunLookup, RunState};

/// A remote pipeline provider.
#[async_trait]
pub trait PipelineProvider: Send + Sync {
    /// Start a saved pipeline and return the new run's handle.
    async fn start_flow(&self, config: &FlowConfig) -> Result<RunHandle, ProviderError>;

    /// Fetch the current state of a run.
    async fn get_run_status(&self, lookup: RunLookup<'_>) -> Result<RunState, ProviderError>;
}
