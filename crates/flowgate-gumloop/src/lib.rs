//! Gumloop integration for Flowgate.
//!
//! Starts saved pipelines ("flows"), fetches run details and polls a run
//! until it reaches a terminal state. [`FlowRouter`] keeps provider-side
//! saved-pipeline ids out of client payloads.

mod api;
mod client;
mod error;
mod poll;
mod provider;
mod router;
mod types;

pub use client::{GumloopClient, DEFAULT_API_URL};
pub use error::ProviderError;
pub use poll::{poll_until_complete, start_and_wait, CompletedRun};
pub use provider::PipelineProvider;
pub use router::FlowRouter;
pub use types::{FlowConfig, PipelineInput, RunHandle, RunLookup, RunState, RunStatus};
