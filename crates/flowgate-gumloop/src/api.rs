//! Gumloop REST wire types.

use serde::{Deserialize, Serialize};

use crate::types::PipelineInput;

/// Body of `POST /start_pipeline`.
#[derive(Debug, Serialize)]
pub struct StartPipelineRequest<'a> {
    pub user_id: &'a str,
    pub saved_item_id: &'a str,
    /// Sent as `null` when absent.
    pub project_id: Option<&'a str>,
    pub pipeline_inputs: &'a [PipelineInput],
}

/// Response of `POST /start_pipeline`.
#[derive(Debug, Deserialize)]
pub struct StartPipelineResponse {
    #[serde(default)]
    pub run_id: Option<String>,
}

/// Query of `GET /get_pl_run`.
#[derive(Debug, Serialize)]
pub struct RunDetailsQuery<'a> {
    pub run_id: &'a str,
    pub user_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<&'a str>,
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;
