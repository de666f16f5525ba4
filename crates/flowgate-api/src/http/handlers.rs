//! Flow API handlers.
//!
//! Inbound bodies use camelCase; Gumloop uses snake_case. The request types
//! here are the translation step between the two, nothing past this module
//! sees client field names.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use flowgate_gumloop::{start_and_wait, PipelineInput};

use crate::body::Payload;
use crate::error::ApiError;
use crate::query::QueryParams;
use crate::state::{AppState, FlowOverrides};

/// A pipeline input as clients send it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineInputPayload {
    #[serde(alias = "input_name")]
    pub input_name: String,
    pub value: String,
}

impl From<PipelineInputPayload> for PipelineInput {
    fn from(payload: PipelineInputPayload) -> Self {
        PipelineInput::new(payload.input_name, payload.value)
    }
}

/// Body of `POST /api/flow-start` and `POST /api/flow-run`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowStartRequest {
    pub flow_type: Option<String>,

    #[serde(default)]
    pub pipeline_inputs: Vec<PipelineInputPayload>,

    pub polling_interval_ms: Option<u64>,

    pub timeout_ms: Option<u64>,

    pub project_id: Option<String>,
}

/// Response of `POST /api/flow-start`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowStartResponse {
    pub success: bool,
    pub run_id: String,
}

/// Response of `POST /api/flow-run`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowRunResponse {
    pub success: bool,
    pub run_id: String,
    pub state: String,
    pub outputs: Map<String, Value>,
}

/// Query of `GET /api/get-flow-run-details`.
#[derive(Debug, Deserialize)]
pub struct RunDetailsParams {
    pub run_id: Option<String>,
}

/// Response of `GET /api/get-flow-run-details`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RunDetailsResponse {
    #[serde(rename_all = "camelCase")]
    Done {
        success: bool,
        status: String,
        run_id: String,
        output: String,
    },
    #[serde(rename_all = "camelCase")]
    Pending { status: String, run_id: String },
}

impl FlowStartRequest {
    /// Resolve the flow type and build the flow config. Fails before any
    /// outbound call when the flow type is missing or unknown, or the
    /// polling interval is zero.
    fn into_flow_config(self, state: &AppState) -> Result<flowgate_gumloop::FlowConfig, ApiError> {
        if self.polling_interval_ms == Some(0) {
            return Err(ApiError::bad_request("pollingIntervalMs must be greater than 0"));
        }

        let flow_type = self.flow_type.as_deref().unwrap_or_default();
        let saved_item_id = state.flows.resolve(flow_type)?;
        let inputs = self.pipeline_inputs.into_iter().map(Into::into).collect();

        Ok(state.flow_config(
            saved_item_id,
            inputs,
            FlowOverrides {
                project_id: self.project_id,
                polling_interval_ms: self.polling_interval_ms,
                timeout_ms: self.timeout_ms,
            },
        ))
    }
}

/// Start a flow without waiting for it.
///
/// POST /api/flow-start
pub async fn flow_start(
    State(state): State<Arc<AppState>>,
    Payload(req): Payload<FlowStartRequest>,
) -> Result<Json<FlowStartResponse>, ApiError> {
    let flow_type = req.flow_type.clone().unwrap_or_default();
    let config = req.into_flow_config(&state)?;

    let handle = state.provider.start_flow(&config).await?;
    info!(flow_type = %flow_type, run_id = %handle.run_id, "Flow started");

    Ok(Json(FlowStartResponse {
        success: true,
        run_id: handle.run_id,
    }))
}

/// Start a flow and poll it until it completes.
///
/// POST /api/flow-run
pub async fn flow_run(
    State(state): State<Arc<AppState>>,
    Payload(req): Payload<FlowStartRequest>,
) -> Result<Json<FlowRunResponse>, ApiError> {
    let config = req.into_flow_config(&state)?;

    let completed = start_and_wait(state.provider.as_ref(), &config).await?;

    Ok(Json(FlowRunResponse {
        success: true,
        run_id: completed.handle.run_id,
        state: completed.state.state.to_string(),
        outputs: completed.state.outputs.unwrap_or_default(),
    }))
}

/// Fetch a run's state once. DONE runs return their normalized output.
///
/// GET /api/get-flow-run-details?run_id=
pub async fn get_flow_run_details(
    State(state): State<Arc<AppState>>,
    QueryParams(params): QueryParams<RunDetailsParams>,
) -> Result<Json<RunDetailsResponse>, ApiError> {
    let run_id = params
        .run_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("run_id query parameter is required"))?;

    let run = state.provider.get_run_status(state.lookup(&run_id)).await?;

    let response = if run.is_done() {
        RunDetailsResponse::Done {
            success: true,
            status: run.state.to_string(),
            output: normalize_output(run.output("output")),
            run_id,
        }
    } else {
        RunDetailsResponse::Pending {
            status: run.state.to_string(),
            run_id,
        }
    };

    Ok(Json(response))
}

/// Turn a flow's `output` value into display text.
///
/// Gumloop often returns newlines as the two characters `\` `n`; those are
/// collapsed into real newlines. Non-string values are rendered as JSON.
pub fn normalize_output(value: Option<&Value>) -> String {
    let text = match value {
        None | Some(Value::Null) => return String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    text.replace("\\n", "\n")
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
