use super::*;
use serde_json::json;

use crate::spec_fetch::SpecFetcher;
use crate::state::Credentials;
use flowgate_gumloop::{
    FlowRouter, PipelineProvider, ProviderError, RunHandle, RunLookup, RunState,
};

struct NoopProvider;

#[async_trait::async_trait]
impl PipelineProvider for NoopProvider {
    async fn start_flow(
        &self,
        _config: &flowgate_gumloop::FlowConfig,
    ) -> Result<RunHandle, ProviderError> {
        unreachable!("not called in these tests")
    }

    async fn get_run_status(&self, _lookup: RunLookup<'_>) -> Result<RunState, ProviderError> {
        unreachable!("not called in these tests")
    }
}

fn state() -> AppState {
    let flows: FlowRouter = [("ai-search", "8cAwbUxMdbWMUJdQQAxuLE")].into_iter().collect();
    AppState::new(
        Arc::new(NoopProvider),
        flows,
        Credentials::new("key", "user"),
        SpecFetcher::new("https://raw.githubusercontent.com/"),
    )
}

#[test]
fn test_normalize_output_collapses_escaped_newlines() {
    let value = json!("line one\\nline two");
    assert_eq!(normalize_output(Some(&value)), "line one\nline two");
}

#[test]
fn test_normalize_output_keeps_real_newlines() {
    let value = json!("a\nb");
    assert_eq!(normalize_output(Some(&value)), "a\nb");
}

#[test]
fn test_normalize_output_absent_or_null() {
    assert_eq!(normalize_output(None), "");
    assert_eq!(normalize_output(Some(&Value::Null)), "");
}

#[test]
fn test_normalize_output_serializes_non_strings() {
    let value = json!({"summary": "done"});
    assert_eq!(normalize_output(Some(&value)), r#"{"summary":"done"}"#);

    assert_eq!(normalize_output(Some(&json!(42))), "42");
}

#[test]
fn test_flow_start_request_camel_case() {
    let req: FlowStartRequest = serde_json::from_value(json!({
        "flowType": "ai-search",
        "pipelineInputs": [{"inputName": "input", "value": "rust async"}],
        "pollingIntervalMs": 500,
        "timeoutMs": 10000,
        "projectId": "proj"
    }))
    .unwrap();

    assert_eq!(req.flow_type.as_deref(), Some("ai-search"));
    assert_eq!(req.pipeline_inputs.len(), 1);
    assert_eq!(req.pipeline_inputs[0].input_name, "input");
    assert_eq!(req.polling_interval_ms, Some(500));
    assert_eq!(req.timeout_ms, Some(10_000));
    assert_eq!(req.project_id.as_deref(), Some("proj"));
}

#[test]
fn test_pipeline_input_accepts_snake_case_alias() {
    let input: PipelineInputPayload =
        serde_json::from_value(json!({"input_name": "query", "value": "v"})).unwrap();
    let input: PipelineInput = input.into();
    assert_eq!(input, PipelineInput::new("query", "v"));
}

#[test]
fn test_flow_start_request_defaults() {
    let req: FlowStartRequest = serde_json::from_value(json!({"flowType": "ai-search"})).unwrap();
    assert!(req.pipeline_inputs.is_empty());
    assert!(req.polling_interval_ms.is_none());
    assert!(req.timeout_ms.is_none());
}

#[test]
fn test_into_flow_config_resolves_saved_item() {
    let req: FlowStartRequest = serde_json::from_value(json!({
        "flowType": "ai-search",
        "pipelineInputs": [{"inputName": "input", "value": "hello"}],
        "timeoutMs": 1000
    }))
    .unwrap();

    let config = req.into_flow_config(&state()).unwrap();
    assert_eq!(config.saved_item_id, "8cAwbUxMdbWMUJdQQAxuLE");
    assert_eq!(config.pipeline_inputs, vec![PipelineInput::new("input", "hello")]);
    assert_eq!(config.timeout, std::time::Duration::from_millis(1_000));
}

#[test]
fn test_into_flow_config_unknown_type() {
    let req: FlowStartRequest = serde_json::from_value(json!({"flowType": "nope"})).unwrap();
    let err = req.into_flow_config(&state()).unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(ref m) if m.contains("ai-search")));
}

#[test]
fn test_into_flow_config_missing_type() {
    let req: FlowStartRequest = serde_json::from_value(json!({})).unwrap();
    assert!(matches!(
        req.into_flow_config(&state()),
        Err(ApiError::BadRequest(_))
    ));
}

#[test]
fn test_run_details_response_shapes() {
    let done = RunDetailsResponse::Done {
        success: true,
        status: "DONE".to_string(),
        run_id: "r1".to_string(),
        output: "hi".to_string(),
    };
    assert_eq!(
        serde_json::to_value(done).unwrap(),
        json!({"success": true, "status": "DONE", "runId": "r1", "output": "hi"})
    );

    let pending = RunDetailsResponse::Pending {
        status: "RUNNING".to_string(),
        run_id: "r1".to_string(),
    };
    assert_eq!(
        serde_json::to_value(pending).unwrap(),
        json!({"status": "RUNNING", "runId": "r1"})
    );
}

#[test]
fn test_into_flow_config_zero_polling_interval() {
    let req: FlowStartRequest = serde_json::from_value(json!({
        "flowType": "ai-search",
        "pollingIntervalMs": 0
    }))
    .unwrap();
    let err = req.into_flow_config(&state()).unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(ref m) if m.contains("pollingIntervalMs")));
}
