//! Spec document passthrough handlers.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::body::Payload;
use crate::error::ApiError;
use crate::query::QueryParams;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GithubRawParams {
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GithubRawResponse {
    pub data: Value,
}

#[derive(Debug, Serialize)]
pub struct FullSpecResponse {
    pub success: bool,
    pub api: Value,
}

/// Fetch a document from the trusted host and return it parsed.
///
/// GET /api/get-github-raw?url=
pub async fn get_github_raw(
    State(state): State<Arc<AppState>>,
    QueryParams(params): QueryParams<GithubRawParams>,
) -> Result<Json<GithubRawResponse>, ApiError> {
    let data = state.spec_fetcher.fetch(params.url.as_deref()).await?;
    Ok(Json(GithubRawResponse { data }))
}

/// Echo a JSON or YAML body back in its canonical JSON form.
///
/// POST /api/full-spec
pub async fn full_spec(Payload(api): Payload<Value>) -> Json<FullSpecResponse> {
    Json(FullSpecResponse { success: true, api })
}
