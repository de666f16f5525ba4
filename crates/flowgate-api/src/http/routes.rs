//! HTTP route definitions.

use std::any::Any;
use std::sync::Arc;

use axum::{
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::error;

use crate::error::ApiError;
use crate::http::handlers::{flow_run, flow_start, get_flow_run_details};
use crate::http::monitoring;
use crate::http::spec;
use crate::state::AppState;

/// Create the gateway router.
///
/// ## Route Structure
///
/// ```text
/// GET  /health                      - Liveness ("hi!")
///
/// /api
///   POST /api/flow-start              - Start a flow, return its run id
///   POST /api/flow-run                - Start a flow and wait for it
///   GET  /api/get-flow-run-details    - Fetch a run once (?run_id=)
///   GET  /api/get-github-raw          - Fetch a trusted spec document (?url=)
///   POST /api/full-spec               - Parse a JSON/YAML body
/// ```
pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/flow-start", post(flow_start))
        .route("/flow-run", post(flow_run))
        .route("/get-flow-run-details", get(get_flow_run_details))
        .route("/get-github-raw", get(spec::get_github_raw))
        .route("/full-spec", post(spec::full_spec))
        .with_state(state);

    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    Router::new()
        .route("/health", get(monitoring::health))
        .nest("/api", api_routes)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Turn a handler panic into the generic 500 body.
fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = detail, "Handler panicked");

    ApiError::internal("Unexpected server error").into_response()
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
