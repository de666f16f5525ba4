//! Health check handler.

use axum::Json;

/// Liveness acknowledgement.
pub const HEALTH_ACK: &str = "hi!";

/// GET /health
pub async fn health() -> Json<&'static str> {
    Json(HEALTH_ACK)
}
