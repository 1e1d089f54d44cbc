use axum::Json;
use serde_json::{Value, json};

/// GET /health - liveness probe, no identity required.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
