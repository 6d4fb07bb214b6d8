//! Health check endpoint.

use axum::Json;
use serde_json::{json, Value};

/// Liveness probe; does not touch the store.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "UP",
        "version": principia_core::core_version(),
    }))
}
