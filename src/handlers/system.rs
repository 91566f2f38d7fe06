// handlers/system.rs - Service info, health check and unknown-route fallback

use axum::{extract::State, http::Uri};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

/// GET / - Service description
pub async fn root() -> ApiResponse<Value> {
    let version = env!("CARGO_PKG_VERSION");

    ApiResponse::success(json!({
        "name": "Demo API",
        "version": version,
        "description": "Player score records over MongoDB, built with Rust (Axum)",
        "endpoints": {
            "home": "/",
            "health": "/health",
            "demo": "/v1/demo[/:id]",
        }
    }))
}

/// GET /health - Store connectivity
pub async fn health(State(state): State<AppState>) -> ApiResult<Value> {
    let now = chrono::Utc::now();

    if let Err(e) = state.store.health_check().await {
        tracing::warn!("Health check failed: {}", e);
        return Err(ApiError::service_unavailable(format!("database unavailable: {}", e)));
    }
    let documents = state.store.count_demos().await?;

    Ok(ApiResponse::success(json!({
        "status": "ok",
        "timestamp": now,
        "database": "ok",
        "documents": documents,
    })))
}

/// Any route outside the table
pub async fn fallback(uri: Uri) -> ApiError {
    ApiError::not_found(format!("no route for {}", uri.path()))
}
