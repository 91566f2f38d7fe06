// handlers/demo/delete.rs - DELETE /v1/demo/:id handler

use axum::extract::State;

use crate::app::AppState;
use crate::handlers::extract::DemoId;
use crate::middleware::{ApiResponse, ApiResult, Empty};

/// DELETE /v1/demo/:id - Hard delete; nothing is kept
pub async fn demo_delete(State(state): State<AppState>, DemoId(id): DemoId) -> ApiResult<Empty> {
    state.store.delete_demo(id).await?;
    Ok(ApiResponse::empty())
}
