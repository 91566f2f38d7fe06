// handlers/demo/update.rs - PUT /v1/demo/:id handler

use axum::extract::State;

use crate::app::AppState;
use crate::database::models::DemoUpdateRequest;
use crate::handlers::extract::{DemoId, JsonBody};
use crate::middleware::{ApiResponse, ApiResult, Empty};

/// PUT /v1/demo/:id - Replace the score of a record
///
/// The id is checked before the body is read; only `score` is mutable.
pub async fn demo_update(
    State(state): State<AppState>,
    DemoId(id): DemoId,
    JsonBody(payload): JsonBody<DemoUpdateRequest>,
) -> ApiResult<Empty> {
    let score = payload.validate()?;
    state.store.update_demo(id, score).await?;
    Ok(ApiResponse::empty())
}
