// handlers/demo/create.rs - POST /v1/demo handler

use axum::extract::State;

use crate::app::AppState;
use crate::database::models::{CreatedId, DemoCreateRequest};
use crate::handlers::extract::JsonBody;
use crate::middleware::{ApiResponse, ApiResult};

/// POST /v1/demo - Create a record from `{score, player_name}`
///
/// Validation runs before the store is touched; the response carries the
/// generated id.
pub async fn demo_create(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<DemoCreateRequest>,
) -> ApiResult<CreatedId> {
    let input = payload.validate()?;
    let id = state.store.add_demo(input).await?;
    Ok(ApiResponse::success(CreatedId { id: id.to_hex() }))
}
