// handlers/demo/show.rs - GET /v1/demo/:id handler

use axum::extract::State;

use crate::app::AppState;
use crate::database::models::DemoView;
use crate::handlers::extract::DemoId;
use crate::middleware::{ApiResponse, ApiResult};

pub async fn demo_show(State(state): State<AppState>, DemoId(id): DemoId) -> ApiResult<DemoView> {
    let demo = state.store.get_demo(id).await?;
    Ok(ApiResponse::success(demo.into()))
}
