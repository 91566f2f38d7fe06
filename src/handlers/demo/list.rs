// handlers/demo/list.rs - GET /v1/demo handler

use axum::extract::State;

use crate::app::AppState;
use crate::database::models::DemoView;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /v1/demo - Every record, in store order
pub async fn demo_list(State(state): State<AppState>) -> ApiResult<Vec<DemoView>> {
    let demos = state.store.all_demos().await?;
    Ok(ApiResponse::success(demos.into_iter().map(DemoView::from).collect()))
}
