use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use financehub_core::dashboard::DashboardSummary;

use crate::{error::ApiResult, main_lib::AppState};

#[utoipa::path(get, path="/api/v1/dashboard/{user_id}", responses((status=200, description = "Dashboard summary")))]
pub async fn get_dashboard(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DashboardSummary>> {
    let summary = state
        .dashboard_service
        .get_summary(&state.resolve_user_id(&user_id))?;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/dashboard/{user_id}", get(get_dashboard))
}
