use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use financehub_core::{
    assets::AvailableAsset,
    investments::{simulate_growth, SimulationRequest, SimulationResult},
};

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{Investment, TradeOrder, TradeResponse},
};

#[utoipa::path(get, path="/api/v1/assets", responses((status=200, description = "Asset catalog")))]
pub async fn list_assets(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<AvailableAsset>>> {
    let assets = state.asset_service.get_assets()?;
    Ok(Json(assets))
}

#[utoipa::path(get, path="/api/v1/investments/{user_id}", responses((status=200, body = [Investment])))]
pub async fn list_investments(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Investment>>> {
    let portfolio = state
        .investment_service
        .get_user_portfolio(&state.resolve_user_id(&user_id))?;
    Ok(Json(portfolio.into_iter().map(Investment::from).collect()))
}

#[utoipa::path(post, path="/api/v1/investments/buy", request_body = TradeOrder, responses((status=200, body = TradeResponse)))]
pub async fn buy(
    State(state): State<Arc<AppState>>,
    Json(order): Json<TradeOrder>,
) -> ApiResult<Json<TradeResponse>> {
    let user_id = state.resolve_user_id(&order.user_id);
    let result = state.investment_service.buy(&user_id, order.into()).await?;
    Ok(Json(TradeResponse::from(result)))
}

#[utoipa::path(post, path="/api/v1/investments/sell", request_body = TradeOrder, responses((status=200, body = TradeResponse)))]
pub async fn sell(
    State(state): State<Arc<AppState>>,
    Json(order): Json<TradeOrder>,
) -> ApiResult<Json<TradeResponse>> {
    let user_id = state.resolve_user_id(&order.user_id);
    let result = state.investment_service.sell(&user_id, order.into()).await?;
    Ok(Json(TradeResponse::from(result)))
}

#[utoipa::path(post, path="/api/v1/investment-workflow/simulate", responses((status=200, description = "Projected growth"), (status=400, description = "Invalid simulation input")))]
pub async fn simulate(Json(request): Json<SimulationRequest>) -> ApiResult<Json<SimulationResult>> {
    Ok(Json(simulate_growth(&request)?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/assets", get(list_assets))
        .route("/investments/buy", post(buy))
        .route("/investments/sell", post(sell))
        .route("/investments/{user_id}", get(list_investments))
        .route("/investment-workflow/simulate", post(simulate))
}
