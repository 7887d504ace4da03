use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{Account, NewAccount},
};

#[utoipa::path(get, path="/api/v1/accounts/{user_id}", responses((status=200, body = [Account])))]
pub async fn list_accounts(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Account>>> {
    let accounts = state
        .account_service
        .get_user_accounts(&state.resolve_user_id(&user_id))?;
    Ok(Json(accounts.into_iter().map(Account::from).collect()))
}

#[utoipa::path(post, path="/api/v1/accounts", request_body = NewAccount, responses((status=200, body = Account)))]
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewAccount>,
) -> ApiResult<Json<Account>> {
    let user_id = state.resolve_user_id(&payload.user_id);
    let core_new = payload.into_core(user_id)?;
    let created = state.account_service.create_account(core_new).await?;
    Ok(Json(Account::from(created)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/accounts", post(create_account))
        .route("/accounts/{user_id}", get(list_accounts))
}
