use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use financehub_core::{
    constants::DEFAULT_LIST_LIMIT,
    transactions::{NewTransaction, Transaction},
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::NewTransactionRequest,
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LimitQuery {
    limit: Option<usize>,
}

#[utoipa::path(get, path="/api/v1/transactions/recent/{user_id}", responses((status=200, description = "Most recent transactions"), (status=400, description = "Invalid limit")))]
pub async fn recent_transactions(
    Path(user_id): Path<String>,
    Query(query): Query<LimitQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Transaction>>> {
    if query.limit == Some(0) {
        return Err(ApiError::BadRequest("limit must be positive".to_string()));
    }
    let transactions = state
        .transaction_service
        .get_user_recent_transactions(&state.resolve_user_id(&user_id), query.limit)?;
    Ok(Json(transactions))
}

#[utoipa::path(get, path="/api/v1/transactions/{user_id}", responses((status=200, description = "Transactions of a user")))]
pub async fn user_transactions(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let transactions = state
        .transaction_service
        .get_user_recent_transactions(&state.resolve_user_id(&user_id), Some(DEFAULT_LIST_LIMIT))?;
    Ok(Json(transactions))
}

#[utoipa::path(post, path="/api/v1/transactions", request_body = NewTransactionRequest, responses((status=200, description = "Recorded transaction"), (status=404, description = "Unknown account")))]
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewTransactionRequest>,
) -> ApiResult<Json<Transaction>> {
    let user_id = state.resolve_user_id(&payload.user_id);
    let transaction = state
        .transaction_service
        .create_transaction(
            &user_id,
            NewTransaction {
                account_id: payload.account_id,
                amount: payload.amount,
                description: payload.description,
                category: payload.category,
            },
        )
        .await?;
    Ok(Json(transaction))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/transactions", post(create_transaction))
        .route("/transactions/recent/{user_id}", get(recent_transactions))
        .route("/transactions/{user_id}", get(user_transactions))
}
