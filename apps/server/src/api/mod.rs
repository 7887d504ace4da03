use std::sync::Arc;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{
    config::Config,
    main_lib::AppState,
    models::{
        Account, CountResponse, Investment, LoanCalculatorRequest, LoanCalculatorResponse,
        LoanPaymentRequest, MessageResponse, NewAccount, NewTransactionRequest, OwnerRequest,
        TradeOrder, TradeResponse,
    },
};

pub mod accounts;
pub mod dashboard;
pub mod investments;
pub mod loans;
pub mod notifications;
pub mod transactions;
pub mod users;

#[utoipa::path(get, path = "/api/v1/healthz", responses((status = 200, description = "Health")))]
pub async fn healthz() -> &'static str {
    "ok"
}

#[utoipa::path(get, path = "/api/v1/readyz", responses((status = 200, description = "Ready")))]
pub async fn readyz() -> &'static str {
    "ok"
}

#[derive(OpenApi)]
#[openapi(
    paths(
        healthz,
        readyz,
        users::create_user,
        users::get_user,
        accounts::list_accounts,
        accounts::create_account,
        dashboard::get_dashboard,
        investments::list_assets,
        investments::list_investments,
        investments::buy,
        investments::sell,
        investments::simulate,
        loans::create_loan,
        loans::list_loans,
        loans::record_payment,
        loans::calculate_loan,
        loans::loan_limits,
        loans::submit_application,
        loans::list_applications,
        transactions::create_transaction,
        transactions::recent_transactions,
        transactions::user_transactions,
        notifications::list_notifications,
        notifications::unread_notifications,
        notifications::unread_count,
        notifications::mark_read,
        notifications::mark_all_read,
        notifications::purge_read,
    ),
    components(schemas(
        Account,
        NewAccount,
        Investment,
        TradeOrder,
        TradeResponse,
        LoanCalculatorRequest,
        LoanCalculatorResponse,
        LoanPaymentRequest,
        NewTransactionRequest,
        OwnerRequest,
        MessageResponse,
        CountResponse,
    )),
    tags((name = "financehub"))
)]
pub struct ApiDoc;

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(origins)
    };

    let openapi = ApiDoc::openapi();

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .merge(users::router())
        .merge(accounts::router())
        .merge(investments::router())
        .merge(loans::router())
        .merge(transactions::router())
        .merge(notifications::router())
        .merge(dashboard::router());

    Router::new()
        .nest("/api/v1", api)
        .route("/openapi.json", get(|| async { Json(openapi) }))
        .with_state(state)
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
