use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use financehub_core::loans::{
    loan_preview, term_months_from_years, Loan, LoanApplication, LoanApplicationReceipt,
    LoanApplicationRequest, LoanLimits, LoanType, NewLoan,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{LoanCalculatorRequest, LoanCalculatorResponse, LoanPaymentRequest},
};

#[utoipa::path(get, path="/api/v1/loans/{id}", responses((status=200, description = "Loans of a user")))]
pub async fn list_loans(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Loan>>> {
    let loans = state
        .loan_service
        .get_user_loans(&state.resolve_user_id(&user_id))?;
    Ok(Json(loans))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLoanPayload {
    user_id: String,
    #[serde(rename = "type")]
    loan_type: LoanType,
    amount: Decimal,
    interest_rate: Decimal,
    term_months: u32,
}

/// Books a loan directly, skipping the underwriting workflow.
#[utoipa::path(post, path="/api/v1/loans", responses((status=200, description = "Booked loan")))]
pub async fn create_loan(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateLoanPayload>,
) -> ApiResult<Json<Loan>> {
    let loan = state
        .loan_service
        .create_loan(NewLoan {
            user_id: state.resolve_user_id(&payload.user_id),
            loan_type: payload.loan_type,
            amount: payload.amount,
            interest_rate: payload.interest_rate,
            term_months: payload.term_months,
        })
        .await?;
    Ok(Json(loan))
}

#[utoipa::path(post, path="/api/v1/loans/{id}/payments", request_body = LoanPaymentRequest, responses((status=200, description = "Updated loan"), (status=409, description = "Loan is not active")))]
pub async fn record_payment(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoanPaymentRequest>,
) -> ApiResult<Json<Loan>> {
    let user_id = state.resolve_user_id(&payload.user_id);
    let loan = state
        .loan_service
        .record_payment(&user_id, &id, payload.amount)
        .await?;
    Ok(Json(loan))
}

#[utoipa::path(post, path="/api/v1/calculate/loan", request_body = LoanCalculatorRequest, responses((status=200, body = LoanCalculatorResponse)))]
pub async fn calculate_loan(
    Json(request): Json<LoanCalculatorRequest>,
) -> ApiResult<Json<LoanCalculatorResponse>> {
    let term_months = term_months_from_years(request.term_years)?;
    let preview = loan_preview(request.amount, request.rate, term_months)?;
    Ok(Json(LoanCalculatorResponse::new(preview, term_months)))
}

#[utoipa::path(get, path="/api/v1/validation/loan-limits/{loan_type}", responses((status=200, description = "Amount limits for a loan type")))]
pub async fn loan_limits(
    Path(loan_type): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Json<LoanLimits> {
    Json(state.loan_service.get_loan_limits(&loan_type))
}

#[utoipa::path(post, path="/api/v1/loan-workflow/apply", responses((status=200, description = "Application received"), (status=400, description = "Invalid application")))]
pub async fn submit_application(
    State(state): State<Arc<AppState>>,
    Json(mut request): Json<LoanApplicationRequest>,
) -> ApiResult<Json<LoanApplicationReceipt>> {
    request.user_id = state.resolve_user_id(&request.user_id);
    let receipt = state
        .underwriting_service
        .submit_application(request)
        .await?;
    Ok(Json(receipt))
}

#[utoipa::path(get, path="/api/v1/loan-workflow/applications/{user_id}", responses((status=200, description = "Applications of a user")))]
pub async fn list_applications(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<LoanApplication>>> {
    let applications = state
        .underwriting_service
        .get_user_applications(&state.resolve_user_id(&user_id))?;
    Ok(Json(applications))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/loans", post(create_loan))
        .route("/loans/{id}", get(list_loans))
        .route("/loans/{id}/payments", post(record_payment))
        .route("/calculate/loan", post(calculate_loan))
        .route("/validation/loan-limits/{loan_type}", get(loan_limits))
        .route("/loan-workflow/apply", post(submit_application))
        .route(
            "/loan-workflow/applications/{user_id}",
            get(list_applications),
        )
}
