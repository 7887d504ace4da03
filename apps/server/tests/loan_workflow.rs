use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use financehub_server::{api::app_router, build_state, config::Config};
use serde_json::{json, Value};
use tower::ServiceExt;

const EVALUATION_DELAY: Duration = Duration::from_secs(60);

async fn build_test_router() -> Router {
    let config = Config {
        seed_demo_data: false,
        loan_evaluation_delay: EVALUATION_DELAY,
        ..Config::default()
    };
    let state = build_state(&config).await.unwrap();
    app_router(state, &config)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn applicant(app: &Router) -> String {
    let (_, user) = send(
        app,
        Method::POST,
        "/api/v1/users",
        Some(json!({
            "username": "applicant",
            "password": "secret",
            "name": "Ada Applicant",
            "email": "ada@example.com",
        })),
    )
    .await;
    let user_id = user["id"].as_str().unwrap().to_string();
    let (status, _) = send(
        app,
        Method::POST,
        "/api/v1/accounts",
        Some(json!({ "userId": user_id, "name": "Main", "type": "checking", "initialBalance": 1000 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    user_id
}

async fn application_status(app: &Router, user_id: &str) -> Value {
    let (_, applications) = send(
        app,
        Method::GET,
        &format!("/api/v1/loan-workflow/applications/{}", user_id),
        None,
    )
    .await;
    applications[0]["status"].clone()
}

#[tokio::test(start_paused = true)]
async fn application_is_approved_after_delay() {
    let app = build_test_router().await;
    let user_id = applicant(&app).await;

    let (status, receipt) = send(
        &app,
        Method::POST,
        "/api/v1/loan-workflow/apply",
        Some(json!({
            "userId": user_id,
            "type": "personal",
            "amount": 5000,
            "income": 36000,
            "employmentStatus": "employed",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(receipt["status"], "pending");
    assert_eq!(receipt["purpose"], "personal loan");

    tokio::time::sleep(EVALUATION_DELAY / 2).await;
    assert_eq!(application_status(&app, &user_id).await, "pending");

    tokio::time::sleep(EVALUATION_DELAY).await;
    assert_eq!(application_status(&app, &user_id).await, "approved");

    let (_, loans) = send(&app, Method::GET, &format!("/api/v1/loans/{}", user_id), None).await;
    assert_eq!(loans.as_array().unwrap().len(), 1);
    assert_eq!(loans[0]["interestRate"], json!(8.5));
    assert_eq!(loans[0]["termMonths"], 36);
    assert_eq!(loans[0]["status"], "active");

    let (_, notifications) = send(
        &app,
        Method::GET,
        &format!("/api/v1/notifications/{}", user_id),
        None,
    )
    .await;
    let approval = notifications
        .as_array()
        .unwrap()
        .iter()
        .find(|n| n["title"] == "Loan Approved")
        .cloned()
        .unwrap();
    assert_eq!(approval["type"], "success");
    assert!(approval["message"].as_str().unwrap().contains("DTI: 5.3%"));
}

#[tokio::test(start_paused = true)]
async fn unemployed_applicant_is_rejected() {
    let app = build_test_router().await;
    let user_id = applicant(&app).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/loan-workflow/apply",
        Some(json!({
            "userId": user_id,
            "type": "auto",
            "amount": 20000,
            "income": 60000,
            "employmentStatus": "unemployed",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    tokio::time::sleep(EVALUATION_DELAY + Duration::from_secs(1)).await;
    assert_eq!(application_status(&app, &user_id).await, "rejected");

    let (_, loans) = send(&app, Method::GET, &format!("/api/v1/loans/{}", user_id), None).await;
    assert!(loans.as_array().unwrap().is_empty());

    let (_, notifications) = send(
        &app,
        Method::GET,
        &format!("/api/v1/notifications/{}", user_id),
        None,
    )
    .await;
    assert_eq!(notifications[0]["title"], "Loan Rejected");
    assert_eq!(notifications[0]["type"], "error");
}

#[tokio::test(start_paused = true)]
async fn invalid_application_is_refused_upfront() {
    let app = build_test_router().await;
    let user_id = applicant(&app).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/loan-workflow/apply",
        Some(json!({
            "userId": user_id,
            "type": "personal",
            "amount": 0,
            "income": 36000,
            "employmentStatus": "employed",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, applications) = send(
        &app,
        Method::GET,
        &format!("/api/v1/loan-workflow/applications/{}", user_id),
        None,
    )
    .await;
    assert!(applications.as_array().unwrap().is_empty());
}
