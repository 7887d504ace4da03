use axum::{body::Body, http::Request};
use financehub_server::{api::app_router, build_state, config::Config};
use tower::ServiceExt;

#[tokio::test]
async fn healthz_works() {
    let config = Config {
        seed_demo_data: false,
        ..Config::default()
    };
    let state = build_state(&config).await.unwrap();
    let app = app_router(state, &config);

    let response = app
        .oneshot(Request::builder().uri("/api/v1/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let config = Config {
        seed_demo_data: false,
        ..Config::default()
    };
    let state = build_state(&config).await.unwrap();
    let app = app_router(state, &config);

    let response = app
        .oneshot(Request::builder().uri("/openapi.json").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let paths = doc["paths"].as_object().unwrap();
    for path in [
        "/api/v1/users",
        "/api/v1/users/{id}",
        "/api/v1/accounts",
        "/api/v1/accounts/{user_id}",
        "/api/v1/dashboard/{user_id}",
        "/api/v1/assets",
        "/api/v1/investments/buy",
        "/api/v1/investments/sell",
        "/api/v1/investments/{user_id}",
        "/api/v1/investment-workflow/simulate",
        "/api/v1/loans",
        "/api/v1/loans/{id}",
        "/api/v1/loans/{id}/payments",
        "/api/v1/calculate/loan",
        "/api/v1/validation/loan-limits/{loan_type}",
        "/api/v1/loan-workflow/apply",
        "/api/v1/loan-workflow/applications/{user_id}",
        "/api/v1/transactions",
        "/api/v1/transactions/recent/{user_id}",
        "/api/v1/transactions/{user_id}",
        "/api/v1/notifications/{id}",
        "/api/v1/notifications/{id}/unread",
        "/api/v1/notifications/{id}/unread-count",
        "/api/v1/notifications/{id}/read",
        "/api/v1/notifications/{id}/read-all",
        "/api/v1/notifications/{id}/purge",
    ] {
        assert!(paths.contains_key(path), "missing {}", path);
    }
}
