use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use financehub_core::notifications::Notification;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{CountResponse, MessageResponse, OwnerRequest},
};

const DEFAULT_PURGE_DAYS: i64 = 30;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LimitQuery {
    limit: Option<usize>,
}

#[utoipa::path(get, path="/api/v1/notifications/{id}", responses((status=200, description = "Notifications, newest first")))]
pub async fn list_notifications(
    Path(user_id): Path<String>,
    Query(query): Query<LimitQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Notification>>> {
    let notifications = state
        .notification_service
        .get_user_notifications(&state.resolve_user_id(&user_id), query.limit)?;
    Ok(Json(notifications))
}

#[utoipa::path(get, path="/api/v1/notifications/{id}/unread", responses((status=200, description = "Unread notifications")))]
pub async fn unread_notifications(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Notification>>> {
    let notifications = state
        .notification_service
        .get_unread_notifications(&state.resolve_user_id(&user_id))?;
    Ok(Json(notifications))
}

#[utoipa::path(get, path="/api/v1/notifications/{id}/unread-count", responses((status=200, body = CountResponse)))]
pub async fn unread_count(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<CountResponse>> {
    let count = state
        .notification_service
        .get_unread_count(&state.resolve_user_id(&user_id))?;
    Ok(Json(CountResponse { count }))
}

/// Marks one notification read; the caller must own it.
#[utoipa::path(post, path="/api/v1/notifications/{id}/read", request_body = OwnerRequest, responses((status=200, description = "Notification"), (status=404, description = "Unknown or foreign notification")))]
pub async fn mark_read(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(owner): Json<OwnerRequest>,
) -> ApiResult<Json<Notification>> {
    let notification = state
        .notification_service
        .mark_as_read(&id, &state.resolve_user_id(&owner.user_id))?;
    Ok(Json(notification))
}

#[utoipa::path(post, path="/api/v1/notifications/{id}/read-all", responses((status=200, body = MessageResponse)))]
pub async fn mark_all_read(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MessageResponse>> {
    let marked = state
        .notification_service
        .mark_all_as_read(&state.resolve_user_id(&user_id))?;
    Ok(Json(MessageResponse {
        message: format!("Marked {} notifications as read", marked),
    }))
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct PurgeQuery {
    older_than_days: Option<i64>,
}

#[utoipa::path(delete, path="/api/v1/notifications/{id}/purge", responses((status=200, body = CountResponse), (status=400, description = "Invalid retention window")))]
pub async fn purge_read(
    Path(user_id): Path<String>,
    Query(query): Query<PurgeQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<CountResponse>> {
    let count = state.notification_service.purge_read_notifications(
        &state.resolve_user_id(&user_id),
        query.older_than_days.unwrap_or(DEFAULT_PURGE_DAYS),
    )?;
    Ok(Json(CountResponse { count }))
}

// Notification ids and user ids share the same path segment.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/notifications/{id}", get(list_notifications))
        .route("/notifications/{id}/unread", get(unread_notifications))
        .route("/notifications/{id}/unread-count", get(unread_count))
        .route("/notifications/{id}/read", post(mark_read))
        .route("/notifications/{id}/read-all", post(mark_all_read))
        .route("/notifications/{id}/purge", delete(purge_read))
}
