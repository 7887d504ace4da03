use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use financehub_core::users::{NewUser, User};

use crate::{error::ApiResult, main_lib::AppState};

#[utoipa::path(post, path="/api/v1/users", responses((status=200, description = "Created user"), (status=409, description = "Username or email taken")))]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewUser>,
) -> ApiResult<Json<User>> {
    let user = state.user_service.create_user(payload).await?;
    Ok(Json(user))
}

#[utoipa::path(get, path="/api/v1/users/{id}", responses((status=200, description = "User"), (status=404, description = "Unknown user")))]
pub async fn get_user(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<User>> {
    let user = state.user_service.get_user(&state.resolve_user_id(&id))?;
    Ok(Json(user))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/{id}", get(get_user))
}
