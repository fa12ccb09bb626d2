use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    api::{middleware::auth::CurrentUser, state::AppState},
    domain::{CreateUserRequest, UpdateUserRequest, User},
    error::Result,
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    let users = state.service_context.user_service.list_users().await?;
    Ok(Json(users))
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>)> {
    let user = state.service_context.user_service.create_user(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<User>> {
    let user = state.service_context.user_service.update_user(id, request).await?;
    Ok(Json(user))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state.service_context.user_service.delete_user(&current.user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct PasswordRequest {
    pub password: String,
}

pub async fn set_password(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<PasswordRequest>,
) -> Result<Json<Value>> {
    state.service_context.user_service
        .set_password(id, &request.password)
        .await?;
    Ok(Json(json!({ "message": "Password updated" })))
}
