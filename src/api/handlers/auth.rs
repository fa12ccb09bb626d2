use axum::{
    extract::{Extension, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    api::{middleware::auth::CurrentUser, state::AppState},
    domain::User,
    error::Result,
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let (token, user) = state.service_context.user_service
        .login(&req.email, &req.password)
        .await?;

    Ok(Json(LoginResponse { token, user }))
}

/// Tokens are stateless; the client discards its copy.
pub async fn logout() -> Json<Value> {
    Json(json!({ "message": "Logged out" }))
}

pub async fn profile(Extension(current): Extension<CurrentUser>) -> Json<User> {
    Json(current.user)
}
