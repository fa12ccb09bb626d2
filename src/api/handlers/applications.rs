use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    api::{middleware::auth::CurrentUser, state::AppState},
    domain::{Application, ApplicationFilter, CreateApplicationRequest, UpdateApplicationRequest},
    error::Result,
};

/// Public. Rejected with 400 once the posting no longer accepts applicants.
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateApplicationRequest>,
) -> Result<(StatusCode, Json<Application>)> {
    let application = state.service_context.enrollment_service.apply(request).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

pub async fn list(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Query(filter): Query<ApplicationFilter>,
) -> Result<Json<Vec<Application>>> {
    let applications = state.service_context.enrollment_service
        .list_applications(&current.user, &filter)
        .await?;
    Ok(Json(applications))
}

pub async fn get(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Application>> {
    let application = state.service_context.enrollment_service
        .get_application(&current.user, id)
        .await?;
    Ok(Json(application))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateApplicationRequest>,
) -> Result<Json<Application>> {
    let application = state.service_context.enrollment_service
        .update_application(&current.user, id, request)
        .await?;
    Ok(Json(application))
}

#[derive(Debug, Deserialize)]
pub struct DriveLinkRequest {
    #[serde(default)]
    pub drive_link: String,
}

pub async fn submit_drive_link(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<DriveLinkRequest>,
) -> Result<Json<Application>> {
    let application = state.service_context.enrollment_service
        .attach_drive_link(&current.user, id, &request.drive_link)
        .await?;
    Ok(Json(application))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state.service_context.enrollment_service
        .delete_application(&current.user, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
