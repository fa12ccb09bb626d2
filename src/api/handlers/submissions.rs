use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    api::{middleware::auth::CurrentUser, state::AppState},
    domain::{CreateSubmissionRequest, Submission},
    error::Result,
};

/// Public. Accepted while the event's submission window is open.
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateSubmissionRequest>,
) -> Result<(StatusCode, Json<Submission>)> {
    let submission = state.service_context.enrollment_service.submit(request).await?;
    Ok((StatusCode::CREATED, Json(submission)))
}

pub async fn list(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<Vec<Submission>>> {
    let submissions = state.service_context.enrollment_service
        .list_submissions(&current.user, None)
        .await?;
    Ok(Json(submissions))
}

pub async fn list_for_event(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<Vec<Submission>>> {
    let submissions = state.service_context.enrollment_service
        .list_submissions(&current.user, Some(event_id))
        .await?;
    Ok(Json(submissions))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state.service_context.enrollment_service
        .delete_submission(&current.user, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
