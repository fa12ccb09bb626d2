use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    api::{middleware::auth::CurrentUser, state::AppState},
    domain::{CreateNoticeRequest, Notice, NoticeCategory, NoticeFilter, UpdateNoticeRequest},
    error::Result,
};

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
    pub category: Option<String>,
    pub club_name: Option<String>,
    pub search: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Notice>>> {
    // "All" and unknown categories mean no category filter
    let filter = NoticeFilter {
        active_only: true,
        category: params.category.as_deref().and_then(NoticeCategory::from_str),
        club_name: params.club_name.filter(|name| !name.is_empty()),
        search: params.search,
    };

    let notices = state.service_context.notice_service.list_active(filter).await?;
    Ok(Json(notices))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Notice>> {
    let notice = state.service_context.notice_service.get_notice(id).await?;
    Ok(Json(notice))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(request): Json<CreateNoticeRequest>,
) -> Result<(StatusCode, Json<Notice>)> {
    let notice = state.service_context.notice_service
        .create_notice(&current.user, request)
        .await?;
    Ok((StatusCode::CREATED, Json(notice)))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateNoticeRequest>,
) -> Result<Json<Notice>> {
    let notice = state.service_context.notice_service
        .update_notice(&current.user, id, request)
        .await?;
    Ok(Json(notice))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state.service_context.notice_service
        .delete_notice(&current.user, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
