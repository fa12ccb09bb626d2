use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::{
    api::{middleware::auth::CurrentUser, state::AppState},
    domain::{Club, ClubCategory, ClubFilter, CreateClubRequest, UpdateClubRequest},
    error::{AppError, Result},
    lifecycle::Evaluated,
};

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
    pub category: Option<String>,
    pub search: Option<String>,
    /// Include clubs that are not recruiting.
    #[serde(default)]
    pub include_inactive: bool,
    /// Return the club directory (names only) instead of the feed.
    #[serde(default)]
    pub show_all: bool,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Response> {
    let clubs = &state.service_context.club_service;

    if params.show_all {
        let names = clubs.club_directory().await?;
        return Ok(Json(names).into_response());
    }

    let category = match params.category.as_deref() {
        None | Some("") | Some("all") => None,
        Some(raw) => Some(
            ClubCategory::from_str(raw)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown category: {}", raw)))?,
        ),
    };

    let filter = ClubFilter {
        recruiting_only: !params.include_inactive,
        category,
        search: params.search,
    };

    let feed = clubs.list_feed(&filter).await?;
    Ok(Json(feed).into_response())
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Evaluated<Club>>> {
    let club = state.service_context.club_service.get_club(id).await?;
    Ok(Json(club))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(request): Json<CreateClubRequest>,
) -> Result<(StatusCode, Json<Club>)> {
    let club = state.service_context.club_service
        .create_club(&current.user, request)
        .await?;
    Ok((StatusCode::CREATED, Json(club)))
}

/// `ident` is a club id or a club name.
pub async fn update(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(ident): Path<String>,
    Json(request): Json<UpdateClubRequest>,
) -> Result<Json<Club>> {
    let club = state.service_context.club_service
        .update_club(&current.user, &ident, request)
        .await?;
    Ok(Json(club))
}

/// Closes recruitment rather than removing the club.
pub async fn delete(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(ident): Path<String>,
) -> Result<Response> {
    let closed = state.service_context.club_service
        .close_recruitment(&current.user, &ident)
        .await?;

    let body = match closed {
        Some(club) => json!({ "message": "Recruitment closed", "club": club }),
        None => json!({ "message": "Club not found; nothing to close" }),
    };
    Ok(Json(body).into_response())
}
