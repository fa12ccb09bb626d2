use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    api::{middleware::auth::CurrentUser, state::AppState},
    domain::{CreateEventRequest, Event, EventFilter, UpdateEventRequest},
    error::Result,
    lifecycle::Evaluated,
};

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
    pub club_name: Option<String>,
    pub is_active: Option<bool>,
    pub search: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Evaluated<Event>>>> {
    let filter = EventFilter {
        club_name: params.club_name.filter(|name| !name.is_empty()),
        is_active: params.is_active,
        search: params.search,
    };

    let events = state.service_context.event_service.list_feed(&filter).await?;
    Ok(Json(events))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Evaluated<Event>>> {
    let event = state.service_context.event_service.get_event(id).await?;
    Ok(Json(event))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>)> {
    let event = state.service_context.event_service
        .create_event(&current.user, request)
        .await?;
    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateEventRequest>,
) -> Result<Json<Event>> {
    let event = state.service_context.event_service
        .update_event(&current.user, id, request)
        .await?;
    Ok(Json(event))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state.service_context.event_service
        .delete_event(&current.user, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
