use axum::{
    extract::{Extension, State},
    Json,
};
use serde::Serialize;

use crate::{
    api::{middleware::auth::CurrentUser, state::AppState},
    domain::{Club, Event},
    error::Result,
    lifecycle::Evaluated,
};

/// Admin panel view: nothing is hidden, every posting carries its status so
/// the panel can badge expired ones.
#[derive(Debug, Serialize)]
pub struct ManagedPostings {
    pub recruitments: Vec<Evaluated<Club>>,
    pub events: Vec<Evaluated<Event>>,
}

pub async fn postings(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<ManagedPostings>> {
    let ctx = &state.service_context;
    let recruitments = ctx.club_service.managed_clubs(&current.user).await?;
    let events = ctx.event_service.managed_events(&current.user).await?;

    Ok(Json(ManagedPostings { recruitments, events }))
}
