use axum::{extract::State, http::StatusCode, Json, response::IntoResponse};
use serde_json::json;

use crate::api::state::AppState;

pub async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "Clubboard API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Club recruitments, events and notices for students",
        "status": "operational",
        "endpoints": {
            "health": "/health",
            "auth": "/api/auth",
            "clubs": "/api/clubs",
            "events": "/api/events",
            "notices": "/api/notices",
            "applications": "/api/applications",
            "submissions": "/api/submissions",
            "admin": "/api/admin/postings"
        }
    }))
}

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = match sqlx::query("SELECT 1")
        .execute(&state.service_context.db_pool)
        .await
    {
        Ok(_) => "connected",
        Err(e) => {
            tracing::warn!("Health check could not reach the database: {}", e);
            "unavailable"
        }
    };

    let status = if database == "connected" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(json!({
        "status": if status == StatusCode::OK { "healthy" } else { "degraded" },
        "database": database,
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}
