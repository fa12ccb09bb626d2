pub mod handlers;
pub mod middleware;
pub mod state;

use axum::{
    http::{header, HeaderValue, Method},
    Router,
    routing::{get, patch, post, put},
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use std::sync::Arc;

use crate::{
    config::Settings,
    service::ServiceContext,
};
use state::AppState;

pub fn create_app(service_context: Arc<ServiceContext>, settings: Arc<Settings>) -> Router {
    let cors = cors_layer(&settings);
    let app_state = AppState::new(service_context, settings);

    Router::new()
        // Root and health endpoints
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::root::health_check))

        .nest("/api", api_routes(app_state.clone()))

        .with_state(app_state)

        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(settings: &Settings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .cors
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .expose_headers(Any)
}

fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes(state.clone()))
        .nest("/clubs", club_routes(state.clone()))
        .nest("/events", event_routes(state.clone()))
        .nest("/notices", notice_routes(state.clone()))
        .nest("/applications", application_routes(state.clone()))
        .nest("/submissions", submission_routes(state.clone()))
        .nest("/admin", admin_routes(state))
}

fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .merge(
            Router::new()
                .route("/profile", get(handlers::auth::profile))
                .route_layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    middleware::auth::require_auth,
                )),
        )
        // Account management is reserved for the super admin
        .merge(
            Router::new()
                .route("/users", get(handlers::users::list).post(handlers::users::create))
                .route("/users/:id", put(handlers::users::update).delete(handlers::users::delete))
                .route("/users/:id/password", put(handlers::users::set_password))
                .route_layer(axum::middleware::from_fn_with_state(
                    state,
                    middleware::auth::require_superadmin,
                )),
        )
}

fn club_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Public feed
        .route("/", get(handlers::clubs::list))
        .route("/:id", get(handlers::clubs::get))
        .merge(
            Router::new()
                .route("/", post(handlers::clubs::create))
                .route("/:id", put(handlers::clubs::update).delete(handlers::clubs::delete))
                .route_layer(axum::middleware::from_fn_with_state(
                    state,
                    middleware::auth::require_auth,
                )),
        )
}

fn event_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::events::list))
        .route("/:id", get(handlers::events::get))
        .merge(
            Router::new()
                .route("/", post(handlers::events::create))
                .route("/:id", put(handlers::events::update).delete(handlers::events::delete))
                .route_layer(axum::middleware::from_fn_with_state(
                    state,
                    middleware::auth::require_auth,
                )),
        )
}

fn notice_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::notices::list))
        .route("/:id", get(handlers::notices::get))
        .merge(
            Router::new()
                .route("/", post(handlers::notices::create))
                .route("/:id", put(handlers::notices::update).delete(handlers::notices::delete))
                .route_layer(axum::middleware::from_fn_with_state(
                    state,
                    middleware::auth::require_auth,
                )),
        )
}

fn application_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Students apply without an account
        .route("/", post(handlers::applications::create))
        .merge(
            Router::new()
                .route("/", get(handlers::applications::list))
                .route(
                    "/:id",
                    get(handlers::applications::get)
                        .put(handlers::applications::update)
                        .delete(handlers::applications::delete),
                )
                .route("/:id/submit", patch(handlers::applications::submit_drive_link))
                .route_layer(axum::middleware::from_fn_with_state(
                    state,
                    middleware::auth::require_auth,
                )),
        )
}

fn submission_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::submissions::create))
        .merge(
            Router::new()
                .route("/", get(handlers::submissions::list))
                .route("/event/:event_id", get(handlers::submissions::list_for_event))
                .route("/:id", axum::routing::delete(handlers::submissions::delete))
                .route_layer(axum::middleware::from_fn_with_state(
                    state,
                    middleware::auth::require_auth,
                )),
        )
}

fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/postings", get(handlers::admin::postings))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::auth::require_auth,
        ))
}
