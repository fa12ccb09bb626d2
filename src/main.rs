use std::sync::Arc;
use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clubboard::{
    api,
    auth::AuthService,
    config::Settings,
    lifecycle::{DeadlineZone, LifecycleClock},
    service::ServiceContext,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clubboard=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let settings = Settings::new().map_err(|e| {
        tracing::error!("Failed to load config: {}", e);
        e
    })?;

    tracing::info!("Starting Clubboard server on {}:{}", settings.server.host, settings.server.port);

    // Initialize database
    let db_pool = SqlitePoolOptions::new()
        .max_connections(settings.database.max_connections)
        .connect(&settings.database.url)
        .await?;

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await?;

    let auth_service = Arc::new(AuthService::new(
        &settings.auth.jwt_secret,
        settings.auth.token_duration_hours,
    ));

    let zone = DeadlineZone::from_offset_minutes(settings.lifecycle.utc_offset_minutes);
    match settings.lifecycle.utc_offset_minutes {
        Some(minutes) => tracing::info!("Deadlines end at midnight UTC{:+} minutes", minutes),
        None => tracing::info!("Deadlines end at local midnight"),
    }

    let service_context = Arc::new(ServiceContext::sqlite(
        db_pool,
        auth_service,
        LifecycleClock::system(zone),
    ));

    let app = api::create_app(service_context, Arc::new(settings.clone()));

    let listener = tokio::net::TcpListener::bind(
        format!("{}:{}", settings.server.host, settings.server.port)
    ).await?;

    tracing::info!("Server listening on http://{}:{}", settings.server.host, settings.server.port);

    axum::serve(listener, app).await?;

    Ok(())
}
