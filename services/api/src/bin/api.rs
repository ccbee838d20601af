//! services/api/src/bin/api.rs

use api_lib::{
    adapters::MemoryJournalAdapter,
    config::Config,
    error::ApiError,
    web::{
        create_dream_handler, create_notification_handler, dismiss_notification_handler,
        get_dream_handler, get_profile_handler, get_screen_handler, list_dreams_handler,
        list_notifications_handler, navigate_handler, rest::ApiDoc, state::AppState,
        stats_handler, toggle_bookmark_handler, update_profile_handler,
    },
};
use axum::{
    http::{header::{ACCEPT, CONTENT_TYPE}, HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use dream_journal_core::{
    journal::JournalSettings,
    ports::{SystemClock, ThreadEntropy},
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Build the In-Memory Journal ---
    let journal = Arc::new(MemoryJournalAdapter::new(
        JournalSettings {
            notification_ttl: config.notification_ttl,
        },
        Arc::new(SystemClock),
        Arc::new(ThreadEntropy),
    ));
    info!(
        "Journal ready; notifications expire after {} ms.",
        config.notification_ttl.as_millis()
    );

    // --- 3. Build the Shared AppState ---
    let shutdown = CancellationToken::new();
    let app_state = Arc::new(AppState {
        journal,
        config: config.clone(),
        shutdown: shutdown.clone(),
    });

    let origin = config.cors_origin.parse::<HeaderValue>().map_err(|e| {
        ApiError::Internal(format!("Invalid CORS origin '{}': {}", config.cors_origin, e))
    })?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, ACCEPT]);

    // --- 4. Create the Web Router ---
    let api_router = Router::new()
        .route("/dreams", post(create_dream_handler).get(list_dreams_handler))
        .route("/dreams/{id}", get(get_dream_handler))
        .route("/dreams/{id}/bookmark", post(toggle_bookmark_handler))
        .route(
            "/notifications",
            get(list_notifications_handler).post(create_notification_handler),
        )
        .route("/notifications/{id}", delete(dismiss_notification_handler))
        .route("/profile", get(get_profile_handler).put(update_profile_handler))
        .route("/stats", get(stats_handler))
        .route("/screen", get(get_screen_handler).put(navigate_handler))
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Shutting down; cancelling pending notification expiries.");
            shutdown.cancel();
        })
        .await?;

    Ok(())
}
