//! services/api/src/web/insights.rs
//!
//! Handlers for trend statistics and the client's current screen.

use crate::web::{
    payloads::{port_error_response, ScreenPayload, StatsResponse},
    state::AppState,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use dream_journal_core::journal::Action;
use std::sync::Arc;

/// Trend statistics over every dream in the journal.
#[utoipa::path(
    get,
    path = "/stats",
    responses(
        (status = 200, description = "Journal statistics", body = StatsResponse)
    )
)]
pub async fn stats_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<StatsResponse>, (StatusCode, String)> {
    let stats = app_state
        .journal
        .trend_stats()
        .await
        .map_err(|e| port_error_response("compute stats", e))?;
    Ok(Json(StatsResponse::from(stats)))
}

/// The screen the client is showing.
#[utoipa::path(
    get,
    path = "/screen",
    responses(
        (status = 200, description = "Current screen", body = ScreenPayload)
    )
)]
pub async fn get_screen_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<ScreenPayload>, (StatusCode, String)> {
    let screen = app_state
        .journal
        .current_screen()
        .await
        .map_err(|e| port_error_response("read screen", e))?;
    Ok(Json(screen.into()))
}

/// Switch screens.
#[utoipa::path(
    put,
    path = "/screen",
    request_body = ScreenPayload,
    responses(
        (status = 200, description = "The new screen", body = ScreenPayload),
        (status = 404, description = "Detail view of an unknown dream")
    )
)]
pub async fn navigate_handler(
    State(app_state): State<Arc<AppState>>,
    Json(screen): Json<ScreenPayload>,
) -> Result<Json<ScreenPayload>, (StatusCode, String)> {
    app_state
        .journal
        .dispatch(Action::Navigate {
            screen: screen.into(),
        })
        .await
        .map_err(|e| port_error_response("navigate", e))?;
    Ok(Json(screen))
}
