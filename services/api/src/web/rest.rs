//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the dream endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::{
    insights, notifications,
    payloads::{
        port_error_response, BiblicalRefResponse, BookmarkResponse, CountEntry,
        CreateDreamRequest, CreateNotificationRequest, DreamResponse, NotificationKindPayload,
        NotificationResponse, ProfileResponse, ScreenPayload, SearchParams, StatsResponse,
        UpdateProfileRequest,
    },
    profile,
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use dream_journal_core::domain::DreamId;
use dream_journal_core::journal::{Action, Outcome};
use dream_journal_core::ports::PortError;
use std::sync::Arc;
use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        create_dream_handler,
        list_dreams_handler,
        get_dream_handler,
        toggle_bookmark_handler,
        notifications::list_notifications_handler,
        notifications::create_notification_handler,
        notifications::dismiss_notification_handler,
        profile::get_profile_handler,
        profile::update_profile_handler,
        insights::stats_handler,
        insights::get_screen_handler,
        insights::navigate_handler,
    ),
    components(
        schemas(
            CreateDreamRequest,
            DreamResponse,
            BiblicalRefResponse,
            BookmarkResponse,
            CreateNotificationRequest,
            NotificationResponse,
            NotificationKindPayload,
            ProfileResponse,
            UpdateProfileRequest,
            StatsResponse,
            CountEntry,
            ScreenPayload,
        )
    ),
    tags(
        (name = "Dream Journal API", description = "API endpoints for the dream journal.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Record a dream and return its interpretation.
#[utoipa::path(
    post,
    path = "/dreams",
    request_body = CreateDreamRequest,
    responses(
        (status = 201, description = "Dream recorded", body = DreamResponse),
        (status = 400, description = "Blank dream content"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_dream_handler(
    State(app_state): State<Arc<AppState>>,
    Json(req): Json<CreateDreamRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let transition = app_state
        .journal
        .dispatch(Action::RecordDream {
            content: req.content,
        })
        .await
        .map_err(|e| port_error_response("record dream", e))?;
    app_state.run_effects(&transition.effects);

    match transition.outcome {
        Outcome::DreamRecorded(dream) => Ok((StatusCode::CREATED, Json(DreamResponse::from(dream)))),
        other => Err(unexpected_outcome("record dream", other)),
    }
}

/// List dreams newest first, optionally filtered by `q`.
#[utoipa::path(
    get,
    path = "/dreams",
    params(SearchParams),
    responses(
        (status = 200, description = "Dreams in journal order", body = [DreamResponse])
    )
)]
pub async fn list_dreams_handler(
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<DreamResponse>>, (StatusCode, String)> {
    let dreams = match params.q.as_deref() {
        Some(query) => app_state.journal.search_dreams(query).await,
        None => app_state.journal.list_dreams().await,
    }
    .map_err(|e| port_error_response("list dreams", e))?;
    Ok(Json(dreams.into_iter().map(DreamResponse::from).collect()))
}

/// Open one dream in the detail view.
#[utoipa::path(
    get,
    path = "/dreams/{id}",
    params(("id" = u64, Path, description = "The dream's id.")),
    responses(
        (status = 200, description = "The dream", body = DreamResponse),
        (status = 404, description = "No such dream")
    )
)]
pub async fn get_dream_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<DreamResponse>, (StatusCode, String)> {
    let transition = app_state
        .journal
        .dispatch(Action::OpenDream { id: DreamId(id) })
        .await
        .map_err(|e| port_error_response("open dream", e))?;
    match transition.outcome {
        Outcome::DreamOpened(dream) => Ok(Json(DreamResponse::from(dream))),
        other => Err(unexpected_outcome("open dream", other)),
    }
}

/// Flip the bookmark on a dream.
#[utoipa::path(
    post,
    path = "/dreams/{id}/bookmark",
    params(("id" = u64, Path, description = "The dream's id.")),
    responses(
        (status = 200, description = "New bookmark state", body = BookmarkResponse),
        (status = 404, description = "No such dream; nothing changed")
    )
)]
pub async fn toggle_bookmark_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<BookmarkResponse>, (StatusCode, String)> {
    let transition = app_state
        .journal
        .dispatch(Action::ToggleBookmark { id: DreamId(id) })
        .await
        .map_err(|e| port_error_response("toggle bookmark", e))?;
    match transition.outcome {
        Outcome::BookmarkToggled {
            id,
            bookmarked: Some(is_bookmarked),
        } => Ok(Json(BookmarkResponse {
            id: id.0,
            is_bookmarked,
        })),
        Outcome::BookmarkToggled { id, bookmarked: None } => Err(port_error_response(
            "toggle bookmark",
            PortError::NotFound(format!("dream {}", id)),
        )),
        other => Err(unexpected_outcome("toggle bookmark", other)),
    }
}

pub(crate) fn unexpected_outcome(action: &str, outcome: Outcome) -> (StatusCode, String) {
    port_error_response(
        action,
        PortError::Unexpected(format!("unexpected outcome {:?}", outcome)),
    )
}
