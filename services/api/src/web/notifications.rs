//! services/api/src/web/notifications.rs
//!
//! Handlers for the transient notification queue.

use crate::web::{
    payloads::{port_error_response, CreateNotificationRequest, NotificationResponse},
    rest::unexpected_outcome,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use dream_journal_core::domain::NotificationId;
use dream_journal_core::journal::{Action, Outcome};
use std::sync::Arc;

/// List notifications that have not yet been dismissed or expired.
#[utoipa::path(
    get,
    path = "/notifications",
    responses(
        (status = 200, description = "Active notifications, oldest first", body = [NotificationResponse])
    )
)]
pub async fn list_notifications_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<NotificationResponse>>, (StatusCode, String)> {
    let active = app_state
        .journal
        .active_notifications()
        .await
        .map_err(|e| port_error_response("list notifications", e))?;
    Ok(Json(active.into_iter().map(NotificationResponse::from).collect()))
}

/// Post a notification; it is removed automatically after the configured delay.
#[utoipa::path(
    post,
    path = "/notifications",
    request_body = CreateNotificationRequest,
    responses(
        (status = 201, description = "Notification queued", body = NotificationResponse)
    )
)]
pub async fn create_notification_handler(
    State(app_state): State<Arc<AppState>>,
    Json(req): Json<CreateNotificationRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let transition = app_state
        .journal
        .dispatch(Action::Notify {
            message: req.message,
            kind: req.kind.into(),
        })
        .await
        .map_err(|e| port_error_response("notify", e))?;
    app_state.run_effects(&transition.effects);

    match transition.outcome {
        Outcome::Notified(n) => Ok((StatusCode::CREATED, Json(NotificationResponse::from(n)))),
        other => Err(unexpected_outcome("notify", other)),
    }
}

/// Dismiss a notification early. Dismissing an absent notification also succeeds.
#[utoipa::path(
    delete,
    path = "/notifications/{id}",
    params(("id" = u64, Path, description = "The notification's id.")),
    responses(
        (status = 204, description = "The notification is gone")
    )
)]
pub async fn dismiss_notification_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<StatusCode, (StatusCode, String)> {
    app_state
        .journal
        .dispatch(Action::Dismiss {
            id: NotificationId(id),
        })
        .await
        .map_err(|e| port_error_response("dismiss notification", e))?;
    Ok(StatusCode::NO_CONTENT)
}
