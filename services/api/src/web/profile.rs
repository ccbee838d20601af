//! services/api/src/web/profile.rs
//!
//! Handlers for the session's user profile.

use crate::web::{
    payloads::{port_error_response, ProfileResponse, UpdateProfileRequest},
    rest::unexpected_outcome,
    state::AppState,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use dream_journal_core::journal::{Action, Outcome};
use std::sync::Arc;

/// Read the profile.
#[utoipa::path(
    get,
    path = "/profile",
    responses(
        (status = 200, description = "The current profile", body = ProfileResponse)
    )
)]
pub async fn get_profile_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<ProfileResponse>, (StatusCode, String)> {
    let profile = app_state
        .journal
        .profile()
        .await
        .map_err(|e| port_error_response("read profile", e))?;
    Ok(Json(ProfileResponse::from(profile)))
}

/// Update any subset of the profile fields.
#[utoipa::path(
    put,
    path = "/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "The updated profile", body = ProfileResponse),
        (status = 400, description = "Blank name, malformed image or unknown model")
    )
)]
pub async fn update_profile_handler(
    State(app_state): State<Arc<AppState>>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, (StatusCode, String)> {
    let update = req
        .into_update()
        .map_err(|e| port_error_response("update profile", e))?;
    let transition = app_state
        .journal
        .dispatch(Action::UpdateProfile(update))
        .await
        .map_err(|e| port_error_response("update profile", e))?;
    app_state.run_effects(&transition.effects);

    match transition.outcome {
        Outcome::ProfileUpdated(profile) => Ok(Json(ProfileResponse::from(profile))),
        other => Err(unexpected_outcome("update profile", other)),
    }
}
