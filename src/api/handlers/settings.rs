//! Handlers for the gate settings endpoints.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::settings::{SettingsResponse, UpdateSettingsRequest};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the settings currently in effect.
///
/// # Endpoint
///
/// `GET /admin/settings`
///
/// # Response
///
/// ```json
/// {
///   "hidden_login_path": "my-login",
///   "block_redirect_path": "404",
///   "enabled": true
/// }
/// ```
pub async fn get_settings_handler(State(state): State<AppState>) -> Json<SettingsResponse> {
    let settings = state.settings_service.current().await;
    Json(SettingsResponse::from(settings.as_ref()))
}

/// Replaces the gate settings.
///
/// # Endpoint
///
/// `PUT /admin/settings`
///
/// # Request Body
///
/// ```json
/// {
///   "hidden_login_path": "/my-login/",
///   "block_redirect_path": "404"
/// }
/// ```
///
/// Values are normalized before storage; the response carries the stored form.
/// The new settings apply to the next request.
///
/// # Errors
///
/// Returns 400 Bad Request if a path is too long, contains disallowed
/// characters, points at the legacy endpoint, or the redirect path equals
/// the login path. Returns 500 if the settings cannot be persisted.
pub async fn update_settings_handler(
    State(state): State<AppState>,
    Json(payload): Json<UpdateSettingsRequest>,
) -> Result<Json<SettingsResponse>, AppError> {
    payload.validate()?;

    let settings = state
        .settings_service
        .update(&payload.hidden_login_path, &payload.block_redirect_path)
        .await?;

    Ok(Json(SettingsResponse::from(settings.as_ref())))
}

/// Clears both paths, disabling the gate.
///
/// # Endpoint
///
/// `DELETE /admin/settings`
///
/// # Errors
///
/// Returns 500 if the settings cannot be persisted.
pub async fn clear_settings_handler(
    State(state): State<AppState>,
) -> Result<Json<SettingsResponse>, AppError> {
    let settings = state.settings_service.clear().await?;
    Ok(Json(SettingsResponse::from(settings.as_ref())))
}

/// Re-reads the settings store, picking up edits made with the `admin` CLI.
///
/// # Endpoint
///
/// `POST /admin/settings/reload`
///
/// # Errors
///
/// Returns 400 if the stored values are invalid, 500 if the store cannot be
/// read. The previous settings stay in effect on error.
pub async fn reload_settings_handler(
    State(state): State<AppState>,
) -> Result<Json<SettingsResponse>, AppError> {
    let settings = state.settings_service.reload().await?;
    Ok(Json(SettingsResponse::from(settings.as_ref())))
}
