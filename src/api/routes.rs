//! Admin API route configuration.
//!
//! All admin endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    clear_settings_handler, get_settings_handler, reload_settings_handler,
    update_settings_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Admin routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `GET    /settings`        - Current gate settings
/// - `PUT    /settings`        - Replace gate settings
/// - `DELETE /settings`        - Clear settings, disabling the gate
/// - `POST   /settings/reload` - Re-read the settings store
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/settings",
            get(get_settings_handler)
                .put(update_settings_handler)
                .delete(clear_settings_handler),
        )
        .route("/settings/reload", post(reload_settings_handler))
}
