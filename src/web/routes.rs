//! Public site route configuration.

use crate::state::AppState;
use crate::web::handlers::legacy_login_handler;
use crate::web::login_flow::LEGACY_LOGIN_PATH;
use axum::{Router, routing::get};

/// Public routes without authentication.
///
/// # Endpoints
///
/// - `GET|POST /wp-login.php` - Legacy login endpoint, backed by the login flow
pub fn public_routes() -> Router<AppState> {
    Router::new().route(
        LEGACY_LOGIN_PATH,
        get(legacy_login_handler).post(legacy_login_handler),
    )
}
