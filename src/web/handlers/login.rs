//! Handlers for the legacy login endpoint and unmatched routes.

use axum::{
    extract::{Request, State},
    response::Response,
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Serves the legacy login endpoint through the configured login flow.
///
/// # Endpoint
///
/// `GET|POST /wp-login.php`
///
/// With the gate enabled, only `POST` gets here: `GET` is redirected away
/// before routing. With the gate disabled the endpoint behaves as usual.
pub async fn legacy_login_handler(State(state): State<AppState>, req: Request) -> Response {
    state.login_flow.run(req).await
}

/// Fallback for requests no route claims.
pub async fn not_found_handler() -> AppError {
    AppError::not_found("Not found", json!({}))
}
