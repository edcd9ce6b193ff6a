//! Handler for health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status.
///
/// # Endpoint
///
/// `GET /health`
///
/// The gate has no external dependencies at request time, so the service is
/// healthy whenever it answers. The settings check reports whether the gate
/// is active without revealing the hidden path.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "settings": {
///       "status": "ok",
///       "message": "Login gate enabled"
///     }
///   }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let settings = state.settings_service.current().await;

    let message = if settings.is_enabled() {
        "Login gate enabled"
    } else {
        "Login gate disabled"
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            settings: CheckStatus {
                status: "ok".to_string(),
                message: Some(message.to_string()),
            },
        },
    })
}
