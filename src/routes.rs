//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`          - Health check (public)
//! - `GET|POST /wp-login.php` - Legacy login endpoint (public, gated)
//! - `/admin/*`              - Settings API (Bearer token required, only
//!   mounted when an admin token is configured)
//! - anything else           - `404 Not Found`
//!
//! # Middleware
//!
//! From the outside in:
//!
//! - **Path normalization** - Trailing slash handling
//! - **Tracing** - Structured request/response logging
//! - **Login gate** - Redirects legacy login hits, serves the hidden login path
//! - **Authentication** - Bearer token on `/admin/*`

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{auth, tracing};
use crate::gate;
use crate::state::AppState;
use crate::web;
use crate::web::handlers::not_found_handler;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// The login gate wraps every route and the fallback, so it runs before any
/// handler for every request. Trailing-slash trimming happens before the gate;
/// this does not change any decision because the gate compares normalized
/// paths and the legacy-endpoint match is a substring match.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let mut router = Router::new()
        .route("/health", get(health_handler))
        .merge(web::routes::public_routes());

    if state.auth_service.is_some() {
        let admin_router = api::routes::protected_routes()
            .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
        router = router.nest("/admin", admin_router);
    }

    let router = router
        .fallback(not_found_handler)
        .layer(middleware::from_fn_with_state(state.clone(), gate::layer))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
