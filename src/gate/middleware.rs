//! Login gate middleware, the single per-request entry point.

use axum::{
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{Span, debug};
use url::Url;

use crate::gate::decision::{Decision, decide};
use crate::settings::{Settings, SettingsError};
use crate::state::AppState;

/// Recorded as the request span's `path` for requests served at the hidden login path.
pub const HIDDEN_PATH_PLACEHOLDER: &str = "<login>";

/// Host-level gate options that do not change at runtime.
#[derive(Debug, Clone, Default)]
pub struct GateOptions {
    /// Public site URL. When set, redirect targets are absolute URLs under it.
    pub site_url: Option<Url>,
    /// Path prefixes the gate never inspects (matched on whole segments).
    pub exempt_prefixes: Vec<String>,
}

impl GateOptions {
    pub fn new(site_url: Option<Url>, exempt_prefixes: Vec<String>) -> Self {
        let exempt_prefixes = exempt_prefixes
            .iter()
            .map(|p| p.trim().trim_end_matches('/'))
            .filter(|p| !p.is_empty())
            .map(|p| {
                if p.starts_with('/') {
                    p.to_string()
                } else {
                    format!("/{p}")
                }
            })
            .collect();

        Self {
            site_url,
            exempt_prefixes,
        }
    }

    /// Whether `path` falls under one of the exempt prefixes.
    ///
    /// `/admin` exempts `/admin` and `/admin/settings`, not `/administrator`.
    pub fn is_exempt(&self, path: &str) -> bool {
        self.exempt_prefix_of(path).is_some()
    }

    /// The exempt prefix covering `path`, if any.
    pub fn exempt_prefix_of(&self, path: &str) -> Option<&str> {
        self.exempt_prefixes
            .iter()
            .find(|prefix| {
                path.strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
            })
            .map(String::as_str)
    }

    /// Rejects settings whose hidden login path the gate would never see.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ExemptLoginPath`] naming the covering prefix.
    pub fn check_reachable(&self, settings: &Settings) -> Result<(), SettingsError> {
        if !settings.is_enabled() {
            return Ok(());
        }

        let path = format!("/{}", settings.hidden_login_path);
        match self.exempt_prefix_of(&path) {
            Some(prefix) => Err(SettingsError::ExemptLoginPath {
                value: settings.hidden_login_path.clone(),
                prefix: prefix.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Turns a site-relative redirect target into the `Location` value.
    pub fn resolve_target(&self, target: &str) -> String {
        match &self.site_url {
            Some(site) => format!("{}{}", site.as_str().trim_end_matches('/'), target),
            None => target.to_string(),
        }
    }
}

/// Applies the login gate to every request.
///
/// # Flow
///
/// 1. Exempt prefixes go straight to routing
/// 2. Take the current settings snapshot
/// 3. Classify method + raw path-and-query with [`decide`]
/// 4. Act on the decision:
///    - `Redirect` - `302 Found` to the resolved target, nothing else runs
///    - `Allow` - hand the request to the login flow, nothing else runs
///    - `NoAction` - continue to routing
///
/// # Integration
///
/// Installed as the outermost router layer so it sees requests before any
/// route matches:
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/health", get(health_handler))
///     .fallback(not_found_handler)
///     .layer(middleware::from_fn_with_state(state.clone(), gate::layer))
///     .with_state(state);
/// ```
pub async fn layer(State(st): State<AppState>, req: Request, next: Next) -> Response {
    let span = Span::current();

    if st.gate.is_exempt(req.uri().path()) {
        span.record("path", req.uri().path());
        return next.run(req).await;
    }

    let settings = st.settings_service.current().await;

    let raw_path = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| req.uri().path());

    let decision = decide(
        req.method(),
        raw_path,
        &settings.hidden_login_path,
        &settings.block_redirect_path,
    );

    // The hidden path never reaches the request span.
    match &decision {
        Decision::Allow => span.record("path", HIDDEN_PATH_PLACEHOLDER),
        _ => span.record("path", req.uri().path()),
    };

    match decision {
        Decision::Redirect { target } => {
            let location = st.gate.resolve_target(&target);
            debug!(path = %req.uri().path(), %location, "Legacy login request redirected");
            (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
        }
        Decision::Allow => {
            debug!(path = %req.uri().path(), "Serving login flow at hidden path");
            st.login_flow.run(req).await
        }
        Decision::NoAction => next.run(req).await,
    }
}
