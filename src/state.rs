//! Shared application state injected into handlers and middleware.

use std::sync::Arc;

use crate::application::services::{AuthService, SettingsService};
use crate::gate::GateOptions;
use crate::web::login_flow::LoginFlow;

/// State shared by every request.
///
/// Cloned per request; all fields are cheap `Arc` handles.
#[derive(Clone)]
pub struct AppState {
    pub settings_service: Arc<SettingsService>,
    /// `None` when no admin token is configured; the admin API is then not mounted.
    pub auth_service: Option<Arc<AuthService>>,
    pub login_flow: Arc<dyn LoginFlow>,
    pub gate: Arc<GateOptions>,
}

impl AppState {
    pub fn new(
        settings_service: Arc<SettingsService>,
        auth_service: Option<Arc<AuthService>>,
        login_flow: Arc<dyn LoginFlow>,
        gate: GateOptions,
    ) -> Self {
        Self {
            settings_service,
            auth_service,
            login_flow,
            gate: Arc::new(gate),
        }
    }
}
