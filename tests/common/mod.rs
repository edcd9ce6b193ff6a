#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    extract::Request,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use hidden_login::application::services::{AuthService, SettingsService};
use hidden_login::gate::{self, GateOptions};
use hidden_login::settings::{LiveSettings, MemorySettingsStore, Settings};
use hidden_login::state::AppState;
use hidden_login::web::login_flow::LoginFlow;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const TEST_ADMIN_TOKEN: &str = "test-admin-token-0123456789";

/// Login flow that counts invocations and answers with a fixed body.
#[derive(Default)]
pub struct RecordingLoginFlow {
    calls: AtomicUsize,
}

impl RecordingLoginFlow {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LoginFlow for RecordingLoginFlow {
    async fn run(&self, req: Request) -> Response {
        self.calls.fetch_add(1, Ordering::SeqCst);
        format!("login flow: {} {}", req.method(), req.uri().path()).into_response()
    }
}

pub fn settings(hidden: &str, block: &str) -> Settings {
    Settings::new(hidden, block).unwrap()
}

pub fn create_test_state_with(
    settings: Settings,
    gate: GateOptions,
) -> (AppState, Arc<RecordingLoginFlow>) {
    let store = Arc::new(MemorySettingsStore::new(settings.clone()));
    let settings_service = Arc::new(
        SettingsService::new(store, LiveSettings::new(settings)).with_gate(gate.clone()),
    );
    let auth_service = Arc::new(AuthService::new(TEST_ADMIN_TOKEN));
    let login_flow = Arc::new(RecordingLoginFlow::default());

    let state = AppState::new(
        settings_service,
        Some(auth_service),
        login_flow.clone(),
        gate,
    );

    (state, login_flow)
}

pub fn create_test_state(settings: Settings) -> (AppState, Arc<RecordingLoginFlow>) {
    create_test_state_with(settings, GateOptions::new(None, vec!["/admin".to_string()]))
}

/// Minimal site behind the gate: a home page, one content page, and a 404 fallback.
pub fn gated_site(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "home" }))
        .route("/about", get(|| async { "about" }))
        .route("/wp-login.php", get(|| async { "legacy" }).post(|| async { "legacy post" }))
        .fallback(|| async { (axum::http::StatusCode::NOT_FOUND, "fallback") })
        .layer(middleware::from_fn_with_state(state.clone(), gate::layer))
        .with_state(state)
}

pub fn bearer() -> String {
    format!("Bearer {TEST_ADMIN_TOKEN}")
}
