//! HTTP server initialization and runtime setup.
//!
//! Handles settings loading, state assembly, signal handling, and the Axum
//! server lifecycle.

use crate::application::services::{AuthService, SettingsService};
use crate::config::Config;
use crate::gate::GateOptions;
use crate::routes::app_router;
use crate::settings::{FileSettingsStore, SettingsStore};
use crate::state::AppState;
use crate::web::login_flow::LoginPage;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Builds the shared state from configuration.
///
/// # Errors
///
/// Returns an error if the settings file exists but cannot be read or holds
/// invalid values, or if the hidden login path falls under an exempt prefix.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let store: Arc<dyn SettingsStore> = Arc::new(
        FileSettingsStore::new(&config.settings_file).with_seed(config.seed_settings.clone()),
    );

    let gate = GateOptions::new(config.site_url.clone(), config.exempt_prefixes.clone());

    let settings_service = SettingsService::load(store)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load settings from {}: {}", config.settings_file, e))?
        .with_gate(gate.clone());

    let current = settings_service.current().await;
    gate.check_reachable(&current)
        .with_context(|| format!("Settings in {} are unusable", config.settings_file))?;

    if current.is_enabled() {
        tracing::info!("Login gate enabled");
    } else {
        tracing::info!("Login gate disabled (no hidden login path configured)");
    }

    let auth_service = config.admin_token.as_deref().map(|token| {
        let service = AuthService::new(token);
        tracing::info!("Admin API enabled (token fingerprint {})", service.fingerprint());
        Arc::new(service)
    });

    Ok(AppState::new(
        Arc::new(settings_service),
        auth_service,
        Arc::new(LoginPage::default()),
        gate,
    ))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Settings snapshot from the settings file
/// - Admin authentication (if `ADMIN_TOKEN` is set)
/// - `SIGHUP` handler reloading the settings file (Unix)
/// - Axum HTTP server with graceful shutdown on Ctrl+C / `SIGTERM`
///
/// # Errors
///
/// Returns an error if:
/// - Settings cannot be loaded
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config).await?;

    spawn_reload_on_hangup(state.settings_service.clone());

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Reloads settings from disk on every `SIGHUP`.
#[cfg(unix)]
fn spawn_reload_on_hangup(settings_service: Arc<SettingsService>) {
    use tokio::signal::unix::{SignalKind, signal};

    let mut hangup = match signal(SignalKind::hangup()) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!("Failed to install SIGHUP handler: {}. Settings reload via signal disabled.", e);
            return;
        }
    };

    tokio::spawn(async move {
        while hangup.recv().await.is_some() {
            tracing::info!("SIGHUP received, reloading settings");
            if let Err(e) = settings_service.reload().await {
                tracing::error!("Settings reload failed, keeping previous settings: {}", e);
            }
        }
    });
}

#[cfg(not(unix))]
fn spawn_reload_on_hangup(_settings_service: Arc<SettingsService>) {}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
