//! # Hidden Login
//!
//! Hides a site's well-known login endpoint behind an administrator-chosen path.
//!
//! Requests for `/wp-login.php` are redirected away once a hidden login path is
//! configured, and the real login flow is served only at that hidden path. This
//! cuts down automated credential-stuffing traffic aimed at the fixed endpoint.
//! It is obfuscation, not access control.
//!
//! ## Architecture
//!
//! - **Gate** ([`gate`]) - Path normalization, the pure request classifier,
//!   and the axum middleware acting on its decision
//! - **Settings** ([`settings`]) - Validated settings, persistence, live snapshot
//! - **Application Layer** ([`application`]) - Settings and admin auth services
//! - **API Layer** ([`api`]) - Admin settings API, health check, middleware
//! - **Web Layer** ([`web`]) - Login flow and the legacy login endpoint
//!
//! ## Quick Start
//!
//! ```bash
//! export HIDDEN_LOGIN_PATH="my-login"   # seed, used until settings.json exists
//! export BLOCK_REDIRECT_PATH="404"
//! export ADMIN_TOKEN="$(cargo run --bin admin -- token generate --raw)"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod error;
pub mod gate;
pub mod settings;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AuthService, SettingsService};
    pub use crate::error::AppError;
    pub use crate::gate::{Decision, GateOptions, decide, normalize};
    pub use crate::settings::{
        FileSettingsStore, LiveSettings, MemorySettingsStore, Settings, SettingsStore,
    };
    pub use crate::state::AppState;
    pub use crate::web::login_flow::{LoginFlow, LoginPage};
}
