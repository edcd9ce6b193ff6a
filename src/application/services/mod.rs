//! Business logic services for the application layer.

pub mod auth_service;
pub mod settings_service;

pub use auth_service::AuthService;
pub use settings_service::SettingsService;
