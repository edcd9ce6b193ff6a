//! Application layer services.
//!
//! Services sit between HTTP handlers and the settings/auth primitives,
//! translating failures into [`crate::error::AppError`].
//!
//! # Available Services
//!
//! - [`services::settings_service::SettingsService`] - Reading and updating gate settings
//! - [`services::auth_service::AuthService`] - Admin token authentication

pub mod services;
