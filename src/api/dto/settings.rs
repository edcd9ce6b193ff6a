//! DTOs for the settings endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::settings::Settings;

/// Request to replace the gate settings.
///
/// Omitted fields are treated as empty. Values are normalized server-side,
/// so `"/my-login/"` is stored as `"my-login"`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSettingsRequest {
    /// Path the login flow is served at. Empty disables the gate.
    #[serde(default)]
    #[validate(length(max = 200))]
    pub hidden_login_path: String,

    /// Where legacy login requests are sent. Empty means the site root.
    #[serde(default)]
    #[validate(length(max = 200))]
    pub block_redirect_path: String,
}

/// Current gate settings.
#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub hidden_login_path: String,
    pub block_redirect_path: String,
    pub enabled: bool,
}

impl From<&Settings> for SettingsResponse {
    fn from(settings: &Settings) -> Self {
        Self {
            hidden_login_path: settings.hidden_login_path.clone(),
            block_redirect_path: settings.block_redirect_path.clone(),
            enabled: settings.is_enabled(),
        }
    }
}
