//! Gate settings and their write-time sanitization.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::gate::decision::is_legacy_login_path;
use crate::gate::path::normalize;

static PATH_SETTING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._~/-]*$").unwrap());

/// Errors raised while validating, loading, or persisting settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("{field} contains characters outside [A-Za-z0-9._~/-]: {value:?}")]
    InvalidCharacters { field: &'static str, value: String },

    #[error("{field} {value:?} points at the legacy login endpoint")]
    LegacyLoginPath { field: &'static str, value: String },

    #[error("block_redirect_path must differ from hidden_login_path")]
    RevealsLoginPath,

    #[error("hidden_login_path {value:?} is under {prefix}, which the gate never inspects")]
    ExemptLoginPath { value: String, prefix: String },

    #[error("settings storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SettingsError {
    /// Whether the error was caused by the submitted values rather than storage.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidCharacters { .. }
                | Self::LegacyLoginPath { .. }
                | Self::RevealsLoginPath
                | Self::ExemptLoginPath { .. }
        )
    }
}

/// Hidden login configuration.
///
/// Empty strings mean "not set". An empty `hidden_login_path` disables the
/// gate; an empty `block_redirect_path` sends blocked visitors to the site root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub hidden_login_path: String,
    pub block_redirect_path: String,
}

impl Settings {
    /// Builds settings from raw admin input, canonicalizing both paths.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidCharacters`] if either path contains
    /// characters outside `[A-Za-z0-9._~/-]` after normalization.
    ///
    /// Returns [`SettingsError::LegacyLoginPath`] if either path points at the
    /// legacy endpoint: as a login path it would always be redirected away, as a
    /// redirect target it would loop.
    ///
    /// Returns [`SettingsError::RevealsLoginPath`] if blocked visitors would be
    /// redirected straight to the hidden login path.
    pub fn new(hidden_login_path: &str, block_redirect_path: &str) -> Result<Self, SettingsError> {
        let hidden_login_path = sanitize_path_setting("hidden_login_path", hidden_login_path)?;
        let block_redirect_path =
            sanitize_path_setting("block_redirect_path", block_redirect_path)?;

        reject_legacy("hidden_login_path", &hidden_login_path)?;
        reject_legacy("block_redirect_path", &block_redirect_path)?;

        if !hidden_login_path.is_empty() && hidden_login_path == block_redirect_path {
            return Err(SettingsError::RevealsLoginPath);
        }

        Ok(Self {
            hidden_login_path,
            block_redirect_path,
        })
    }

    /// Re-validates values that did not pass through [`Settings::new`],
    /// such as a hand-edited settings file.
    ///
    /// # Errors
    ///
    /// Same as [`Settings::new`].
    pub fn sanitized(self) -> Result<Self, SettingsError> {
        Self::new(&self.hidden_login_path, &self.block_redirect_path)
    }

    /// Whether the gate is active.
    pub fn is_enabled(&self) -> bool {
        !self.hidden_login_path.is_empty()
    }
}

/// Canonicalizes one path setting.
///
/// Strips query string and fragment, trims slashes and whitespace, then
/// rejects anything outside the unreserved URL path alphabet.
///
/// # Errors
///
/// Returns [`SettingsError::InvalidCharacters`] naming `field` on rejection.
pub fn sanitize_path_setting(field: &'static str, raw: &str) -> Result<String, SettingsError> {
    let value = normalize(raw);

    if !PATH_SETTING_REGEX.is_match(&value) {
        return Err(SettingsError::InvalidCharacters { field, value });
    }

    Ok(value)
}

fn reject_legacy(field: &'static str, value: &str) -> Result<(), SettingsError> {
    if !value.is_empty() && is_legacy_login_path(&format!("/{value}")) {
        return Err(SettingsError::LegacyLoginPath {
            field,
            value: value.to_string(),
        });
    }

    Ok(())
}
