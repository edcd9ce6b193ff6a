//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//! The hidden login path itself lives in the settings file, not here: it can be
//! changed at runtime through the admin API or the `admin` CLI.
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `SETTINGS_FILE` - Path of the JSON settings file (default: `settings.json`)
//! - `SITE_URL` - Public site URL; makes redirect targets absolute (default: unset)
//! - `ADMIN_TOKEN` - Bearer token for `/admin/*`; the admin API is off when unset
//! - `GATE_EXEMPT_PREFIXES` - Comma-separated path prefixes the gate ignores
//!   (default: `/admin`)
//! - `HIDDEN_LOGIN_PATH`, `BLOCK_REDIRECT_PATH` - Initial settings used while the
//!   settings file does not exist yet

use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use url::Url;

use crate::settings::Settings;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub settings_file: String,
    /// Public base URL used to build absolute redirect targets.
    pub site_url: Option<Url>,
    /// Bearer token for the admin API. Never logged.
    pub admin_token: Option<String>,
    pub exempt_prefixes: Vec<String>,
    /// Settings used until the settings file is first written.
    pub seed_settings: Settings,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `SITE_URL` is not a valid URL or the seed paths
    /// are rejected by settings validation.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
        let settings_file =
            env::var("SETTINGS_FILE").unwrap_or_else(|_| "settings.json".to_string());

        let site_url = env::var("SITE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(|v| Url::parse(v.trim()))
            .transpose()
            .context("SITE_URL must be an absolute URL")?;

        let admin_token = env::var("ADMIN_TOKEN").ok().filter(|v| !v.is_empty());

        let exempt_prefixes = env::var("GATE_EXEMPT_PREFIXES")
            .map(|v| {
                v.split(',')
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty())
                    .collect()
            })
            .unwrap_or_else(|_| vec!["/admin".to_string()]);

        let seed_settings = Self::load_seed_settings()?;

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            settings_file,
            site_url,
            admin_token,
            exempt_prefixes,
            seed_settings,
        })
    }

    /// Builds seed settings from `HIDDEN_LOGIN_PATH` and `BLOCK_REDIRECT_PATH`.
    ///
    /// Both default to empty, which leaves the gate disabled.
    fn load_seed_settings() -> Result<Settings> {
        let hidden = env::var("HIDDEN_LOGIN_PATH").unwrap_or_default();
        let block = env::var("BLOCK_REDIRECT_PATH").unwrap_or_default();

        Settings::new(&hidden, &block)
            .context("HIDDEN_LOGIN_PATH / BLOCK_REDIRECT_PATH are invalid")
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not a socket address
    /// - `site_url` is not `http` or `https`, or carries a query or fragment
    /// - `admin_token` is shorter than 16 characters
    /// - `settings_file` is empty
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if self.listen_addr.parse::<SocketAddr>().is_err() {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if let Some(ref site_url) = self.site_url {
            if site_url.scheme() != "http" && site_url.scheme() != "https" {
                anyhow::bail!(
                    "SITE_URL must start with 'http://' or 'https://', got '{}'",
                    site_url
                );
            }
            if site_url.query().is_some() || site_url.fragment().is_some() {
                anyhow::bail!(
                    "SITE_URL must not contain a query or fragment, got '{}'",
                    site_url
                );
            }
        }

        if let Some(ref token) = self.admin_token
            && token.len() < 16
        {
            anyhow::bail!("ADMIN_TOKEN must be at least 16 characters");
        }

        if self.settings_file.trim().is_empty() {
            anyhow::bail!("SETTINGS_FILE must not be empty");
        }

        Ok(())
    }

    /// Returns whether the admin API is mounted.
    pub fn is_admin_enabled(&self) -> bool {
        self.admin_token.is_some()
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Settings file: {}", self.settings_file);

        match self.site_url {
            Some(ref url) => tracing::info!("  Site URL: {}", url),
            None => tracing::info!("  Site URL: unset (relative redirects)"),
        }

        if self.is_admin_enabled() {
            tracing::info!("  Admin API: enabled");
        } else {
            tracing::info!("  Admin API: disabled");
        }

        tracing::info!("  Gate exempt prefixes: {:?}", self.exempt_prefixes);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if variables are malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
