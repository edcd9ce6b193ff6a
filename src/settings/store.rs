//! Persistence for gate settings.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::debug;

use super::model::{Settings, SettingsError};

/// Storage backend for [`Settings`].
///
/// # Implementations
///
/// - [`FileSettingsStore`] - JSON file on disk, used by the server and the admin CLI
/// - [`MemorySettingsStore`] - in-process store for tests and embedding
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Loads the current settings.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Io`] or [`SettingsError::Serialization`] if the
    /// backend cannot be read, or a validation variant if stored values are invalid.
    async fn load(&self) -> Result<Settings, SettingsError>;

    /// Persists settings, replacing whatever was stored before.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Io`] or [`SettingsError::Serialization`] on write failure.
    async fn save(&self, settings: &Settings) -> Result<(), SettingsError>;
}

/// Settings stored as a JSON document.
///
/// ```json
/// {
///   "hidden_login_path": "my-login",
///   "block_redirect_path": "404"
/// }
/// ```
///
/// A missing file is not an error: [`SettingsStore::load`] returns the seed
/// settings (disabled by default) until the first save.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
    seed: Settings,
}

impl FileSettingsStore {
    /// Creates a store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            seed: Settings::default(),
        }
    }

    /// Settings returned while the file does not exist yet.
    pub fn with_seed(mut self, seed: Settings) -> Self {
        self.seed = seed;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fresh sibling path for one save; concurrent saves never share it.
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(format!(".{:016x}.tmp", rand::random::<u64>()));
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SettingsStore for FileSettingsStore {
    async fn load(&self) -> Result<Settings, SettingsError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                let raw: Settings = serde_json::from_slice(&bytes)?;
                raw.sanitized()
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Settings file not found, using seed");
                Ok(self.seed.clone())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let body = serde_json::to_vec_pretty(settings)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Rename keeps readers from ever seeing a half-written file.
        let tmp = self.temp_path();
        let written = match tokio::fs::write(&tmp, body).await {
            Ok(()) => tokio::fs::rename(&tmp, &self.path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        debug!(path = %self.path.display(), "Settings saved");
        Ok(())
    }
}

/// Settings kept in memory only.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    inner: RwLock<Settings>,
}

impl MemorySettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: RwLock::new(settings),
        }
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn load(&self) -> Result<Settings, SettingsError> {
        Ok(self.inner.read().await.clone())
    }

    async fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        *self.inner.write().await = settings.clone();
        Ok(())
    }
}
