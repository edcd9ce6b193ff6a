//! Read-mostly settings snapshot shared by all requests.

use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use super::model::{Settings, SettingsError};
use super::store::SettingsStore;

/// Current settings as seen by the request path.
///
/// Requests clone an `Arc` snapshot under a short read lock and never hold
/// the lock while deciding. Writers swap in a whole new snapshot.
///
/// Writers that go through the store ([`update`](Self::update),
/// [`reload`](Self::reload)) are serialized, so the snapshot always matches
/// the last successful save. Readers are never blocked by store I/O.
#[derive(Debug, Clone, Default)]
pub struct LiveSettings {
    current: Arc<RwLock<Arc<Settings>>>,
    writer: Arc<Mutex<()>>,
}

impl LiveSettings {
    pub fn new(settings: Settings) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(settings))),
            writer: Arc::new(Mutex::new(())),
        }
    }

    /// Loads the initial snapshot from `store`.
    ///
    /// # Errors
    ///
    /// Propagates the store's load error.
    pub async fn load(store: &dyn SettingsStore) -> Result<Self, SettingsError> {
        Ok(Self::new(store.load().await?))
    }

    /// Returns the settings in effect right now.
    pub async fn snapshot(&self) -> Arc<Settings> {
        self.current.read().await.clone()
    }

    /// Persists `settings` through `store`, then makes them current.
    ///
    /// The snapshot is left untouched when the store fails; the error is
    /// returned as-is and the save is not retried.
    ///
    /// # Errors
    ///
    /// Propagates the store's save error.
    pub async fn update(
        &self,
        store: &dyn SettingsStore,
        settings: Settings,
    ) -> Result<Arc<Settings>, SettingsError> {
        let _writer = self.writer.lock().await;

        store.save(&settings).await?;

        let settings = Arc::new(settings);
        *self.current.write().await = settings.clone();

        info!(enabled = settings.is_enabled(), "Login gate settings updated");
        debug!(
            hidden_login_path = %settings.hidden_login_path,
            block_redirect_path = %settings.block_redirect_path,
            "New login gate settings"
        );

        Ok(settings)
    }

    /// Re-reads `store` and makes its contents current if `accept` agrees.
    ///
    /// # Errors
    ///
    /// Propagates the store's load error or the rejection from `accept`;
    /// the snapshot is left untouched in both cases.
    pub async fn reload<F>(
        &self,
        store: &dyn SettingsStore,
        accept: F,
    ) -> Result<Arc<Settings>, SettingsError>
    where
        F: FnOnce(&Settings) -> Result<(), SettingsError> + Send,
    {
        let _writer = self.writer.lock().await;

        let settings = store.load().await?;
        accept(&settings)?;

        let settings = Arc::new(settings);
        *self.current.write().await = settings.clone();

        info!(enabled = settings.is_enabled(), "Login gate settings reloaded");
        debug!(
            hidden_login_path = %settings.hidden_login_path,
            block_redirect_path = %settings.block_redirect_path,
            "Reloaded login gate settings"
        );

        Ok(settings)
    }
}
