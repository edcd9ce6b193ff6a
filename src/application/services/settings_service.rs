//! Settings management service.

use std::sync::Arc;

use crate::error::AppError;
use crate::gate::GateOptions;
use crate::settings::{LiveSettings, Settings, SettingsStore};

/// Service owning the gate settings.
///
/// Writes go to the store first and only then become visible to the gate.
/// Reads come from the in-memory snapshot and never touch the store.
///
/// With [`with_gate`](Self::with_gate), writes and reloads also reject a
/// hidden login path under one of the gate's exempt prefixes.
pub struct SettingsService {
    store: Arc<dyn SettingsStore>,
    live: LiveSettings,
    gate: GateOptions,
}

impl SettingsService {
    /// Creates a service over an already loaded snapshot.
    pub fn new(store: Arc<dyn SettingsStore>, live: LiveSettings) -> Self {
        Self {
            store,
            live,
            gate: GateOptions::default(),
        }
    }

    /// Uses `gate` to check that the hidden login path stays reachable.
    pub fn with_gate(mut self, gate: GateOptions) -> Self {
        self.gate = gate;
        self
    }

    /// Loads the initial snapshot from `store`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if stored values are invalid.
    /// Returns [`AppError::Internal`] if the store cannot be read.
    pub async fn load(store: Arc<dyn SettingsStore>) -> Result<Self, AppError> {
        let live = LiveSettings::load(store.as_ref()).await?;
        Ok(Self::new(store, live))
    }

    /// Settings in effect for requests arriving now.
    pub async fn current(&self) -> Arc<Settings> {
        self.live.snapshot().await
    }

    /// Validates, persists, and activates new settings.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if either path is rejected, including
    /// a hidden path the gate never inspects.
    /// Returns [`AppError::Internal`] if persisting fails; the previous
    /// settings stay in effect.
    pub async fn update(
        &self,
        hidden_login_path: &str,
        block_redirect_path: &str,
    ) -> Result<Arc<Settings>, AppError> {
        let settings = Settings::new(hidden_login_path, block_redirect_path)?;
        self.gate.check_reachable(&settings)?;
        Ok(self.live.update(self.store.as_ref(), settings).await?)
    }

    /// Clears both paths, disabling the gate.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if persisting fails.
    pub async fn clear(&self) -> Result<Arc<Settings>, AppError> {
        Ok(self
            .live
            .update(self.store.as_ref(), Settings::default())
            .await?)
    }

    /// Re-reads the store and activates what it holds.
    ///
    /// Picks up edits made out of band, e.g. by the `admin` CLI.
    ///
    /// # Errors
    ///
    /// Returns the load error; the previous settings stay in effect.
    pub async fn reload(&self) -> Result<Arc<Settings>, AppError> {
        Ok(self
            .live
            .reload(self.store.as_ref(), |settings| {
                self.gate.check_reachable(settings)
            })
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{MemorySettingsStore, MockSettingsStore, SettingsError};

    fn service_with(settings: Settings) -> (SettingsService, Arc<MemorySettingsStore>) {
        let store = Arc::new(MemorySettingsStore::new(settings.clone()));
        let service = SettingsService::new(store.clone(), LiveSettings::new(settings));
        (service, store)
    }

    #[tokio::test]
    async fn test_update_sanitizes_and_persists() {
        let (service, store) = service_with(Settings::default());

        let updated = service.update("/my-login/", "/404?x").await.unwrap();
        assert_eq!(updated.hidden_login_path, "my-login");
        assert_eq!(updated.block_redirect_path, "404");

        assert_eq!(store.load().await.unwrap(), *updated);
        assert_eq!(service.current().await, updated);
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_path() {
        let original = Settings::new("secret", "").unwrap();
        let (service, store) = service_with(original.clone());

        let result = service.update("bad path", "").await;
        assert!(matches!(result, Err(AppError::Validation { .. })));

        assert_eq!(*service.current().await, original);
        assert_eq!(store.load().await.unwrap(), original);
    }

    #[tokio::test]
    async fn test_clear_disables_gate() {
        let (service, _store) = service_with(Settings::new("secret", "404").unwrap());

        let cleared = service.clear().await.unwrap();
        assert!(!cleared.is_enabled());
        assert_eq!(cleared.block_redirect_path, "");
    }

    #[tokio::test]
    async fn test_reload_picks_up_store_changes() {
        let (service, store) = service_with(Settings::default());

        store
            .save(&Settings::new("from-cli", "").unwrap())
            .await
            .unwrap();
        assert!(!service.current().await.is_enabled());

        let reloaded = service.reload().await.unwrap();
        assert_eq!(reloaded.hidden_login_path, "from-cli");
    }

    #[tokio::test]
    async fn test_storage_failure_is_internal_error() {
        let mut store = MockSettingsStore::new();
        store
            .expect_save()
            .times(1)
            .returning(|_| Err(SettingsError::Io(std::io::Error::other("disk full"))));

        let service = SettingsService::new(Arc::new(store), LiveSettings::default());

        let result = service.update("secret", "").await;
        assert!(matches!(result, Err(AppError::Internal { .. })));
        assert!(!service.current().await.is_enabled());
    }

    #[tokio::test]
    async fn test_load_from_store() {
        let mut store = MockSettingsStore::new();
        store
            .expect_load()
            .times(1)
            .returning(|| Ok(Settings::new("secret", "404").unwrap()));

        let service = SettingsService::load(Arc::new(store)).await.unwrap();
        assert!(service.current().await.is_enabled());
    }

    fn admin_gate() -> GateOptions {
        GateOptions::new(None, vec!["/admin".to_string()])
    }

    #[tokio::test]
    async fn test_update_rejects_path_under_exempt_prefix() {
        let original = Settings::new("secret", "").unwrap();
        let (service, store) = service_with(original.clone());
        let service = service.with_gate(admin_gate());

        for path in ["admin", "/admin/login/"] {
            let result = service.update(path, "").await;
            assert!(matches!(result, Err(AppError::Validation { .. })), "{path}");
        }

        assert_eq!(*service.current().await, original);
        assert_eq!(store.load().await.unwrap(), original);

        let updated = service.update("administrator", "").await.unwrap();
        assert_eq!(updated.hidden_login_path, "administrator");
    }

    #[tokio::test]
    async fn test_reload_rejects_path_under_exempt_prefix() {
        let original = Settings::new("secret", "").unwrap();
        let (service, store) = service_with(original.clone());
        let service = service.with_gate(admin_gate());

        store
            .save(&Settings::new("admin/login", "").unwrap())
            .await
            .unwrap();

        let result = service.reload().await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
        assert_eq!(*service.current().await, original);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_updates_on_file_store() {
        let dir = std::env::temp_dir().join(format!("hidden-login-{:016x}", rand::random::<u64>()));
        let store = Arc::new(crate::settings::FileSettingsStore::new(dir.join("settings.json")));
        let service = Arc::new(SettingsService::new(store.clone(), LiveSettings::default()));

        for round in 0..10 {
            let tasks: Vec<_> = (0..8)
                .map(|i| {
                    let service = service.clone();
                    tokio::spawn(async move {
                        service.update(&format!("login-{round}-{i}"), "404").await
                    })
                })
                .collect();

            for task in tasks {
                task.await.unwrap().unwrap();
            }

            assert_eq!(*service.current().await, store.load().await.unwrap());
        }

        let leftovers: Vec<_> = std::fs::read_dir(&dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, vec![std::ffi::OsString::from("settings.json")]);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
