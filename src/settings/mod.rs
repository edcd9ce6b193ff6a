//! Hidden login settings: validation, persistence, and the live snapshot.
//!
//! - [`Settings`] - the two configured paths, canonical by construction
//! - [`SettingsStore`] - persistence trait with file and in-memory backends
//! - [`LiveSettings`] - snapshot read by the gate on every request

mod live;
mod model;
mod store;

pub use live::LiveSettings;
pub use model::{Settings, SettingsError, sanitize_path_setting};
pub use store::{FileSettingsStore, MemorySettingsStore, SettingsStore};

#[cfg(test)]
pub use store::MockSettingsStore;
