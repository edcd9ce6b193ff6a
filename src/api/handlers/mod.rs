//! HTTP request handlers for API endpoints.

pub mod health;
pub mod settings;

pub use health::health_handler;
pub use settings::{
    clear_settings_handler, get_settings_handler, reload_settings_handler,
    update_settings_handler,
};
