//! Handlers for the public site surface.

mod login;

pub use login::{legacy_login_handler, not_found_handler};
