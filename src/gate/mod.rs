//! The login gate.
//!
//! Hides the well-known login endpoint behind an administrator-chosen path:
//!
//! - [`path`] - canonical path form used for every comparison
//! - [`decision`] - pure classification of a request into a [`Decision`]
//! - [`middleware`] - axum middleware acting on the decision
//!
//! The gate is obfuscation, not access control: anyone who knows the hidden
//! path reaches the login flow.

pub mod decision;
pub mod middleware;
pub mod path;

pub use decision::{Decision, decide, is_legacy_login_path};
pub use middleware::{GateOptions, layer};
pub use path::normalize;
