//! Public site surface: the login flow and the legacy login endpoint.
//!
//! # Modules
//!
//! - [`login_flow`] - [`login_flow::LoginFlow`] trait and the default Askama login page
//! - [`handlers`] - Route handlers
//! - [`routes`] - Public route configuration

pub mod handlers;
pub mod login_flow;
pub mod routes;
