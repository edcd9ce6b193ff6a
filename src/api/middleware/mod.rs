//! HTTP middleware for the admin API and request observability.

pub mod auth;
pub mod tracing;
