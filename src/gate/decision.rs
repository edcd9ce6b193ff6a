//! Request classification for the login gate.

use axum::http::Method;
use regex::Regex;
use std::sync::LazyLock;

use crate::gate::path::normalize;

static LEGACY_LOGIN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)/wp-login\.php").unwrap());

/// Outcome of classifying one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Serve the real login flow at the hidden path.
    Allow,
    /// Send the client elsewhere. `target` is a site-relative path starting with `/`.
    Redirect { target: String },
    /// Unrelated request, let normal routing continue.
    NoAction,
}

/// Returns `true` when the raw path (query included) mentions the legacy login endpoint.
///
/// Case-insensitive substring match, so `/WP-LOGIN.PHP?action=x` and
/// `/blog/wp-login.php/` both count.
pub fn is_legacy_login_path(raw_path: &str) -> bool {
    LEGACY_LOGIN_REGEX.is_match(raw_path)
}

/// Classifies a request against the configured hidden login path and block redirect path.
///
/// # Rules
///
/// Evaluated in order, first match wins:
///
/// 1. `POST` is never touched, so in-flight login submissions keep working
/// 2. Legacy endpoint hit while a hidden path is configured: redirect to
///    `/` + `block_redirect_path`, or to the site root when that is empty
/// 3. Request path equals the hidden path (trailing slash tolerated): allow
/// 4. Anything else: no action
///
/// An empty `hidden_login_path` disables the gate entirely. Both configured
/// values are normalized again here; stored values are not assumed clean.
///
/// # Examples
///
/// ```
/// use axum::http::Method;
/// use hidden_login::gate::{Decision, decide};
///
/// assert_eq!(
///     decide(&Method::GET, "/wp-login.php?x=1", "secret", "404"),
///     Decision::Redirect { target: "/404".to_string() }
/// );
/// assert_eq!(decide(&Method::GET, "/secret/", "secret", "404"), Decision::Allow);
/// assert_eq!(decide(&Method::POST, "/wp-login.php", "secret", ""), Decision::NoAction);
/// ```
pub fn decide(
    method: &Method,
    raw_path: &str,
    hidden_login_path: &str,
    block_redirect_path: &str,
) -> Decision {
    if method == Method::POST {
        return Decision::NoAction;
    }

    let request_path = normalize(raw_path);
    let hidden = normalize(hidden_login_path);

    if hidden.is_empty() {
        return Decision::NoAction;
    }

    if is_legacy_login_path(raw_path) {
        let block = normalize(block_redirect_path);
        let target = if block.is_empty() {
            "/".to_string()
        } else {
            format!("/{block}")
        };

        return Decision::Redirect { target };
    }

    let trimmed = request_path.strip_suffix('/').unwrap_or(&request_path);
    if request_path == hidden || trimmed == hidden {
        return Decision::Allow;
    }

    Decision::NoAction
}
