//! Authentication service for the admin API token.

use serde_json::json;
use sha2::{Digest, Sha256};

use crate::error::AppError;

/// Validates Bearer tokens presented to the admin API.
///
/// Only the SHA-256 digest of the configured token is kept in memory, and
/// presented tokens are compared digest to digest so every comparison runs
/// over the same 32 bytes regardless of input length.
pub struct AuthService {
    token_digest: [u8; 32],
}

impl AuthService {
    /// Creates a service accepting exactly `token`.
    pub fn new(token: &str) -> Self {
        Self {
            token_digest: digest(token),
        }
    }

    /// Checks a raw token against the configured one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token does not match.
    pub fn authenticate(&self, token: &str) -> Result<(), AppError> {
        if digest(token) != self.token_digest {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Invalid admin token"}),
            ));
        }

        Ok(())
    }

    /// Short hex prefix of the token digest, safe to log.
    pub fn fingerprint(&self) -> String {
        hex::encode(&self.token_digest[..4])
    }
}

fn digest(token: &str) -> [u8; 32] {
    Sha256::digest(token.as_bytes()).into()
}
