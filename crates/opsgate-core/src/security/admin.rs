//! Shared-secret admin gate.

use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

use opsgate_types::error::AuthError;

use super::compare::constant_time_eq;

/// Header carrying the admin secret.
pub const ADMIN_HEADER: &str = "x-admin-key";

/// Validates the admin secret presented on every admin request.
///
/// Only a SHA-256 digest of the configured secret is kept in memory, and
/// candidates are compared digest-to-digest in constant time.
pub struct AdminGate {
    secret_digest: Option<[u8; 32]>,
}

impl AdminGate {
    /// Create a gate for the configured secret. `None` makes every request
    /// fail with [`AuthError::ServerMisconfigured`].
    pub fn new(secret: Option<&SecretString>) -> Self {
        Self {
            secret_digest: secret.map(|s| digest(s.expose_secret())),
        }
    }

    /// Whether an admin secret is configured at all.
    pub fn is_configured(&self) -> bool {
        self.secret_digest.is_some()
    }

    /// Check the credential presented by a request.
    ///
    /// `provided` is the raw header value, or `None` if the header was absent.
    pub fn authorize(&self, provided: Option<&str>) -> Result<(), AuthError> {
        let expected = self.secret_digest.ok_or(AuthError::ServerMisconfigured)?;
        let provided = provided.ok_or(AuthError::MissingCredential)?;

        if constant_time_eq(&expected, &digest(provided)) {
            Ok(())
        } else {
            Err(AuthError::InvalidCredential)
        }
    }
}

fn digest(value: &str) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(value.as_bytes()));
    out
}
