//! Session-bound CSRF tokens.
//!
//! Each admin session holds at most one token. Issuing always mints a fresh
//! token and replaces the previous one, so a second issuance for the same
//! session invalidates any token still in flight.

use std::time::{Duration, Instant};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use dashmap::DashMap;
use rand::RngCore;
use rand::rngs::OsRng;

use opsgate_types::error::CsrfError;

use super::compare::constant_time_eq;

/// Header carrying the CSRF token on state-changing requests.
pub const CSRF_HEADER: &str = "x-csrf-token";

/// Random bytes behind every token and session id.
pub const TOKEN_BYTES: usize = 32;

#[derive(Debug)]
struct SessionEntry {
    token: String,
    last_seen: Instant,
}

/// In-memory session -> CSRF token store.
pub struct CsrfGuard {
    sessions: DashMap<String, SessionEntry>,
    session_ttl: Duration,
}

impl CsrfGuard {
    /// Create a guard whose sessions expire after `session_ttl` of inactivity.
    pub fn new(session_ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            session_ttl,
        }
    }

    /// Mint a new random session identifier.
    pub fn new_session_id() -> String {
        random_token()
    }

    /// Issue a new token bound to `session_id`, replacing any previous one.
    pub fn issue(&self, session_id: &str) -> String {
        self.purge_expired();

        let token = random_token();
        self.sessions.insert(
            session_id.to_string(),
            SessionEntry {
                token: token.clone(),
                last_seen: Instant::now(),
            },
        );
        tracing::debug!(sessions = self.sessions.len(), "Issued CSRF token");
        token
    }

    /// Verify the token presented on a request against the session's token.
    pub fn verify(&self, session_id: Option<&str>, provided: Option<&str>) -> Result<(), CsrfError> {
        let provided = provided
            .filter(|t| !t.is_empty())
            .ok_or(CsrfError::MissingToken)?;
        let session_id = session_id.ok_or(CsrfError::MissingToken)?;

        let mut entry = self
            .sessions
            .get_mut(session_id)
            .ok_or(CsrfError::MissingToken)?;

        if entry.last_seen.elapsed() >= self.session_ttl {
            drop(entry);
            self.sessions.remove(session_id);
            return Err(CsrfError::MissingToken);
        }

        if !constant_time_eq(entry.token.as_bytes(), provided.as_bytes()) {
            return Err(CsrfError::TokenMismatch);
        }

        entry.last_seen = Instant::now();
        Ok(())
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Drop every session idle past the TTL. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let before = self.sessions.len();
        let ttl = self.session_ttl;
        self.sessions.retain(|_, entry| entry.last_seen.elapsed() < ttl);
        before.saturating_sub(self.sessions.len())
    }
}

fn random_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
