//! Admin HTTP API.
//!
//! Axum routes under `/api/admin/` guarded by the admin secret header, with a
//! CSRF handshake for state-changing calls and `{ok, ...}` JSON bodies.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;
