//! Request extractors enforcing the admin gate and the CSRF guard.
//!
//! Handlers list [`admin::AdminAuthorized`] before [`csrf::CsrfVerified`] so
//! the secret is always checked first.

pub mod admin;
pub mod csrf;

/// Cookie carrying the admin session id the CSRF token is bound to.
pub const SESSION_COOKIE: &str = "opsgate_session";

/// Path the session cookie is scoped to.
pub const SESSION_COOKIE_PATH: &str = "/api/admin";
