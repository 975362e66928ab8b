//! Admin request security: the shared-secret gate and the CSRF guard.
//!
//! Mutations require both an admin credential and a session-bound CSRF
//! token; pure reads require only the admin credential. The HTTP layer
//! always runs the gate before the guard.

pub mod admin;
pub mod compare;
pub mod csrf;

pub use admin::{ADMIN_HEADER, AdminGate};
pub use csrf::{CSRF_HEADER, CsrfGuard};
