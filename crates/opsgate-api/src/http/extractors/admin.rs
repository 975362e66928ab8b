//! Admin secret extractor.
//!
//! Reads the `X-Admin-Key` header and checks it against the configured
//! secret. A header that is not valid UTF-8 counts as a wrong credential.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use opsgate_core::security::ADMIN_HEADER;

use crate::http::error::AppError;
use crate::state::AppState;

/// Authorized admin request marker. Extracting this runs the admin gate.
pub struct AdminAuthorized;

impl FromRequestParts<AppState> for AdminAuthorized {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let provided = parts
            .headers
            .get(ADMIN_HEADER)
            .map(|value| value.to_str().unwrap_or_default());

        state.admin_gate.authorize(provided).map_err(|e| {
            tracing::warn!(path = %parts.uri.path(), error = %e, "Admin gate rejected request");
            AppError::from(e)
        })?;

        Ok(AdminAuthorized)
    }
}
