//! CSRF token extractor for state-changing admin requests.
//!
//! The session is identified by the `opsgate_session` cookie; the token by
//! the `X-CSRF-Token` header.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use opsgate_core::security::CSRF_HEADER;

use super::SESSION_COOKIE;
use crate::http::error::AppError;
use crate::state::AppState;

/// Verified CSRF marker. Extracting this runs the CSRF guard.
pub struct CsrfVerified;

impl FromRequestParts<AppState> for CsrfVerified {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let session_id = jar.get(SESSION_COOKIE).map(|c| c.value());
        let provided = parts
            .headers
            .get(CSRF_HEADER)
            .and_then(|value| value.to_str().ok());

        state.csrf.verify(session_id, provided).map_err(|e| {
            tracing::warn!(path = %parts.uri.path(), error = %e, "CSRF check failed");
            AppError::from(e)
        })?;

        Ok(CsrfVerified)
    }
}
