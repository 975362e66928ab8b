//! CSRF token issuance.

use axum::extract::State;
use axum::response::IntoResponse;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use serde::Serialize;

use opsgate_core::security::CsrfGuard;

use crate::http::extractors::admin::AdminAuthorized;
use crate::http::extractors::{SESSION_COOKIE, SESSION_COOKIE_PATH};
use crate::http::response::OkResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CsrfIssued {
    #[serde(rename = "csrfToken")]
    pub csrf_token: String,
}

/// POST /api/admin/csrf - Issue a CSRF token bound to the caller's session.
///
/// Reuses the session cookie when present, otherwise starts a new session.
/// Every call mints a fresh token; the session's previous token stops working.
pub async fn issue_csrf_token(
    State(state): State<AppState>,
    _admin: AdminAuthorized,
    jar: CookieJar,
) -> impl IntoResponse {
    let existing = jar
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|id| !id.is_empty());

    let (session_id, jar) = match existing {
        Some(id) => (id, jar),
        None => {
            let id = CsrfGuard::new_session_id();
            let cookie = Cookie::build((SESSION_COOKIE, id.clone()))
                .path(SESSION_COOKIE_PATH)
                .http_only(true)
                .same_site(SameSite::Strict)
                .build();
            (id, jar.add(cookie))
        }
    };

    let csrf_token = state.csrf.issue(&session_id);
    (jar, OkResponse::new(CsrfIssued { csrf_token }))
}
