//! GitHub token health check.

use axum::extract::State;

use opsgate_core::remote::WorkflowRemote;
use opsgate_types::remote::RemoteUser;

use crate::http::error::AppError;
use crate::http::extractors::admin::AdminAuthorized;
use crate::http::extractors::csrf::CsrfVerified;
use crate::http::response::OkResponse;
use crate::state::AppState;

/// GET /api/admin/health/github - Identity and scopes of the server token.
///
/// Requires a CSRF token in addition to the admin secret.
pub async fn get_github_health(
    State(state): State<AppState>,
    _admin: AdminAuthorized,
    _csrf: CsrfVerified,
) -> Result<OkResponse<RemoteUser>, AppError> {
    let user = state
        .github
        .get_authenticated_user()
        .await
        .map_err(AppError::GitHub)?;
    tracing::info!(login = %user.login, scopes = user.scopes.len(), "GitHub token check succeeded");
    Ok(OkResponse::new(user))
}
