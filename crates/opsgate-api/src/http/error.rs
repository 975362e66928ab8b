//! Application error type mapping to HTTP status codes and the `{ok:false}` body.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use opsgate_types::error::{AuthError, CsrfError, DataHealthError, RemoteError, WorkflowError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Admin gate rejection.
    Auth(AuthError),
    /// CSRF guard rejection.
    Csrf(CsrfError),
    /// Workflow dispatch or status failure.
    Workflow(WorkflowError),
    /// Data-health evaluation failure.
    DataHealth(DataHealthError),
    /// Token health check failure.
    GitHub(RemoteError),
    /// Malformed request.
    BadRequest(String),
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        AppError::Auth(e)
    }
}

impl From<CsrfError> for AppError {
    fn from(e: CsrfError) -> Self {
        AppError::Csrf(e)
    }
}

impl From<WorkflowError> for AppError {
    fn from(e: WorkflowError) -> Self {
        AppError::Workflow(e)
    }
}

impl From<DataHealthError> for AppError {
    fn from(e: DataHealthError) -> Self {
        AppError::DataHealth(e)
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            // A missing server secret is denied like a bad credential.
            AppError::Auth(_) | AppError::Csrf(_) => StatusCode::FORBIDDEN,
            AppError::Workflow(WorkflowError::UnknownWorkflow(_)) => StatusCode::BAD_REQUEST,
            AppError::Workflow(WorkflowError::Remote(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DataHealth(DataHealthError::NotFound) => StatusCode::NOT_FOUND,
            AppError::DataHealth(_) | AppError::GitHub(_) => StatusCode::BAD_GATEWAY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Auth(e) => e.to_string(),
            AppError::Csrf(e) => e.to_string(),
            AppError::Workflow(e) => e.to_string(),
            AppError::DataHealth(e) => e.to_string(),
            AppError::GitHub(e) => e.to_string(),
            AppError::BadRequest(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), error = %message, "Admin request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %message, "Admin request rejected");
        }

        (status, axum::Json(json!({ "ok": false, "error": message }))).into_response()
    }
}
