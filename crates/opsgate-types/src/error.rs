use thiserror::Error;

/// Errors raised by the admin gate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("admin access is not configured on this server")]
    ServerMisconfigured,

    #[error("missing admin credential")]
    MissingCredential,

    #[error("invalid admin credential")]
    InvalidCredential,
}

/// Errors raised by the CSRF guard.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CsrfError {
    #[error("missing CSRF token")]
    MissingToken,

    #[error("CSRF token mismatch")]
    TokenMismatch,
}

/// Errors from calls to the remote CI/VCS API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    #[error("remote API returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("remote API request failed: {0}")]
    Transport(String),

    #[error("unexpected remote API response: {0}")]
    Decode(String),
}

impl RemoteError {
    /// Upstream HTTP status, when the remote answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors from workflow dispatch and status operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("Unknown workflow: '{0}'")]
    UnknownWorkflow(String),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Errors from data-health evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataHealthError {
    #[error("no seed audit artifact found")]
    NotFound,

    #[error("audit artifact is malformed: {0}")]
    ArtifactMalformed(String),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Errors from resolving process configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("GITHUB_SERVER_TOKEN is not set")]
    MissingToken,

    #[error("GitHub repo not configured: set GITHUB_OWNER + GITHUB_REPO or GITHUB_REPOSITORY")]
    MissingRepository,

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("failed to read configuration: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_workflow_display_names_the_workflow() {
        let err = WorkflowError::UnknownWorkflow("deploy".to_string());
        assert_eq!(err.to_string(), "Unknown workflow: 'deploy'");
    }

    #[test]
    fn test_remote_error_status() {
        let err = RemoteError::Status {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("404"));
        assert_eq!(RemoteError::Transport("timeout".to_string()).status(), None);
    }

    #[test]
    fn test_remote_error_is_transparent_inside_data_health() {
        let err: DataHealthError = RemoteError::Transport("connection reset".to_string()).into();
        assert_eq!(
            err.to_string(),
            "remote API request failed: connection reset"
        );
    }
}
