//! Remote CI/VCS port.
//!
//! Defines the operations the orchestrator and evaluator need from the
//! remote platform. The infrastructure layer (opsgate-infra) implements
//! this trait against the GitHub REST API.

use opsgate_types::error::RemoteError;
use opsgate_types::remote::{ArtifactMetadata, RemoteUser, RepoScope, RunSummary};

/// Client for a remote CI/VCS API scoped to a single repository.
///
/// Calls are never retried: a failure propagates to the caller as-is.
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait WorkflowRemote: Send + Sync {
    /// The owner/repository all calls are scoped to, if one was resolved.
    fn scope(&self) -> Option<&RepoScope>;

    /// Trigger an asynchronous run of `workflow_id` on `git_ref`.
    ///
    /// Returns once the remote has accepted the request; does not wait for the run.
    fn dispatch_workflow(
        &self,
        workflow_id: &str,
        git_ref: &str,
    ) -> impl std::future::Future<Output = Result<(), RemoteError>> + Send;

    /// Most recent run of `workflow_id`, or [`RunSummary::unknown`] if it never ran.
    fn get_latest_run(
        &self,
        workflow_id: &str,
    ) -> impl std::future::Future<Output = Result<RunSummary, RemoteError>> + Send;

    /// List the repository's build artifacts, newest page first.
    fn list_artifacts(
        &self,
        page_size: u32,
    ) -> impl std::future::Future<Output = Result<Vec<ArtifactMetadata>, RemoteError>> + Send;

    /// Download the raw compressed archive of an artifact.
    fn download_artifact_archive(
        &self,
        artifact_id: u64,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, RemoteError>> + Send;

    /// Identity and scopes of the server's access token.
    fn get_authenticated_user(
        &self,
    ) -> impl std::future::Future<Output = Result<RemoteUser, RemoteError>> + Send;
}
