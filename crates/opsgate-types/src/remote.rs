//! Values returned by the remote CI/VCS API.

use serde::{Deserialize, Serialize};

/// Owner/repository pair every remote call is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoScope {
    pub owner: String,
    pub repo: String,
}

impl RepoScope {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Parse a combined `owner/repo` value. Both halves must be non-empty.
    pub fn parse_combined(full: &str) -> Option<Self> {
        let (owner, repo) = full.trim().split_once('/')?;
        if owner.is_empty() || repo.is_empty() {
            return None;
        }
        Some(Self::new(owner, repo))
    }
}

impl std::fmt::Display for RepoScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Summary of the most recent run of a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub status: String,
    pub conclusion: Option<String>,
    pub html_url: Option<String>,
    pub id: Option<u64>,
    pub updated_at: Option<String>,
}

impl RunSummary {
    /// Sentinel returned when a workflow has never run.
    pub fn unknown() -> Self {
        Self {
            status: "unknown".to_string(),
            conclusion: None,
            html_url: None,
            id: None,
            updated_at: None,
        }
    }
}

/// Reference to the workflow run that produced an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ArtifactRun {
    #[serde(default)]
    pub id: Option<u64>,
}

/// Build artifact metadata as listed by the remote API.
///
/// Timestamps are kept as the raw strings the remote sent; parsing happens
/// where ordering matters so a malformed value never fails a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub expired: bool,
    #[serde(default)]
    pub size_in_bytes: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default, skip_serializing)]
    pub workflow_run: Option<ArtifactRun>,
}

impl ArtifactMetadata {
    /// Id of the run that uploaded this artifact, if the remote reported one.
    pub fn run_id(&self) -> Option<u64> {
        self.workflow_run.as_ref().and_then(|run| run.id)
    }
}

/// Identity behind the server's remote access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteUser {
    pub login: String,
    pub id: u64,
    /// OAuth scopes granted to the token (empty for fine-grained tokens).
    pub scopes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_combined_scope() {
        let scope = RepoScope::parse_combined("acme/site").unwrap();
        assert_eq!(scope, RepoScope::new("acme", "site"));
        assert_eq!(scope.to_string(), "acme/site");
    }

    #[test]
    fn test_parse_combined_scope_rejects_partial_values() {
        assert!(RepoScope::parse_combined("acme").is_none());
        assert!(RepoScope::parse_combined("/site").is_none());
        assert!(RepoScope::parse_combined("acme/").is_none());
    }

    #[test]
    fn test_artifact_metadata_tolerates_missing_fields() {
        let artifact: ArtifactMetadata =
            serde_json::from_str(r#"{"id": 7, "name": "seed-audit"}"#).unwrap();
        assert!(!artifact.expired);
        assert!(artifact.created_at.is_none());
        assert_eq!(artifact.run_id(), None);
    }

    #[test]
    fn test_artifact_run_id() {
        let artifact: ArtifactMetadata = serde_json::from_str(
            r#"{"id": 7, "name": "seed-audit", "workflow_run": {"id": 222, "head_branch": "main"}}"#,
        )
        .unwrap();
        assert_eq!(artifact.run_id(), Some(222));
    }

    #[test]
    fn test_unknown_run_summary() {
        let run = RunSummary::unknown();
        assert_eq!(run.status, "unknown");
        assert!(run.id.is_none() && run.html_url.is_none());
    }
}
