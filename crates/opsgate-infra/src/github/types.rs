//! GitHub REST wire shapes.
//!
//! Only the fields opsgate reads are modelled; everything else is ignored.

use serde::{Deserialize, Serialize};

use opsgate_types::remote::{ArtifactMetadata, RunSummary};

#[derive(Debug, Serialize)]
pub(crate) struct DispatchRequest<'a> {
    #[serde(rename = "ref")]
    pub git_ref: &'a str,
}

/// `GET .../workflows/{id}/runs` response. Some proxies and older API
/// versions return the list under `runs`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RunsResponse {
    #[serde(default, alias = "runs")]
    pub workflow_runs: Vec<RawRun>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawRun {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub run_id: Option<u64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub conclusion: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl RawRun {
    pub fn into_summary(self) -> RunSummary {
        RunSummary {
            status: self.status.unwrap_or_else(|| "unknown".to_string()),
            conclusion: self.conclusion,
            html_url: self.html_url,
            id: self.id.or(self.run_id),
            updated_at: self.updated_at.or(self.created_at),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ArtifactsResponse {
    #[serde(default)]
    pub artifacts: Vec<ArtifactMetadata>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserResponse {
    pub login: String,
    pub id: u64,
}

/// Error body GitHub returns alongside non-2xx statuses.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
