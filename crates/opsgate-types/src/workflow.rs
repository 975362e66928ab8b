//! Workflow domain types: symbolic names, run status and dispatch acknowledgements.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;
use crate::remote::RunSummary;

/// Symbolic name of a remotely-executed workflow.
///
/// The set is fixed; each name maps to a remote workflow identifier through
/// the workflow registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkflowName {
    /// Seeds content into the database.
    Seed,
    /// Audits filesystem/database drift and uploads the seed audit artifact.
    Audit,
    /// Verifies schema row-level-security permissions.
    VerifyRls,
}

impl WorkflowName {
    /// Every known workflow name, in display order.
    pub const ALL: [WorkflowName; 3] = [
        WorkflowName::VerifyRls,
        WorkflowName::Seed,
        WorkflowName::Audit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowName::Seed => "seed",
            WorkflowName::Audit => "audit",
            WorkflowName::VerifyRls => "verify-rls",
        }
    }
}

impl fmt::Display for WorkflowName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkflowName {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "seed" => Ok(WorkflowName::Seed),
            "audit" => Ok(WorkflowName::Audit),
            "verify-rls" => Ok(WorkflowName::VerifyRls),
            other => Err(WorkflowError::UnknownWorkflow(other.to_string())),
        }
    }
}

/// Latest-run status of a workflow, as served to admin callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowStatus {
    pub name: WorkflowName,
    pub status: String,
    pub conclusion: Option<String>,
    pub html_url: Option<String>,
    pub run_id: Option<u64>,
    pub updated_at: Option<String>,
    /// True when served from the status cache.
    pub cached: bool,
}

impl WorkflowStatus {
    pub fn from_run(name: WorkflowName, run: RunSummary, cached: bool) -> Self {
        Self {
            name,
            status: run.status,
            conclusion: run.conclusion,
            html_url: run.html_url,
            run_id: run.id,
            updated_at: run.updated_at,
            cached,
        }
    }
}

/// Acknowledgement returned after a workflow run was dispatched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchAck {
    pub name: WorkflowName,
    #[serde(rename = "ref")]
    pub git_ref: String,
    #[serde(rename = "dispatchedAt")]
    pub dispatched_at: DateTime<Utc>,
}
