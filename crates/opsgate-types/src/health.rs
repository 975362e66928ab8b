//! Data-health report types.
//!
//! A data-health record describes the most recent filesystem-vs-database
//! audit: per-side counts, the entries present on only one side, and where
//! the audit came from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::remote::ArtifactMetadata;

/// Entry counts on each side of the comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DriftCounts {
    pub fs: Option<u64>,
    pub db: Option<u64>,
}

/// Entries present on only one side of the comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DriftSets {
    pub only_fs: Vec<serde_json::Value>,
    pub only_db: Vec<serde_json::Value>,
}

impl DriftCounts {
    /// The drift verdict: both counts known and equal, and both exclusive sets empty.
    pub fn drift_ok(&self, sets: &DriftSets) -> bool {
        match (self.fs, self.db) {
            (Some(fs), Some(db)) => fs == db && sets.only_fs.is_empty() && sets.only_db.is_empty(),
            _ => false,
        }
    }
}

/// Browsable reference to the run that produced the audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReference {
    pub id: u64,
    pub url: String,
}

/// The cached data-health record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataHealthReport {
    pub drift_ok: bool,
    pub counts: DriftCounts,
    pub drift: DriftSets,
    /// Timestamp written into the audit report itself.
    pub timestamp: Option<String>,
    pub run: Option<RunReference>,
    pub artifact: ArtifactMetadata,
    pub fetched_at: DateTime<Utc>,
    pub cache_ttl_seconds: u64,
}

/// A data-health record as served, annotated with its cache provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataHealthView {
    #[serde(flatten)]
    pub report: DataHealthReport,
    pub cached: bool,
    /// Present (and true) only when a refresh failed and the previous record was served.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stale: Option<bool>,
}
