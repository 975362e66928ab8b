//! Seed audit report parsing.
//!
//! The report format has gone through two naming schemes. Current reports
//! use `counts.fs`/`counts.db` and `drift.only_fs`/`drift.only_db`; older
//! ones use `onlyA`/`onlyB` (and a few other spellings). Both are accepted.

use serde::Deserialize;

use opsgate_types::error::DataHealthError;
use opsgate_types::health::{DriftCounts, DriftSets};

#[derive(Debug, Default, Deserialize)]
struct RawCounts {
    #[serde(default, alias = "filesystem", alias = "files")]
    fs: Option<u64>,
    #[serde(default, alias = "database")]
    db: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct RawDrift {
    #[serde(default, alias = "onlyA", alias = "only_in_fs")]
    only_fs: Option<Vec<serde_json::Value>>,
    #[serde(default, alias = "onlyB", alias = "only_in_db")]
    only_db: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct RawReport {
    #[serde(default)]
    counts: Option<RawCounts>,
    #[serde(default)]
    drift: Option<RawDrift>,
    #[serde(default, alias = "generated_at")]
    timestamp: Option<String>,
}

/// The parts of an audit report the evaluator uses.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditReport {
    pub counts: DriftCounts,
    pub drift: DriftSets,
    pub timestamp: Option<String>,
}

impl AuditReport {
    pub fn drift_ok(&self) -> bool {
        self.counts.drift_ok(&self.drift)
    }
}

/// Parse raw report bytes. Missing sections default to unknown counts and empty sets.
pub fn parse_report(bytes: &[u8]) -> Result<AuditReport, DataHealthError> {
    let raw: RawReport = serde_json::from_slice(bytes)
        .map_err(|e| DataHealthError::ArtifactMalformed(format!("invalid audit report: {e}")))?;

    let counts = raw.counts.unwrap_or_default();
    let drift = raw.drift.unwrap_or_default();

    Ok(AuditReport {
        counts: DriftCounts {
            fs: counts.fs,
            db: counts.db,
        },
        drift: DriftSets {
            only_fs: drift.only_fs.unwrap_or_default(),
            only_db: drift.only_db.unwrap_or_default(),
        },
        timestamp: raw.timestamp,
    })
}
