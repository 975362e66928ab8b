//! Process-wide caches for workflow status and data health.
//!
//! Both caches are constructed once at startup and injected into their
//! owning component. Every write replaces the cached value wholesale, so a
//! concurrent reader sees either the old or the new record, never a mix;
//! the worst outcome of a race is one redundant remote fetch.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use tokio::sync::RwLock;

use opsgate_types::health::DataHealthReport;
use opsgate_types::remote::RunSummary;
use opsgate_types::workflow::WorkflowName;

/// A cached latest-run record.
#[derive(Debug, Clone)]
pub struct CachedStatus {
    pub run: RunSummary,
    pub fetched: Instant,
}

/// Latest-run status keyed by workflow name, with a fixed freshness window.
pub struct StatusCache {
    entries: DashMap<WorkflowName, CachedStatus>,
    ttl: Duration,
}

impl StatusCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// The cached run for `name`, if one exists and is younger than the TTL.
    pub fn get_fresh(&self, name: WorkflowName) -> Option<RunSummary> {
        let entry = self.entries.get(&name)?;
        if entry.fetched.elapsed() < self.ttl {
            Some(entry.run.clone())
        } else {
            None
        }
    }

    /// Store a freshly fetched run for `name`, replacing any previous record.
    pub fn insert(&self, name: WorkflowName, run: RunSummary) {
        self.entries.insert(
            name,
            CachedStatus {
                run,
                fetched: Instant::now(),
            },
        );
    }

    /// Drop the record for `name`. Returns `true` if one existed.
    pub fn evict(&self, name: WorkflowName) -> bool {
        self.entries.remove(&name).is_some()
    }

    pub fn contains(&self, name: WorkflowName) -> bool {
        self.entries.contains_key(&name)
    }
}

#[derive(Debug, Clone)]
struct CachedHealth {
    report: DataHealthReport,
    fetched: Instant,
}

/// Single-slot cache for the data-health record.
///
/// Unlike [`StatusCache`], an expired record is kept around: it is still
/// served (marked stale) when a refresh fails.
#[derive(Default)]
pub struct HealthCache {
    slot: RwLock<Option<CachedHealth>>,
}

impl HealthCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached record if it is younger than `ttl`.
    pub async fn get_fresh(&self, ttl: Duration) -> Option<DataHealthReport> {
        let slot = self.slot.read().await;
        slot.as_ref()
            .filter(|cached| cached.fetched.elapsed() < ttl)
            .map(|cached| cached.report.clone())
    }

    /// The most recent record regardless of age.
    pub async fn latest(&self) -> Option<DataHealthReport> {
        self.slot.read().await.as_ref().map(|cached| cached.report.clone())
    }

    /// Replace the cached record.
    pub async fn store(&self, report: DataHealthReport) {
        *self.slot.write().await = Some(CachedHealth {
            report,
            fetched: Instant::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use opsgate_types::health::{DriftCounts, DriftSets};
    use opsgate_types::remote::ArtifactMetadata;

    use chrono::Utc;

    use super::*;

    fn run(id: u64) -> RunSummary {
        RunSummary {
            status: "completed".to_string(),
            conclusion: Some("success".to_string()),
            html_url: None,
            id: Some(id),
            updated_at: None,
        }
    }

    fn report() -> DataHealthReport {
        DataHealthReport {
            drift_ok: true,
            counts: DriftCounts { fs: Some(1), db: Some(1) },
            drift: DriftSets::default(),
            timestamp: None,
            run: None,
            artifact: ArtifactMetadata {
                id: 1,
                name: "seed-audit".to_string(),
                expired: false,
                size_in_bytes: None,
                created_at: None,
                expires_at: None,
                workflow_run: None,
            },
            fetched_at: Utc::now(),
            cache_ttl_seconds: 60,
        }
    }

    #[test]
    fn test_status_cache_hit_within_ttl() {
        let cache = StatusCache::new(Duration::from_secs(20));
        cache.insert(WorkflowName::Seed, run(1));
        assert_eq!(cache.get_fresh(WorkflowName::Seed), Some(run(1)));
        assert_eq!(cache.get_fresh(WorkflowName::Audit), None);
    }

    #[test]
    fn test_status_cache_expired_entry_is_a_miss() {
        let cache = StatusCache::new(Duration::ZERO);
        cache.insert(WorkflowName::Seed, run(1));
        assert!(cache.contains(WorkflowName::Seed));
        assert_eq!(cache.get_fresh(WorkflowName::Seed), None);
    }

    #[test]
    fn test_status_cache_evict() {
        let cache = StatusCache::new(Duration::from_secs(20));
        cache.insert(WorkflowName::Audit, run(2));
        assert!(cache.evict(WorkflowName::Audit));
        assert!(!cache.evict(WorkflowName::Audit));
        assert_eq!(cache.get_fresh(WorkflowName::Audit), None);
    }

    #[tokio::test]
    async fn test_health_cache_keeps_expired_record_as_latest() {
        let cache = HealthCache::new();
        assert!(cache.latest().await.is_none());

        cache.store(report()).await;
        assert!(cache.get_fresh(Duration::from_secs(60)).await.is_some());
        assert!(cache.get_fresh(Duration::ZERO).await.is_none());
        assert!(cache.latest().await.is_some());
    }
}
