//! Data-health evaluator with a stale-on-error cache.
//!
//! A refresh lists artifacts, picks the newest seed audit upload, downloads
//! its archive, parses the embedded report and computes the drift verdict.
//! When a refresh fails for any reason other than "no audit artifact
//! exists", the previously cached record is served marked stale. Workflow
//! status deliberately has no such fallback.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use opsgate_types::config::DataHealthConfig;
use opsgate_types::error::DataHealthError;
use opsgate_types::health::{DataHealthReport, DataHealthView, RunReference};
use opsgate_types::remote::{ArtifactMetadata, RepoScope};

use crate::cache::HealthCache;
use crate::health::archive::extract_report;
use crate::health::artifact::select_latest;
use crate::health::report::parse_report;
use crate::remote::WorkflowRemote;

/// Tunables for data-health evaluation.
#[derive(Debug, Clone)]
pub struct DataHealthSettings {
    pub cache_ttl: Duration,
    pub artifact_prefix: String,
    pub report_file: String,
    pub page_size: u32,
    /// Base for browsable run links, e.g. `https://github.com`.
    pub web_url: String,
}

impl DataHealthSettings {
    pub fn from_config(config: &DataHealthConfig, web_url: &str) -> Self {
        Self {
            cache_ttl: Duration::from_secs(config.cache_ttl_secs),
            artifact_prefix: config.artifact_prefix.clone(),
            report_file: config.report_file.clone(),
            page_size: config.page_size,
            web_url: web_url.trim_end_matches('/').to_string(),
        }
    }
}

/// Serves the data-health record for the single audit subject.
pub struct DataHealthEvaluator<R: WorkflowRemote> {
    remote: Arc<R>,
    settings: DataHealthSettings,
    cache: HealthCache,
}

impl<R: WorkflowRemote> DataHealthEvaluator<R> {
    pub fn new(remote: Arc<R>, settings: DataHealthSettings, cache: HealthCache) -> Self {
        Self {
            remote,
            settings,
            cache,
        }
    }

    /// Current data-health record.
    ///
    /// Served from cache when younger than the TTL unless `bypass_cache` is set.
    pub async fn evaluate(&self, bypass_cache: bool) -> Result<DataHealthView, DataHealthError> {
        if !bypass_cache
            && let Some(report) = self.cache.get_fresh(self.settings.cache_ttl).await
        {
            tracing::debug!("Serving cached data health");
            return Ok(DataHealthView {
                report,
                cached: true,
                stale: None,
            });
        }

        match self.refresh().await {
            Ok(report) => {
                self.cache.store(report.clone()).await;
                Ok(DataHealthView {
                    report,
                    cached: false,
                    stale: None,
                })
            }
            Err(DataHealthError::NotFound) => Err(DataHealthError::NotFound),
            Err(e) => match self.cache.latest().await {
                Some(report) => {
                    tracing::warn!(error = %e, "Data health refresh failed, serving stale cache");
                    Ok(DataHealthView {
                        report,
                        cached: true,
                        stale: Some(true),
                    })
                }
                None => {
                    tracing::error!(error = %e, "Data health refresh failed with no cached record");
                    Err(e)
                }
            },
        }
    }

    async fn refresh(&self) -> Result<DataHealthReport, DataHealthError> {
        let artifacts = self.remote.list_artifacts(self.settings.page_size).await?;
        let listed = artifacts.len();
        let artifact = select_latest(artifacts, &self.settings.artifact_prefix).ok_or_else(|| {
            tracing::info!(
                listed,
                prefix = %self.settings.artifact_prefix,
                "No seed audit artifact found"
            );
            DataHealthError::NotFound
        })?;

        tracing::debug!(
            artifact_id = artifact.id,
            name = %artifact.name,
            created_at = ?artifact.created_at,
            "Downloading seed audit artifact"
        );
        let archive = self.remote.download_artifact_archive(artifact.id).await?;
        let raw = extract_report(&archive, &self.settings.report_file)?;
        let audit = parse_report(&raw)?;

        let run = self.run_reference(&artifact);
        let drift_ok = audit.drift_ok();
        tracing::info!(
            artifact_id = artifact.id,
            drift_ok,
            fs = ?audit.counts.fs,
            db = ?audit.counts.db,
            "Data health refreshed"
        );

        Ok(DataHealthReport {
            drift_ok,
            counts: audit.counts,
            drift: audit.drift,
            timestamp: audit.timestamp,
            run,
            artifact,
            fetched_at: Utc::now(),
            cache_ttl_seconds: self.settings.cache_ttl.as_secs(),
        })
    }

    fn run_reference(&self, artifact: &ArtifactMetadata) -> Option<RunReference> {
        let id = artifact.run_id()?;
        Some(RunReference {
            id,
            url: run_url(&self.settings.web_url, self.remote.scope(), id),
        })
    }
}

/// Browsable URL of a workflow run. Without a resolved scope the link lacks
/// the owner/repo segment.
pub fn run_url(web_url: &str, scope: Option<&RepoScope>, run_id: u64) -> String {
    match scope {
        Some(scope) => format!(
            "{web_url}/{}/{}/actions/runs/{run_id}",
            scope.owner, scope.repo
        ),
        None => format!("{web_url}/actions/runs/{run_id}"),
    }
}
