//! Workflow dispatch and cached status lookups.
//!
//! Per workflow name the status cache is in one of three states: no record,
//! a fresh record (younger than the TTL), or a stale record. Reads serve a
//! fresh record directly and refetch otherwise. A successful dispatch evicts
//! the record so the next read is always fresh. A failed status fetch is
//! surfaced to the caller; no stale record is ever served for workflow status.

use std::sync::Arc;

use chrono::Utc;

use opsgate_types::error::WorkflowError;
use opsgate_types::workflow::{DispatchAck, WorkflowName, WorkflowStatus};

use crate::cache::StatusCache;
use crate::remote::WorkflowRemote;
use crate::workflow::registry::WorkflowRegistry;

/// Dispatches workflows and serves their latest-run status.
pub struct WorkflowOrchestrator<R: WorkflowRemote> {
    remote: Arc<R>,
    registry: WorkflowRegistry,
    cache: StatusCache,
    default_ref: String,
}

impl<R: WorkflowRemote> WorkflowOrchestrator<R> {
    pub fn new(
        remote: Arc<R>,
        registry: WorkflowRegistry,
        cache: StatusCache,
        default_ref: impl Into<String>,
    ) -> Self {
        Self {
            remote,
            registry,
            cache,
            default_ref: default_ref.into(),
        }
    }

    pub fn registry(&self) -> &WorkflowRegistry {
        &self.registry
    }

    pub fn default_ref(&self) -> &str {
        &self.default_ref
    }

    /// Trigger a new run of `name` on `git_ref` (or the default ref).
    ///
    /// Not idempotent: every call starts a new remote run. Unknown names fail
    /// before any remote call. On success the cached status is evicted; on
    /// failure the cache is left untouched.
    pub async fn dispatch(
        &self,
        name: &str,
        git_ref: Option<&str>,
    ) -> Result<DispatchAck, WorkflowError> {
        let (name, workflow_id) = self.registry.resolve(name)?;
        let git_ref = git_ref
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(self.default_ref.as_str());

        if let Err(e) = self.remote.dispatch_workflow(workflow_id, git_ref).await {
            tracing::warn!(workflow = %name, %workflow_id, error = %e, "Workflow dispatch failed");
            return Err(e.into());
        }

        let evicted = self.cache.evict(name);
        tracing::info!(
            workflow = %name,
            %workflow_id,
            git_ref,
            evicted,
            "Workflow dispatched"
        );

        Ok(DispatchAck {
            name,
            git_ref: git_ref.to_string(),
            dispatched_at: Utc::now(),
        })
    }

    /// Latest-run status of `name`, served from cache when fresh.
    pub async fn status(&self, name: &str) -> Result<WorkflowStatus, WorkflowError> {
        let (name, workflow_id) = self.registry.resolve(name)?;

        if let Some(run) = self.cache.get_fresh(name) {
            tracing::debug!(workflow = %name, "Serving cached workflow status");
            return Ok(WorkflowStatus::from_run(name, run, true));
        }

        let run = self.remote.get_latest_run(workflow_id).await.map_err(|e| {
            tracing::warn!(workflow = %name, %workflow_id, error = %e, "Workflow status fetch failed");
            WorkflowError::from(e)
        })?;
        self.cache.insert(name, run.clone());

        Ok(WorkflowStatus::from_run(name, run, false))
    }

    /// Whether a (fresh or stale) status record is currently cached for `name`.
    pub fn has_cached_status(&self, name: WorkflowName) -> bool {
        self.cache.contains(name)
    }
}
