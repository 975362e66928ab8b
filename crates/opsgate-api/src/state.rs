//! Application state wiring the admin components together.
//!
//! The orchestrator and evaluator are generic over [`WorkflowRemote`]; AppState
//! pins them to the GitHub client. Every component is built once at startup
//! from the resolved [`AdminConfig`] and shared through `Arc`.
//!
//! [`WorkflowRemote`]: opsgate_core::remote::WorkflowRemote

use std::sync::Arc;
use std::time::Duration;

use opsgate_core::cache::{HealthCache, StatusCache};
use opsgate_core::health::{DataHealthEvaluator, DataHealthSettings};
use opsgate_core::security::{AdminGate, CsrfGuard};
use opsgate_core::workflow::{WorkflowOrchestrator, WorkflowRegistry};
use opsgate_infra::github::GitHubWorkflowClient;
use opsgate_types::config::AdminConfig;
use opsgate_types::error::ConfigError;

pub type GitHubOrchestrator = WorkflowOrchestrator<GitHubWorkflowClient>;
pub type GitHubEvaluator = DataHealthEvaluator<GitHubWorkflowClient>;

/// Shared state handed to every HTTP handler.
#[derive(Clone)]
pub struct AppState {
    pub admin_gate: Arc<AdminGate>,
    pub csrf: Arc<CsrfGuard>,
    pub orchestrator: Arc<GitHubOrchestrator>,
    pub data_health: Arc<GitHubEvaluator>,
    pub github: Arc<GitHubWorkflowClient>,
}

impl AppState {
    /// Build all components from `config`.
    ///
    /// Fails when the GitHub token or repository scope cannot be resolved, or
    /// the workflow table is invalid. A missing admin secret is not an error
    /// here: the gate then rejects every admin request.
    pub fn from_config(
        config: &AdminConfig,
        env: &dyn Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let github = Arc::new(GitHubWorkflowClient::from_config(config, env)?);
        let registry = WorkflowRegistry::from_config(&config.workflows)?;

        let orchestrator = WorkflowOrchestrator::new(
            Arc::clone(&github),
            registry,
            StatusCache::new(Duration::from_secs(config.status_cache_ttl_secs)),
            config.default_ref.clone(),
        );

        let data_health = DataHealthEvaluator::new(
            Arc::clone(&github),
            DataHealthSettings::from_config(&config.data_health, &config.github.web_url),
            HealthCache::new(),
        );

        Ok(Self {
            admin_gate: Arc::new(AdminGate::new(config.admin_api_key.as_ref())),
            csrf: Arc::new(CsrfGuard::new(Duration::from_secs(config.session.ttl_secs))),
            orchestrator: Arc::new(orchestrator),
            data_health: Arc::new(data_health),
            github,
        })
    }
}
