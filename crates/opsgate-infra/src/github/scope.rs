//! Owner/repository scope resolution.
//!
//! Precedence:
//! 1. Explicit `owner` + `repo` (config file or CLI)
//! 2. `GITHUB_OWNER` + `GITHUB_REPO`
//! 3. Combined `owner/repo` from `GITHUB_REPOSITORY`, then the config file's `repository`

use opsgate_types::config::GitHubConfig;
use opsgate_types::error::ConfigError;
use opsgate_types::remote::RepoScope;

/// Resolve the repository scope from configuration and an environment lookup.
///
/// `env` is injected so resolution can be tested without touching the
/// process environment.
pub fn resolve_scope(
    config: &GitHubConfig,
    env: &dyn Fn(&str) -> Option<String>,
) -> Result<RepoScope, ConfigError> {
    if let (Some(owner), Some(repo)) = (non_empty(&config.owner), non_empty(&config.repo)) {
        return Ok(RepoScope::new(owner, repo));
    }

    if let (Some(owner), Some(repo)) = (env("GITHUB_OWNER"), env("GITHUB_REPO")) {
        if !owner.is_empty() && !repo.is_empty() {
            return Ok(RepoScope::new(owner, repo));
        }
    }

    env("GITHUB_REPOSITORY")
        .as_deref()
        .and_then(RepoScope::parse_combined)
        .or_else(|| config.repository.as_deref().and_then(RepoScope::parse_combined))
        .ok_or(ConfigError::MissingRepository)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
