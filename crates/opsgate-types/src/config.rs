//! Configuration types for opsgate.
//!
//! `AdminConfig` is resolved once at startup (file, then environment) and
//! handed by reference to the components that need it. All fields have
//! sensible defaults; secrets are wrapped in [`SecretString`] so they never
//! show up in `Debug` output or logs.

use std::collections::BTreeMap;

use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

/// Top-level configuration for the admin control surface.
#[derive(Debug, Deserialize)]
pub struct AdminConfig {
    /// Shared secret every admin request must present. `None` denies all admin calls.
    #[serde(default, deserialize_with = "deserialize_secret")]
    pub admin_api_key: Option<SecretString>,

    /// Remote CI/VCS access.
    #[serde(default)]
    pub github: GitHubConfig,

    /// Symbolic workflow name -> remote workflow identifier.
    #[serde(default = "default_workflows")]
    pub workflows: BTreeMap<String, String>,

    /// Git ref used when a dispatch request does not name one.
    #[serde(default = "default_ref")]
    pub default_ref: String,

    /// Freshness window for cached workflow status, in seconds.
    #[serde(default = "default_status_cache_ttl")]
    pub status_cache_ttl_secs: u64,

    #[serde(default)]
    pub data_health: DataHealthConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            admin_api_key: None,
            github: GitHubConfig::default(),
            workflows: default_workflows(),
            default_ref: default_ref(),
            status_cache_ttl_secs: default_status_cache_ttl(),
            data_health: DataHealthConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

/// Remote CI/VCS API settings.
#[derive(Debug, Deserialize)]
pub struct GitHubConfig {
    /// Server access token used for every remote call.
    #[serde(default, deserialize_with = "deserialize_secret")]
    pub token: Option<SecretString>,
    /// Explicit owner; only used together with `repo`.
    #[serde(default)]
    pub owner: Option<String>,
    /// Explicit repository; only used together with `owner`.
    #[serde(default)]
    pub repo: Option<String>,
    /// Combined `owner/repo`, the lowest-precedence scope source.
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Base for browsable run links.
    #[serde(default = "default_web_url")]
    pub web_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: f64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            owner: None,
            repo: None,
            repository: None,
            api_url: default_api_url(),
            web_url: default_web_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Data-health evaluation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DataHealthConfig {
    /// Freshness window for the cached data-health record, in seconds.
    #[serde(default = "default_health_ttl")]
    pub cache_ttl_secs: u64,
    /// Artifact name (or name prefix) identifying seed audit uploads.
    #[serde(default = "default_artifact_prefix")]
    pub artifact_prefix: String,
    /// File name of the report inside the artifact archive.
    #[serde(default = "default_report_file")]
    pub report_file: String,
    /// How many artifacts to list per refresh.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for DataHealthConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: default_health_ttl(),
            artifact_prefix: default_artifact_prefix(),
            report_file: default_report_file(),
            page_size: default_page_size(),
        }
    }
}

/// Admin session settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Idle lifetime of a session (and the CSRF token bound to it), in seconds.
    #[serde(default = "default_session_ttl")]
    pub ttl_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_session_ttl(),
        }
    }
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.is_empty()).map(SecretString::from))
}

fn default_workflows() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("seed".to_string(), "seed-blog.yml".to_string()),
        ("audit".to_string(), "seed-audit.yml".to_string()),
        ("verify-rls".to_string(), "verify-rls.yml".to_string()),
    ])
}

fn default_ref() -> String {
    "main".to_string()
}

fn default_status_cache_ttl() -> u64 {
    20
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_web_url() -> String {
    "https://github.com".to_string()
}

fn default_timeout_secs() -> f64 {
    10.0
}

fn default_user_agent() -> String {
    format!("opsgate/{}", env!("CARGO_PKG_VERSION"))
}

fn default_health_ttl() -> u64 {
    60
}

fn default_artifact_prefix() -> String {
    "seed-audit".to_string()
}

fn default_report_file() -> String {
    "seed-audit.json".to_string()
}

fn default_page_size() -> u32 {
    50
}

fn default_session_ttl() -> u64 {
    12 * 60 * 60
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_admin_config_default_values() {
        let config = AdminConfig::default();
        assert!(config.admin_api_key.is_none());
        assert_eq!(config.status_cache_ttl_secs, 20);
        assert_eq!(config.data_health.cache_ttl_secs, 60);
        assert_eq!(config.default_ref, "main");
        assert_eq!(config.workflows["seed"], "seed-blog.yml");
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert!((config.github.timeout_secs - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_admin_config_deserialize_empty_uses_defaults() {
        let config: AdminConfig = toml::from_str("").unwrap();
        assert_eq!(config.data_health.artifact_prefix, "seed-audit");
        assert_eq!(config.data_health.report_file, "seed-audit.json");
        assert_eq!(config.session.ttl_secs, 43_200);
        assert_eq!(config.workflows.len(), 3);
    }

    #[test]
    fn test_admin_config_deserialize_with_values() {
        let toml_str = r#"
admin_api_key = "hunter2"
default_ref = "release"

[github]
token = "ghp_test"
owner = "acme"
repo = "site"
timeout_secs = 2.5

[workflows]
seed = "seed.yml"

[data_health]
cache_ttl_secs = 5
"#;
        let config: AdminConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.admin_api_key.unwrap().expose_secret(), "hunter2");
        assert_eq!(config.github.token.unwrap().expose_secret(), "ghp_test");
        assert_eq!(config.github.owner.as_deref(), Some("acme"));
        assert_eq!(config.default_ref, "release");
        assert_eq!(config.workflows.len(), 1);
        assert_eq!(config.data_health.cache_ttl_secs, 5);
        assert_eq!(config.data_health.page_size, 50);
    }

    #[test]
    fn test_empty_secret_is_treated_as_unset() {
        let config: AdminConfig = toml::from_str(r#"admin_api_key = """#).unwrap();
        assert!(config.admin_api_key.is_none());
    }

    #[test]
    fn test_debug_output_redacts_secrets() {
        let config: AdminConfig = toml::from_str(r#"admin_api_key = "hunter2""#).unwrap();
        assert!(!format!("{config:?}").contains("hunter2"));
    }
}
