//! Configuration loader for opsgate.
//!
//! Reads `opsgate.toml` (or the path given on the command line) into
//! [`AdminConfig`], then applies environment overrides. A missing file means
//! defaults; a file that exists but does not parse is an error.

use std::path::Path;
use std::str::FromStr;

use secrecy::SecretString;

use opsgate_types::config::AdminConfig;
use opsgate_types::error::ConfigError;

/// Default config file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "opsgate.toml";

/// Read a variable from the process environment, treating empty values as unset.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Load configuration from `path` and overlay environment values from `env`.
pub async fn load_config(
    path: &Path,
    env: &dyn Fn(&str) -> Option<String>,
) -> Result<AdminConfig, ConfigError> {
    let mut config = match tokio::fs::read_to_string(path).await {
        Ok(content) => toml::from_str::<AdminConfig>(&content)
            .map_err(|e| ConfigError::Invalid(format!("{}: {e}", path.display())))?,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            AdminConfig::default()
        }
        Err(err) => return Err(ConfigError::Io(format!("{}: {err}", path.display()))),
    };

    apply_env_overrides(&mut config, env)?;
    Ok(config)
}

/// Overlay environment values onto `config`.
///
/// | Variable                | Field                          |
/// |-------------------------|--------------------------------|
/// | `ADMIN_API_KEY`         | `admin_api_key`                |
/// | `GITHUB_SERVER_TOKEN`   | `github.token`                 |
/// | `GITHUB_API_URL`        | `github.api_url`               |
/// | `GITHUB_HTTP_TIMEOUT`   | `github.timeout_secs`          |
/// | `DATA_HEALTH_CACHE_TTL` | `data_health.cache_ttl_secs`   |
///
/// Owner/repository variables are read at scope resolution instead, so the
/// explicit-over-environment precedence stays intact.
pub fn apply_env_overrides(
    config: &mut AdminConfig,
    env: &dyn Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    if let Some(key) = env("ADMIN_API_KEY") {
        config.admin_api_key = Some(SecretString::from(key));
    }
    if let Some(token) = env("GITHUB_SERVER_TOKEN") {
        config.github.token = Some(SecretString::from(token));
    }
    if let Some(url) = env("GITHUB_API_URL") {
        config.github.api_url = url;
    }
    if let Some(timeout) = parse_var::<f64>(env, "GITHUB_HTTP_TIMEOUT")? {
        config.github.timeout_secs = timeout;
    }
    if let Some(ttl) = parse_var::<u64>(env, "DATA_HEALTH_CACHE_TTL")? {
        config.data_health.cache_ttl_secs = ttl;
    }
    Ok(())
}

fn parse_var<T: FromStr>(
    env: &dyn Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError> {
    match env(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("{key} is not a valid number: {raw:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    use super::*;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[tokio::test]
    async fn load_config_missing_file_returns_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("opsgate.toml"), &env_of(&[]))
            .await
            .unwrap();
        assert!(config.admin_api_key.is_none());
        assert_eq!(config.default_ref, "main");
        assert_eq!(config.workflows.len(), 3);
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("opsgate.toml");
        tokio::fs::write(
            &path,
            r#"
admin_api_key = "file-key"
default_ref = "release"

[github]
owner = "acme"
repo = "site"
timeout_secs = 3.5

[data_health]
cache_ttl_secs = 120
"#,
        )
        .await
        .unwrap();

        let config = load_config(&path, &env_of(&[])).await.unwrap();
        assert_eq!(config.admin_api_key.unwrap().expose_secret(), "file-key");
        assert_eq!(config.default_ref, "release");
        assert_eq!(config.github.owner.as_deref(), Some("acme"));
        assert_eq!(config.github.timeout_secs, 3.5);
        assert_eq!(config.data_health.cache_ttl_secs, 120);
    }

    #[tokio::test]
    async fn load_config_invalid_toml_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("opsgate.toml");
        tokio::fs::write(&path, "this is not { valid toml !!!")
            .await
            .unwrap();

        assert!(matches!(
            load_config(&path, &env_of(&[])).await,
            Err(ConfigError::Invalid(_))
        ));
    }

    #[tokio::test]
    async fn load_config_env_overrides_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("opsgate.toml");
        tokio::fs::write(&path, "admin_api_key = \"file-key\"\n")
            .await
            .unwrap();

        let env = env_of(&[
            ("ADMIN_API_KEY", "env-key"),
            ("GITHUB_SERVER_TOKEN", "ghp_env"),
            ("GITHUB_HTTP_TIMEOUT", "2.5"),
            ("DATA_HEALTH_CACHE_TTL", "30"),
            ("GITHUB_API_URL", "http://127.0.0.1:9999"),
        ]);
        let config = load_config(&path, &env).await.unwrap();
        assert_eq!(config.admin_api_key.unwrap().expose_secret(), "env-key");
        assert_eq!(config.github.token.unwrap().expose_secret(), "ghp_env");
        assert_eq!(config.github.timeout_secs, 2.5);
        assert_eq!(config.data_health.cache_ttl_secs, 30);
        assert_eq!(config.github.api_url, "http://127.0.0.1:9999");
    }

    #[test]
    fn apply_env_overrides_rejects_bad_numbers() {
        let mut config = AdminConfig::default();
        let env = env_of(&[("GITHUB_HTTP_TIMEOUT", "ten")]);
        assert!(matches!(
            apply_env_overrides(&mut config, &env),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn apply_env_overrides_leaves_scope_alone() {
        let mut config = AdminConfig::default();
        let env = env_of(&[("GITHUB_OWNER", "acme"), ("GITHUB_REPOSITORY", "acme/site")]);
        apply_env_overrides(&mut config, &env).unwrap();
        assert!(config.github.owner.is_none());
        assert!(config.github.repository.is_none());
    }
}
