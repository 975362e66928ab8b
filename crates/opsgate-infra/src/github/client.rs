//! GitHub REST implementation of [`WorkflowRemote`].
//!
//! One client serves one repository. The access token is installed as a
//! sensitive default header at construction and never leaves this module.

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Response, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::debug;

use opsgate_core::remote::WorkflowRemote;
use opsgate_types::config::{AdminConfig, GitHubConfig};
use opsgate_types::error::{ConfigError, RemoteError};
use opsgate_types::remote::{ArtifactMetadata, RemoteUser, RepoScope, RunSummary};

use super::scope::resolve_scope;
use super::types::{ArtifactsResponse, DispatchRequest, ErrorBody, RunsResponse, UserResponse};

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// Longest slice of a non-JSON error body carried into an error message.
const MAX_ERROR_BODY: usize = 200;

/// Largest artifact archive buffered in memory.
const MAX_ARCHIVE_BYTES: usize = 64 * 1024 * 1024;

pub struct GitHubWorkflowClient {
    http: reqwest::Client,
    api_url: String,
    scope: RepoScope,
}

impl GitHubWorkflowClient {
    /// Build a client for `scope` using the token, base URL and timeout in `config`.
    pub fn new(config: &GitHubConfig, scope: RepoScope) -> Result<Self, ConfigError> {
        let token = config
            .token
            .as_ref()
            .map(|t| t.expose_secret().trim())
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let timeout = Duration::try_from_secs_f64(config.timeout_secs)
            .ok()
            .filter(|t| !t.is_zero())
            .ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "github.timeout_secs must be a positive number of seconds, got {}",
                    config.timeout_secs
                ))
            })?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| ConfigError::Invalid("GitHub token contains invalid characters".into()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert("x-github-api-version", HeaderValue::from_static(GITHUB_API_VERSION));

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::Invalid(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            scope,
        })
    }

    /// Resolve token and scope from `config` plus the environment, then build the client.
    ///
    /// A missing token is reported before a missing scope.
    pub fn from_config(
        config: &AdminConfig,
        env: &dyn Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if config.github.token.is_none() {
            return Err(ConfigError::MissingToken);
        }
        let scope = resolve_scope(&config.github, env)?;
        Self::new(&config.github, scope)
    }

    fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_url, self.scope.owner, self.scope.repo, path
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, RemoteError> {
        let response = self.http.get(url).send().await.map_err(transport)?;
        let response = check_status(response).await?;
        let body = response.bytes().await.map_err(transport)?;
        serde_json::from_slice(&body).map_err(|e| RemoteError::Decode(e.to_string()))
    }
}

impl WorkflowRemote for GitHubWorkflowClient {
    fn scope(&self) -> Option<&RepoScope> {
        Some(&self.scope)
    }

    async fn dispatch_workflow(&self, workflow_id: &str, git_ref: &str) -> Result<(), RemoteError> {
        let url = self.repo_url(&format!("actions/workflows/{workflow_id}/dispatches"));
        debug!(workflow_id, git_ref, "Dispatching workflow");

        let response = self
            .http
            .post(&url)
            .json(&DispatchRequest { git_ref })
            .send()
            .await
            .map_err(transport)?;
        check_status(response).await?;
        Ok(())
    }

    async fn get_latest_run(&self, workflow_id: &str) -> Result<RunSummary, RemoteError> {
        let url = self.repo_url(&format!("actions/workflows/{workflow_id}/runs?per_page=1"));
        let runs: RunsResponse = self.get_json(&url).await?;

        Ok(runs
            .workflow_runs
            .into_iter()
            .next()
            .map(|run| run.into_summary())
            .unwrap_or_else(RunSummary::unknown))
    }

    async fn list_artifacts(&self, page_size: u32) -> Result<Vec<ArtifactMetadata>, RemoteError> {
        let url = self.repo_url(&format!("actions/artifacts?per_page={page_size}"));
        let listing: ArtifactsResponse = self.get_json(&url).await?;
        debug!(count = listing.artifacts.len(), "Listed artifacts");
        Ok(listing.artifacts)
    }

    async fn download_artifact_archive(&self, artifact_id: u64) -> Result<Vec<u8>, RemoteError> {
        // GitHub answers with a redirect to blob storage; reqwest follows it
        // and drops the Authorization header when the host changes.
        let url = self.repo_url(&format!("actions/artifacts/{artifact_id}/zip"));
        let response = self.http.get(&url).send().await.map_err(transport)?;
        let response = check_status(response).await?;
        let bytes = read_capped(response, MAX_ARCHIVE_BYTES).await?;
        debug!(artifact_id, size = bytes.len(), "Downloaded artifact archive");
        Ok(bytes)
    }

    async fn get_authenticated_user(&self) -> Result<RemoteUser, RemoteError> {
        let url = format!("{}/user", self.api_url);
        let response = self.http.get(&url).send().await.map_err(transport)?;
        let response = check_status(response).await?;

        let scopes = response
            .headers()
            .get("x-oauth-scopes")
            .and_then(|v| v.to_str().ok())
            .map(parse_scopes)
            .unwrap_or_default();

        let body = response.bytes().await.map_err(transport)?;
        let user: UserResponse =
            serde_json::from_slice(&body).map_err(|e| RemoteError::Decode(e.to_string()))?;

        Ok(RemoteUser {
            login: user.login,
            id: user.id,
            scopes,
        })
    }
}

fn transport(err: reqwest::Error) -> RemoteError {
    RemoteError::Transport(err.to_string())
}

/// Pass 2xx responses through; turn anything else into [`RemoteError::Status`]
/// carrying GitHub's `message` when the body has one.
async fn check_status(response: Response) -> Result<Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(RemoteError::Status {
        status: status.as_u16(),
        message: error_message(status, &body),
    })
}

/// Buffer a response body, failing once it grows past `limit` bytes.
async fn read_capped(mut response: Response, limit: usize) -> Result<Vec<u8>, RemoteError> {
    if response
        .content_length()
        .is_some_and(|len| len > limit as u64)
    {
        return Err(archive_too_large(limit));
    }

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await.map_err(transport)? {
        if body.len() + chunk.len() > limit {
            return Err(archive_too_large(limit));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

fn archive_too_large(limit: usize) -> RemoteError {
    RemoteError::Decode(format!("artifact archive exceeds {limit} bytes"))
}

fn error_message(status: StatusCode, body: &str) -> String {
    if let Some(message) = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
    {
        return message;
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.chars().take(MAX_ERROR_BODY).collect();
    }

    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

fn parse_scopes(header: &str) -> Vec<String> {
    header
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn config_for(server: &MockServer) -> GitHubConfig {
        GitHubConfig {
            token: Some(SecretString::from("test-token".to_string())),
            api_url: server.uri(),
            ..GitHubConfig::default()
        }
    }

    async fn client_for(server: &MockServer) -> GitHubWorkflowClient {
        GitHubWorkflowClient::new(&config_for(server), RepoScope::new("acme", "site")).unwrap()
    }

    #[tokio::test]
    async fn test_dispatch_sends_ref_and_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/repos/acme/site/actions/workflows/seed-blog.yml/dispatches"))
            .and(header("authorization", "Bearer test-token"))
            .and(header("accept", GITHUB_ACCEPT))
            .and(header("x-github-api-version", GITHUB_API_VERSION))
            .and(body_json(json!({"ref": "main"})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client.dispatch_workflow("seed-blog.yml", "main").await.unwrap();
    }

    #[tokio::test]
    async fn test_dispatch_failure_carries_github_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(422)
                    .set_body_json(json!({"message": "No ref found for: nope"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.dispatch_workflow("seed-blog.yml", "nope").await.unwrap_err();
        assert_eq!(
            err,
            RemoteError::Status {
                status: 422,
                message: "No ref found for: nope".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_latest_run_maps_first_run() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/site/actions/workflows/seed-audit.yml/runs"))
            .and(query_param("per_page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_count": 2,
                "workflow_runs": [{
                    "id": 222,
                    "status": "completed",
                    "conclusion": "success",
                    "html_url": "https://github.com/acme/site/actions/runs/222",
                    "updated_at": "2025-08-29T12:00:00Z"
                }]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let run = client.get_latest_run("seed-audit.yml").await.unwrap();
        assert_eq!(run.id, Some(222));
        assert_eq!(run.status, "completed");
        assert_eq!(run.conclusion.as_deref(), Some("success"));
    }

    #[tokio::test]
    async fn test_latest_run_without_runs_is_unknown() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"workflow_runs": []})))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert_eq!(
            client.get_latest_run("verify-rls.yml").await.unwrap(),
            RunSummary::unknown()
        );
    }

    #[tokio::test]
    async fn test_latest_run_bad_json_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(matches!(
            client.get_latest_run("seed-blog.yml").await,
            Err(RemoteError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_list_artifacts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/site/actions/artifacts"))
            .and(query_param("per_page", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_count": 1,
                "artifacts": [{
                    "id": 101,
                    "name": "seed-audit-latest",
                    "expired": false,
                    "size_in_bytes": 2048,
                    "created_at": "2025-08-29T12:00:00Z",
                    "expires_at": "2025-09-28T12:00:00Z",
                    "workflow_run": {"id": 222}
                }]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let artifacts = client.list_artifacts(50).await.unwrap();
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].id, 101);
        assert_eq!(artifacts[0].run_id(), Some(222));
    }

    #[tokio::test]
    async fn test_download_follows_redirect() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/site/actions/artifacts/101/zip"))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("Location", format!("{}/blobs/101", server.uri())),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/blobs/101"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PK-archive".to_vec()))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert_eq!(
            client.download_artifact_archive(101).await.unwrap(),
            b"PK-archive".to_vec()
        );
    }

    #[tokio::test]
    async fn test_download_missing_artifact() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.download_artifact_archive(7).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_authenticated_user_reads_scopes_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("X-OAuth-Scopes", "repo, workflow")
                    .set_body_json(json!({"login": "octocat", "id": 1})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let user = client.get_authenticated_user().await.unwrap();
        assert_eq!(user.login, "octocat");
        assert_eq!(user.id, 1);
        assert_eq!(user.scopes, vec!["repo".to_string(), "workflow".to_string()]);
    }

    #[tokio::test]
    async fn test_fine_grained_token_has_no_scopes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"login": "bot", "id": 2})))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(client.get_authenticated_user().await.unwrap().scopes.is_empty());
    }

    #[tokio::test]
    async fn test_timeout_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(500))
                    .set_body_json(json!({"workflow_runs": []})),
            )
            .mount(&server)
            .await;

        let config = GitHubConfig {
            timeout_secs: 0.05,
            ..config_for(&server)
        };
        let client = GitHubWorkflowClient::new(&config, RepoScope::new("acme", "site")).unwrap();
        assert!(matches!(
            client.get_latest_run("seed-blog.yml").await,
            Err(RemoteError::Transport(_))
        ));
    }

    #[test]
    fn test_new_requires_token() {
        let config = GitHubConfig::default();
        assert!(matches!(
            GitHubWorkflowClient::new(&config, RepoScope::new("acme", "site")),
            Err(ConfigError::MissingToken)
        ));
    }

    #[tokio::test]
    async fn test_oversized_archive_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/blob/archive.zip"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 64]))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let url = format!("{}/blob/archive.zip", server.uri());

        let response = client.http.get(&url).send().await.unwrap();
        let err = read_capped(response, 32).await.unwrap_err();
        assert!(matches!(err, RemoteError::Decode(ref msg) if msg.contains("exceeds 32 bytes")));

        let response = client.http.get(&url).send().await.unwrap();
        assert_eq!(read_capped(response, 64).await.unwrap().len(), 64);
    }

    #[test]
    fn test_new_rejects_bad_timeout() {
        for timeout_secs in [0.0, -1.0, f64::NAN, f64::INFINITY, 1e20] {
            let config = GitHubConfig {
                token: Some(SecretString::from("t".to_string())),
                timeout_secs,
                ..GitHubConfig::default()
            };
            assert!(
                matches!(
                    GitHubWorkflowClient::new(&config, RepoScope::new("acme", "site")),
                    Err(ConfigError::Invalid(_))
                ),
                "{timeout_secs}"
            );
        }
    }

    #[test]
    fn test_from_config_reports_missing_token_first() {
        let config = AdminConfig::default();
        let env = |_: &str| -> Option<String> { None };
        assert!(matches!(
            GitHubWorkflowClient::from_config(&config, &env),
            Err(ConfigError::MissingToken)
        ));
    }

    #[test]
    fn test_from_config_uses_combined_repository() {
        let mut config = AdminConfig::default();
        config.github.token = Some(SecretString::from("t".to_string()));
        let env = |key: &str| (key == "GITHUB_REPOSITORY").then(|| "acme/site".to_string());
        let client = GitHubWorkflowClient::from_config(&config, &env).unwrap();
        assert_eq!(client.scope(), Some(&RepoScope::new("acme", "site")));
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, r#"{"message": "upstream"}"#),
            "upstream"
        );
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, "proxy down"), "proxy down");
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, ""), "Bad Gateway");
    }
}
