//! `opsgate config` - print the resolved configuration.
//!
//! Secrets are never printed, only whether they are set.

use anyhow::Result;
use console::style;
use serde_json::{Value, json};

use opsgate_infra::github::resolve_scope;
use opsgate_types::config::AdminConfig;

const MASK: &str = "********";

fn mask(is_set: bool) -> Value {
    if is_set { json!(MASK) } else { Value::Null }
}

/// Resolved configuration as JSON, with secrets masked and the repository
/// scope resolved the same way `serve` resolves it.
pub fn config_view(config: &AdminConfig, env: &dyn Fn(&str) -> Option<String>) -> Value {
    let repository = match resolve_scope(&config.github, env) {
        Ok(scope) => json!(scope.to_string()),
        Err(e) => json!({ "error": e.to_string() }),
    };

    json!({
        "admin_api_key": mask(config.admin_api_key.is_some()),
        "github": {
            "token": mask(config.github.token.is_some()),
            "repository": repository,
            "api_url": config.github.api_url,
            "web_url": config.github.web_url,
            "timeout_secs": config.github.timeout_secs,
            "user_agent": config.github.user_agent,
        },
        "workflows": config.workflows,
        "default_ref": config.default_ref,
        "status_cache_ttl_secs": config.status_cache_ttl_secs,
        "data_health": {
            "cache_ttl_secs": config.data_health.cache_ttl_secs,
            "artifact_prefix": config.data_health.artifact_prefix,
            "report_file": config.data_health.report_file,
            "page_size": config.data_health.page_size,
        },
        "session": {
            "ttl_secs": config.session.ttl_secs,
        },
    })
}

pub fn show_config(
    config: &AdminConfig,
    env: &dyn Fn(&str) -> Option<String>,
    json: bool,
) -> Result<()> {
    let view = config_view(config, env);

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    let set_or_missing = |v: &Value| {
        if v.is_null() {
            style("(not set)").red().to_string()
        } else {
            style("set").green().to_string()
        }
    };

    println!();
    println!("  {}", style("── Admin ──").dim());
    println!("  Admin key:  {}", set_or_missing(&view["admin_api_key"]));
    println!("  Default ref: {}", config.default_ref);
    println!();

    println!("  {}", style("── GitHub ──").dim());
    println!("  Token:      {}", set_or_missing(&view["github"]["token"]));
    match view["github"]["repository"].as_str() {
        Some(repo) => println!("  Repository: {}", style(repo).cyan()),
        None => println!(
            "  Repository: {}",
            style(view["github"]["repository"]["error"].as_str().unwrap_or_default()).red()
        ),
    }
    println!("  API:        {}", config.github.api_url);
    println!("  Timeout:    {}s", config.github.timeout_secs);
    println!();

    println!("  {}", style("── Caches ──").dim());
    println!("  Workflow status: {}s", config.status_cache_ttl_secs);
    println!("  Data health:     {}s", config.data_health.cache_ttl_secs);
    println!("  Sessions:        {}s", config.session.ttl_secs);
    println!();

    Ok(())
}
