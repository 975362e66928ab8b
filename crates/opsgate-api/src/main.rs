//! opsgate CLI and admin API entry point.
//!
//! Binary name: `opsgate`
//!
//! Parses CLI arguments, loads configuration, then runs the requested command
//! or starts the admin HTTP server.

mod cli;
mod http;
mod state;

use anyhow::Context;
use clap::Parser;
use console::style;

use opsgate_core::remote::WorkflowRemote;
use opsgate_infra::config::{load_config, process_env};
use opsgate_observe::LogFormat;
use opsgate_types::config::AdminConfig;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let enable_otel = matches!(cli.command, Commands::Serve { otel: true, .. });
    let format = if cli.json {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    opsgate_observe::init_tracing(enable_otel, format, cli.log_filter())
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let mut config = load_config(&cli.config, &process_env)
        .await
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;

    let result = match cli.command {
        Commands::Serve {
            port,
            host,
            owner,
            repo,
            ..
        } => {
            if owner.is_some() {
                config.github.owner = owner;
            }
            if repo.is_some() {
                config.github.repo = repo;
            }
            serve(&config, &host, port, cli.quiet).await
        }
        Commands::Workflows => cli::workflows::list_workflows(&config, cli.json),
        Commands::Config => cli::config::show_config(&config, &process_env, cli.json),
    };

    opsgate_observe::shutdown_tracing();
    result
}

async fn serve(config: &AdminConfig, host: &str, port: u16, quiet: bool) -> anyhow::Result<()> {
    let state = AppState::from_config(config, &process_env)
        .context("failed to initialize the admin API")?;

    if !state.admin_gate.is_configured() {
        tracing::warn!("ADMIN_API_KEY is not set; every admin request will be rejected");
    }

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    let repository = state
        .github
        .scope()
        .map(ToString::to_string)
        .unwrap_or_default();
    tracing::info!(%addr, %repository, "Admin API listening");

    if !quiet {
        println!(
            "  {} opsgate admin API listening on {} ({})",
            style("⚡").bold(),
            style(format!("http://{addr}")).cyan(),
            style(&repository).dim()
        );
        println!("  {}", style("Press Ctrl+C to stop").dim());
    }

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Admin API stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
