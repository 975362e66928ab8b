//! CLI command definitions for the `opsgate` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod config;
pub mod workflows;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use opsgate_infra::config::DEFAULT_CONFIG_FILE;

/// Admin control surface for CI workflows and seed data health.
#[derive(Parser)]
#[command(name = "opsgate", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file. A missing file means built-in defaults.
    #[arg(long, global = true, env = "OPSGATE_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Output machine-readable JSON (JSON log lines for `serve`).
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the admin HTTP API.
    Serve {
        /// Port to listen on.
        #[arg(short, long, env = "OPSGATE_PORT", default_value = "8080")]
        port: u16,

        /// Host to bind to.
        #[arg(long, env = "OPSGATE_HOST", default_value = "127.0.0.1")]
        host: String,

        /// Repository owner; takes precedence over the environment when given with --repo.
        #[arg(long)]
        owner: Option<String>,

        /// Repository name; takes precedence over the environment when given with --owner.
        #[arg(long)]
        repo: Option<String>,

        /// Export spans through OpenTelemetry (stdout exporter).
        #[arg(long)]
        otel: bool,
    },

    /// List the workflow registry.
    Workflows,

    /// Show the resolved configuration with secrets masked.
    Config,
}

impl Cli {
    /// Log filter used when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "info",
            1 => "info,opsgate_api=debug,opsgate_core=debug,opsgate_infra=debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        <Cli as clap::CommandFactory>::command().debug_assert();
    }

    #[test]
    fn test_serve_flags() {
        let cli = Cli::try_parse_from([
            "opsgate", "serve", "--port", "9000", "--owner", "acme", "--repo", "site", "--otel",
        ])
        .unwrap();
        match cli.command {
            Commands::Serve {
                port,
                owner,
                repo,
                otel,
                ..
            } => {
                assert_eq!(port, 9000);
                assert_eq!(owner.as_deref(), Some("acme"));
                assert_eq!(repo.as_deref(), Some("site"));
                assert!(otel);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_verbosity_filters() {
        let quiet = Cli::try_parse_from(["opsgate", "-q", "workflows"]).unwrap();
        assert_eq!(quiet.log_filter(), "error");
        let trace = Cli::try_parse_from(["opsgate", "workflows", "-vv"]).unwrap();
        assert_eq!(trace.log_filter(), "trace");
    }
}
