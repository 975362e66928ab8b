//! Infrastructure implementations for opsgate.
//!
//! - [`github::GitHubWorkflowClient`]: the GitHub REST implementation of
//!   [`opsgate_core::remote::WorkflowRemote`]
//! - [`config`]: configuration loading from `opsgate.toml` plus environment

pub mod config;
pub mod github;
