//! GitHub Actions access.

pub mod client;
pub mod scope;
mod types;

pub use client::GitHubWorkflowClient;
pub use scope::resolve_scope;
