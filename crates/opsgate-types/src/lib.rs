//! Shared domain types for opsgate.
//!
//! This crate contains the types exchanged between the admin gate, the
//! workflow orchestrator, the data-health evaluator and the remote CI client:
//! workflow names and run summaries, artifact metadata, data-health reports,
//! configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, secrecy, thiserror.

pub mod config;
pub mod error;
pub mod health;
pub mod remote;
pub mod workflow;
