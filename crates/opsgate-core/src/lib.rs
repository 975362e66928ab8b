//! Admin control logic for opsgate.
//!
//! This crate defines the [`remote::WorkflowRemote`] port that the
//! infrastructure layer implements, plus everything that sits in front of
//! it: the admin gate and CSRF guard, the workflow orchestrator with its
//! status cache, and the data-health evaluator with its stale-on-error
//! cache. It never performs network I/O itself.

pub mod cache;
pub mod health;
pub mod remote;
pub mod security;
pub mod workflow;
