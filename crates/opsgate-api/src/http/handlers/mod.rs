//! HTTP request handlers for the admin API.

pub mod csrf;
pub mod data_health;
pub mod github;
pub mod workflow;
