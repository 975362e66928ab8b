//! Data-health evaluation from seed audit artifacts.

pub mod archive;
pub mod artifact;
pub mod evaluator;
pub mod report;

pub use evaluator::{DataHealthEvaluator, DataHealthSettings};
