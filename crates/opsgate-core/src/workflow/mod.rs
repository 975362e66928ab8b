//! Remote workflow dispatch and status.

pub mod orchestrator;
pub mod registry;

pub use orchestrator::WorkflowOrchestrator;
pub use registry::WorkflowRegistry;
