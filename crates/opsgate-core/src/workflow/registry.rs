//! Symbolic workflow name -> remote workflow identifier mapping.

use std::collections::BTreeMap;

use opsgate_types::error::{ConfigError, WorkflowError};
use opsgate_types::workflow::WorkflowName;

/// Immutable registry of dispatchable workflows, built once at startup.
#[derive(Debug, Clone)]
pub struct WorkflowRegistry {
    entries: BTreeMap<WorkflowName, String>,
}

impl WorkflowRegistry {
    /// Build the registry from the configured `name -> workflow file` table.
    ///
    /// Rejects names outside the known set and empty identifiers. Names
    /// missing from the table are simply not dispatchable.
    pub fn from_config(table: &BTreeMap<String, String>) -> Result<Self, ConfigError> {
        let mut entries = BTreeMap::new();
        for (name, workflow_id) in table {
            let name: WorkflowName = name
                .parse()
                .map_err(|e: WorkflowError| ConfigError::Invalid(e.to_string()))?;
            let workflow_id = workflow_id.trim();
            if workflow_id.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "workflow '{name}' has an empty remote identifier"
                )));
            }
            entries.insert(name, workflow_id.to_string());
        }
        Ok(Self { entries })
    }

    /// Resolve a caller-supplied name to its symbolic name and remote identifier.
    pub fn resolve(&self, name: &str) -> Result<(WorkflowName, &str), WorkflowError> {
        let parsed: WorkflowName = name.parse()?;
        self.entries
            .get(&parsed)
            .map(|id| (parsed, id.as_str()))
            .ok_or_else(|| WorkflowError::UnknownWorkflow(name.to_string()))
    }

    /// All registered workflows in name order.
    pub fn entries(&self) -> impl Iterator<Item = (WorkflowName, &str)> {
        self.entries.iter().map(|(name, id)| (*name, id.as_str()))
    }
}
