//! `opsgate workflows` - print the workflow registry.

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use opsgate_core::workflow::WorkflowRegistry;
use opsgate_types::config::AdminConfig;

pub fn list_workflows(config: &AdminConfig, json: bool) -> Result<()> {
    let registry =
        WorkflowRegistry::from_config(&config.workflows).context("invalid workflow table")?;

    if json {
        let workflows: Vec<_> = registry
            .entries()
            .map(|(name, workflow)| serde_json::json!({ "name": name, "workflow": workflow }))
            .collect();
        let out = serde_json::json!({
            "workflows": workflows,
            "default_ref": config.default_ref,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!(
        "  Workflows ({} registered, default ref {})",
        registry.entries().count(),
        style(&config.default_ref).cyan()
    );
    println!();

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Name").fg(Color::White),
        Cell::new("Remote workflow").fg(Color::White),
    ]);
    for (name, workflow) in registry.entries() {
        table.add_row(vec![
            Cell::new(name).fg(Color::Cyan),
            Cell::new(workflow).fg(Color::DarkGrey),
        ]);
    }

    println!("{table}");
    println!();
    Ok(())
}
