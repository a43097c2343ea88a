//! Inspect command handler listing node energies and edge costs.

use std::path::Path;

use anyhow::Result;

use enroute_cli::output::{format_topology_text, render_json, OutputFormat, TopologyReport};

use super::CommandContext;

pub fn handle_inspect_command(context: &CommandContext, path: Option<&Path>) -> Result<()> {
    let topology = context.load_topology(path)?;
    let report = TopologyReport::from_topology(&topology, context.cost_model);
    match context.format {
        OutputFormat::Text => print!("{}", format_topology_text(&report)),
        OutputFormat::Json => render_json(&report)?,
    }
    Ok(())
}
