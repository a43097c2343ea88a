//! Cost command handler evaluating the cost function directly.

use anyhow::{bail, Result};

use enroute_cli::output::{format_cost_text, render_json, CostReport, OutputFormat};

use super::CommandContext;

pub fn handle_cost_command(context: &CommandContext, energy_a: f64, energy_b: f64) -> Result<()> {
    if !energy_a.is_finite() || !energy_b.is_finite() {
        bail!("energies must be finite numbers (got {energy_a} and {energy_b})");
    }

    let cost = context.cost_model.build().derive_cost(energy_a, energy_b);
    let report = CostReport {
        cost_model: context.cost_model,
        energy_a,
        energy_b,
        average: (energy_a + energy_b) / 2.0,
        cost,
    };
    match context.format {
        OutputFormat::Text => print!("{}", format_cost_text(&report)),
        OutputFormat::Json => render_json(&report)?,
    }
    Ok(())
}
