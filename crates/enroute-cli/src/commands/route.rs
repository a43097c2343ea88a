//! Route command handler for least-cost paths.

use anyhow::{Context, Result};

use enroute_cli::output::{format_route_text, render_json, OutputFormat, RouteReport};
use enroute_lib::find_best_path;

use super::{CommandContext, RouteArgs};

/// Handle the route and demo subcommands.
///
/// An unreachable target is reported normally; unknown node names fail.
pub fn handle_route_command(context: &CommandContext, args: &RouteArgs) -> Result<()> {
    let topology = context.load_topology(args.topology.as_deref())?;
    let result = find_best_path(&topology, &args.from, &args.to)
        .with_context(|| format!("failed to route from {} to {}", args.from, args.to))?;

    tracing::info!(
        from = %args.from,
        to = %args.to,
        reachable = result.reachable,
        cost = result.total_cost,
        "route computed"
    );

    let report = RouteReport {
        source: args.from.clone(),
        target: args.to.clone(),
        cost_model: context.cost_model,
        result,
    };
    match context.format {
        OutputFormat::Text => print!("{}", format_route_text(&report)),
        OutputFormat::Json => render_json(&report)?,
    }
    Ok(())
}
