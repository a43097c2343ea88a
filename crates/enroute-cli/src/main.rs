mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use enroute_cli::logging::{init_logging, LoggingConfig};
use enroute_cli::output::OutputFormat;
use enroute_lib::CostModel;

use commands::{CommandContext, RouteArgs};

#[derive(Parser, Debug)]
#[command(author, version, about = "Energy-aware wireless routing utilities")]
struct Cli {
    /// Cost function used when connections are added.
    #[arg(long, value_enum, default_value_t = CostModelArg::Table, global = true)]
    cost_model: CostModelArg,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

/// Built-in cost functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CostModelArg {
    /// Reference step table over the average energy.
    Table,
    /// Three-band fuzzy inference.
    Fuzzy,
}

impl From<CostModelArg> for CostModel {
    fn from(value: CostModelArg) -> Self {
        match value {
            CostModelArg::Table => CostModel::Table,
            CostModelArg::Fuzzy => CostModel::Fuzzy,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the least-cost route between two nodes of a topology file.
    Route {
        /// CSV connection list (node_a,cpu_a,radio_a,node_b,cpu_b,radio_b).
        #[arg(long)]
        topology: PathBuf,
        /// Starting node name.
        #[arg(long = "from")]
        from: String,
        /// Destination node name.
        #[arg(long = "to")]
        to: String,
    },
    /// Route across the built-in seven-node reference mesh.
    Demo {
        /// Starting node name.
        #[arg(long = "from", default_value = "A")]
        from: String,
        /// Destination node name.
        #[arg(long = "to", default_value = "G")]
        to: String,
    },
    /// List nodes with their residual energy and edges with their cost.
    Inspect {
        /// CSV connection list; the reference mesh is used when omitted.
        #[arg(long)]
        topology: Option<PathBuf>,
    },
    /// Evaluate the cost function for two endpoint energies.
    Cost {
        /// Residual energy of the first endpoint.
        #[arg(allow_negative_numbers = true)]
        energy_a: f64,
        /// Residual energy of the second endpoint.
        #[arg(allow_negative_numbers = true)]
        energy_b: f64,
    },
}

fn main() -> Result<()> {
    init_logging(&LoggingConfig::from_env());
    let cli = Cli::parse();
    let context = CommandContext {
        cost_model: cli.cost_model.into(),
        format: cli.format,
    };

    match cli.command {
        Command::Route { topology, from, to } => commands::route::handle_route_command(
            &context,
            &RouteArgs {
                topology: Some(topology),
                from,
                to,
            },
        ),
        Command::Demo { from, to } => commands::route::handle_route_command(
            &context,
            &RouteArgs {
                topology: None,
                from,
                to,
            },
        ),
        Command::Inspect { topology } => {
            commands::inspect::handle_inspect_command(&context, topology.as_deref())
        }
        Command::Cost { energy_a, energy_b } => {
            commands::cost::handle_cost_command(&context, energy_a, energy_b)
        }
    }
}
