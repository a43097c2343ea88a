//! Handlers for CLI subcommands.
//!
//! `main.rs` parses arguments and dispatches here; each module owns one
//! subcommand.

pub mod cost;
pub mod demo;
pub mod inspect;
pub mod route;

use std::path::Path;

use anyhow::{Context, Result};

use enroute_cli::output::OutputFormat;
use enroute_lib::{topology_from_path, CostModel, Topology};

/// Settings shared by every subcommand.
#[derive(Debug, Clone, Copy)]
pub struct CommandContext {
    pub cost_model: CostModel,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Empty topology wired to the selected cost model.
    pub fn empty_topology(&self) -> Topology {
        Topology::new().with_cost_function(self.cost_model.build())
    }

    /// Load `path`, or build the reference mesh when no path is given.
    pub fn load_topology(&self, path: Option<&Path>) -> Result<Topology> {
        match path {
            Some(path) => topology_from_path(path, self.empty_topology())
                .with_context(|| format!("failed to load topology from {}", path.display())),
            None => demo::reference_mesh(self.empty_topology())
                .context("failed to build the reference mesh"),
        }
    }
}

/// Arguments for the route and demo commands.
#[derive(Debug, Clone)]
pub struct RouteArgs {
    /// Topology file; `None` selects the reference mesh.
    pub topology: Option<std::path::PathBuf>,
    pub from: String,
    pub to: String,
}
