//! Report formatting for CLI commands.
//!
//! Text formatters return `String`s so they can be tested without capturing
//! stdout; JSON goes through serde.

use std::fmt::Write as _;
use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use enroute_lib::{CostModel, PathResult, Topology};

/// Output format for command reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Route query report.
#[derive(Debug, Clone, Serialize)]
pub struct RouteReport {
    pub source: String,
    pub target: String,
    pub cost_model: CostModel,
    #[serde(flatten)]
    pub result: PathResult,
}

/// Node row of a topology report.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NodeRow {
    pub name: String,
    pub cpu_power_draw: f64,
    pub radio_power_draw: f64,
    pub energy: f64,
    pub degree: usize,
}

/// Edge row of a topology report.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EdgeRow {
    pub a: String,
    pub b: String,
    pub cost: f64,
}

/// Topology listing report.
#[derive(Debug, Clone, Serialize)]
pub struct TopologyReport {
    pub cost_model: CostModel,
    pub nodes: Vec<NodeRow>,
    pub edges: Vec<EdgeRow>,
}

impl TopologyReport {
    pub fn from_topology(topology: &Topology, cost_model: CostModel) -> Self {
        let nodes = topology
            .nodes()
            .iter()
            .map(|node| NodeRow {
                name: node.name.clone(),
                cpu_power_draw: node.power.cpu,
                radio_power_draw: node.power.radio,
                energy: node.energy,
                degree: topology.neighbours(node.id).len(),
            })
            .collect();
        let edges = topology
            .links()
            .iter()
            .map(|link| EdgeRow {
                a: topology.node_name(link.a).unwrap_or("<unknown>").to_string(),
                b: topology.node_name(link.b).unwrap_or("<unknown>").to_string(),
                cost: link.cost,
            })
            .collect();
        Self {
            cost_model,
            nodes,
            edges,
        }
    }
}

/// Cost evaluation report.
#[derive(Debug, Clone, Serialize)]
pub struct CostReport {
    pub cost_model: CostModel,
    pub energy_a: f64,
    pub energy_b: f64,
    pub average: f64,
    pub cost: f64,
}

/// Format a route report as text.
pub fn format_route_text(report: &RouteReport) -> String {
    let mut out = String::new();
    let result = &report.result;
    if !result.reachable {
        let _ = writeln!(
            out,
            "No route from {} to {} (cost model: {}).",
            report.source, report.target, report.cost_model
        );
        return out;
    }

    let _ = writeln!(
        out,
        "Route from {} to {} ({} hops; cost model: {}):",
        report.source,
        report.target,
        result.hop_count(),
        report.cost_model
    );
    for name in &result.path {
        let _ = writeln!(out, " - {}", name);
    }
    let _ = writeln!(out, "\nTotal cost: {}", format_number(result.total_cost));
    let _ = writeln!(out, "Relaxation passes: {}", result.passes);
    out
}

/// Format a topology report as text.
pub fn format_topology_text(report: &TopologyReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Topology: {} nodes, {} edges (cost model: {})",
        report.nodes.len(),
        report.edges.len(),
        report.cost_model
    );
    let _ = writeln!(out, "\nNodes:");
    for node in &report.nodes {
        let _ = writeln!(
            out,
            " - {} energy={} (cpu={}, radio={}, degree={})",
            node.name,
            format_number(node.energy),
            format_number(node.cpu_power_draw),
            format_number(node.radio_power_draw),
            node.degree
        );
    }
    let _ = writeln!(out, "\nEdges:");
    for edge in &report.edges {
        let _ = writeln!(
            out,
            " - {} <-> {} cost={}",
            edge.a,
            edge.b,
            format_number(edge.cost)
        );
    }
    out
}

/// Format a cost report as text.
pub fn format_cost_text(report: &CostReport) -> String {
    format!(
        "cost({}, {}) = {} (average energy {}; cost model: {})\n",
        format_number(report.energy_a),
        format_number(report.energy_b),
        format_number(report.cost),
        format_number(report.average),
        report.cost_model
    )
}

/// Render any report as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing fails.
pub fn render_json<T: Serialize>(report: &T) -> io::Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, report).map_err(io::Error::other)?;
    stdout.write_all(b"\n")?;
    Ok(())
}

/// Print integral values without a fractional part and others with two decimals.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}
