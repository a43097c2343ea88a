//! Topology loading from CSV connection lists.
//!
//! Each row names two endpoints with their CPU and radio power draw:
//!
//! ```text
//! node_a,cpu_a,radio_a,node_b,cpu_b,radio_b
//! A,10,10,B,30,30
//! H,5,5,,,
//! ```
//!
//! A row whose `node_b` is empty declares an isolated node. Rows are applied
//! in file order, so node and adjacency order follow the file. Lines starting
//! with `#` are ignored.

use std::fs;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;

use crate::energy::PowerDraw;
use crate::error::{Error, Result};
use crate::topology::{NodeSpec, Topology};

#[derive(Debug, Deserialize)]
struct ConnectionRow {
    node_a: String,
    cpu_a: f64,
    radio_a: f64,
    #[serde(default)]
    node_b: Option<String>,
    #[serde(default)]
    cpu_b: Option<f64>,
    #[serde(default)]
    radio_b: Option<f64>,
}

/// Load connections from a CSV file into `topology`.
pub fn topology_from_path(path: &Path, topology: Topology) -> Result<Topology> {
    let file = fs::File::open(path)?;
    let topology = topology_from_reader(file, topology)?;
    tracing::debug!(
        path = %path.display(),
        nodes = topology.node_count(),
        edges = topology.edge_count(),
        "loaded topology"
    );
    Ok(topology)
}

/// Load connections from any reader into `topology`.
pub fn topology_from_reader<R: Read>(reader: R, mut topology: Topology) -> Result<Topology> {
    let mut csv_reader = ReaderBuilder::new()
        .trim(Trim::All)
        .comment(Some(b'#'))
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for required in ["node_a", "cpu_a", "radio_a", "node_b", "cpu_b", "radio_b"] {
        if !headers.iter().any(|h| h == required) {
            return Err(Error::TopologyFormat {
                line: 1,
                message: format!(
                    "missing required column {required}. Available: {}",
                    headers.iter().collect::<Vec<_>>().join(", ")
                ),
            });
        }
    }

    let mut record = StringRecord::new();
    while csv_reader.read_record(&mut record)? {
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let row: ConnectionRow =
            record
                .deserialize(Some(&headers))
                .map_err(|err| Error::TopologyFormat {
                    line,
                    message: err.to_string(),
                })?;
        apply_row(&mut topology, row, line)?;
    }

    Ok(topology)
}

/// Apply one row. Shape problems become [`Error::TopologyFormat`]; errors
/// raised by the topology are kept as the source of [`Error::InvalidRow`].
fn apply_row(topology: &mut Topology, row: ConnectionRow, line: u64) -> Result<()> {
    if row.node_a.is_empty() {
        return Err(Error::TopologyFormat {
            line,
            message: "node_a must not be empty".to_string(),
        });
    }

    let Some(node_b) = row.node_b.filter(|name| !name.is_empty()) else {
        topology
            .add_node(&row.node_a, PowerDraw::new(row.cpu_a, row.radio_a))
            .map_err(|err| row_error(line, err))?;
        return Ok(());
    };

    let (Some(cpu_b), Some(radio_b)) = (row.cpu_b, row.radio_b) else {
        return Err(Error::TopologyFormat {
            line,
            message: format!("node {node_b} is missing cpu_b or radio_b"),
        });
    };

    topology
        .add_connection(
            NodeSpec::new(row.node_a, row.cpu_a, row.radio_a),
            NodeSpec::new(node_b, cpu_b, radio_b),
        )
        .map_err(|err| row_error(line, err))?;
    Ok(())
}

fn row_error(line: u64, source: Error) -> Error {
    Error::InvalidRow {
        line,
        source: Box::new(source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_become_connections_and_isolated_nodes() {
        let data = "node_a,cpu_a,radio_a,node_b,cpu_b,radio_b\n\
                    A,10,10,B,10,10\n\
                    C,5,5,,,\n";
        let topology = topology_from_reader(data.as_bytes(), Topology::new()).unwrap();

        assert_eq!(topology.node_count(), 3);
        assert_eq!(topology.edge_count(), 1);
        assert!(topology.neighbours(topology.node_id("C").unwrap()).is_empty());
    }

    #[test]
    fn missing_column_is_reported() {
        let data = "node_a,cpu_a,radio_a\nA,1,1\n";
        let err = topology_from_reader(data.as_bytes(), Topology::new()).expect_err("columns");
        assert!(err.to_string().contains("missing required column node_b"));
    }

    #[test]
    fn bad_number_reports_line() {
        let data = "node_a,cpu_a,radio_a,node_b,cpu_b,radio_b\n\
                    A,1,1,B,1,1\n\
                    A,lots,1,C,1,1\n";
        let err = topology_from_reader(data.as_bytes(), Topology::new()).expect_err("parse");
        assert!(matches!(err, Error::TopologyFormat { line: 3, .. }), "{err}");
    }

    #[test]
    fn self_loop_row_is_rejected_with_line() {
        let data = "node_a,cpu_a,radio_a,node_b,cpu_b,radio_b\nA,1,1,A,1,1\n";
        let err = topology_from_reader(data.as_bytes(), Topology::new()).expect_err("loop");
        let message = err.to_string();
        assert!(message.contains("line 2"), "{message}");
        assert!(message.contains("itself"), "{message}");
        match err {
            Error::InvalidRow { line, source } => {
                assert_eq!(line, 2);
                assert!(matches!(*source, Error::SelfLoop { ref name } if name == "A"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn negative_draw_row_keeps_typed_error() {
        let data = "node_a,cpu_a,radio_a,node_b,cpu_b,radio_b\n\
                    A,1,1,B,1,1\n\
                    C,-3,1,,,\n";
        let err = topology_from_reader(data.as_bytes(), Topology::new()).expect_err("draw");
        match err {
            Error::InvalidRow { line, source } => {
                assert_eq!(line, 3);
                assert!(
                    matches!(*source, Error::InvalidPowerDraw { ref node, .. } if node == "C"),
                    "{source}"
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn partial_second_endpoint_is_rejected() {
        let data = "node_a,cpu_a,radio_a,node_b,cpu_b,radio_b\nA,1,1,B,,1\n";
        let err = topology_from_reader(data.as_bytes(), Topology::new()).expect_err("partial");
        assert!(err.to_string().contains("missing cpu_b or radio_b"));
        assert!(matches!(err, Error::TopologyFormat { line: 2, .. }), "{err}");
    }
}
