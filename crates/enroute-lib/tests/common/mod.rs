//! Shared fixtures for integration tests.

use std::path::PathBuf;

use enroute_lib::{topology_from_path, Topology};

/// Path to fixtures directory used by tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Seven-node reference mesh plus the isolated node `H`.
#[allow(dead_code)]
pub fn reference_topology() -> Topology {
    let path = fixtures_dir().join("reference_topology.csv");
    topology_from_path(&path, Topology::new()).expect("load reference_topology.csv")
}

/// Sum the stored edge costs along `path`, panicking on a missing edge.
#[allow(dead_code)]
pub fn summed_cost(topology: &Topology, path: &[String]) -> f64 {
    path.windows(2)
        .map(|pair| {
            let a = topology.node_id(&pair[0]).expect("known node");
            let b = topology.node_id(&pair[1]).expect("known node");
            topology
                .edge_cost(a, b)
                .unwrap_or_else(|| panic!("{} and {} are not adjacent", pair[0], pair[1]))
        })
        .sum()
}
