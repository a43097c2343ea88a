//! The seven-node reference mesh used by `demo` and by `inspect` without a file.

use enroute_lib::{NodeSpec, Result, Topology};

/// Per-node CPU and radio power draw.
const DRAWS: [(&str, f64, f64); 7] = [
    ("A", 10.0, 10.0),
    ("B", 30.0, 30.0),
    ("C", 10.0, 10.0),
    ("D", 30.0, 30.0),
    ("E", 40.0, 40.0),
    ("F", 20.0, 20.0),
    ("G", 1.0, 1.0),
];

/// Connections in insertion order.
const LINKS: [(&str, &str); 11] = [
    ("A", "B"),
    ("A", "C"),
    ("A", "D"),
    ("B", "E"),
    ("C", "D"),
    ("C", "E"),
    ("C", "F"),
    ("D", "F"),
    ("E", "F"),
    ("E", "G"),
    ("F", "G"),
];

fn spec_for(name: &str) -> NodeSpec {
    let (_, cpu, radio) = DRAWS
        .iter()
        .copied()
        .find(|(candidate, _, _)| *candidate == name)
        .unwrap_or((name, 0.0, 0.0));
    NodeSpec::new(name, cpu, radio)
}

/// Add the reference connections to `topology`.
pub fn reference_mesh(mut topology: Topology) -> Result<Topology> {
    for (a, b) in LINKS {
        topology.add_connection(spec_for(a), spec_for(b))?;
    }
    Ok(topology)
}

#[cfg(test)]
mod tests {
    use super::*;
    use enroute_lib::find_best_path;

    #[test]
    fn reference_mesh_shape() {
        let topology = reference_mesh(Topology::new()).unwrap();
        assert_eq!(topology.node_count(), 7);
        assert_eq!(topology.edge_count(), 11);
        assert_eq!(topology.node_by_name("G").unwrap().energy, 98.0);
    }

    #[test]
    fn reference_route_a_to_g() {
        let topology = reference_mesh(Topology::new()).unwrap();
        let result = find_best_path(&topology, "A", "G").unwrap();
        assert_eq!(result.path, vec!["A", "C", "F", "G"]);
        assert_eq!(result.total_cost, 80.0);
    }
}
