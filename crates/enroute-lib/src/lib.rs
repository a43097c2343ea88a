//! Energy-aware routing library entry points.
//!
//! This crate models a wireless topology whose nodes lose energy to CPU and
//! radio power draw. Each connection gets a routing cost inferred from the
//! residual energy of its endpoints, and least-cost paths are found by bounded
//! relaxation. Higher-level consumers (the CLI) should only depend on the
//! items exported here instead of reimplementing behavior.
//!

pub mod cost;
pub mod energy;
pub mod error;
pub mod loader;
pub mod path;
pub mod shared;
pub mod topology;

pub use cost::{CostBand, CostFunction, CostModel, CostTable, EnergyMemberships, FuzzyCost};
pub use energy::{compute_residual_energy, PowerDraw, BASE_ENERGY};
pub use error::{Error, Result};
pub use loader::{topology_from_path, topology_from_reader};
pub use path::{
    find_best_path, find_best_path_with, shortest_distances, shortest_distances_with, PathResult,
    SearchLimits, ShortestPaths,
};
pub use shared::SharedTopology;
pub use topology::{Connection, Edge, Link, Node, NodeId, NodeSpec, Topology};
