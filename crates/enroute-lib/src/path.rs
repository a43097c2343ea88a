use std::time::Instant;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::topology::{NodeId, Topology};

/// Optional bounds applied to a relaxation run.
#[derive(Debug, Default, Clone, Copy)]
pub struct SearchLimits {
    /// Abort with [`Error::DeadlineExceeded`] once this instant has passed.
    pub deadline: Option<Instant>,
    /// Cap on relaxation passes; the node count is used when absent or larger.
    pub max_passes: Option<usize>,
}

/// Distances and predecessors from a single source.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPaths {
    pub source: NodeId,
    /// Least known cost per node; `None` while unreached.
    pub distance: Vec<Option<f64>>,
    /// Preceding node on the best known path.
    pub predecessor: Vec<Option<NodeId>>,
    /// Relaxation passes executed, including the final pass without updates.
    pub passes: usize,
    /// Whether a pass without updates was observed.
    pub converged: bool,
}

impl ShortestPaths {
    pub fn distance_to(&self, node: NodeId) -> Option<f64> {
        self.distance.get(node).copied().flatten()
    }

    pub fn is_reachable(&self, node: NodeId) -> bool {
        self.distance_to(node).is_some()
    }

    /// Node sequence from the source to `target`, or `None` when unreached.
    pub fn path_to(&self, target: NodeId) -> Option<Vec<NodeId>> {
        if !self.is_reachable(target) {
            return None;
        }

        let mut path = Vec::new();
        let mut current = Some(target);
        while let Some(node) = current {
            path.push(node);
            if node == self.source || path.len() > self.distance.len() {
                break;
            }
            current = self.predecessor.get(node).copied().flatten();
        }
        path.reverse();
        Some(path)
    }
}

/// Result of a least-cost path query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    /// Node names from source to target; empty when unreachable.
    pub path: Vec<String>,
    pub total_cost: f64,
    pub reachable: bool,
    /// Relaxation passes the query needed.
    pub passes: usize,
}

impl PathResult {
    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Compute least costs from `source` to every node of the topology.
pub fn shortest_distances(topology: &Topology, source: &str) -> Result<ShortestPaths> {
    shortest_distances_with(topology, source, &SearchLimits::default())
}

/// Compute least costs from `source` with optional limits.
///
/// Runs at most one pass per node. Every pass visits nodes in insertion order
/// and relaxes their adjacency lists in insertion order; a pass without any
/// update ends the run early.
pub fn shortest_distances_with(
    topology: &Topology,
    source: &str,
    limits: &SearchLimits,
) -> Result<ShortestPaths> {
    let source_id = topology.resolve(source)?;
    let node_count = topology.node_count();
    let max_passes = limits
        .max_passes
        .map_or(node_count, |cap| cap.min(node_count));

    let mut distance: Vec<Option<f64>> = vec![None; node_count];
    let mut predecessor: Vec<Option<NodeId>> = vec![None; node_count];
    distance[source_id] = Some(0.0);

    let mut passes = 0;
    let mut converged = false;

    while passes < max_passes {
        if let Some(deadline) = limits.deadline {
            if Instant::now() >= deadline {
                return Err(Error::DeadlineExceeded { passes });
            }
        }

        passes += 1;
        let mut updated = false;
        for u in 0..node_count {
            let Some(base) = distance[u] else {
                continue;
            };
            for edge in topology.neighbours(u) {
                let candidate = base + edge.cost;
                let improves = match distance[edge.target] {
                    Some(current) => candidate < current,
                    None => true,
                };
                if improves {
                    distance[edge.target] = Some(candidate);
                    predecessor[edge.target] = Some(u);
                    updated = true;
                }
            }
        }

        if !updated {
            converged = true;
            break;
        }
    }

    if converged {
        tracing::debug!(source, passes, "relaxation reached a fixed point");
    } else if node_count > 0 {
        tracing::warn!(source, passes, "relaxation stopped before reaching a fixed point");
    }

    Ok(ShortestPaths {
        source: source_id,
        distance,
        predecessor,
        passes,
        converged,
    })
}

/// Find the least-cost path between two named nodes.
///
/// An unreachable target is a normal result with `reachable == false` and an
/// empty path; unknown names are errors.
pub fn find_best_path(topology: &Topology, source: &str, target: &str) -> Result<PathResult> {
    find_best_path_with(topology, source, target, &SearchLimits::default())
}

/// Find the least-cost path with optional limits on the relaxation run.
///
/// A pass cap that stops relaxation before a pass without updates yields
/// [`Error::PassLimitReached`]; partial distances are never reported as a
/// route or as unreachable.
pub fn find_best_path_with(
    topology: &Topology,
    source: &str,
    target: &str,
    limits: &SearchLimits,
) -> Result<PathResult> {
    topology.resolve(source)?;
    let target_id = topology.resolve(target)?;

    let tree = shortest_distances_with(topology, source, limits)?;
    if !tree.converged {
        return Err(Error::PassLimitReached {
            passes: tree.passes,
        });
    }

    let Some(steps) = tree.path_to(target_id) else {
        tracing::debug!(source, target, "target unreachable");
        return Ok(PathResult {
            path: Vec::new(),
            total_cost: 0.0,
            reachable: false,
            passes: tree.passes,
        });
    };

    let path = steps
        .iter()
        .filter_map(|&id| topology.node_name(id))
        .map(str::to_string)
        .collect();

    Ok(PathResult {
        path,
        total_cost: tree.distance_to(target_id).unwrap_or_default(),
        reachable: true,
        passes: tree.passes,
    })
}
