use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::cost::{CostFunction, CostTable};
use crate::energy::{compute_residual_energy, PowerDraw, BASE_ENERGY};
use crate::error::{Error, Result};

/// Dense node identifier, assigned in insertion order.
pub type NodeId = usize;

/// Similarity floor for "did you mean" suggestions.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Number of suggestions attached to [`Error::UnknownNode`].
const MAX_SUGGESTIONS: usize = 3;

/// Network node with its residual energy fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub power: PowerDraw,
    pub energy: f64,
}

/// Adjacency entry within the topology.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Edge {
    pub target: NodeId,
    pub cost: f64,
}

/// Undirected link as it was first established.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Link {
    pub a: NodeId,
    pub b: NodeId,
    pub cost: f64,
}

/// Name and power draw of a node referenced by a connection request.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSpec {
    pub name: String,
    pub power: PowerDraw,
}

impl NodeSpec {
    pub fn new(name: impl Into<String>, cpu_power_draw: f64, radio_power_draw: f64) -> Self {
        Self {
            name: name.into(),
            power: PowerDraw::new(cpu_power_draw, radio_power_draw),
        }
    }
}

impl From<(&str, f64, f64)> for NodeSpec {
    fn from((name, cpu, radio): (&str, f64, f64)) -> Self {
        NodeSpec::new(name, cpu, radio)
    }
}

impl From<(String, f64, f64)> for NodeSpec {
    fn from((name, cpu, radio): (String, f64, f64)) -> Self {
        NodeSpec::new(name, cpu, radio)
    }
}

/// Outcome of [`Topology::add_connection`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Connection {
    /// A new undirected edge was stored.
    Added { cost: f64 },
    /// The pair was already connected; nothing changed.
    Existing { cost: f64 },
}

impl Connection {
    pub fn cost(&self) -> f64 {
        match self {
            Connection::Added { cost } | Connection::Existing { cost } => *cost,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Connection::Added { .. })
    }
}

/// Append-only undirected graph of energy-carrying nodes.
///
/// Nodes and each node's adjacency list keep insertion order, which makes
/// relaxation order (and therefore tie-breaking) reproducible.
#[derive(Clone)]
pub struct Topology {
    nodes: Vec<Node>,
    name_to_id: HashMap<String, NodeId>,
    adjacency: Vec<Vec<Edge>>,
    links: Vec<Link>,
    cost_function: Arc<dyn CostFunction>,
    base_energy: f64,
}

impl fmt::Debug for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Topology")
            .field("nodes", &self.nodes)
            .field("links", &self.links)
            .field("cost_function", &self.cost_function.label())
            .field("base_energy", &self.base_energy)
            .finish()
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            name_to_id: HashMap::new(),
            adjacency: Vec::new(),
            links: Vec::new(),
            cost_function: Arc::new(CostTable::default()),
            base_energy: BASE_ENERGY,
        }
    }
}

impl Topology {
    /// Empty topology using the reference cost table and a base energy of 100.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cost function used for connections added from now on.
    pub fn with_cost_function(mut self, cost_function: Arc<dyn CostFunction>) -> Self {
        self.cost_function = cost_function;
        self
    }

    /// Replace the starting energy applied to nodes created from now on.
    pub fn with_base_energy(mut self, base_energy: f64) -> Self {
        self.base_energy = base_energy;
        self
    }

    pub fn cost_function(&self) -> &dyn CostFunction {
        self.cost_function.as_ref()
    }

    pub fn base_energy(&self) -> f64 {
        self.base_energy
    }

    /// Add a node unless one with the same name already exists.
    ///
    /// Residual energy is computed here and never again; a repeated call for an
    /// existing name returns its id and ignores `power` without validating it.
    pub fn add_node(&mut self, name: &str, power: PowerDraw) -> Result<NodeId> {
        if let Some(&id) = self.name_to_id.get(name) {
            return Ok(id);
        }
        power.validate(name)?;
        Ok(self.insert_node(name, power))
    }

    fn insert_node(&mut self, name: &str, power: PowerDraw) -> NodeId {
        let id = self.nodes.len();
        let energy = compute_residual_energy(self.base_energy, power.cpu, power.radio);
        self.nodes.push(Node {
            id,
            name: name.to_string(),
            power,
            energy,
        });
        self.name_to_id.insert(name.to_string(), id);
        self.adjacency.push(Vec::new());
        tracing::debug!(node = name, energy, "added node");
        id
    }

    /// Connect two nodes, creating either of them on first reference.
    ///
    /// The edge cost is derived once from the endpoint energies and stored on
    /// both directions. Connecting an already-connected pair is a no-op that
    /// reports the stored cost. Power draws are only checked for nodes this
    /// call creates. Self loops, invalid draws and unusable costs are rejected
    /// before the topology is touched.
    pub fn add_connection(
        &mut self,
        a: impl Into<NodeSpec>,
        b: impl Into<NodeSpec>,
    ) -> Result<Connection> {
        let a = a.into();
        let b = b.into();

        if a.name == b.name {
            return Err(Error::SelfLoop { name: a.name });
        }

        let existing_a = self.node_id(&a.name);
        let existing_b = self.node_id(&b.name);
        if let (Some(id_a), Some(id_b)) = (existing_a, existing_b) {
            if let Some(cost) = self.edge_cost(id_a, id_b) {
                tracing::debug!(a = %a.name, b = %b.name, cost, "connection already present");
                return Ok(Connection::Existing { cost });
            }
        }
        if existing_a.is_none() {
            a.power.validate(&a.name)?;
        }
        if existing_b.is_none() {
            b.power.validate(&b.name)?;
        }

        let energy_a = self.energy_for(existing_a, &a.power);
        let energy_b = self.energy_for(existing_b, &b.power);
        let cost = self.cost_function.derive_cost(energy_a, energy_b);
        if !cost.is_finite() || cost < 0.0 {
            return Err(Error::InvalidCost {
                energy_a,
                energy_b,
                cost,
            });
        }

        let id_a = existing_a.unwrap_or_else(|| self.insert_node(&a.name, a.power));
        let id_b = existing_b.unwrap_or_else(|| self.insert_node(&b.name, b.power));

        self.adjacency[id_a].push(Edge { target: id_b, cost });
        self.adjacency[id_b].push(Edge { target: id_a, cost });
        self.links.push(Link {
            a: id_a,
            b: id_b,
            cost,
        });

        tracing::debug!(a = %a.name, b = %b.name, energy_a, energy_b, cost, "added connection");
        Ok(Connection::Added { cost })
    }

    fn energy_for(&self, existing: Option<NodeId>, power: &PowerDraw) -> f64 {
        match existing {
            Some(id) => self.nodes[id].energy,
            None => compute_residual_energy(self.base_energy, power.cpu, power.radio),
        }
    }

    /// Lookup a node identifier by name.
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.name_to_id.get(name).copied()
    }

    /// Lookup a node identifier by name, suggesting close matches on failure.
    pub fn resolve(&self, name: &str) -> Result<NodeId> {
        self.node_id(name).ok_or_else(|| Error::UnknownNode {
            name: name.to_string(),
            suggestions: self.suggest_names(name, MAX_SUGGESTIONS),
        })
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.node_id(name).and_then(|id| self.node(id))
    }

    /// Lookup a node name by identifier.
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id).map(|node| node.name.as_str())
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Undirected links in the order they were established.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Return the neighbours for a given node identifier.
    pub fn neighbours(&self, id: NodeId) -> &[Edge] {
        self.adjacency
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Stored cost of the edge between `a` and `b`, if connected.
    pub fn edge_cost(&self, a: NodeId, b: NodeId) -> Option<f64> {
        self.neighbours(a)
            .iter()
            .find(|edge| edge.target == b)
            .map(|edge| edge.cost)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node names similar to `name`, most similar first.
    pub fn suggest_names(&self, name: &str, limit: usize) -> Vec<String> {
        let mut scored: Vec<(f64, &str)> = self
            .nodes
            .iter()
            .map(|node| (strsim::jaro_winkler(name, &node.name), node.name.as_str()))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.1.cmp(b.1))
        });
        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.to_string())
            .collect()
    }
}
