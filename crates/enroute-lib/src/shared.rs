//! Single-writer, many-reader access to a topology.
//!
//! Mutations take the write lock; queries hold a read lock for their whole
//! run so they never observe a half-applied connection.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::energy::PowerDraw;
use crate::error::{Error, Result};
use crate::path::{find_best_path_with, PathResult, SearchLimits};
use crate::topology::{Connection, NodeId, NodeSpec, Topology};

/// Cloneable handle to a topology shared between threads.
#[derive(Debug, Clone, Default)]
pub struct SharedTopology {
    inner: Arc<RwLock<Topology>>,
}

impl From<Topology> for SharedTopology {
    fn from(topology: Topology) -> Self {
        Self {
            inner: Arc::new(RwLock::new(topology)),
        }
    }
}

impl SharedTopology {
    pub fn new(topology: Topology) -> Self {
        topology.into()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Topology>> {
        self.inner.read().map_err(|_| Error::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Topology>> {
        self.inner.write().map_err(|_| Error::LockPoisoned)
    }

    pub fn add_node(&self, name: &str, power: PowerDraw) -> Result<NodeId> {
        self.write()?.add_node(name, power)
    }

    pub fn add_connection(
        &self,
        a: impl Into<NodeSpec>,
        b: impl Into<NodeSpec>,
    ) -> Result<Connection> {
        self.write()?.add_connection(a, b)
    }

    pub fn find_best_path(&self, source: &str, target: &str) -> Result<PathResult> {
        self.find_best_path_with(source, target, &SearchLimits::default())
    }

    pub fn find_best_path_with(
        &self,
        source: &str,
        target: &str,
        limits: &SearchLimits,
    ) -> Result<PathResult> {
        let guard = self.read()?;
        find_best_path_with(&guard, source, target, limits)
    }

    /// Independent copy of the current topology.
    pub fn snapshot(&self) -> Result<Topology> {
        Ok(self.read()?.clone())
    }
}
