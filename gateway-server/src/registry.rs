#[cfg(test)]
#[path = "../tests/unit/registry_test.rs"]
mod registry_test;

use gateway_core::solver::SolverEntry;
use gateway_core::{GatewayError, GatewayResult};
use serde::Serialize;
use std::sync::Arc;

/// An external routing algorithm registered under a stable identifier.
pub struct AlgorithmEntry {
    /// Unique, stable identifier used by clients to select the algorithm.
    pub id: String,
    /// Human readable display name.
    pub name: String,
    /// Human readable description.
    pub description: String,
    /// The callable entry point.
    pub entry: Arc<dyn SolverEntry>,
}

/// The metadata subset of an entry exposed by the enumeration endpoint:
/// callables never cross the transport boundary.
#[derive(Clone, Debug, Serialize)]
pub struct AlgorithmMeta {
    /// Unique, stable identifier.
    pub id: String,
    /// Human readable display name.
    pub name: String,
    /// Human readable description.
    pub description: String,
}

/// The set of available algorithm entries. It is populated once at process
/// start from an enumeration source and never mutated afterwards, so it is
/// shared across requests without synchronization.
pub struct Registry {
    entries: Vec<AlgorithmEntry>,
    metas: Vec<AlgorithmMeta>,
}

impl Registry {
    /// Creates a registry from the entries an enumeration source returned.
    pub fn new(entries: Vec<AlgorithmEntry>) -> Self {
        let metas = entries
            .iter()
            .map(|entry| AlgorithmMeta {
                id: entry.id.clone(),
                name: entry.name.clone(),
                description: entry.description.clone(),
            })
            .collect();

        Self { entries, metas }
    }

    /// Returns entry metadata in registration order.
    pub fn list(&self) -> &[AlgorithmMeta] {
        &self.metas
    }

    /// Resolves an identifier to its entry using an exact, case sensitive
    /// match.
    pub fn resolve(&self, id: &str) -> GatewayResult<&AlgorithmEntry> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .ok_or_else(|| GatewayError::NotFound(format!("algorithm '{id}' is not found")))
    }
}
