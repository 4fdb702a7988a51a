//! Propagation cycle guard
//!
//! Labels travel forward along contribution, decomposition and means-end
//! links and every delivery re-triggers the receiver, so a cycle among
//! those links would never settle. The guard mirrors exactly those edges
//! and refuses any edge that closes a cycle. Dependency links are not
//! mirrored: a dependum copy does not continue propagation.

use crate::types::IntentionId;
use petgraph::graphmap::DiGraphMap;

/// Outcome of a rejected edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rejection {
    SelfLoop,
    Cycle,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PropagationGuard {
    graph: DiGraphMap<IntentionId, ()>,
}

impl PropagationGuard {
    pub(crate) fn add_node(&mut self, id: IntentionId) {
        self.graph.add_node(id);
    }

    /// Check an edge without recording it
    pub(crate) fn check(&self, from: IntentionId, to: IntentionId) -> Result<(), Rejection> {
        if from == to {
            return Err(Rejection::SelfLoop);
        }
        if self.graph.contains_edge(from, to) {
            return Ok(());
        }
        if petgraph::algo::has_path_connecting(&self.graph, to, from, None) {
            return Err(Rejection::Cycle);
        }
        Ok(())
    }

    /// Record an edge previously accepted by [`PropagationGuard::check`]
    pub(crate) fn insert(&mut self, from: IntentionId, to: IntentionId) {
        self.graph.add_edge(from, to, ());
        debug_assert!(!petgraph::algo::is_cyclic_directed(&self.graph));
    }

    #[cfg(test)]
    pub(crate) fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
