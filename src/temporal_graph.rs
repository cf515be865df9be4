//! Temporal constraint graph construction.
//!
//! The graph merges three constraint sources into one directed graph over
//! [`NodeKey`] vertices:
//!
//! 1. Intrinsic tree structure: every internal node points at its two
//!    children (a parent's event happens before its children's events are
//!    resolved in rank order; see [`crate::ordering`]).
//! 2. Node mappings: a non-leaf, non-loss mapping orders the parasite node
//!    before its host node, and the host's parent after the parasite.
//! 3. Transfers: horizontal constraints linking the transferred child's
//!    landing lineage to the source mapping.
//!
//! Leaves never appear as vertices; they only occur inside successor sets.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::parent_index::ParentIndex;
use crate::types::{EdgeTree, Event, NodeKey, Reconciliation, TOP_NODE};

/// Error building the temporal graph from malformed input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// A mapping references a node with no recorded parent, i.e. a node
    /// absent from its tree.
    #[error("no parent recorded for {0}; node is absent from its tree")]
    MissingParent(NodeKey),
    /// A constraint would originate at a node that is not an internal
    /// vertex of its tree (a leaf, or the super-root sentinel).
    #[error("constraint source {0} is not an internal node of its tree")]
    NotInternal(NodeKey),
}

/// Directed constraint graph over internal nodes of both trees.
///
/// An edge `A -> B` means A's event must be ranked strictly before B's.
/// Successor sets are `BTreeSet`s, so they are duplicate-free and iterate
/// deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalGraph {
    succ: BTreeMap<NodeKey, BTreeSet<NodeKey>>,
}

impl TemporalGraph {
    /// Build the temporal graph from both trees and the reconciliation.
    ///
    /// Per mapping, only the first event of its sequence is consulted.
    /// Loss mappings contribute nothing: a lost lineage never materializes
    /// in the realized reconciliation.
    pub fn build(
        host_tree: &EdgeTree,
        parasite_tree: &EdgeTree,
        reconciliation: &Reconciliation,
    ) -> Result<Self, BuildError> {
        let parents = ParentIndex::build(host_tree, parasite_tree);

        let mut graph = Self::default();
        graph.add_tree(host_tree);
        graph.add_tree(parasite_tree);

        for (pair, event) in reconciliation.iter() {
            if event.is_loss() {
                continue;
            }

            let host_key = NodeKey::host(pair.host.clone());
            let parasite_key = NodeKey::parasite(pair.parasite.clone());
            let host_parent = parents
                .parent_of(&host_key)
                .ok_or_else(|| BuildError::MissingParent(host_key.clone()))?
                .to_string();

            // A non-leaf mapping orders the parasite event before the host event.
            if !event.is_cospeciation() {
                graph.add_constraint(parasite_key.clone(), host_key.clone())?;
            }

            // The host-parent's event must follow this parasite event,
            // unless the host node is the tree root.
            if host_parent != TOP_NODE {
                graph.add_constraint(NodeKey::host(host_parent), parasite_key.clone())?;
            }

            if let Event::Transfer { transferred_child } = event {
                let landing_key = NodeKey::host(transferred_child.host.clone());
                let landing_parent = parents
                    .parent_of(&landing_key)
                    .ok_or_else(|| BuildError::MissingParent(landing_key.clone()))?
                    .to_string();

                // The transfer is horizontal: the landing lineage's parent
                // must still exist when the transfer happens.
                graph.add_constraint(NodeKey::host(landing_parent), parasite_key.clone())?;

                // Unless the transferred child is a leaf mapping, its
                // parasite node must precede the source host node.
                let child_event = reconciliation.first_event(transferred_child);
                let child_is_leaf_mapping =
                    matches!(child_event, Some(event) if event.is_cospeciation());
                if !child_is_leaf_mapping {
                    graph.add_constraint(
                        NodeKey::parasite(transferred_child.parasite.clone()),
                        host_key.clone(),
                    )?;
                }
            }
        }

        debug!(
            vertices = graph.vertex_count(),
            constraints = graph.constraint_count(),
            mappings = reconciliation.len(),
            "built temporal constraint graph"
        );
        Ok(graph)
    }

    /// Add one tree's intrinsic parent-to-children constraints.
    ///
    /// Leaf edges contribute no vertex.
    fn add_tree(&mut self, tree: &EdgeTree) {
        for (_, descriptor) in tree.edges() {
            if let Some((left, right)) = descriptor.children() {
                let successors = self
                    .succ
                    .entry(NodeKey::new(descriptor.child.clone(), tree.kind()))
                    .or_default();
                successors.insert(NodeKey::new(left.child.clone(), tree.kind()));
                successors.insert(NodeKey::new(right.child.clone(), tree.kind()));
            }
        }
    }

    /// Record `from -> to`. The source must already be an internal vertex.
    fn add_constraint(&mut self, from: NodeKey, to: NodeKey) -> Result<(), BuildError> {
        match self.succ.get_mut(&from) {
            Some(successors) => {
                successors.insert(to);
                Ok(())
            }
            None => Err(BuildError::NotInternal(from)),
        }
    }

    /// Iterate over vertices in key order.
    pub fn vertices(&self) -> impl Iterator<Item = &NodeKey> {
        self.succ.keys()
    }

    /// Successors of a vertex. Empty for non-vertices.
    pub fn successors(&self, key: &NodeKey) -> impl Iterator<Item = &NodeKey> {
        self.succ.get(key).into_iter().flatten()
    }

    /// Whether the key is a graph vertex (an internal tree node).
    pub fn contains_vertex(&self, key: &NodeKey) -> bool {
        self.succ.contains_key(key)
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.succ.len()
    }

    /// Total number of recorded constraints.
    pub fn constraint_count(&self) -> usize {
        self.succ.values().map(BTreeSet::len).sum()
    }

    /// Whether a specific constraint is recorded.
    pub fn has_constraint(&self, from: &NodeKey, to: &NodeKey) -> bool {
        self.succ.get(from).is_some_and(|succ| succ.contains(to))
    }

    #[cfg(test)]
    pub(crate) fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (NodeKey, NodeKey)>,
    {
        let mut graph = Self::default();
        for (from, to) in edges {
            graph.succ.entry(from).or_default().insert(to);
        }
        graph
    }
}
