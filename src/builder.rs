//! Top-level construction of temporally ordered trees.

use tracing::debug;

use crate::ordering::topological_order;
use crate::temporal_graph::{BuildError, TemporalGraph};
use crate::tree::{LayoutError, MaterializeError, ReconTree};
use crate::types::{EdgeTree, Reconciliation};

/// Error for malformed input to [`build_trees_with_temporal_order`].
///
/// Temporal inconsistency is not an error; it is reported through
/// [`TemporalOutcome::Inconsistent`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReconError {
    /// Constraint graph construction failed.
    #[error(transparent)]
    Build(#[from] BuildError),
    /// Tree materialization failed.
    #[error(transparent)]
    Materialize(#[from] MaterializeError),
    /// Layout propagation failed (internal invariant violation).
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Result of checking a reconciliation for temporal consistency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemporalOutcome {
    /// A global time ordering exists; both trees carry temporal columns.
    Consistent {
        /// Host tree with populated columns.
        host: ReconTree,
        /// Parasite tree with populated columns.
        parasite: ReconTree,
    },
    /// The constraint graph has a cycle; no ordering exists and no trees
    /// are produced.
    Inconsistent,
}

impl TemporalOutcome {
    /// Whether the reconciliation is temporally consistent.
    pub fn is_consistent(&self) -> bool {
        matches!(self, Self::Consistent { .. })
    }

    /// The laid-out trees, if consistent.
    pub fn trees(&self) -> Option<(&ReconTree, &ReconTree)> {
        match self {
            Self::Consistent { host, parasite } => Some((host, parasite)),
            Self::Inconsistent => None,
        }
    }
}

/// Check a reconciliation for temporal consistency and, if consistent,
/// produce both trees labeled with temporal columns for layout.
///
/// Builds the temporal constraint graph, topologically orders it, then
/// materializes both trees and stamps every node: internal nodes take
/// their ordering rank, leaves share the rank one past the largest
/// internal rank.
///
/// Returns `Err` only for malformed input (caller contract violations);
/// an unsatisfiable reconciliation is the normal
/// [`TemporalOutcome::Inconsistent`] outcome.
pub fn build_trees_with_temporal_order(
    host_tree: &EdgeTree,
    parasite_tree: &EdgeTree,
    reconciliation: &Reconciliation,
) -> Result<TemporalOutcome, ReconError> {
    let graph = TemporalGraph::build(host_tree, parasite_tree, reconciliation)?;

    let Some(order) = topological_order(&graph) else {
        debug!("reconciliation is temporally inconsistent");
        return Ok(TemporalOutcome::Inconsistent);
    };

    let mut host = ReconTree::materialize(host_tree)?;
    let mut parasite = ReconTree::materialize(parasite_tree)?;
    host.apply_order(&order)?;
    parasite.apply_order(&order)?;

    Ok(TemporalOutcome::Consistent { host, parasite })
}
