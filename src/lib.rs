//! # recon-temporal
//!
//! Temporal consistency checking for host-parasite tree reconciliations.
//!
//! A reconciliation maps the nodes of a parasite tree onto a host tree,
//! annotated with events (cospeciation, duplication, transfer, loss).
//! This crate answers one question:
//!
//! > Can all the timing constraints implied by the two trees and the
//! > reconciliation's events be satisfied by a single global ordering?
//!
//! ## Pipeline
//!
//! ```text
//! EdgeTree x2 + Reconciliation
//!         │
//!         ├─► TemporalGraph (constraint graph over internal nodes)
//!         │        │
//!         │        ▼
//!         │   topological_order ──► None: TemporalOutcome::Inconsistent
//!         │        │
//!         ▼        ▼
//!   ReconTree::materialize ──► apply_order ──► TemporalOutcome::Consistent
//! ```
//!
//! On success every tree node carries an integer temporal column for
//! layout: internal nodes a dense rank from the ordering, leaves a shared
//! rank one past the largest internal rank.
//!
//! ## Guarantees
//!
//! - Deterministic: inputs are held in `BTreeMap`s, so identical inputs
//!   produce identical ranks.
//! - A cycle in the constraint graph is a normal outcome
//!   ([`TemporalOutcome::Inconsistent`]), never a panic; errors are
//!   reserved for malformed input.
//! - Traversals use explicit stacks, so tree depth is bounded by memory,
//!   not by the call stack.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod ordering;
pub mod parent_index;
pub mod temporal_graph;
pub mod tree;
pub mod types;

// Re-exports
pub use builder::{build_trees_with_temporal_order, ReconError, TemporalOutcome};
pub use ordering::{topological_order, TemporalOrder};
pub use parent_index::ParentIndex;
pub use temporal_graph::{BuildError, TemporalGraph};
pub use tree::{LayoutError, MaterializeError, NodeIndex, ReconTree, TreeNode};
pub use types::{
    EdgeDescriptor, EdgeTree, Event, MappingPair, NodeKey, Reconciliation, TreeKind, TOP_NODE,
};
