//! Core data model: edge-tuple trees, node keys, and reconciliation events.

pub mod event;
pub mod tree;

pub use event::{Event, MappingPair, Reconciliation};
pub use tree::{EdgeDescriptor, EdgeTree, NodeKey, TreeKind, TOP_NODE};
