//! Tree input types: edge-tuple trees and graph vertex keys.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Parent name of the synthetic super-root edge.
///
/// Exactly one edge per tree has this as its `parent`; it is a sentinel,
/// not a real node, and never appears in the temporal graph.
pub const TOP_NODE: &str = "Top";

/// Which of the two input trees a node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TreeKind {
    /// Host tree.
    Host,
    /// Parasite tree.
    Parasite,
}

impl fmt::Display for TreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host => write!(f, "host"),
            Self::Parasite => write!(f, "parasite"),
        }
    }
}

/// Vertex key in the temporal constraint graph.
///
/// Node names are only unique within one tree, so every key carries its
/// tree of origin. Implements `Ord` for deterministic iteration.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeKey {
    /// Node name within its tree.
    pub name: String,
    /// Tree the node belongs to.
    pub kind: TreeKind,
}

impl NodeKey {
    /// Create a key for a node of the given tree.
    pub fn new(name: impl Into<String>, kind: TreeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Create a key for a host-tree node.
    pub fn host(name: impl Into<String>) -> Self {
        Self::new(name, TreeKind::Host)
    }

    /// Create a key for a parasite-tree node.
    pub fn parasite(name: impl Into<String>) -> Self {
        Self::new(name, TreeKind::Parasite)
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

/// One edge of an edge-tuple tree.
///
/// An edge runs from `parent` (its top node) down to `child` (its bottom
/// node). Child edges are nested descriptors; `left` and `right` are both
/// present (internal edge) or both absent (leaf edge).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeDescriptor {
    /// Name of the node the edge descends from.
    pub parent: String,
    /// Name of the node the edge terminates at.
    pub child: String,
    /// Left child edge, if `child` is internal.
    pub left: Option<Box<EdgeDescriptor>>,
    /// Right child edge, if `child` is internal.
    pub right: Option<Box<EdgeDescriptor>>,
}

impl EdgeDescriptor {
    /// Create a leaf edge (no child edges).
    pub fn leaf(parent: impl Into<String>, child: impl Into<String>) -> Self {
        Self {
            parent: parent.into(),
            child: child.into(),
            left: None,
            right: None,
        }
    }

    /// Create an internal edge with both child edges.
    pub fn internal(
        parent: impl Into<String>,
        child: impl Into<String>,
        left: EdgeDescriptor,
        right: EdgeDescriptor,
    ) -> Self {
        Self {
            parent: parent.into(),
            child: child.into(),
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    /// Whether this edge terminates at a leaf.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Both child edges, or `None` for a leaf edge.
    pub fn children(&self) -> Option<(&EdgeDescriptor, &EdgeDescriptor)> {
        match (&self.left, &self.right) {
            (Some(left), Some(right)) => Some((left, right)),
            _ => None,
        }
    }
}

/// An input tree: a mapping from edge name to edge descriptor.
///
/// Uses `BTreeMap` so iteration order, and everything derived from it
/// (graph construction, DFS order, final ranks), is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeTree {
    kind: TreeKind,
    edges: BTreeMap<String, EdgeDescriptor>,
}

impl EdgeTree {
    /// Create an empty tree of the given kind.
    pub fn new(kind: TreeKind) -> Self {
        Self {
            kind,
            edges: BTreeMap::new(),
        }
    }

    /// Which tree this is.
    pub fn kind(&self) -> TreeKind {
        self.kind
    }

    /// Add an edge under the given edge name.
    pub fn insert(&mut self, edge_name: impl Into<String>, descriptor: EdgeDescriptor) {
        self.edges.insert(edge_name.into(), descriptor);
    }

    /// Look up an edge by name.
    pub fn get(&self, edge_name: &str) -> Option<&EdgeDescriptor> {
        self.edges.get(edge_name)
    }

    /// Iterate over all edges in name order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &EdgeDescriptor)> {
        self.edges.iter().map(|(name, desc)| (name.as_str(), desc))
    }

    /// The super-root edge: the unique edge whose parent is [`TOP_NODE`].
    pub fn root(&self) -> Option<&EdgeDescriptor> {
        self.edges.values().find(|desc| desc.parent == TOP_NODE)
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the tree has no edges.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
