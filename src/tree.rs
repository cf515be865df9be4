//! Materialized, navigable trees and temporal layout propagation.
//!
//! Nodes live in an arena (`Vec<TreeNode>`) and reference each other by
//! index, keeping ownership tree-shaped with no sharing. Structure is
//! immutable after materialization except for the write-once `column`
//! slot, which the layout pass fills after a successful ordering.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::ordering::TemporalOrder;
use crate::types::{EdgeDescriptor, EdgeTree, NodeKey, TreeKind};

/// Index of a node in a [`ReconTree`] arena.
pub type NodeIndex = usize;

/// Error materializing a tree from malformed edge-tuple input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MaterializeError {
    /// No edge has the super-root sentinel as its parent.
    #[error("{0} tree has no super-root edge")]
    MissingRoot(TreeKind),
    /// An edge descriptor has exactly one child; trees must be binary.
    #[error("node {0} has exactly one child descriptor; trees must be binary")]
    HalfBinary(String),
}

/// Error stamping temporal columns onto a materialized tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// An internal node has no rank in the ordering. This indicates an
    /// internal invariant violation, not bad user input: a successful
    /// ordering covers every internal vertex.
    #[error("no temporal rank recorded for internal node {0}")]
    MissingRank(NodeKey),
}

/// One node of a materialized tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Node name, as in the edge-tuple tree.
    pub name: String,
    /// Parent node index; `None` for the root.
    pub parent: Option<NodeIndex>,
    /// Left child index. Present iff `right` is present.
    pub left: Option<NodeIndex>,
    /// Right child index. Present iff `left` is present.
    pub right: Option<NodeIndex>,
    /// Temporal column, written exactly once by the layout pass.
    pub column: Option<usize>,
}

impl TreeNode {
    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none()
    }
}

/// A materialized host or parasite tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconTree {
    kind: TreeKind,
    nodes: Vec<TreeNode>,
    root: NodeIndex,
}

impl ReconTree {
    /// Build the navigable tree from an edge-tuple tree.
    ///
    /// Walks from the super-root edge downward with an explicit queue, so
    /// deep trees do not exhaust the call stack. Temporal information is
    /// not involved; every `column` slot starts empty.
    pub fn materialize(tree: &EdgeTree) -> Result<Self, MaterializeError> {
        let root_descriptor = tree
            .root()
            .ok_or(MaterializeError::MissingRoot(tree.kind()))?;

        let mut nodes: Vec<TreeNode> = Vec::with_capacity(tree.len());
        let mut pending: VecDeque<(&EdgeDescriptor, Option<NodeIndex>)> = VecDeque::new();
        pending.push_back((root_descriptor, None));

        while let Some((descriptor, parent)) = pending.pop_front() {
            let index = nodes.len();
            nodes.push(TreeNode {
                name: descriptor.child.clone(),
                parent,
                left: None,
                right: None,
                column: None,
            });

            if let Some(parent_index) = parent {
                let slot = &mut nodes[parent_index];
                if slot.left.is_none() {
                    slot.left = Some(index);
                } else {
                    slot.right = Some(index);
                }
            }

            match (&descriptor.left, &descriptor.right) {
                (Some(left), Some(right)) => {
                    pending.push_back((left, Some(index)));
                    pending.push_back((right, Some(index)));
                }
                (None, None) => {}
                _ => return Err(MaterializeError::HalfBinary(descriptor.child.clone())),
            }
        }

        Ok(Self {
            kind: tree.kind(),
            nodes,
            root: 0,
        })
    }

    /// Stamp every node with its temporal column.
    ///
    /// Leaves all share the ordering's leaf rank; internal nodes take the
    /// rank of their `(name, kind)` vertex. Called exactly once, after a
    /// successful ordering.
    pub fn apply_order(&mut self, order: &TemporalOrder) -> Result<(), LayoutError> {
        let leaf_rank = order.leaf_rank();
        let mut pending = vec![self.root];

        while let Some(index) = pending.pop() {
            let column = if self.nodes[index].is_leaf() {
                leaf_rank
            } else {
                let key = NodeKey::new(self.nodes[index].name.clone(), self.kind);
                order.rank(&key).ok_or(LayoutError::MissingRank(key))?
            };
            self.nodes[index].column = Some(column);

            if let (Some(left), Some(right)) = (self.nodes[index].left, self.nodes[index].right) {
                pending.push(left);
                pending.push(right);
            }
        }
        Ok(())
    }

    /// Which tree this is.
    pub fn kind(&self) -> TreeKind {
        self.kind
    }

    /// The root node.
    pub fn root(&self) -> &TreeNode {
        &self.nodes[self.root]
    }

    /// Index of the root node.
    pub fn root_index(&self) -> NodeIndex {
        self.root
    }

    /// Node at the given arena index.
    pub fn node(&self, index: NodeIndex) -> &TreeNode {
        &self.nodes[index]
    }

    /// Iterate over all nodes in arena order.
    pub fn nodes(&self) -> impl Iterator<Item = &TreeNode> {
        self.nodes.iter()
    }

    /// Find a node by name.
    pub fn find(&self, name: &str) -> Option<&TreeNode> {
        self.nodes.iter().find(|node| node.name == name)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
