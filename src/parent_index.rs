//! Child-to-parent index over both input trees.

use std::collections::BTreeMap;

use crate::types::{EdgeTree, NodeKey};

/// Maps every node of either tree to the name of its parent.
///
/// Keys carry their tree of origin, so a host node and a parasite node
/// with the same name never alias. Duplicate child names within one tree
/// are overwritten silently; callers must guarantee per-tree uniqueness.
#[derive(Debug, Clone, Default)]
pub struct ParentIndex {
    parents: BTreeMap<NodeKey, String>,
}

impl ParentIndex {
    /// Build the index from both input trees.
    pub fn build(host_tree: &EdgeTree, parasite_tree: &EdgeTree) -> Self {
        let mut index = Self::default();
        index.add_tree(host_tree);
        index.add_tree(parasite_tree);
        index
    }

    fn add_tree(&mut self, tree: &EdgeTree) {
        for (_, descriptor) in tree.edges() {
            self.parents.insert(
                NodeKey::new(descriptor.child.clone(), tree.kind()),
                descriptor.parent.clone(),
            );
        }
    }

    /// Name of the parent of the given node, if recorded.
    ///
    /// The super-root's parent is the [`TOP_NODE`] sentinel.
    ///
    /// [`TOP_NODE`]: crate::types::TOP_NODE
    pub fn parent_of(&self, key: &NodeKey) -> Option<&str> {
        self.parents.get(key).map(String::as_str)
    }

    /// Number of recorded child-to-parent entries.
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}
