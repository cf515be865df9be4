//! Cycle-checked topological ordering of the temporal graph.
//!
//! Ranks are reverse-postorder numbers of a depth-first traversal: the
//! raw finish counter starts at 1, and final ranks are the inversion
//! `total + 1 - raw`, so every vertex is ranked strictly before all of
//! its successors. A cycle means the reconciliation admits no global
//! time ordering; that is a normal outcome, reported as `None`.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::temporal_graph::TemporalGraph;
use crate::types::NodeKey;

/// Dense temporal ranks over the internal vertices of the graph.
///
/// Ranks are a permutation of `1..=len`, strictly increasing along every
/// constraint edge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalOrder {
    ranks: BTreeMap<NodeKey, usize>,
}

impl TemporalOrder {
    /// Rank of an internal vertex, if it was ordered.
    pub fn rank(&self, key: &NodeKey) -> Option<usize> {
        self.ranks.get(key).copied()
    }

    /// The shared rank of all tree leaves: one past the largest internal
    /// rank, or 1 when no internal vertex exists. Ranks are dense, so the
    /// largest rank equals the vertex count.
    pub fn leaf_rank(&self) -> usize {
        self.ranks.len() + 1
    }

    /// Iterate over `(vertex, rank)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&NodeKey, usize)> {
        self.ranks.iter().map(|(key, rank)| (key, *rank))
    }

    /// Number of ranked vertices.
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Whether no vertex was ranked.
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

/// DFS node classification. Absence from the mark table means unvisited.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Finished,
}

/// One explicit-stack DFS frame: a vertex and its remaining successors.
struct Frame<'a> {
    key: &'a NodeKey,
    successors: Box<dyn Iterator<Item = &'a NodeKey> + 'a>,
}

/// Compute a topological ordering of the temporal graph.
///
/// Returns `None` if the graph contains a cycle, i.e. the reconciliation
/// is temporally inconsistent. Successors that are not themselves graph
/// vertices (tree leaves) are skipped and receive no rank.
///
/// The traversal uses an explicit stack, so arbitrarily deep trees do not
/// exhaust the call stack; the finish order matches the recursive
/// formulation exactly.
pub fn topological_order(graph: &TemporalGraph) -> Option<TemporalOrder> {
    let mut marks: HashMap<&NodeKey, Mark> = HashMap::with_capacity(graph.vertex_count());
    let mut raw: Vec<(&NodeKey, usize)> = Vec::with_capacity(graph.vertex_count());
    let mut next_finish = 1usize;

    for start in graph.vertices() {
        if marks.contains_key(start) {
            continue;
        }

        let mut stack = vec![Frame {
            key: start,
            successors: Box::new(graph.successors(start)),
        }];
        marks.insert(start, Mark::InProgress);

        while let Some(advanced) = stack.last_mut().map(|frame| frame.successors.next()) {
            match advanced {
                Some(successor) => {
                    if !graph.contains_vertex(successor) {
                        // Tree leaf: no constraints of its own, no rank.
                        continue;
                    }
                    match marks.get(successor) {
                        Some(Mark::Finished) => {}
                        Some(Mark::InProgress) => {
                            debug!(vertex = %successor, "cycle in temporal constraint graph");
                            return None;
                        }
                        None => {
                            marks.insert(successor, Mark::InProgress);
                            stack.push(Frame {
                                key: successor,
                                successors: Box::new(graph.successors(successor)),
                            });
                        }
                    }
                }
                None => {
                    if let Some(frame) = stack.pop() {
                        marks.insert(frame.key, Mark::Finished);
                        raw.push((frame.key, next_finish));
                        next_finish += 1;
                    }
                }
            }
        }
    }

    // Invert finish numbers: vertices that finish late (constraint
    // sources) get the smallest final ranks.
    let total = next_finish;
    let ranks = raw
        .into_iter()
        .map(|(key, finish)| (key.clone(), total - finish))
        .collect();

    let order = TemporalOrder { ranks };
    debug!(ranked = order.len(), "topological ordering complete");
    Some(order)
}
