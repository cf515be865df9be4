//! Reconciliation input types: node mappings and events.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A parasite-to-host node mapping.
///
/// Implements `Ord` so reconciliations iterate deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MappingPair {
    /// Parasite node name.
    pub parasite: String,
    /// Host node name.
    pub host: String,
}

impl MappingPair {
    /// Create a mapping pair.
    pub fn new(parasite: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            parasite: parasite.into(),
            host: host.into(),
        }
    }
}

impl fmt::Display for MappingPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.parasite, self.host)
    }
}

/// A reconciliation event attached to a node mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Host and parasite speciate together; also marks a leaf mapping.
    Cospeciation,
    /// Parasite speciates within one host lineage.
    Duplication,
    /// Parasite lineage jumps to another host lineage.
    Transfer {
        /// Mapping of the transferred (right) child lineage.
        transferred_child: MappingPair,
    },
    /// Parasite lineage is lost; contributes no timing constraint.
    Loss,
}

impl Event {
    /// Whether this is a cospeciation / leaf mapping.
    pub fn is_cospeciation(&self) -> bool {
        matches!(self, Self::Cospeciation)
    }

    /// Whether this is a loss.
    pub fn is_loss(&self) -> bool {
        matches!(self, Self::Loss)
    }

    /// Whether this is a transfer.
    pub fn is_transfer(&self) -> bool {
        matches!(self, Self::Transfer { .. })
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cospeciation => write!(f, "cospeciation"),
            Self::Duplication => write!(f, "duplication"),
            Self::Transfer { .. } => write!(f, "transfer"),
            Self::Loss => write!(f, "loss"),
        }
    }
}

/// A reconciliation: an event sequence per node mapping.
///
/// Only the first event of each sequence drives temporal constraints;
/// the full sequence is kept so callers can pass their event lists
/// through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    events: BTreeMap<MappingPair, Vec<Event>>,
}

impl Reconciliation {
    /// Create an empty reconciliation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the event sequence for a node mapping.
    pub fn insert(&mut self, pair: MappingPair, events: Vec<Event>) {
        self.events.insert(pair, events);
    }

    /// First event recorded for a mapping, if the mapping is present
    /// and its sequence is non-empty.
    pub fn first_event(&self, pair: &MappingPair) -> Option<&Event> {
        self.events.get(pair).and_then(|events| events.first())
    }

    /// Iterate over mappings and their first events, in mapping order.
    pub fn iter(&self) -> impl Iterator<Item = (&MappingPair, &Event)> {
        self.events
            .iter()
            .filter_map(|(pair, events)| events.first().map(|event| (pair, event)))
    }

    /// Number of node mappings.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the reconciliation has no mappings.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
