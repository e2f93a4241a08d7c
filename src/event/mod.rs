//! Recorded algorithm events
//!
//! Every externally observable state change produces one [`AlgorithmEvent`]
//! carrying a full snapshot (not a diff) plus cumulative counters. The
//! ordered [`EventSequence`] of one run is the complete output and is
//! never mutated once handed out.

mod snapshot;

pub use snapshot::{find_root, NodeState, Snapshot, SnapshotError};

use std::collections::HashMap;
use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::tree::NodeId;

/// Kind of state change an event records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// New leaf attached
    Insert,
    /// Single rotation applied
    Rotate,
    /// Imbalance detected, rotations follow
    Rebalance,
    /// Run finished (always last, exactly once)
    Done,
}

impl EventKind {
    /// Lowercase wire name
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Insert => "insert",
            EventKind::Rotate => "rotate",
            EventKind::Rebalance => "rebalance",
            EventKind::Done => "done",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Cumulative counters as of an event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMeta {
    /// Rotations performed so far in the run
    pub rotations: u64,
    /// Distinct values inserted so far in the run
    pub inserts: u64,
}

/// One step of a recorded run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmEvent {
    /// What happened
    #[serde(rename = "type")]
    pub kind: EventKind,

    /// Full pre-order snapshot after the change
    pub node_states: Vec<NodeState>,

    /// Node most relevant to this step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_node_id: Option<NodeId>,

    /// Human-readable description
    pub explanation: String,

    /// Counters as of this step
    pub meta: EventMeta,
}

impl AlgorithmEvent {
    /// Indexed view over this event's snapshot
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::new(&self.node_states)
    }

    /// State of the focus node, if any
    pub fn focus(&self) -> Option<&NodeState> {
        let id = self.focus_node_id?;
        self.node_states.iter().find(|s| s.id == id)
    }
}

/// Ordered, append-only events of one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventSequence {
    events: Vec<AlgorithmEvent>,
}

impl EventSequence {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, event: AlgorithmEvent) {
        self.events.push(event);
    }

    /// Number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True only for a sequence that was never produced by a run
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Event at `step`
    pub fn get(&self, step: usize) -> Option<&AlgorithmEvent> {
        self.events.get(step)
    }

    /// Final event (`done` for a completed run)
    pub fn last(&self) -> Option<&AlgorithmEvent> {
        self.events.last()
    }

    /// Counters of the final event
    pub fn final_meta(&self) -> EventMeta {
        self.last().map(|e| e.meta).unwrap_or_default()
    }

    /// Iterate in recorded order
    pub fn iter(&self) -> std::slice::Iter<'_, AlgorithmEvent> {
        self.events.iter()
    }

    /// Borrow as a slice
    pub fn as_slice(&self) -> &[AlgorithmEvent] {
        &self.events
    }

    /// Count events of one kind
    pub fn count(&self, kind: EventKind) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }

    /// Id-independent digest of the whole run
    ///
    /// Covers kinds, explanations, counters, and every node's value,
    /// height, children (by value) and coordinates, plus the focus node's
    /// value. Two runs over the same input and layout hash equal even
    /// though their node ids differ.
    pub fn fingerprint(&self) -> blake3::Hash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(self.events.len() as u64).to_le_bytes());
        for event in &self.events {
            let values: HashMap<NodeId, i64> = event
                .node_states
                .iter()
                .map(|s| (s.id, s.value))
                .collect();
            let value_of = |id: Option<NodeId>| id.and_then(|id| values.get(&id).copied());

            hasher.update(event.kind.as_str().as_bytes());
            hasher.update(&event.meta.rotations.to_le_bytes());
            hasher.update(&event.meta.inserts.to_le_bytes());
            hash_optional(&mut hasher, value_of(event.focus_node_id));
            hasher.update(&(event.explanation.len() as u64).to_le_bytes());
            hasher.update(event.explanation.as_bytes());
            hasher.update(&(event.node_states.len() as u64).to_le_bytes());
            for state in &event.node_states {
                hasher.update(&state.value.to_le_bytes());
                hasher.update(&state.height.to_le_bytes());
                hash_optional(&mut hasher, value_of(state.left_id));
                hash_optional(&mut hasher, value_of(state.right_id));
                for coord in [state.x, state.y] {
                    hasher.update(&coord.unwrap_or(f64::NAN).to_bits().to_le_bytes());
                }
            }
        }
        hasher.finalize()
    }

    /// Take ownership of the events
    pub fn into_vec(self) -> Vec<AlgorithmEvent> {
        self.events
    }
}

fn hash_optional(hasher: &mut blake3::Hasher, value: Option<i64>) {
    match value {
        Some(v) => {
            hasher.update(&[1u8]);
            hasher.update(&v.to_le_bytes());
        }
        None => {
            hasher.update(&[0u8]);
        }
    }
}

impl Index<usize> for EventSequence {
    type Output = AlgorithmEvent;

    fn index(&self, step: usize) -> &Self::Output {
        &self.events[step]
    }
}

impl<'a> IntoIterator for &'a EventSequence {
    type Item = &'a AlgorithmEvent;
    type IntoIter = std::slice::Iter<'a, AlgorithmEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl IntoIterator for EventSequence {
    type Item = AlgorithmEvent;
    type IntoIter = std::vec::IntoIter<AlgorithmEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}
