//! Flattened tree snapshots
//!
//! A snapshot is the pre-order list of [`NodeState`]s for every live node
//! at one instant. Children are referenced by id, so the list is acyclic
//! by construction and can be handed to a renderer as-is.

use std::collections::{HashMap, HashSet};

use bitvec::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tree::NodeId;

/// Immutable per-node record inside a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeState {
    /// Node identity
    pub id: NodeId,

    /// Key
    pub value: i64,

    /// Left child, by id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_id: Option<NodeId>,

    /// Right child, by id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_id: Option<NodeId>,

    /// Recorded subtree height
    pub height: u32,

    /// Layout x (set once the snapshot is positioned)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,

    /// Layout y
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

/// Structural problems found while checking a snapshot
#[derive(Debug, Error, PartialEq)]
pub enum SnapshotError {
    /// Same id listed twice
    #[error("node {0} appears more than once")]
    DuplicateId(NodeId),

    /// Child id with no matching node
    #[error("node {parent} references missing child {child}")]
    DanglingChild {
        /// Referencing node
        parent: NodeId,
        /// Missing id
        child: NodeId,
    },

    /// Node listed as a child of two parents (or twice by one)
    #[error("node {0} has more than one parent")]
    SharedChild(NodeId),

    /// Not exactly one unreferenced node
    #[error("expected exactly one root, found {0}")]
    RootCount(usize),

    /// Nodes not reachable from the root (cycle off the main tree)
    #[error("{unreachable} node(s) unreachable from the root")]
    Unreachable {
        /// How many
        unreachable: usize,
    },

    /// Recorded height disagrees with the children
    #[error("node {id} records height {recorded}, children imply {expected}")]
    HeightMismatch {
        /// Node
        id: NodeId,
        /// Height in the snapshot
        recorded: u32,
        /// `1 + max(child heights)`
        expected: u32,
    },

    /// In-order walk not strictly increasing
    #[error("in-order sequence broken: {previous} followed by {next}")]
    OrderViolation {
        /// Earlier value
        previous: i64,
        /// Value that should have been larger
        next: i64,
    },
}

/// Locate the unique node that no other node references as a child
///
/// Returns `None` for an empty snapshot or when zero or several nodes
/// qualify.
pub fn find_root(states: &[NodeState]) -> Option<NodeId> {
    let index = position_index(states);
    let referenced = referenced_mask(states, &index);
    let mut roots = referenced.iter_zeros();
    let root = roots.next()?;
    if roots.next().is_some() {
        return None;
    }
    Some(states[root].id)
}

fn position_index(states: &[NodeState]) -> HashMap<NodeId, usize> {
    states
        .iter()
        .enumerate()
        .map(|(i, state)| (state.id, i))
        .collect()
}

/// One bit per snapshot position, set when some node points at it
fn referenced_mask(states: &[NodeState], index: &HashMap<NodeId, usize>) -> BitVec {
    let mut referenced = bitvec![0; states.len()];
    for child in states.iter().flat_map(|s| s.left_id.into_iter().chain(s.right_id)) {
        if let Some(&pos) = index.get(&child) {
            referenced.set(pos, true);
        }
    }
    referenced
}

/// Read-only view over one snapshot with id lookup
#[derive(Debug)]
pub struct Snapshot<'a> {
    states: &'a [NodeState],
    index: HashMap<NodeId, usize>,
}

impl<'a> Snapshot<'a> {
    /// Index a snapshot for lookups
    pub fn new(states: &'a [NodeState]) -> Self {
        Self {
            states,
            index: position_index(states),
        }
    }

    /// Node count
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// True for the empty tree
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Look a node up by id
    pub fn get(&self, id: NodeId) -> Option<&'a NodeState> {
        self.index.get(&id).map(|&i| &self.states[i])
    }

    /// Structural root (see [`find_root`])
    pub fn root(&self) -> Option<&'a NodeState> {
        find_root(self.states).and_then(|id| self.get(id))
    }

    fn height_of(&self, id: Option<NodeId>) -> u32 {
        id.and_then(|id| self.get(id)).map_or(0, |s| s.height)
    }

    /// `height(left) - height(right)` from recorded heights
    pub fn balance(&self, state: &NodeState) -> i32 {
        self.height_of(state.left_id) as i32 - self.height_of(state.right_id) as i32
    }

    /// Largest `|balance|` over all nodes (0 when empty)
    pub fn max_imbalance(&self) -> u32 {
        self.states
            .iter()
            .map(|s| self.balance(s).unsigned_abs())
            .max()
            .unwrap_or(0)
    }

    /// Values reached by an in-order walk from the root
    ///
    /// Dangling child ids are skipped; visits are capped at `len()` so a
    /// cyclic snapshot cannot loop forever.
    pub fn in_order_values(&self) -> Vec<i64> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack: Vec<&NodeState> = Vec::new();
        let mut cursor = self.root();
        while out.len() < self.len() {
            while let Some(state) = cursor {
                stack.push(state);
                cursor = state.left_id.and_then(|id| self.get(id));
            }
            let Some(state) = stack.pop() else {
                break;
            };
            out.push(state.value);
            cursor = state.right_id.and_then(|id| self.get(id));
        }
        out
    }

    /// Check ids, parent links, root uniqueness, heights and key order
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.states.is_empty() {
            return Ok(());
        }
        if self.index.len() != self.states.len() {
            let mut seen = HashSet::new();
            for state in self.states {
                if !seen.insert(state.id) {
                    return Err(SnapshotError::DuplicateId(state.id));
                }
            }
        }

        let mut referenced = bitvec![0; self.states.len()];
        for state in self.states {
            for child in state.left_id.into_iter().chain(state.right_id) {
                let pos = *self.index.get(&child).ok_or(SnapshotError::DanglingChild {
                    parent: state.id,
                    child,
                })?;
                if referenced.replace(pos, true) {
                    return Err(SnapshotError::SharedChild(child));
                }
            }

            let expected = 1 + self.height_of(state.left_id).max(self.height_of(state.right_id));
            if state.height != expected {
                return Err(SnapshotError::HeightMismatch {
                    id: state.id,
                    recorded: state.height,
                    expected,
                });
            }
        }

        let roots = referenced.count_zeros();
        if roots != 1 {
            return Err(SnapshotError::RootCount(roots));
        }

        let values = self.in_order_values();
        if values.len() != self.states.len() {
            return Err(SnapshotError::Unreachable {
                unreachable: self.states.len() - values.len(),
            });
        }
        for pair in values.windows(2) {
            if pair[0] >= pair[1] {
                return Err(SnapshotError::OrderViolation {
                    previous: pair[0],
                    next: pair[1],
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(slot: u32) -> NodeId {
        NodeId { run: 9, slot }
    }

    fn state(slot: u32, value: i64, left: Option<u32>, right: Option<u32>, height: u32) -> NodeState {
        NodeState {
            id: id(slot),
            value,
            left_id: left.map(id),
            right_id: right.map(id),
            height,
            x: None,
            y: None,
        }
    }

    fn balanced() -> Vec<NodeState> {
        vec![
            state(1, 20, Some(2), Some(0), 2),
            state(2, 10, None, None, 1),
            state(0, 30, None, None, 1),
        ]
    }

    #[test]
    fn test_root_is_unreferenced_node() {
        let states = balanced();
        assert_eq!(find_root(&states), Some(id(1)));
        assert_eq!(Snapshot::new(&states).root().map(|s| s.value), Some(20));
    }

    #[test]
    fn test_no_root_for_empty_or_forest() {
        assert_eq!(find_root(&[]), None);
        let forest = vec![state(0, 1, None, None, 1), state(1, 2, None, None, 1)];
        assert_eq!(find_root(&forest), None);
    }

    #[test]
    fn test_valid_snapshot() {
        let states = balanced();
        let snapshot = Snapshot::new(&states);
        assert_eq!(snapshot.validate(), Ok(()));
        assert_eq!(snapshot.in_order_values(), vec![10, 20, 30]);
        assert_eq!(snapshot.max_imbalance(), 0);
    }

    #[test]
    fn test_detects_dangling_child() {
        let states = vec![state(0, 5, Some(7), None, 2)];
        assert_eq!(
            Snapshot::new(&states).validate(),
            Err(SnapshotError::DanglingChild {
                parent: id(0),
                child: id(7)
            })
        );
    }

    #[test]
    fn test_detects_stale_height() {
        let mut states = balanced();
        states[0].height = 3;
        assert!(matches!(
            Snapshot::new(&states).validate(),
            Err(SnapshotError::HeightMismatch { recorded: 3, expected: 2, .. })
        ));
    }

    #[test]
    fn test_detects_order_violation() {
        let mut states = balanced();
        states[1].value = 25;
        assert_eq!(
            Snapshot::new(&states).validate(),
            Err(SnapshotError::OrderViolation {
                previous: 25,
                next: 20
            })
        );
    }

    #[test]
    fn test_detects_shared_child() {
        let states = vec![
            state(0, 20, Some(1), Some(2), 3),
            state(1, 10, None, Some(3), 2),
            state(2, 30, Some(3), None, 2),
            state(3, 15, None, None, 1),
        ];
        assert_eq!(
            Snapshot::new(&states).validate(),
            Err(SnapshotError::SharedChild(id(3)))
        );
    }

    #[test]
    fn test_imbalance_visible_on_chain() {
        let states = vec![
            state(0, 30, Some(1), None, 3),
            state(1, 20, Some(2), None, 2),
            state(2, 10, None, None, 1),
        ];
        let snapshot = Snapshot::new(&states);
        assert_eq!(snapshot.validate(), Ok(()));
        assert_eq!(snapshot.max_imbalance(), 2);
    }

    #[test]
    fn test_serializes_camel_case_and_omits_missing_children() {
        let json = serde_json::to_value(state(0, 5, Some(1), None, 2)).unwrap();
        assert_eq!(json["leftId"], "node-9-1");
        assert!(json.get("rightId").is_none());
        assert!(json.get("x").is_none());
    }
}
