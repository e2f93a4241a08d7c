//! Event accumulator threaded through one run
//!
//! Owns the counters and the growing [`EventSequence`]; the insertion
//! routine borrows it mutably instead of pushing into shared state.

use tracing::debug;

use crate::event::{AlgorithmEvent, EventKind, EventMeta, EventSequence, NodeState};
use crate::layout::{assign_positions, LayoutConfig};
use crate::tree::{AvlTree, NodeIndex};

#[derive(Debug)]
pub(crate) struct EventLog<'a> {
    events: EventSequence,
    meta: EventMeta,
    layout: &'a LayoutConfig,
}

impl<'a> EventLog<'a> {
    pub(crate) fn new(layout: &'a LayoutConfig, expected_inserts: usize) -> Self {
        Self {
            // insert + occasional rebalance/rotations, plus done
            events: EventSequence::with_capacity(expected_inserts * 2 + 1),
            meta: EventMeta::default(),
            layout,
        }
    }

    pub(crate) fn meta(&self) -> EventMeta {
        self.meta
    }

    pub(crate) fn record_insert(&mut self, tree: &AvlTree, leaf: NodeIndex) {
        self.meta.inserts += 1;
        let value = tree.node(leaf).value;
        self.emit(
            tree,
            EventKind::Insert,
            Some(leaf),
            format!("Inserted node with value {value}"),
        );
    }

    pub(crate) fn record_rotation(&mut self, tree: &AvlTree, new_root: NodeIndex, explanation: String) {
        self.meta.rotations += 1;
        self.emit(tree, EventKind::Rotate, Some(new_root), explanation);
    }

    pub(crate) fn record_rebalance(&mut self, tree: &AvlTree, node: NodeIndex, explanation: String) {
        self.emit(tree, EventKind::Rebalance, Some(node), explanation);
    }

    /// Append the terminal `done` event and hand the sequence out
    pub(crate) fn finish(mut self, tree: &AvlTree) -> EventSequence {
        self.emit(
            tree,
            EventKind::Done,
            None,
            "AVL Tree construction completed".to_string(),
        );
        self.events
    }

    fn emit(&mut self, tree: &AvlTree, kind: EventKind, focus: Option<NodeIndex>, explanation: String) {
        let mut node_states = snapshot(tree);
        assign_positions(&mut node_states, self.layout);

        debug!(
            step = self.events.len(),
            %kind,
            nodes = node_states.len(),
            rotations = self.meta.rotations,
            inserts = self.meta.inserts,
            "{explanation}"
        );

        self.events.push(AlgorithmEvent {
            kind,
            node_states,
            focus_node_id: focus.map(|idx| tree.node(idx).id),
            explanation,
            meta: self.meta,
        });
    }
}

/// Pre-order flattening of the live tree, children by id
pub(crate) fn snapshot(tree: &AvlTree) -> Vec<NodeState> {
    tree.preorder()
        .map(|node| NodeState {
            id: node.id,
            value: node.value,
            left_id: node.left.map(|i| tree.node(i).id),
            right_id: node.right.map(|i| tree.node(i).id),
            height: node.height,
            x: None,
            y: None,
        })
        .collect()
}
