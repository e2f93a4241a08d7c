//! Balanced tree event recorder
//!
//! Runs AVL insertion over a list of keys and records one event per
//! observable change: leaf inserted, imbalance detected, rotation applied,
//! and a final `done`.
//!
//! Snapshots are always taken from the live root. A rotation relinks the
//! slot that held the old subtree root before its event is emitted, and
//! ancestor heights along the descent path are refreshed bottom-up, so no
//! snapshot ever carries a stale height.
//!
//! Run lifecycle: `Idle → Inserting → Done`. Every call starts a fresh run.

mod imbalance;
mod event_log;

pub use imbalance::{Imbalance, Rotation};

use std::cmp::Ordering;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use tracing::{debug, info, info_span, trace, warn};

use crate::event::EventSequence;
use crate::layout::{LayoutConfig, LayoutError};
use crate::tree::{AvlTree, Direction, Link};

use event_log::EventLog;

/// Process-wide run counter; keeps node ids distinct across runs
static RUN_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_run() -> u64 {
    RUN_SEQUENCE.fetch_add(1, AtomicOrdering::Relaxed)
}

/// Where a recorder is in its run lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Never run
    Idle,
    /// Processing input values
    Inserting,
    /// Last run completed
    Done,
}

/// AVL insertion simulator that records replayable events
///
/// One in-flight run per instance; use separate instances for
/// concurrent callers.
#[derive(Debug)]
pub struct AvlRecorder {
    tree: AvlTree,
    layout: LayoutConfig,
    state: RunState,
}

impl Default for AvlRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl AvlRecorder {
    /// Recorder with the default canvas layout
    pub fn new() -> Self {
        Self {
            tree: AvlTree::new(),
            layout: LayoutConfig::default(),
            state: RunState::Idle,
        }
    }

    /// Recorder with a custom layout (validated)
    pub fn with_layout(layout: LayoutConfig) -> Result<Self, LayoutError> {
        layout.validate()?;
        Ok(Self {
            layout,
            ..Self::new()
        })
    }

    /// Layout used for snapshot coordinates
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Lifecycle state
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Tree left behind by the last run
    pub fn tree(&self) -> &AvlTree {
        &self.tree
    }

    /// Insert `values` in order into a fresh tree and return every event
    ///
    /// Duplicates are ignored and produce no event. The sequence always
    /// ends with exactly one `done` event, even for empty input.
    pub fn generate_insertion_sequence(&mut self, values: &[i64]) -> EventSequence {
        let run = next_run();
        let _span = info_span!("avl_run", run, values = values.len()).entered();

        self.tree.begin_run(run);
        self.state = RunState::Inserting;

        let mut log = EventLog::new(&self.layout, values.len());
        for &value in values {
            insert_value(&mut self.tree, &mut log, value);
        }
        let meta = log.meta();
        let events = log.finish(&self.tree);
        self.state = RunState::Done;

        info!(
            events = events.len(),
            nodes = self.tree.len(),
            rotations = meta.rotations,
            inserts = meta.inserts,
            "insertion sequence recorded"
        );
        events
    }
}

/// Record a full run with a throwaway recorder
pub fn generate_insertion_sequence(values: &[i64]) -> EventSequence {
    AvlRecorder::new().generate_insertion_sequence(values)
}

/// Insert one key, rebalancing on the way back up
///
/// `path[i]` is the slot holding the i-th ancestor of the new leaf,
/// `path[0]` being the root slot.
fn insert_value(tree: &mut AvlTree, log: &mut EventLog<'_>, value: i64) {
    let mut path: Vec<Link> = Vec::new();
    let mut link = Link::Root;
    while let Some(idx) = tree.child(link) {
        let direction = match value.cmp(&tree.node(idx).value) {
            Ordering::Less => Direction::Left,
            Ordering::Greater => Direction::Right,
            Ordering::Equal => {
                debug!(value, "duplicate key ignored");
                return;
            }
        };
        path.push(link);
        link = Link::Child {
            parent: idx,
            direction,
        };
    }

    let leaf = tree.alloc_leaf(value);
    tree.set_child(link, Some(leaf));
    refresh_heights(tree, &path);
    log.record_insert(tree, leaf);

    for depth in (0..path.len()).rev() {
        let slot = path[depth];
        let Some(node) = tree.child(slot) else {
            continue;
        };
        tree.update_height(node);

        let current = tree.node(node);
        let left_value = current.left.map(|i| tree.node(i).value);
        let right_value = current.right.map(|i| tree.node(i).value);
        let Some(case) = Imbalance::classify(tree.balance(node), value, left_value, right_value)
        else {
            continue;
        };

        let node_value = current.value;
        log.record_rebalance(
            tree,
            node,
            format!("{case} imbalance detected at node {node_value}"),
        );

        if let Some(rotation) = case.child_rotation() {
            let child_slot = match rotation {
                Rotation::Left => Link::left(node),
                Rotation::Right => Link::right(node),
            };
            rotate(tree, log, child_slot, rotation, &path[..=depth]);
        }
        rotate(tree, log, slot, case.node_rotation(), &path[..depth]);
    }
}

/// Rotate the subtree hanging from `slot`, relink it, and record the event
///
/// `ancestors` are the slots above `slot` whose heights must be refreshed.
fn rotate(
    tree: &mut AvlTree,
    log: &mut EventLog<'_>,
    slot: Link,
    rotation: Rotation,
    ancestors: &[Link],
) {
    let Some(pivot) = tree.child(slot) else {
        return;
    };
    let pivot_value = tree.node(pivot).value;
    let rotated = match rotation {
        Rotation::Right => tree.rotate_right(pivot),
        Rotation::Left => tree.rotate_left(pivot),
    };
    let Some(new_root) = rotated else {
        warn!(pivot = pivot_value, %rotation, "rotation skipped: missing child");
        return;
    };

    tree.set_child(slot, Some(new_root));
    refresh_heights(tree, ancestors);
    trace!(
        pivot = pivot_value,
        new_root = tree.node(new_root).value,
        %rotation,
        "rotated"
    );
    log.record_rotation(
        tree,
        new_root,
        format!("{rotation} rotation on node {pivot_value}"),
    );
}

/// Recompute heights of the subtrees hanging from `slots`, deepest first
fn refresh_heights(tree: &mut AvlTree, slots: &[Link]) {
    for &slot in slots.iter().rev() {
        if let Some(idx) = tree.child(slot) {
            tree.update_height(idx);
        }
    }
}
