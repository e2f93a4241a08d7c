//! End-to-end insertion scenarios

mod common;

use avl_replay::{generate_insertion_sequence, AvlRecorder, EventKind};
use common::{assert_snapshot, describe, final_tree};
use test_case::test_case;

fn kinds(values: &[i64]) -> Vec<EventKind> {
    generate_insertion_sequence(values)
        .iter()
        .map(|e| e.kind)
        .collect()
}

#[test]
fn test_empty_input_yields_single_done() {
    let events = generate_insertion_sequence(&[]);
    assert_eq!(events.len(), 1);
    let done = &events[0];
    assert_eq!(done.kind, EventKind::Done);
    assert!(done.node_states.is_empty());
    assert_eq!(done.meta.rotations, 0);
    assert_eq!(done.meta.inserts, 0);
    assert_eq!(done.explanation, "AVL Tree construction completed");
}

#[test]
fn test_duplicates_are_silent() {
    let events = generate_insertion_sequence(&[10, 10, 10]);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].kind, EventKind::Insert);
    assert_eq!(events[1].kind, EventKind::Done);
    assert_eq!(events[1].node_states.len(), 1);
    assert_eq!(events.final_meta().inserts, 1);
}

#[test]
fn test_duplicate_mid_sequence_adds_no_event() {
    assert_eq!(kinds(&[5, 3, 5, 3, 8]).len(), kinds(&[5, 3, 8]).len());
}

#[test_case(&[30, 20, 10], "LL", &["Right rotation on node 30"] ; "left left")]
#[test_case(&[10, 20, 30], "RR", &["Left rotation on node 10"] ; "right right")]
#[test_case(&[30, 10, 20], "LR", &["Left rotation on node 10", "Right rotation on node 30"] ; "left right")]
#[test_case(&[10, 30, 20], "RL", &["Right rotation on node 30", "Left rotation on node 10"] ; "right left")]
fn test_single_imbalance_cases(values: &[i64], label: &str, rotations: &[&str]) {
    let events = generate_insertion_sequence(values);

    let rebalance = events
        .iter()
        .find(|e| e.kind == EventKind::Rebalance)
        .expect("one rebalance expected");
    assert!(rebalance.explanation.starts_with(label));
    assert_eq!(rebalance.snapshot().max_imbalance(), 2);

    let rotate_explanations: Vec<&str> = events
        .iter()
        .filter(|e| e.kind == EventKind::Rotate)
        .map(|e| e.explanation.as_str())
        .collect();
    assert_eq!(rotate_explanations, rotations);

    let (root, in_order) = final_tree(&events);
    assert_eq!(root, Some(20));
    assert_eq!(in_order, vec![10, 20, 30]);
    assert_eq!(events.final_meta().rotations, rotations.len() as u64);
}

#[test]
fn test_left_left_scenario() {
    let events = generate_insertion_sequence(&[30, 20, 10]);
    assert_eq!(events[3].kind, EventKind::Rebalance);
    assert_eq!(events[4].kind, EventKind::Rotate);

    let done = events.last().unwrap();
    let snapshot = done.snapshot();
    let root = snapshot.root().unwrap();
    assert_eq!(root.value, 20);
    assert_eq!(root.left_id.and_then(|id| snapshot.get(id)).map(|s| s.value), Some(10));
    assert_eq!(root.right_id.and_then(|id| snapshot.get(id)).map(|s| s.value), Some(30));
    assert_eq!(done.meta.rotations, 1);
}

#[test]
fn test_known_sequence_matches_golden_trace() {
    let events = generate_insertion_sequence(&[10, 20, 30, 40, 50, 25]);
    assert_eq!(events.final_meta().inserts, 6);
    assert_eq!(final_tree(&events).1, vec![10, 20, 25, 30, 40, 50]);
    assert_snapshot("known_sequence.txt", &describe(&events));
}

#[test]
fn test_rotation_focus_is_new_subtree_root() {
    let events = generate_insertion_sequence(&[10, 30, 20]);
    let focus: Vec<i64> = events
        .iter()
        .filter(|e| e.kind == EventKind::Rotate)
        .filter_map(|e| e.focus().map(|s| s.value))
        .collect();
    assert_eq!(focus, vec![20, 20]);
}

#[test]
fn test_rebalance_focus_is_unbalanced_node() {
    let events = generate_insertion_sequence(&[1, 2, 3]);
    let rebalance = events.iter().find(|e| e.kind == EventKind::Rebalance).unwrap();
    assert_eq!(rebalance.focus().map(|s| s.value), Some(1));
    assert_eq!(rebalance.snapshot().balance(rebalance.focus().unwrap()), -2);
}

#[test]
fn test_layout_of_final_tree() {
    let events = generate_insertion_sequence(&[2, 1, 3]);
    let done = events.last().unwrap();
    let position = |value: i64| {
        let state = done.node_states.iter().find(|s| s.value == value).unwrap();
        (state.x.unwrap(), state.y.unwrap())
    };
    assert_eq!(position(2), (400.0, 50.0));
    assert_eq!(position(1), (320.0, 150.0));
    assert_eq!(position(3), (480.0, 150.0));
}

#[test]
fn test_negative_and_extreme_keys() {
    let events = generate_insertion_sequence(&[0, i64::MIN, i64::MAX, -1]);
    assert_eq!(final_tree(&events).1, vec![i64::MIN, -1, 0, i64::MAX]);
}

#[test]
fn test_recorder_reuse_matches_fresh_recorder() {
    let mut recorder = AvlRecorder::new();
    recorder.generate_insertion_sequence(&[9, 8, 7, 6]);
    let reused = recorder.generate_insertion_sequence(&[1, 2, 3]);
    let fresh = generate_insertion_sequence(&[1, 2, 3]);
    assert_eq!(describe(&reused), describe(&fresh));
}
