//! Structural properties that must hold for every recorded run

use std::collections::BTreeSet;

use avl_replay::{generate_insertion_sequence, EventKind, EventSequence};
use proptest::prelude::*;

/// Events whose snapshot must already satisfy the AVL balance bound:
/// `done`, an insert that triggers no rebalance, and the last rotation
/// of a rebalance.
fn must_be_balanced(events: &EventSequence, step: usize) -> bool {
    let next = events.get(step + 1).map(|e| e.kind);
    match events[step].kind {
        EventKind::Done => true,
        EventKind::Insert => next != Some(EventKind::Rebalance),
        EventKind::Rotate => next != Some(EventKind::Rotate),
        EventKind::Rebalance => false,
    }
}

proptest! {
    #[test]
    fn snapshots_are_well_formed(values in proptest::collection::vec(-50i64..50, 0..40)) {
        let events = generate_insertion_sequence(&values);
        for (step, event) in events.iter().enumerate() {
            let snapshot = event.snapshot();
            prop_assert_eq!(snapshot.validate(), Ok(()), "step {} malformed", step);
            if !event.node_states.is_empty() {
                prop_assert!(snapshot.root().is_some(), "step {} has no unique root", step);
            }
            for state in &event.node_states {
                prop_assert!(state.x.is_some() && state.y.is_some(), "step {} missing layout", step);
            }
        }
    }

    #[test]
    fn balance_restored_after_each_step(values in proptest::collection::vec(-100i64..100, 0..60)) {
        let events = generate_insertion_sequence(&values);
        for step in 0..events.len() {
            let imbalance = events[step].snapshot().max_imbalance();
            if must_be_balanced(&events, step) {
                prop_assert!(imbalance <= 1, "step {} left imbalance {}", step, imbalance);
            }
            if events[step].kind == EventKind::Rebalance {
                prop_assert_eq!(imbalance, 2);
            }
        }
    }

    #[test]
    fn counters_are_cumulative(values in proptest::collection::vec(-30i64..30, 0..50)) {
        let events = generate_insertion_sequence(&values);
        let mut rotations = 0;
        let mut inserts = 0;
        for event in &events {
            prop_assert!(event.meta.rotations >= rotations);
            prop_assert!(event.meta.inserts >= inserts);
            rotations = event.meta.rotations;
            inserts = event.meta.inserts;
        }

        let distinct: BTreeSet<i64> = values.iter().copied().collect();
        prop_assert_eq!(events.final_meta().inserts, distinct.len() as u64);
        prop_assert_eq!(events.final_meta().rotations, events.count(EventKind::Rotate) as u64);
        prop_assert_eq!(events.count(EventKind::Insert), distinct.len());
    }

    #[test]
    fn final_tree_is_sorted_input(values in proptest::collection::vec(any::<i64>(), 0..40)) {
        let events = generate_insertion_sequence(&values);
        prop_assert_eq!(events.count(EventKind::Done), 1);
        let done = events.last().unwrap();
        prop_assert_eq!(done.kind, EventKind::Done);

        let expected: Vec<i64> = values.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        prop_assert_eq!(done.snapshot().in_order_values(), expected);
    }

    #[test]
    fn each_rebalance_is_followed_by_rotations(values in proptest::collection::vec(0i64..200, 0..60)) {
        let events = generate_insertion_sequence(&values);
        for (step, event) in events.iter().enumerate() {
            if event.kind != EventKind::Rebalance {
                continue;
            }
            let label = &event.explanation[..2];
            let expected = if label == "LL" || label == "RR" { 1 } else { 2 };
            let following = events
                .iter()
                .skip(step + 1)
                .take_while(|e| e.kind == EventKind::Rotate)
                .count();
            prop_assert_eq!(following, expected, "step {} ({})", step, label);
        }
    }
}
