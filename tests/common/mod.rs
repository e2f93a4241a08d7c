#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use avl_replay::{AlgorithmEvent, EventSequence};

fn snapshot_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("snapshots")
}

pub fn assert_snapshot(name: &str, actual: &str) {
    let path = snapshot_root().join(name);
    if std::env::var("AVL_REPLAY_UPDATE_SNAPSHOTS").is_ok() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create snapshot directory");
        }
        fs::write(&path, actual).expect("write snapshot");
        return;
    }

    let expected =
        fs::read_to_string(&path).unwrap_or_else(|_| panic!("snapshot {:?} not found", path));
    if normalize(&expected) != normalize(actual) {
        panic!(
            "Snapshot mismatch for {:?}. Set AVL_REPLAY_UPDATE_SNAPSHOTS=1 to regenerate.\nExpected:\n{}\nActual:\n{}",
            path,
            expected,
            actual
        );
    }
}

fn normalize(input: &str) -> String {
    input.replace("\r\n", "\n")
}

/// Pre-order `value:height` list, ids left out so runs compare equal
pub fn shape(event: &AlgorithmEvent) -> String {
    event
        .node_states
        .iter()
        .map(|s| format!("{}:{}", s.value, s.height))
        .collect::<Vec<_>>()
        .join(",")
}

/// One line per event: kind, explanation, counters, shape
pub fn describe(events: &EventSequence) -> String {
    let mut out = String::new();
    for event in events {
        out.push_str(&format!(
            "{}\t{}\trotations={} inserts={}\t[{}]\n",
            event.kind,
            event.explanation,
            event.meta.rotations,
            event.meta.inserts,
            shape(event)
        ));
    }
    out
}

/// Root value and in-order values of the final tree
pub fn final_tree(events: &EventSequence) -> (Option<i64>, Vec<i64>) {
    let done = events.last().expect("run always ends with done");
    let snapshot = done.snapshot();
    (snapshot.root().map(|s| s.value), snapshot.in_order_values())
}
