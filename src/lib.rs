//! # Step-by-step AVL insertion recorder
//!
//! Simulates AVL tree insertion and records, after every structural
//! change, a complete serializable snapshot of the tree (shape, heights,
//! 2-D layout) plus running rotation/insert counters. A separate client
//! replays the snapshots one step at a time.
//!
//! ## Core Algorithm
//!
//! 1. **Arena tree**: nodes addressed by index, children are optional indices
//! 2. **Descent path**: the slots walked on the way down drive rebalancing
//! 3. **Events**: `insert`, `rebalance` (LL/RR/LR/RL), `rotate`, then one `done`
//! 4. **Layout**: child offset shrinks as `base × decay^depth`
//!
//! ## Usage Example
//!
//! ```
//! use avl_replay::{generate_insertion_sequence, EventKind};
//!
//! let events = generate_insertion_sequence(&[30, 20, 10]);
//! assert_eq!(events.last().map(|e| e.kind), Some(EventKind::Done));
//! assert_eq!(events.final_meta().rotations, 1);
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

// Core modules
pub mod tree;       // Arena-backed AVL storage
pub mod recorder;   // Insertion + event recording
pub mod event;      // Events and snapshots
pub mod layout;     // Snapshot coordinates
pub mod catalog;    // Algorithm registry
pub mod playback;   // Step cursor for replay
pub mod util;       // Input parsing

// Re-exports for convenience
pub use catalog::{AlgorithmCatalog, AlgorithmCategory, AlgorithmInfo, CatalogError, EventGenerator};
pub use event::{AlgorithmEvent, EventKind, EventMeta, EventSequence, NodeState, Snapshot, SnapshotError};
pub use layout::{LayoutConfig, LayoutError};
pub use playback::{Playback, PlaybackError};
pub use recorder::{generate_insertion_sequence, AvlRecorder, Imbalance, Rotation, RunState};
pub use tree::{AvlTree, NodeId};
pub use util::parse_values;
