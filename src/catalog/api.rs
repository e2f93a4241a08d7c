use std::fmt;

use crate::event::EventSequence;
use crate::recorder::AvlRecorder;

/// Something that turns an input key list into a replayable event sequence.
pub trait EventGenerator: fmt::Debug + Send {
    /// Catalog id this generator serves.
    fn id(&self) -> &'static str;

    /// Run over `values` from a fresh state and return every event.
    fn generate(&mut self, values: &[i64]) -> EventSequence;
}

impl EventGenerator for AvlRecorder {
    fn id(&self) -> &'static str {
        "avl-tree"
    }

    fn generate(&mut self, values: &[i64]) -> EventSequence {
        self.generate_insertion_sequence(values)
    }
}
