//! Step cursor over a recorded run
//!
//! Replay clients step through an [`EventSequence`] by index: forward,
//! backward, jump, or reset to the first event. Timing (auto-play) is the
//! client's concern; [`Playback::remaining`] yields what a timer would
//! consume.

use thiserror::Error;

use crate::event::{AlgorithmEvent, EventSequence};

/// Cursor errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaybackError {
    /// Seek past the last event
    #[error("step {step} out of range (sequence has {len} events)")]
    StepOutOfRange {
        /// Requested step (0-based)
        step: usize,
        /// Events available
        len: usize,
    },
}

/// Position within an event sequence
#[derive(Debug, Clone)]
pub struct Playback {
    events: EventSequence,
    position: usize,
}

impl Playback {
    /// Start at the first event
    pub fn new(events: EventSequence) -> Self {
        Self {
            events,
            position: 0,
        }
    }

    /// Event under the cursor (`None` only for an empty sequence)
    pub fn current(&self) -> Option<&AlgorithmEvent> {
        self.events.get(self.position)
    }

    /// 0-based cursor position
    pub fn position(&self) -> usize {
        self.position
    }

    /// Total events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when there is nothing to replay
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Cursor sits on the final event
    pub fn is_at_end(&self) -> bool {
        self.position + 1 >= self.events.len()
    }

    /// Advance one step; returns false when already at the end
    pub fn next(&mut self) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.position += 1;
        true
    }

    /// Go back one step; returns false when already at the start
    pub fn prev(&mut self) -> bool {
        if self.position == 0 {
            return false;
        }
        self.position -= 1;
        true
    }

    /// Jump to `step`
    pub fn seek(&mut self, step: usize) -> Result<&AlgorithmEvent, PlaybackError> {
        let len = self.events.len();
        if step >= len {
            return Err(PlaybackError::StepOutOfRange { step, len });
        }
        self.position = step;
        Ok(&self.events[step])
    }

    /// Back to the first event
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Events after the cursor, advancing the cursor as they are taken
    pub fn remaining(&mut self) -> Remaining<'_> {
        Remaining { playback: self }
    }

    /// The underlying sequence
    pub fn events(&self) -> &EventSequence {
        &self.events
    }
}

/// Iterator returned by [`Playback::remaining`]
#[derive(Debug)]
pub struct Remaining<'a> {
    playback: &'a mut Playback,
}

impl<'a> Iterator for Remaining<'a> {
    type Item = usize;

    /// Yields the new position after each step
    fn next(&mut self) -> Option<usize> {
        if self.playback.next() {
            Some(self.playback.position)
        } else {
            None
        }
    }
}
