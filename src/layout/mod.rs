//! 2-D layout for snapshot nodes
//!
//! Top-down placement from the structural root. The horizontal offset
//! between a node and its children shrinks geometrically with depth:
//!   offset(d) = base_offset × decay^d,  0 < decay < 1
//! and each level sits `row_height` below its parent.

use std::collections::HashMap;

use thiserror::Error;

use crate::event::NodeState;
use crate::tree::NodeId;

/// Errors from an invalid layout configuration
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    /// Decay must shrink offsets per level
    #[error("decay {0} must lie strictly between 0 and 1")]
    InvalidDecay(f64),

    /// Offset or row height not a positive finite number
    #[error("{field} must be positive and finite (got {value})")]
    NonPositive {
        /// Offending field
        field: &'static str,
        /// Supplied value
        value: f64,
    },

    /// Anchor coordinate not finite
    #[error("origin must be finite (got ({x}, {y}))")]
    NonFiniteOrigin {
        /// Anchor x
        x: f64,
        /// Anchor y
        y: f64,
    },
}

/// Canvas geometry used when positioning snapshot nodes
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Root x coordinate
    pub origin_x: f64,
    /// Root y coordinate
    pub origin_y: f64,
    /// Horizontal parent-to-child offset at depth 0
    pub base_offset: f64,
    /// Per-level shrink factor for the offset
    pub decay: f64,
    /// Vertical distance between levels
    pub row_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            origin_x: 400.0,
            origin_y: 50.0,
            base_offset: 80.0,
            decay: 0.7,
            row_height: 100.0,
        }
    }
}

impl LayoutConfig {
    /// Set the root anchor
    pub fn with_origin(mut self, x: f64, y: f64) -> Self {
        self.origin_x = x;
        self.origin_y = y;
        self
    }

    /// Set the depth-0 horizontal offset
    pub fn with_base_offset(mut self, base_offset: f64) -> Self {
        self.base_offset = base_offset;
        self
    }

    /// Set the per-level decay
    pub fn with_decay(mut self, decay: f64) -> Self {
        self.decay = decay;
        self
    }

    /// Set the vertical level spacing
    pub fn with_row_height(mut self, row_height: f64) -> Self {
        self.row_height = row_height;
        self
    }

    /// Check every field is usable
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.decay > 0.0 && self.decay < 1.0) {
            return Err(LayoutError::InvalidDecay(self.decay));
        }
        for (field, value) in [
            ("base_offset", self.base_offset),
            ("row_height", self.row_height),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(LayoutError::NonPositive { field, value });
            }
        }
        if !(self.origin_x.is_finite() && self.origin_y.is_finite()) {
            return Err(LayoutError::NonFiniteOrigin {
                x: self.origin_x,
                y: self.origin_y,
            });
        }
        Ok(())
    }

    /// Horizontal offset from a node at `depth` to its children
    #[inline]
    pub fn offset_at(&self, depth: u32) -> f64 {
        self.base_offset * self.decay.powi(depth as i32)
    }
}

/// Fill in `x`/`y` for every node reachable from the structural root
///
/// Nodes unreachable from the root (malformed input) keep their previous
/// coordinates.
pub fn assign_positions(states: &mut [NodeState], config: &LayoutConfig) {
    let Some(root) = crate::event::find_root(states) else {
        return;
    };
    let index: HashMap<NodeId, usize> = states
        .iter()
        .enumerate()
        .map(|(i, s)| (s.id, i))
        .collect();

    // (id, x, y, depth)
    let mut pending = vec![(root, config.origin_x, config.origin_y, 0u32)];
    while let Some((id, x, y, depth)) = pending.pop() {
        let Some(&i) = index.get(&id) else {
            continue;
        };
        let state = &mut states[i];
        state.x = Some(x);
        state.y = Some(y);

        let offset = config.offset_at(depth);
        let child_y = y + config.row_height;
        if let Some(left) = state.left_id {
            pending.push((left, x - offset, child_y, depth + 1));
        }
        if let Some(right) = state.right_id {
            pending.push((right, x + offset, child_y, depth + 1));
        }
    }
}
