//! Arena node representation
//!
//! Nodes live in a flat table and point at each other by index.
//! Identity exposed to replay clients is the run-scoped [`NodeId`],
//! never the arena slot alone.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Handle into the node arena (small integer, valid for one run)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub(crate) u32);

impl NodeIndex {
    /// Arena slot as `usize`
    #[inline]
    pub fn slot(self) -> usize {
        self.0 as usize
    }
}

/// Stable node identity assigned at creation
///
/// `run` comes from a process-wide sequence, so two runs never hand out
/// the same id even when they insert the same values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    /// Run sequence number
    pub run: u64,
    /// Creation order within the run
    pub slot: u32,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}-{}", self.run, self.slot)
    }
}

/// Failure to parse a `node-{run}-{slot}` string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed node id '{0}'")]
pub struct ParseNodeIdError(String);

impl FromStr for NodeId {
    type Err = ParseNodeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseNodeIdError(s.to_string());
        let rest = s.strip_prefix("node-").ok_or_else(malformed)?;
        let (run, slot) = rest.split_once('-').ok_or_else(malformed)?;
        Ok(NodeId {
            run: run.parse().map_err(|_| malformed())?,
            slot: slot.parse().map_err(|_| malformed())?,
        })
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Live AVL node owned by the arena
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    /// Identity exposed in snapshots
    pub id: NodeId,

    /// Key (unique within the tree)
    pub value: i64,

    /// Left child slot
    pub left: Option<NodeIndex>,

    /// Right child slot
    pub right: Option<NodeIndex>,

    /// 1 for a leaf, else 1 + max(child heights)
    pub height: u32,
}

impl TreeNode {
    /// Create a detached leaf
    pub fn leaf(id: NodeId, value: i64) -> Self {
        Self {
            id,
            value,
            left: None,
            right: None,
            height: 1,
        }
    }

    /// Check if leaf (no children)
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(h={})", self.value, self.height)
    }
}
