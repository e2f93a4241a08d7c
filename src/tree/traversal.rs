//! Child-slot addressing and pre-order traversal
//!
//! A [`Link`] names the slot a subtree hangs from. The descent path of one
//! insertion is a stack of links, so rotations can relink the parent
//! without parent pointers in the nodes.

use super::{AvlTree, NodeIndex, TreeNode};

/// Which child of a parent we descended into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Left child (smaller keys)
    Left,

    /// Right child (larger keys)
    Right,
}

/// Slot holding a subtree root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    /// The tree root pointer
    Root,

    /// A child slot of `parent`
    Child {
        /// Owning node
        parent: NodeIndex,
        /// Which side
        direction: Direction,
    },
}

impl Link {
    /// Left slot of `parent`
    pub fn left(parent: NodeIndex) -> Self {
        Link::Child {
            parent,
            direction: Direction::Left,
        }
    }

    /// Right slot of `parent`
    pub fn right(parent: NodeIndex) -> Self {
        Link::Child {
            parent,
            direction: Direction::Right,
        }
    }

    /// Parent owning the slot, `None` for the root pointer
    pub fn parent(&self) -> Option<NodeIndex> {
        match *self {
            Link::Root => None,
            Link::Child { parent, .. } => Some(parent),
        }
    }
}

/// Pre-order walk: parent, then left subtree, then right subtree
///
/// Explicit stack; depth is O(log n) for a balanced tree.
#[derive(Debug)]
pub struct PreOrder<'a> {
    tree: &'a AvlTree,
    stack: Vec<NodeIndex>,
}

impl<'a> PreOrder<'a> {
    pub(super) fn new(tree: &'a AvlTree) -> Self {
        Self {
            tree,
            stack: tree.root().into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let node = self.tree.node(idx);
        // Right pushed first so left is visited first
        if let Some(right) = node.right {
            self.stack.push(right);
        }
        if let Some(left) = node.left {
            self.stack.push(left);
        }
        Some(node)
    }
}
