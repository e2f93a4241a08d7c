//! Arena-backed AVL tree
//!
//! Nodes are stored in a flat table and reference children by
//! [`NodeIndex`]. No ownership cycles, and a snapshot is a pure read
//! over the table.
//!
//! The arena only grows during a run and is cleared (capacity kept)
//! when the next run begins.

mod node;
mod traversal;

pub use node::{NodeId, NodeIndex, ParseNodeIdError, TreeNode};
pub use traversal::{Direction, Link, PreOrder};

/// AVL tree addressed by arena index
#[derive(Debug, Default)]
pub struct AvlTree {
    /// Node table, slot = creation order
    nodes: Vec<TreeNode>,

    /// Current root (tracked here; snapshots find it structurally)
    root: Option<NodeIndex>,

    /// Run sequence number stamped into every new [`NodeId`]
    run: u64,
}

impl AvlTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every node and start handing out ids for `run`
    pub fn begin_run(&mut self, run: u64) {
        self.nodes.clear();
        self.root = None;
        self.run = run;
    }

    /// Run the current nodes belong to
    pub fn run(&self) -> u64 {
        self.run
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True before the first insertion of a run
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Root slot contents
    pub fn root(&self) -> Option<NodeIndex> {
        self.root
    }

    /// Borrow a node
    ///
    /// Indices are only produced by this arena, so a stale index is a bug.
    pub fn node(&self, idx: NodeIndex) -> &TreeNode {
        &self.nodes[idx.slot()]
    }

    fn node_mut(&mut self, idx: NodeIndex) -> &mut TreeNode {
        &mut self.nodes[idx.slot()]
    }

    /// Allocate a detached leaf holding `value`
    pub fn alloc_leaf(&mut self, value: i64) -> NodeIndex {
        let slot = self.nodes.len() as u32;
        let id = NodeId {
            run: self.run,
            slot,
        };
        self.nodes.push(TreeNode::leaf(id, value));
        NodeIndex(slot)
    }

    /// Height of an optional subtree (0 when empty)
    #[inline]
    pub fn height(&self, idx: Option<NodeIndex>) -> u32 {
        idx.map_or(0, |i| self.node(i).height)
    }

    /// `height(left) - height(right)`
    pub fn balance(&self, idx: NodeIndex) -> i32 {
        let node = self.node(idx);
        self.height(node.left) as i32 - self.height(node.right) as i32
    }

    /// Recompute height from the children's recorded heights
    pub fn update_height(&mut self, idx: NodeIndex) {
        let node = self.node(idx);
        let height = 1 + self.height(node.left).max(self.height(node.right));
        self.node_mut(idx).height = height;
    }

    /// Subtree currently hanging from `link`
    pub fn child(&self, link: Link) -> Option<NodeIndex> {
        match link {
            Link::Root => self.root,
            Link::Child { parent, direction } => {
                let node = self.node(parent);
                match direction {
                    Direction::Left => node.left,
                    Direction::Right => node.right,
                }
            }
        }
    }

    /// Hang `child` from `link`
    pub fn set_child(&mut self, link: Link, child: Option<NodeIndex>) {
        match link {
            Link::Root => self.root = child,
            Link::Child { parent, direction } => {
                let node = self.node_mut(parent);
                match direction {
                    Direction::Left => node.left = child,
                    Direction::Right => node.right = child,
                }
            }
        }
    }

    /// Right rotation at `y`; returns the new subtree root `x`
    ///
    /// `x = y.left` moves up, `y` becomes `x.right`, and `x`'s old right
    /// subtree becomes `y.left`. Heights of `y` then `x` are recomputed.
    /// The caller relinks the slot that held `y`.
    ///
    /// Returns `None` (tree untouched) if `y` has no left child.
    pub fn rotate_right(&mut self, y: NodeIndex) -> Option<NodeIndex> {
        let x = self.node(y).left?;
        let inner = self.node(x).right;

        self.node_mut(x).right = Some(y);
        self.node_mut(y).left = inner;

        self.update_height(y);
        self.update_height(x);
        Some(x)
    }

    /// Left rotation at `x`; mirror of [`AvlTree::rotate_right`]
    pub fn rotate_left(&mut self, x: NodeIndex) -> Option<NodeIndex> {
        let y = self.node(x).right?;
        let inner = self.node(y).left;

        self.node_mut(y).left = Some(x);
        self.node_mut(x).right = inner;

        self.update_height(x);
        self.update_height(y);
        Some(y)
    }

    /// Walk the live tree from the root in pre-order
    pub fn preorder(&self) -> PreOrder<'_> {
        PreOrder::new(self)
    }

    /// Values in sorted (in-order) order
    pub fn in_order_values(&self) -> Vec<i64> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack = Vec::new();
        let mut cursor = self.root;
        while cursor.is_some() || !stack.is_empty() {
            while let Some(idx) = cursor {
                stack.push(idx);
                cursor = self.node(idx).left;
            }
            if let Some(idx) = stack.pop() {
                out.push(self.node(idx).value);
                cursor = self.node(idx).right;
            }
        }
        out
    }
}
