//! Imbalance classification for AVL insertion
//!
//! After inserting `v` below node `n` with `balance(n) = h(L) - h(R)`:
//!   balance > 1,  v < L.value  → LL  (rotate right at n)
//!   balance > 1,  v > L.value  → LR  (rotate left at L, then right at n)
//!   balance < -1, v > R.value  → RR  (rotate left at n)
//!   balance < -1, v < R.value  → RL  (rotate right at R, then left at n)

use std::cmp::Ordering;
use std::fmt;

/// Rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    /// Left child moves up
    Right,
    /// Right child moves up
    Left,
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rotation::Right => f.write_str("Right"),
            Rotation::Left => f.write_str("Left"),
        }
    }
}

/// The four single-insertion imbalance shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Imbalance {
    /// Left-heavy, new key in the left child's left subtree
    LeftLeft,
    /// Right-heavy, new key in the right child's right subtree
    RightRight,
    /// Left-heavy, new key in the left child's right subtree
    LeftRight,
    /// Right-heavy, new key in the right child's left subtree
    RightLeft,
}

impl Imbalance {
    /// Decide the case from the node's balance, the inserted key and the
    /// keys of the node's children. `None` when the node is balanced.
    pub fn classify(
        balance: i32,
        inserted: i64,
        left_value: Option<i64>,
        right_value: Option<i64>,
    ) -> Option<Self> {
        if balance > 1 {
            match inserted.cmp(&left_value?) {
                Ordering::Less => Some(Imbalance::LeftLeft),
                Ordering::Greater => Some(Imbalance::LeftRight),
                Ordering::Equal => None,
            }
        } else if balance < -1 {
            match inserted.cmp(&right_value?) {
                Ordering::Greater => Some(Imbalance::RightRight),
                Ordering::Less => Some(Imbalance::RightLeft),
                Ordering::Equal => None,
            }
        } else {
            None
        }
    }

    /// Short label used in explanations
    pub fn label(self) -> &'static str {
        match self {
            Imbalance::LeftLeft => "LL",
            Imbalance::RightRight => "RR",
            Imbalance::LeftRight => "LR",
            Imbalance::RightLeft => "RL",
        }
    }

    /// Rotation applied to the child first (double cases only)
    pub fn child_rotation(self) -> Option<Rotation> {
        match self {
            Imbalance::LeftRight => Some(Rotation::Left),
            Imbalance::RightLeft => Some(Rotation::Right),
            Imbalance::LeftLeft | Imbalance::RightRight => None,
        }
    }

    /// Rotation applied at the unbalanced node itself
    pub fn node_rotation(self) -> Rotation {
        match self {
            Imbalance::LeftLeft | Imbalance::LeftRight => Rotation::Right,
            Imbalance::RightRight | Imbalance::RightLeft => Rotation::Left,
        }
    }
}

impl fmt::Display for Imbalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_four_cases() {
        assert_eq!(Imbalance::classify(2, 5, Some(10), None), Some(Imbalance::LeftLeft));
        assert_eq!(Imbalance::classify(2, 15, Some(10), None), Some(Imbalance::LeftRight));
        assert_eq!(Imbalance::classify(-2, 40, None, Some(30)), Some(Imbalance::RightRight));
        assert_eq!(Imbalance::classify(-2, 25, None, Some(30)), Some(Imbalance::RightLeft));
    }

    #[test]
    fn test_balanced_nodes_need_nothing() {
        for balance in -1..=1 {
            assert_eq!(Imbalance::classify(balance, 5, Some(1), Some(9)), None);
        }
    }

    #[test]
    fn test_rotation_plan() {
        assert_eq!(Imbalance::LeftRight.child_rotation(), Some(Rotation::Left));
        assert_eq!(Imbalance::LeftRight.node_rotation(), Rotation::Right);
        assert_eq!(Imbalance::RightRight.child_rotation(), None);
        assert_eq!(Imbalance::RightLeft.node_rotation(), Rotation::Left);
    }
}
