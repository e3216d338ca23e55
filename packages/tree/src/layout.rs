//! Position assignment for canvas rendering and hit-testing.
//!
//! Leaf-count tidy layout: each subtree claims a horizontal span
//! proportional to its leaf count, a node sits centered over its children,
//! and each level steps down by a fixed vertical offset (y grows upward,
//! matching the canvas coordinate convention).

use crate::tree::{Point, Tree};

/// Default absolute-space anchor for the root node.
pub const ROOT_ANCHOR: Point = Point { x: 0.0, y: 80.0 };

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Horizontal span claimed by each leaf.
    pub leaf_spacing: f64,
    /// Vertical offset between a parent and its children.
    pub level_spacing: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            leaf_spacing: 40.0,
            level_spacing: 60.0,
        }
    }
}

pub(crate) fn assign_positions(tree: &mut Tree, root_pos: Point, params: &LayoutParams) {
    let Some(root) = tree.root() else {
        return;
    };
    let leaves = leaf_counts(tree);
    place(tree, &leaves, params, root, root_pos.x, root_pos.y);
}

/// Leaf count per node, computed bottom-up.
fn leaf_counts(tree: &Tree) -> Vec<usize> {
    let mut counts = vec![0usize; tree.len()];
    let Some(root) = tree.root() else {
        return counts;
    };
    let mut order = Vec::with_capacity(tree.len());
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        order.push(node);
        stack.extend_from_slice(tree.children(node));
    }
    for &node in order.iter().rev() {
        let kids = tree.children(node);
        counts[node] = if kids.is_empty() {
            1
        } else {
            kids.iter().map(|&c| counts[c]).sum()
        };
    }
    counts
}

fn place(
    tree: &mut Tree,
    leaves: &[usize],
    params: &LayoutParams,
    node: usize,
    center_x: f64,
    y: f64,
) {
    tree.set_position(node, Point::new(center_x, y));
    let total = leaves[node] as f64 * params.leaf_spacing;
    let mut left = center_x - total / 2.0;
    let child_indices: Vec<usize> = tree.children(node).to_vec();
    for child in child_indices {
        let width = leaves[child] as f64 * params.leaf_spacing;
        place(
            tree,
            leaves,
            params,
            child,
            left + width / 2.0,
            y - params.level_spacing,
        );
        left += width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_sits_at_anchor() {
        let mut tree = Tree::new();
        tree.construct(ROOT_ANCHOR);
        assert_eq!(tree.position(0), ROOT_ANCHOR);
    }

    #[test]
    fn test_children_spread_symmetrically() {
        let mut tree = Tree::new();
        let left = tree.sprout(0).unwrap();
        let right = tree.sprout(0).unwrap();
        tree.construct(Point::new(0.0, 0.0));

        let lp = tree.position(left);
        let rp = tree.position(right);
        assert!((lp.x + rp.x).abs() < 1e-9, "children centered under root");
        assert!(lp.x < rp.x, "sibling order is left to right");
        assert_eq!(lp.y, rp.y);
        assert!(lp.y < tree.position(0).y, "children sit below the parent");
    }

    #[test]
    fn test_deterministic() {
        let mut a = Tree::new();
        a.sprout(0).unwrap();
        a.sprout(0).unwrap();
        a.sprout(1).unwrap();
        let mut b = a.clone();
        a.construct(ROOT_ANCHOR);
        b.construct(ROOT_ANCHOR);
        assert_eq!(a.positions(), b.positions());
    }

    #[test]
    fn test_empty_tree_is_a_no_op() {
        let mut tree = Tree::empty();
        tree.construct(ROOT_ANCHOR);
        assert!(tree.positions().is_empty());
    }
}
