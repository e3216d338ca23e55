use serde::{Deserialize, Serialize};

use crate::error::{TreeError, TreeResult};
use crate::layout::{self, LayoutParams};

/// 2-D point in absolute canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Rooted ordered tree with index-addressed nodes.
///
/// Node `i`'s children are indices into the same sequence, in sibling order.
/// Removing a node compacts the index space: surviving nodes keep their
/// relative order but are renumbered, so callers must not hold node indices
/// across a structural mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    children: Vec<Vec<usize>>,
    labels: Vec<String>,
    positions: Vec<Point>,
}

impl Tree {
    /// Single root node with an empty label.
    pub fn new() -> Self {
        Self::with_root("")
    }

    /// Single root node with the given label.
    pub fn with_root(label: impl Into<String>) -> Self {
        Self {
            children: vec![Vec::new()],
            labels: vec![label.into()],
            positions: vec![Point::default()],
        }
    }

    /// The zero-node degenerate tree.
    pub fn empty() -> Self {
        Self {
            children: Vec::new(),
            labels: Vec::new(),
            positions: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Root index, or `None` for the empty tree.
    pub fn root(&self) -> Option<usize> {
        if self.is_empty() { None } else { Some(0) }
    }

    pub fn children(&self, node: usize) -> &[usize] {
        &self.children[node]
    }

    pub fn label(&self, node: usize) -> &str {
        &self.labels[node]
    }

    pub fn set_label(&mut self, node: usize, label: impl Into<String>) -> TreeResult<()> {
        self.check_index(node)?;
        self.labels[node] = label.into();
        Ok(())
    }

    pub fn position(&self, node: usize) -> Point {
        self.positions[node]
    }

    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    pub(crate) fn set_position(&mut self, node: usize, pos: Point) {
        self.positions[node] = pos;
    }

    /// Parent of `node`, or `None` for the root.
    pub fn parent(&self, node: usize) -> Option<usize> {
        self.children
            .iter()
            .position(|kids| kids.contains(&node))
    }

    /// Append a new node (empty label) as the last child of `parent`.
    ///
    /// Returns the new node's index. Positions are stale until the next
    /// [`construct`](Self::construct).
    pub fn sprout(&mut self, parent: usize) -> TreeResult<usize> {
        self.check_index(parent)?;
        let node = self.len();
        self.children.push(Vec::new());
        self.labels.push(String::new());
        self.positions.push(Point::default());
        self.children[parent].push(node);
        Ok(node)
    }

    /// Remove `node` and its entire subtree, compacting the index space.
    ///
    /// Removing the root leaves the empty tree.
    pub fn remove(&mut self, node: usize) -> TreeResult<()> {
        if self.is_empty() {
            return Err(TreeError::Empty);
        }
        self.check_index(node)?;

        // Mark the subtree.
        let mut doomed = vec![false; self.len()];
        let mut stack = vec![node];
        while let Some(i) = stack.pop() {
            doomed[i] = true;
            stack.extend_from_slice(&self.children[i]);
        }

        // Detach the subtree root from its parent.
        if let Some(parent) = self.parent(node) {
            self.children[parent].retain(|&c| c != node);
        }

        // Renumber survivors in their original relative order.
        let mut remap = vec![usize::MAX; self.len()];
        let mut next = 0;
        for (i, dead) in doomed.iter().enumerate() {
            if !dead {
                remap[i] = next;
                next += 1;
            }
        }

        let mut children = Vec::with_capacity(next);
        let mut labels = Vec::with_capacity(next);
        let mut positions = Vec::with_capacity(next);
        for i in 0..self.len() {
            if doomed[i] {
                continue;
            }
            children.push(self.children[i].iter().map(|&c| remap[c]).collect());
            labels.push(std::mem::take(&mut self.labels[i]));
            positions.push(self.positions[i]);
        }
        self.children = children;
        self.labels = labels;
        self.positions = positions;
        Ok(())
    }

    /// Recompute every node position, anchoring the root at `root_pos`.
    pub fn construct(&mut self, root_pos: Point) {
        self.construct_with(root_pos, &LayoutParams::default());
    }

    pub fn construct_with(&mut self, root_pos: Point, params: &LayoutParams) {
        layout::assign_positions(self, root_pos, params);
    }

    fn check_index(&self, node: usize) -> TreeResult<()> {
        if node < self.len() {
            Ok(())
        } else {
            Err(TreeError::out_of_range(node, self.len()))
        }
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}
