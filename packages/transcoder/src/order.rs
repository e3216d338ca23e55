//! Mapping between textual capture order and internal node indices.
//!
//! The recognizer captures labels in left-to-right textual order, which is
//! the serializer's pre-order walk. Internal node indices are allocation
//! order, so the two need not coincide; this table reconciles them.

use serde::{Deserialize, Serialize};

use arbor_tree::Tree;

use crate::error::TranscodeResult;
use crate::shape;

/// Bijection from linear (textual) capture index to internal node index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPermutation {
    linear_to_internal: Vec<usize>,
}

impl OrderPermutation {
    /// Record, for each capture position, the internal node it labels.
    ///
    /// Walks the same pre-order traversal the recognizer compiler emits
    /// capture groups in.
    pub fn compute(tree: &Tree) -> TranscodeResult<Self> {
        shape::verify(tree)?;
        let mut linear_to_internal = Vec::with_capacity(tree.len());
        if let Some(root) = tree.root() {
            preorder(tree, root, &mut linear_to_internal);
        }
        Ok(Self { linear_to_internal })
    }

    /// Internal node index for the capture at `linear`.
    pub fn internal(&self, linear: usize) -> usize {
        self.linear_to_internal[linear]
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.linear_to_internal
    }

    pub fn len(&self) -> usize {
        self.linear_to_internal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.linear_to_internal.is_empty()
    }

    /// Whether the table is a true permutation of `0..len`.
    pub fn is_bijection(&self) -> bool {
        let mut seen = vec![false; self.linear_to_internal.len()];
        for &i in &self.linear_to_internal {
            if i >= seen.len() || seen[i] {
                return false;
            }
            seen[i] = true;
        }
        true
    }
}

fn preorder(tree: &Tree, node: usize, out: &mut Vec<usize>) {
    out.push(node);
    for &child in tree.children(node) {
        preorder(tree, child, out);
    }
}
