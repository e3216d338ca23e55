//! # Structural Edits
//!
//! Structural operations expressed as data, so gesture translation, tests,
//! and callers coordinating notifications can reason about an edit before
//! and after it runs.
//!
//! ## Edit Semantics
//!
//! ### Sprout
//! - Appends a fresh empty-labeled node as the last child of `parent`
//! - Fails if `parent` is out of range
//!
//! ### Remove
//! - Removes `node` and all descendants
//! - Compacts the index space; indices held across the edit are invalid
//! - Removing the root leaves the empty tree

use serde::{Deserialize, Serialize};

use crate::error::{TreeError, TreeResult};
use crate::tree::Tree;

/// Structural edits (shape-changing operations).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TreeEdit {
    /// Grow a new child under an existing node.
    Sprout { parent: usize },

    /// Remove a node and its entire subtree.
    Remove { node: usize },
}

impl TreeEdit {
    /// Validate without applying.
    pub fn validate(&self, tree: &Tree) -> TreeResult<()> {
        match self {
            TreeEdit::Sprout { parent } => {
                if *parent < tree.len() {
                    Ok(())
                } else {
                    Err(TreeError::out_of_range(*parent, tree.len()))
                }
            }
            TreeEdit::Remove { node } => {
                if tree.is_empty() {
                    Err(TreeError::Empty)
                } else if *node < tree.len() {
                    Ok(())
                } else {
                    Err(TreeError::out_of_range(*node, tree.len()))
                }
            }
        }
    }

    /// Apply the edit. Returns the new node index for a sprout.
    pub fn apply(&self, tree: &mut Tree) -> TreeResult<Option<usize>> {
        self.validate(tree)?;
        match self {
            TreeEdit::Sprout { parent } => tree.sprout(*parent).map(Some),
            TreeEdit::Remove { node } => tree.remove(*node).map(|_| None),
        }
    }
}
