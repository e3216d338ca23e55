//! Canonical text rendering of a tree.
//!
//! Pre-order: a node renders as `(` label child₁ … childₖ `)`, the empty
//! tree as the empty string. The rendering is the one member of the
//! recognizer's accepted language carrying the tree's current labels.

use arbor_tree::Tree;

use crate::error::TranscodeResult;
use crate::shape;
use crate::tokenizer::{CLOSE, OPEN};

/// Serialize a tree to its canonical form.
///
/// Pure with respect to the snapshot; fails on a malformed snapshot rather
/// than rendering an inconsistent form.
pub fn serialize(tree: &Tree) -> TranscodeResult<String> {
    shape::verify(tree)?;
    let mut out = String::new();
    if let Some(root) = tree.root() {
        write_node(tree, root, &mut out);
    }
    Ok(out)
}

fn write_node(tree: &Tree, node: usize, out: &mut String) {
    out.push(OPEN);
    out.push_str(tree.label(node));
    for &child in tree.children(node) {
        write_node(tree, child, out);
    }
    out.push(CLOSE);
}
