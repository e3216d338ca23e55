//! Structural soundness check shared by every transcoding entry point.

use arbor_tree::Tree;

use crate::error::{StructureError, TranscodeResult};

/// Verify that the snapshot is a single connected ordered tree: every child
/// index in range, no node reachable twice (a cycle or a shared child), and
/// no node unreachable from the root.
pub(crate) fn verify(tree: &Tree) -> TranscodeResult<()> {
    let len = tree.len();
    let Some(root) = tree.root() else {
        return Ok(());
    };

    let mut seen = vec![false; len];
    seen[root] = true;
    let mut visited = 1;
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        for &child in tree.children(node) {
            if child >= len {
                return Err(StructureError::child_out_of_range(node, child, len));
            }
            if seen[child] {
                return Err(StructureError::revisited(child));
            }
            seen[child] = true;
            visited += 1;
            stack.push(child);
        }
    }

    if visited < len {
        return Err(StructureError::unreachable(len - visited));
    }
    Ok(())
}
