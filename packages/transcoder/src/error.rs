use thiserror::Error;

pub type TranscodeResult<T> = Result<T, StructureError>;

/// A tree snapshot that is not a single connected ordered tree.
///
/// Fatal to the operation that detected it; the transcoder never repairs a
/// snapshot or emits artifacts derived from one.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StructureError {
    #[error("Child index {child} of node {parent} is out of range (tree has {len} nodes)")]
    ChildOutOfRange {
        parent: usize,
        child: usize,
        len: usize,
    },

    #[error("Node {node} is reachable more than once")]
    RevisitedNode { node: usize },

    #[error("{count} node(s) unreachable from the root")]
    UnreachableNodes { count: usize },
}

impl StructureError {
    pub fn child_out_of_range(parent: usize, child: usize, len: usize) -> Self {
        Self::ChildOutOfRange { parent, child, len }
    }

    pub fn revisited(node: usize) -> Self {
        Self::RevisitedNode { node }
    }

    pub fn unreachable(count: usize) -> Self {
        Self::UnreachableNodes { count }
    }
}
