use thiserror::Error;

pub type TreeResult<T> = Result<T, TreeError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("Node index {index} out of range (tree has {len} nodes)")]
    NodeOutOfRange { index: usize, len: usize },

    #[error("Tree has no nodes")]
    Empty,
}

impl TreeError {
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::NodeOutOfRange { index, len }
    }
}
