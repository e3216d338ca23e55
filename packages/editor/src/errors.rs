//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Structure error: {0}")]
    Structure(#[from] arbor_transcoder::StructureError),

    #[error("Tree error: {0}")]
    Tree(#[from] arbor_tree::TreeError),
}
