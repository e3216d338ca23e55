//! # Arbor Tree
//!
//! The mutable tree container every other arbor crate works against.
//!
//! Nodes are index-addressed (`0..n`), node 0 is the root whenever the tree
//! is non-empty, and each node carries an ordered child list, a text label,
//! and a layout-computed 2-D position. Structural mutators (`sprout`,
//! `remove`) compact the index space; any derived artifact computed from an
//! earlier snapshot is stale after they run.

pub mod edit;
pub mod error;
pub mod layout;
pub mod tree;

pub use edit::TreeEdit;
pub use error::{TreeError, TreeResult};
pub use layout::{LayoutParams, ROOT_ANCHOR};
pub use tree::{Point, Tree};
