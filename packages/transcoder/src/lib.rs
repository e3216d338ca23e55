//! # Arbor Transcoder
//!
//! Bijective bridge between a tree's structure and its textual rendering.
//!
//! Three artifacts are derived from a tree snapshot, always together:
//!
//! - the serialized form (`serialize`): a pre-order rendering where each
//!   node is `(` label children `)`;
//! - a [`Recognizer`]: a compiled instruction sequence accepting exactly
//!   the serializations that share the snapshot's shape, with one capture
//!   per node in textual order;
//! - an [`OrderPermutation`]: the bijection from textual capture order to
//!   internal node indices.
//!
//! All three are pure functions of the snapshot and are stale the moment
//! the tree's structure changes.

pub mod error;
pub mod order;
pub mod recognizer;
pub mod serializer;
mod shape;
pub mod tokenizer;

#[cfg(test)]
mod tests_roundtrip;

pub use error::{StructureError, TranscodeResult};
pub use order::OrderPermutation;
pub use recognizer::{Op, Recognizer};
pub use serializer::serialize;
pub use tokenizer::{is_reserved, tokenize, Token, CLOSE, OPEN};
