//! Shape-to-recognizer compiler and anchored matcher.
//!
//! A recognizer is compiled per shape as an explicit instruction sequence
//! rather than a pattern string, so the compiled form stays inspectable and
//! the matcher is a plain cursor walk over lexed tokens. The grammar is
//! LL(1): after any instruction the next token kind decides the outcome, and
//! a label run can never satisfy a literal delimiter, so one left-to-right
//! pass is exact.

use serde::{Deserialize, Serialize};

use arbor_tree::Tree;

use crate::error::TranscodeResult;
use crate::shape;
use crate::tokenizer::{tokenize, Token};

/// One instruction of a compiled recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Op {
    /// Literal opening delimiter.
    Open,
    /// Captured label run; may be empty.
    Label,
    /// Literal closing delimiter.
    Close,
}

/// Anchored matcher for the family of serializations sharing one shape.
///
/// Accepts exactly `{ serialize(t) : t has this shape }`, with one capture
/// per node in left-to-right textual order. The empty-shape recognizer
/// accepts only the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recognizer {
    ops: Vec<Op>,
    groups: usize,
}

impl Recognizer {
    /// Compile a recognizer from a tree snapshot's shape.
    pub fn compile(tree: &Tree) -> TranscodeResult<Self> {
        shape::verify(tree)?;
        let mut ops = Vec::new();
        let mut groups = 0;
        if let Some(root) = tree.root() {
            emit(tree, root, &mut ops, &mut groups);
        }
        Ok(Self { ops, groups })
    }

    /// The compiled instruction sequence.
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Number of capture groups (one per node).
    pub fn group_count(&self) -> usize {
        self.groups
    }

    /// Whether `input` belongs to this shape's language.
    pub fn is_match(&self, input: &str) -> bool {
        self.captures(input).is_some()
    }

    /// Captured labels in textual order, or `None` on any mismatch.
    ///
    /// The match is anchored: trailing input rejects the whole string.
    pub fn captures<'src>(&self, input: &'src str) -> Option<Vec<&'src str>> {
        let tokens = tokenize(input);
        let mut pos = 0;
        let mut captured = Vec::with_capacity(self.groups);

        for op in &self.ops {
            match op {
                Op::Open => match tokens.get(pos) {
                    Some((Token::Open, _)) => pos += 1,
                    _ => return None,
                },
                Op::Close => match tokens.get(pos) {
                    Some((Token::Close, _)) => pos += 1,
                    _ => return None,
                },
                Op::Label => match tokens.get(pos) {
                    Some((Token::Label(text), _)) => {
                        captured.push(*text);
                        pos += 1;
                    }
                    // Next token is a delimiter: this node's label is empty.
                    _ => captured.push(""),
                },
            }
        }

        if pos == tokens.len() {
            Some(captured)
        } else {
            None
        }
    }
}

fn emit(tree: &Tree, node: usize, ops: &mut Vec<Op>, groups: &mut usize) {
    ops.push(Op::Open);
    ops.push(Op::Label);
    *groups += 1;
    for &child in tree.children(node) {
        emit(tree, child, ops, groups);
    }
    ops.push(Op::Close);
}
