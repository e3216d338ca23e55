//! # Gated Text Buffer
//!
//! The text view of the tree. Every proposed edit is spliced into a
//! candidate string and gated through the current recognizer: if the
//! candidate still belongs to the shape's language the edit lands verbatim,
//! otherwise nothing is applied. Label content flows back into the tree
//! through the order permutation; structure can only change through the
//! structural editors, never through text.
//!
//! ## Edit Semantics
//!
//! ### Propose
//! - Reserved delimiter characters in the replacement veto outright
//! - The spliced candidate must match the whole-string recognizer
//! - A veto is a first-class outcome, not an error
//!
//! ### Commit
//! - Gate, splice, then write every captured label through the permutation
//! - Deletion is a commit with an empty replacement and passes the same gate

use std::ops::Range;

use serde::{Deserialize, Serialize};

use arbor_transcoder::{is_reserved, serialize, OrderPermutation, Recognizer, TranscodeResult};
use arbor_tree::Tree;

/// A label-only text edit: replace `span` with `replacement`.
///
/// Insertion has an empty span, deletion an empty replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEdit {
    pub span: Range<usize>,
    pub replacement: String,
}

impl TextEdit {
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self {
            span: at..at,
            replacement: text.into(),
        }
    }

    pub fn delete(span: Range<usize>) -> Self {
        Self {
            span,
            replacement: String::new(),
        }
    }
}

/// Outcome of gating a text edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Vetoed(VetoReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VetoReason {
    /// The replacement contains a structural delimiter character.
    ReservedCharacter,
    /// The candidate string falls outside the shape's language.
    ShapeChange,
    /// The span is out of bounds or splits a character.
    InvalidSpan,
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }
}

/// Text buffer whose edits cannot change tree structure.
///
/// After every successful [`resynchronize`](Self::resynchronize) the buffer
/// equals the tree's serialized form, and the held recognizer/permutation
/// derive from the same snapshot.
#[derive(Debug, Clone)]
pub struct GatedBuffer {
    text: String,
    recognizer: Recognizer,
    order: OrderPermutation,
    cursor: usize,
}

impl GatedBuffer {
    pub fn new(tree: &Tree) -> TranscodeResult<Self> {
        Ok(Self {
            text: serialize(tree)?,
            recognizer: Recognizer::compile(tree)?,
            order: OrderPermutation::compute(tree)?,
            cursor: 0,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn recognizer(&self) -> &Recognizer {
        &self.recognizer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor, clamped to the buffer.
    pub fn set_cursor(&mut self, pos: usize) {
        self.cursor = pos.min(self.text.len());
    }

    /// Gate an edit without applying it.
    pub fn propose(&self, edit: &TextEdit) -> Verdict {
        match self.gate(edit) {
            Ok(_) => Verdict::Accepted,
            Err(reason) => Verdict::Vetoed(reason),
        }
    }

    /// Insertion gate in the style of a text widget's insert filter: the
    /// returned slice is what the widget should actually insert, which is
    /// empty when the edit is vetoed.
    pub fn propose_insertion<'a>(&self, text: &'a str, cursor: usize) -> &'a str {
        if self.propose(&TextEdit::insert(cursor, text)).is_accepted() {
            text
        } else {
            ""
        }
    }

    /// Gate an edit and, if accepted, splice the buffer and write the
    /// captured labels back into the tree.
    pub fn commit(&mut self, edit: &TextEdit, tree: &mut Tree) -> Verdict {
        match self.gate(edit) {
            Ok(candidate) => {
                self.text = candidate;
                self.cursor = edit.span.start + edit.replacement.len();
                self.write_back(tree);
                Verdict::Accepted
            }
            Err(reason) => Verdict::Vetoed(reason),
        }
    }

    /// Defensive entry point for a buffer that changed outside the gate.
    ///
    /// If `text` matches the current recognizer, adopt it and write labels
    /// through; otherwise leave the buffer and every label unchanged and
    /// report `false`. No partial writes either way.
    pub fn sync_from_text(&mut self, text: &str, tree: &mut Tree) -> bool {
        if self.recognizer.is_match(text) {
            self.text = text.to_string();
            self.cursor = self.cursor.min(self.text.len());
            self.write_back(tree);
            true
        } else {
            tracing::warn!("buffer text no longer matches its shape; labels left unchanged");
            false
        }
    }

    /// Recompute every artifact from the tree's current snapshot and
    /// overwrite the buffer, discarding any in-flight edit.
    pub fn resynchronize(&mut self, tree: &Tree) -> TranscodeResult<()> {
        self.text = serialize(tree)?;
        self.recognizer = Recognizer::compile(tree)?;
        self.order = OrderPermutation::compute(tree)?;
        self.cursor = self.cursor.min(self.text.len());
        tracing::debug!(nodes = tree.len(), "buffer resynchronized");
        Ok(())
    }

    /// Splice and gate; returns the candidate string on acceptance.
    fn gate(&self, edit: &TextEdit) -> Result<String, VetoReason> {
        if edit.replacement.chars().any(is_reserved) {
            return Err(VetoReason::ReservedCharacter);
        }
        let candidate = self.candidate(edit).ok_or(VetoReason::InvalidSpan)?;
        if self.recognizer.is_match(&candidate) {
            Ok(candidate)
        } else {
            Err(VetoReason::ShapeChange)
        }
    }

    fn candidate(&self, edit: &TextEdit) -> Option<String> {
        let before = self.text.get(..edit.span.start)?;
        let after = self.text.get(edit.span.end..)?;
        let mut candidate = String::with_capacity(before.len() + edit.replacement.len() + after.len());
        candidate.push_str(before);
        candidate.push_str(&edit.replacement);
        candidate.push_str(after);
        Some(candidate)
    }

    fn write_back(&self, tree: &mut Tree) {
        let Some(captures) = self.recognizer.captures(&self.text) else {
            tracing::warn!("committed buffer failed to decompose; labels left unchanged");
            return;
        };
        for (linear, capture) in captures.iter().enumerate() {
            let node = self.order.internal(linear);
            if tree.set_label(node, *capture).is_err() {
                tracing::warn!(node, "label write to stale node index skipped");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fork() -> (Tree, GatedBuffer) {
        let mut tree = Tree::with_root("a");
        let b = tree.sprout(0).unwrap();
        let c = tree.sprout(0).unwrap();
        tree.set_label(b, "b").unwrap();
        tree.set_label(c, "c").unwrap();
        let buffer = GatedBuffer::new(&tree).unwrap();
        (tree, buffer)
    }

    #[test]
    fn test_buffer_starts_as_serialized_form() {
        let (_, buffer) = fork();
        assert_eq!(buffer.text(), "(a(b)(c))");
    }

    #[test]
    fn test_label_insertion_accepted() {
        let (mut tree, mut buffer) = fork();
        // "(a" -> "(ax"
        let edit = TextEdit::insert(2, "x");
        assert_eq!(buffer.commit(&edit, &mut tree), Verdict::Accepted);
        assert_eq!(buffer.text(), "(ax(b)(c))");
        assert_eq!(tree.label(0), "ax");
    }

    #[test]
    fn test_delimiter_insertion_vetoed() {
        let (mut tree, mut buffer) = fork();
        let edit = TextEdit::insert(2, "(");
        assert_eq!(
            buffer.commit(&edit, &mut tree),
            Verdict::Vetoed(VetoReason::ReservedCharacter)
        );
        assert_eq!(buffer.text(), "(a(b)(c))");
        assert_eq!(tree.label(0), "a");
    }

    #[test]
    fn test_balanced_delimiter_pair_still_vetoed() {
        // "()" spliced into a label can accidentally produce a matching
        // string for some shapes; reserved characters veto regardless.
        let (_, buffer) = fork();
        let edit = TextEdit {
            span: 2..2,
            replacement: "()".to_string(),
        };
        assert_eq!(
            buffer.propose(&edit),
            Verdict::Vetoed(VetoReason::ReservedCharacter)
        );
    }

    #[test]
    fn test_structural_deletion_vetoed() {
        let (mut tree, mut buffer) = fork();
        // Deleting "(b)" would drop a child.
        let edit = TextEdit::delete(2..5);
        assert_eq!(
            buffer.commit(&edit, &mut tree),
            Verdict::Vetoed(VetoReason::ShapeChange)
        );
        assert_eq!(buffer.text(), "(a(b)(c))");
    }

    #[test]
    fn test_label_deletion_accepted() {
        let (mut tree, mut buffer) = fork();
        // Delete the "b" label character.
        let edit = TextEdit::delete(3..4);
        assert_eq!(buffer.commit(&edit, &mut tree), Verdict::Accepted);
        assert_eq!(buffer.text(), "(a()(c))");
        assert_eq!(tree.label(1), "");
    }

    #[test]
    fn test_propose_insertion_filter() {
        let (_, buffer) = fork();
        assert_eq!(buffer.propose_insertion("xyz", 2), "xyz");
        assert_eq!(buffer.propose_insertion(")", 2), "");
    }

    #[test]
    fn test_out_of_bounds_span_vetoed() {
        let (_, buffer) = fork();
        let edit = TextEdit::delete(4..99);
        assert_eq!(buffer.propose(&edit), Verdict::Vetoed(VetoReason::InvalidSpan));
    }

    #[test]
    fn test_write_back_targets_internal_order() {
        // Growth order: sprout(0) -> 1, sprout(0) -> 2, sprout(1) -> 3.
        // Textual order is 0, 1, 3, 2, so editing the last label in the
        // text must land on internal node 2.
        let mut tree = Tree::with_root("r");
        tree.sprout(0).unwrap();
        tree.sprout(0).unwrap();
        tree.sprout(1).unwrap();
        let mut buffer = GatedBuffer::new(&tree).unwrap();
        assert_eq!(buffer.text(), "(r(())())");

        let edit = TextEdit::insert(7, "z");
        assert_eq!(buffer.commit(&edit, &mut tree), Verdict::Accepted);
        assert_eq!(buffer.text(), "(r(())(z))");
        assert_eq!(tree.label(2), "z");
        assert_eq!(tree.label(3), "");
    }

    #[test]
    fn test_sync_from_text_rejects_mismatch() {
        let (mut tree, mut buffer) = fork();
        assert!(!buffer.sync_from_text("(a(b))", &mut tree));
        assert_eq!(buffer.text(), "(a(b)(c))");
        assert_eq!(tree.label(1), "b");
    }

    #[test]
    fn test_sync_from_text_adopts_matching_text() {
        let (mut tree, mut buffer) = fork();
        assert!(buffer.sync_from_text("(x(y)(z))", &mut tree));
        assert_eq!(tree.label(0), "x");
        assert_eq!(tree.label(1), "y");
        assert_eq!(tree.label(2), "z");
    }

    #[test]
    fn test_resynchronize_discards_in_flight_state() {
        let (mut tree, mut buffer) = fork();
        tree.sprout(0).unwrap();
        buffer.resynchronize(&tree).unwrap();
        assert_eq!(buffer.text(), "(a(b)(c)())");
        assert!(buffer.recognizer().is_match(buffer.text()));
    }

    #[test]
    fn test_cursor_clamped_on_resynchronize() {
        let (mut tree, mut buffer) = fork();
        buffer.set_cursor(9);
        tree.remove(2).unwrap();
        buffer.resynchronize(&tree).unwrap();
        assert!(buffer.cursor() <= buffer.text().len());
    }

    #[test]
    fn test_edit_serialization() {
        let edit = TextEdit::insert(4, "hi");
        let json = serde_json::to_string(&edit).unwrap();
        let back: TextEdit = serde_json::from_str(&json).unwrap();
        assert_eq!(edit, back);
    }
}
