//! # Edit Session
//!
//! The application root. Owns the tree (no global singleton), wires the
//! gated buffer and pointer editor to it, and enforces the event ordering
//! contract: a structural mutation recomputes layout and resynchronizes the
//! transcoder artifacts before any notification for it becomes observable.
//!
//! Notifications go through an explicit ordered queue the shell drains;
//! a `StructureChanged` is always followed by its `DisplayChanged`.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use arbor_tree::{Point, Tree, TreeEdit, ROOT_ANCHOR};

use crate::buffer::{GatedBuffer, TextEdit, Verdict};
use crate::canvas::{Gesture, GestureEffect, PointerEditor, Viewport};
use crate::errors::EditorError;
use crate::events::ChangeNotice;

/// Delay before the first redraw, giving the shell's surface time to exist.
pub const STARTUP_REDRAW_DELAY: Duration = Duration::from_secs(1);

/// One-shot timer for the deferred initial redraw.
///
/// The only scheduling primitive in the core: the shell polls it from its
/// event loop and the session emits a single `DisplayChanged` when it fires.
#[derive(Debug, Clone, Copy)]
pub struct StartupRedraw {
    due: Instant,
    fired: bool,
}

impl StartupRedraw {
    pub fn arm(now: Instant, delay: Duration) -> Self {
        Self {
            due: now + delay,
            fired: false,
        }
    }

    /// True exactly once, at the first poll past the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.fired || now < self.due {
            return false;
        }
        self.fired = true;
        true
    }
}

/// One user's live editing state: the tree, both editors, and the
/// notification queue for the rendering shell.
#[derive(Debug)]
pub struct Session {
    tree: Tree,
    buffer: GatedBuffer,
    pointer: PointerEditor,
    notices: VecDeque<ChangeNotice>,
    startup: StartupRedraw,
}

impl Session {
    /// Session over the given tree; positions are computed immediately.
    pub fn with_tree(mut tree: Tree, view_center: Point) -> Result<Self, EditorError> {
        tree.construct(ROOT_ANCHOR);
        let buffer = GatedBuffer::new(&tree)?;
        Ok(Self {
            tree,
            buffer,
            pointer: PointerEditor::new(Viewport::new(view_center)),
            notices: VecDeque::new(),
            startup: StartupRedraw::arm(Instant::now(), STARTUP_REDRAW_DELAY),
        })
    }

    /// Session seeded with the small demo tree the application starts with.
    pub fn new(view_center: Point) -> Result<Self, EditorError> {
        Self::with_tree(Self::seed_tree(), view_center)
    }

    fn seed_tree() -> Tree {
        let mut tree = Tree::with_root("a");
        let b = tree.sprout(0).expect("seed tree");
        let c = tree.sprout(0).expect("seed tree");
        let d = tree.sprout(b).expect("seed tree");
        for (node, label) in [(b, "b"), (c, "c"), (d, "d")] {
            tree.set_label(node, label).expect("seed tree");
        }
        tree
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn buffer(&self) -> &GatedBuffer {
        &self.buffer
    }

    pub fn viewport(&self) -> &Viewport {
        self.pointer.viewport()
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        self.pointer.viewport_mut()
    }

    /// Feed one pointer gesture through the pipeline.
    pub fn pointer_input(&mut self, gesture: Gesture) -> Result<(), EditorError> {
        match self.pointer.handle(gesture, &mut self.tree)? {
            GestureEffect::Edited(edit) => {
                tracing::debug!(?edit, "gesture edited structure");
                self.after_structure_change()?;
            }
            GestureEffect::ViewChanged => {
                self.notices.push_back(ChangeNotice::DisplayChanged);
            }
            GestureEffect::Ignored => {}
        }
        Ok(())
    }

    /// Feed one text edit through the gate. Label-only by construction:
    /// an accepted edit never requires layout or recognizer work.
    pub fn text_input(&mut self, edit: &TextEdit) -> Verdict {
        let verdict = self.buffer.commit(edit, &mut self.tree);
        if verdict.is_accepted() {
            self.notices.push_back(ChangeNotice::DisplayChanged);
        }
        verdict
    }

    /// Apply a structural edit arriving from outside the pointer editor.
    pub fn structural_edit(&mut self, edit: &TreeEdit) -> Result<Option<usize>, EditorError> {
        let created = edit.apply(&mut self.tree)?;
        self.after_structure_change()?;
        Ok(created)
    }

    /// Hand out queued notifications in delivery order.
    pub fn drain_notices(&mut self) -> Vec<ChangeNotice> {
        self.notices.drain(..).collect()
    }

    /// Poll the startup timer; emits the deferred initial redraw once.
    pub fn poll_startup(&mut self, now: Instant) {
        if self.startup.poll(now) {
            self.notices.push_back(ChangeNotice::DisplayChanged);
        }
    }

    /// Layout, resynchronize, then notify, in that order.
    fn after_structure_change(&mut self) -> Result<(), EditorError> {
        self.tree.construct(ROOT_ANCHOR);
        self.buffer.resynchronize(&self.tree)?;
        self.notices.push_back(ChangeNotice::StructureChanged);
        self.notices.push_back(ChangeNotice::DisplayChanged);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_starts_synchronized() {
        let session = Session::new(Point::default()).unwrap();
        assert_eq!(session.tree().len(), 4);
        assert_eq!(session.buffer().text(), "(a(b(d))(c))");
    }

    #[test]
    fn test_structural_edit_orders_notices() {
        let mut session = Session::new(Point::default()).unwrap();
        session
            .structural_edit(&TreeEdit::Sprout { parent: 0 })
            .unwrap();

        let notices = session.drain_notices();
        assert_eq!(
            notices,
            vec![ChangeNotice::StructureChanged, ChangeNotice::DisplayChanged]
        );
        assert!(session
            .buffer()
            .recognizer()
            .is_match(session.buffer().text()));
    }

    #[test]
    fn test_text_input_is_display_only() {
        let mut session = Session::new(Point::default()).unwrap();
        let verdict = session.text_input(&TextEdit::insert(2, "x"));
        assert!(verdict.is_accepted());
        assert_eq!(session.drain_notices(), vec![ChangeNotice::DisplayChanged]);
        assert_eq!(session.tree().label(0), "ax");
    }

    #[test]
    fn test_vetoed_text_input_emits_nothing() {
        let mut session = Session::new(Point::default()).unwrap();
        let verdict = session.text_input(&TextEdit::insert(0, ")"));
        assert!(!verdict.is_accepted());
        assert!(session.drain_notices().is_empty());
    }

    #[test]
    fn test_startup_redraw_fires_once() {
        let mut session = Session::new(Point::default()).unwrap();
        let epoch = Instant::now();

        let later = epoch + STARTUP_REDRAW_DELAY + Duration::from_millis(50);
        session.poll_startup(later);
        assert_eq!(session.drain_notices(), vec![ChangeNotice::DisplayChanged]);

        session.poll_startup(later + Duration::from_secs(5));
        assert!(session.drain_notices().is_empty(), "one-shot");
    }

    #[test]
    fn test_removing_root_leaves_working_empty_session() {
        let mut session = Session::new(Point::default()).unwrap();
        session.structural_edit(&TreeEdit::Remove { node: 0 }).unwrap();

        assert!(session.tree().is_empty());
        assert_eq!(session.buffer().text(), "");
        assert!(session.buffer().recognizer().is_match(""));
        assert!(!session.buffer().recognizer().is_match("()"));
    }
}
