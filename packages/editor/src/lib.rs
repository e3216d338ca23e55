//! # Arbor Editor
//!
//! The two interactive faces of the tree, and the session that keeps them
//! honest with each other.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ transcoder: tree shape → text + recognizer  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: session + gated buffer + canvas     │
//! │  - Gate text edits against the recognizer   │
//! │  - Translate gestures into structural edits │
//! │  - Order layout → resync → notification     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ shell: drains ChangeNotices, draws          │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The tree is the source of truth**: buffer text and captured labels
//!    are derived views
//! 2. **Structure never changes through text**: every text edit is gated by
//!    the recognizer compiled from the current shape
//! 3. **Derived artifacts refresh before notification**: the shell never
//!    observes a shape ahead of its recognizer
//!
//! ## Usage
//!
//! ```rust,ignore
//! use arbor_editor::{Gesture, Session, TextEdit};
//! use arbor_tree::Point;
//!
//! let mut session = Session::new(Point::new(400.0, 300.0))?;
//!
//! // Canvas side: grow a child under the pointer.
//! session.pointer_input(Gesture::Primary { at: pointer })?;
//!
//! // Text side: edits land only if the shape survives them.
//! session.text_input(&TextEdit::insert(2, "label text"));
//!
//! for notice in session.drain_notices() {
//!     // redraw / relayout per notice
//! }
//! ```

mod buffer;
mod canvas;
mod errors;
mod events;
mod session;

pub use buffer::{GatedBuffer, TextEdit, Verdict, VetoReason};
pub use canvas::{Gesture, GestureEffect, PointerEditor, Viewport, HIT_RADIUS, ZOOM_BASE};
pub use errors::EditorError;
pub use events::ChangeNotice;
pub use session::{Session, StartupRedraw, STARTUP_REDRAW_DELAY};

// Re-export common types for convenience
pub use arbor_transcoder::{serialize, OrderPermutation, Recognizer, StructureError};
pub use arbor_tree::{Point, Tree, TreeEdit, TreeError};
