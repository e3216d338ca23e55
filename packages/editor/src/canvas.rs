//! # Pointer-Driven Structure Editing
//!
//! Translates discrete pointer gestures into structural edits and view
//! changes. The viewport maps between view space (widget pixels) and the
//! absolute space node positions live in; hit-testing happens in view space
//! with a radius that rescales with zoom, so the clickable halo around a
//! node tracks what is drawn.

use serde::{Deserialize, Serialize};

use arbor_tree::{Point, Tree, TreeEdit, TreeResult};

/// One wheel notch multiplies the zoom scale by this factor.
pub const ZOOM_BASE: f64 = 1.1;

/// Hit radius around a node, in absolute-space units.
pub const HIT_RADIUS: f64 = 20.0;

const INITIAL_SCALE: f64 = 0.5;

/// Mapping between view-space and absolute-space coordinates.
///
/// `scale` is absolute units per view unit; the absolute reference point
/// `abs_center` is what the widget center shows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    abs_center: Point,
    scale: f64,
    view_center: Point,
}

impl Viewport {
    pub fn new(view_center: Point) -> Self {
        Self {
            abs_center: Point::default(),
            scale: INITIAL_SCALE,
            view_center,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn abs_center(&self) -> Point {
        self.abs_center
    }

    pub fn set_abs_center(&mut self, center: Point) {
        self.abs_center = center;
    }

    /// The shell calls this when the widget is laid out or resized.
    pub fn set_view_center(&mut self, center: Point) {
        self.view_center = center;
    }

    /// Absolute point to view point.
    pub fn to_view(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.abs_center.x) / self.scale + self.view_center.x,
            (p.y - self.abs_center.y) / self.scale + self.view_center.y,
        )
    }

    /// View point to absolute point.
    pub fn to_abs(&self, p: Point) -> Point {
        Point::new(
            self.scale * (p.x - self.view_center.x) + self.abs_center.x,
            self.scale * (p.y - self.view_center.y) + self.abs_center.y,
        )
    }

    /// Absolute vector to view vector (reference point ignored).
    pub fn to_view_vec(&self, v: Point) -> Point {
        Point::new(v.x / self.scale, v.y / self.scale)
    }

    /// View vector to absolute vector (reference point ignored).
    pub fn to_abs_vec(&self, v: Point) -> Point {
        Point::new(v.x * self.scale, v.y * self.scale)
    }

    /// Step the zoom scale by `ZOOM_BASE` to the power of `direction`.
    pub fn zoom(&mut self, direction: i32) {
        self.scale *= ZOOM_BASE.powi(direction);
    }

    /// Current hit radius in view-space units.
    pub fn hit_radius(&self) -> f64 {
        HIT_RADIUS / self.scale
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Point::default())
    }
}

/// Discrete pointer/wheel input, in view-space coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Gesture {
    /// Primary button press: grow a child of the node under the pointer.
    Primary { at: Point },

    /// Secondary button press: remove the node under the pointer.
    Secondary { at: Point },

    /// Distinguished-button press that starts a pan.
    GrabStart { at: Point },

    /// Pointer moved while the pan button is held.
    GrabMove { at: Point },

    /// Pan button released.
    GrabEnd,

    /// Wheel step; the sign picks the zoom direction.
    Wheel { direction: i32 },
}

/// What handling a gesture did, for the caller to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEffect {
    /// A structural edit ran against the tree.
    Edited(TreeEdit),
    /// Only the view changed (pan or zoom).
    ViewChanged,
    /// Nothing within reach, or a gesture with no visible effect yet.
    Ignored,
}

#[derive(Debug, Clone, Copy)]
struct Grab {
    pointer: Point,
    abs_center: Point,
}

/// Translates gestures into tree edits and viewport updates.
#[derive(Debug, Clone)]
pub struct PointerEditor {
    viewport: Viewport,
    grab: Option<Grab>,
}

impl PointerEditor {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            grab: None,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Nearest node within the hit radius of `pointer`, lowest index on a
    /// distance tie. `None` when every node is out of reach.
    pub fn hit_test(&self, tree: &Tree, pointer: Point) -> Option<usize> {
        let radius = self.viewport.hit_radius();
        let mut best: Option<(usize, f64)> = None;
        for node in 0..tree.len() {
            let d = self.viewport.to_view(tree.position(node)).distance(pointer);
            if d < radius && best.map_or(true, |(_, bd)| d < bd) {
                best = Some((node, d));
            }
        }
        best.map(|(node, _)| node)
    }

    /// Process one gesture against the tree.
    ///
    /// Structural gestures outside every node's reach are ignored rather
    /// than errors; pan moves without a grab in progress are ignored too.
    pub fn handle(&mut self, gesture: Gesture, tree: &mut Tree) -> TreeResult<GestureEffect> {
        match gesture {
            Gesture::Primary { at } => match self.hit_test(tree, at) {
                Some(node) => {
                    let edit = TreeEdit::Sprout { parent: node };
                    edit.apply(tree)?;
                    tracing::debug!(parent = node, "sprouted child");
                    Ok(GestureEffect::Edited(edit))
                }
                None => Ok(GestureEffect::Ignored),
            },
            Gesture::Secondary { at } => match self.hit_test(tree, at) {
                Some(node) => {
                    let edit = TreeEdit::Remove { node };
                    edit.apply(tree)?;
                    tracing::debug!(node, "removed subtree");
                    Ok(GestureEffect::Edited(edit))
                }
                None => Ok(GestureEffect::Ignored),
            },
            Gesture::GrabStart { at } => {
                self.grab = Some(Grab {
                    pointer: at,
                    abs_center: self.viewport.abs_center(),
                });
                Ok(GestureEffect::Ignored)
            }
            Gesture::GrabMove { at } => match self.grab {
                Some(grab) => {
                    // Keep the grabbed absolute point under the pointer.
                    let displacement = self.viewport.to_abs_vec(Point::new(
                        grab.pointer.x - at.x,
                        grab.pointer.y - at.y,
                    ));
                    self.viewport.set_abs_center(Point::new(
                        grab.abs_center.x + displacement.x,
                        grab.abs_center.y + displacement.y,
                    ));
                    Ok(GestureEffect::ViewChanged)
                }
                None => Ok(GestureEffect::Ignored),
            },
            Gesture::GrabEnd => {
                self.grab = None;
                Ok(GestureEffect::Ignored)
            }
            Gesture::Wheel { direction } => {
                self.viewport.zoom(direction);
                Ok(GestureEffect::ViewChanged)
            }
        }
    }
}

impl Default for PointerEditor {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}
