use serde::{Deserialize, Serialize};

/// Notification handed to the rendering shell, in delivery order.
///
/// A `StructureChanged` is only enqueued after layout and transcoder
/// artifacts have been refreshed, and its `DisplayChanged` follows it in the
/// same drain; the shell never observes a shape whose recognizer lags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeNotice {
    /// Node count or parent/child relationships changed.
    StructureChanged,

    /// Redraw only: pan, zoom, or refreshed buffer/label content.
    DisplayChanged,
}
