//! Events emitted as strokes are captured, cleared or restored.

/// Stroke lifecycle events delivered to registered listeners.
///
/// `group` is the index of the point group in the store.
#[derive(Debug, Clone, PartialEq)]
pub enum StrokeEvent {
    /// A new point group was opened for a stroke.
    Began { group: usize },
    /// The stroke ended; `points` is the number of samples it recorded.
    Ended { group: usize, points: usize },
    /// All groups were discarded.
    Cleared,
    /// The store was replaced wholesale by replayed data.
    Restored { groups: usize },
}
