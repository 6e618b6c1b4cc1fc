//! Ordered storage for recorded point groups.

use crate::error::SignatureError;
use crate::types::{Point, PointGroup};

use super::events::StrokeEvent;

type Listener = Box<dyn Fn(&StrokeEvent) + Send + Sync>;

/// Point groups in chronological stroke order.
///
/// Mutated only by opening a group, appending to the last group, clearing,
/// or wholesale replacement during replay.
#[derive(Default)]
pub struct StrokeStore {
    groups: Vec<PointGroup>,
    listeners: Vec<Listener>,
}

impl std::fmt::Debug for StrokeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrokeStore")
            .field("group_count", &self.groups.len())
            .field("point_count", &self.point_count())
            .field("listener_count", &self.listeners.len())
            .finish()
    }
}

impl StrokeStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn groups(&self) -> &[PointGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of recorded points across all groups.
    pub fn point_count(&self) -> usize {
        self.groups.iter().map(|g| g.points.len()).sum()
    }

    pub fn last_group(&self) -> Option<&PointGroup> {
        self.groups.last()
    }

    /// Last recorded point of the most recent group.
    pub fn last_point(&self) -> Option<&Point> {
        self.groups.last().and_then(|g| g.points.last())
    }

    /// Open a new group and return its index.
    pub fn begin_group(&mut self, color: &str) -> usize {
        self.groups.push(PointGroup::new(color));
        let index = self.groups.len() - 1;
        self.emit(StrokeEvent::Began { group: index });
        index
    }

    /// Append a point to the most recent group.
    ///
    /// Returns false if there is no group to append to.
    pub fn push_point(&mut self, point: Point) -> bool {
        match self.groups.last_mut() {
            Some(group) => {
                group.points.push(point);
                true
            }
            None => false,
        }
    }

    /// Discard every group.
    pub fn clear(&mut self) {
        self.groups.clear();
        self.emit(StrokeEvent::Cleared);
    }

    /// Replace every group with `groups`.
    pub fn replace(&mut self, groups: Vec<PointGroup>) {
        self.groups = groups;
        self.emit(StrokeEvent::Restored {
            groups: self.groups.len(),
        });
    }

    /// Serialize the groups as `[{color, points: [{x, y, time}]}]`.
    pub fn to_json(&self) -> Result<String, SignatureError> {
        Ok(serde_json::to_string(&self.groups)?)
    }

    /// Parse groups from the format produced by [`StrokeStore::to_json`].
    pub fn parse_json(json: &str) -> Result<Vec<PointGroup>, SignatureError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Register a listener for stroke events.
    pub fn add_listener<F>(&mut self, listener: F)
    where
        F: Fn(&StrokeEvent) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub(crate) fn emit(&self, event: StrokeEvent) {
        for listener in &self.listeners {
            listener(&event);
        }
    }
}
