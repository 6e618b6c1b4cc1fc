//! Capture history for the signature pad.
//!
//! This module provides:
//! - [`StrokeStore`] - Ordered point groups, one per stroke or tap
//! - [`StrokeEvent`] - Lifecycle events for hosts that react to strokes
//!
//! ## Interchange format
//!
//! The store serializes to the same shape it holds in memory:
//!
//! ```text
//! [{"color": "black", "points": [{"x": 10.0, "y": 20.0, "time": 1705847123456}]}]
//! ```
//!
//! Coordinates are surface pixels and `time` is milliseconds since the Unix
//! epoch. Replaying this data reproduces the original curves, since widths
//! derive from the stored times rather than the wall clock.

mod events;
mod storage;

pub use events::StrokeEvent;
pub use storage::StrokeStore;

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::types::{Point, PointGroup};

    fn sample_groups() -> Vec<PointGroup> {
        vec![
            PointGroup {
                color: "black".to_string(),
                points: vec![Point::new(0.0, 0.0, 1), Point::new(10.25, 3.1, 17)],
            },
            PointGroup {
                color: "#ff0000".to_string(),
                points: vec![Point::new(0.1 + 0.2, 1e-7, 40)],
            },
        ]
    }

    #[test]
    fn test_begin_and_push() {
        let mut store = StrokeStore::new();
        assert!(!store.push_point(Point::new(1.0, 1.0, 0)));

        assert_eq!(store.begin_group("blue"), 0);
        assert!(store.push_point(Point::new(1.0, 1.0, 0)));
        assert!(store.push_point(Point::new(9.0, 1.0, 5)));
        assert_eq!(store.begin_group("red"), 1);

        assert_eq!(store.len(), 2);
        assert_eq!(store.point_count(), 2);
        assert_eq!(store.groups()[0].color, "blue");
        assert_eq!(store.last_group().unwrap().color, "red");
        assert!(store.last_point().is_none());
    }

    #[test]
    fn test_json_round_trip_is_exact() {
        let mut store = StrokeStore::new();
        store.replace(sample_groups());

        let json = store.to_json().unwrap();
        let parsed = StrokeStore::parse_json(&json).unwrap();
        assert_eq!(parsed, sample_groups());
    }

    #[test]
    fn test_parse_json_rejects_missing_fields() {
        let result = StrokeStore::parse_json(r#"[{"color": "black", "points": [{"x": 1.0}]}]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_listeners_receive_events() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);

        let mut store = StrokeStore::new();
        store.add_listener(move |event| seen_clone.lock().unwrap().push(event.clone()));

        store.begin_group("black");
        store.clear();
        store.replace(sample_groups());

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                StrokeEvent::Began { group: 0 },
                StrokeEvent::Cleared,
                StrokeEvent::Restored { groups: 2 },
            ]
        );
    }
}
