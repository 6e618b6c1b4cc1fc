use std::time::{SystemTime, UNIX_EPOCH};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::MIN_ELAPSED_MS;

/// A single input sample in surface pixel space
///
/// This is also the persisted shape of a recorded point: `{x, y, time}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// Milliseconds since the Unix epoch
    pub time: i64,
}

impl Point {
    pub fn new(x: f64, y: f64, time: i64) -> Self {
        Self { x, y, time }
    }

    /// Position as a vector
    #[inline]
    pub fn pos(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance_to(&self, other: &Point) -> f64 {
        self.pos().distance(other.pos())
    }

    /// Speed in pixels per millisecond travelled from `start` to `self`
    ///
    /// Elapsed time is floored at [`MIN_ELAPSED_MS`], so coincident or
    /// out-of-order timestamps give a large finite velocity instead of
    /// infinity or NaN.
    pub fn velocity_from(&self, start: &Point) -> f64 {
        let elapsed = self.time as f64 - start.time as f64;
        self.distance_to(start) / elapsed.max(MIN_ELAPSED_MS)
    }
}

/// Raw pointer coordinates handed over by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    /// Device timestamp in milliseconds, if the host provides one
    pub time: Option<i64>,
}

impl Sample {
    /// Sample stamped with the current time at intake
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, time: None }
    }

    /// Sample carrying its own timestamp
    pub fn at(x: f64, y: f64, time: i64) -> Self {
        Self {
            x,
            y,
            time: Some(time),
        }
    }

    /// Fill in a missing timestamp from the system clock
    pub(crate) fn stamped(self) -> Self {
        Self {
            time: Some(self.time.unwrap_or_else(now_ms)),
            ..self
        }
    }

    pub(crate) fn to_point(self) -> Point {
        Point::new(self.x, self.y, self.time.unwrap_or_else(now_ms))
    }
}

/// All samples recorded for one stroke, in capture order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointGroup {
    pub color: String,
    pub points: Vec<Point>,
}

impl PointGroup {
    pub fn new(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            points: Vec::new(),
        }
    }
}

/// Wall-clock milliseconds since the Unix epoch
pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
