//! Cubic Bézier segment fitted through the middle of four samples

use glam::DVec2;

use crate::constants::CURVE_LENGTH_STEPS;
use crate::types::Point;

/// Start and end stroke width of a curve segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveWidths {
    pub start: f64,
    pub end: f64,
}

/// A cubic Bézier from `start_point` to `end_point` with a width at each end
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bezier {
    pub start_point: Point,
    pub control1: DVec2,
    pub control2: DVec2,
    pub end_point: Point,
    pub start_width: f64,
    pub end_width: f64,
}

impl Bezier {
    /// Fit a segment between `points[1]` and `points[2]`
    ///
    /// The outer samples only shape the tangents, so consecutive segments
    /// join without a kink.
    pub fn from_points(points: &[Point; 4], widths: CurveWidths) -> Self {
        let (_, c2) = control_points(points[0].pos(), points[1].pos(), points[2].pos());
        let (c3, _) = control_points(points[1].pos(), points[2].pos(), points[3].pos());

        Self {
            start_point: points[1],
            control1: c2,
            control2: c3,
            end_point: points[2],
            start_width: widths.start,
            end_width: widths.end,
        }
    }

    /// Position at parameter `t` in [0, 1]
    pub fn point_at(&self, t: f64) -> DVec2 {
        let u = 1.0 - t;
        let (tt, uu) = (t * t, u * u);

        self.start_point.pos() * (uu * u)
            + self.control1 * (3.0 * uu * t)
            + self.control2 * (3.0 * u * tt)
            + self.end_point.pos() * (tt * t)
    }

    /// Disc radius at parameter `t`, eased with `t³` and capped at `max_width`
    pub fn width_at(&self, t: f64, max_width: f64) -> f64 {
        let delta = self.end_width - self.start_width;
        (self.start_width + t * t * t * delta).min(max_width)
    }

    /// Approximate arc length as the sum of [`CURVE_LENGTH_STEPS`] chords
    pub fn length(&self) -> f64 {
        let mut length = 0.0;
        let mut previous = self.point_at(0.0);

        for i in 1..=CURVE_LENGTH_STEPS {
            let current = self.point_at(i as f64 / CURVE_LENGTH_STEPS as f64);
            length += previous.distance(current);
            previous = current;
        }

        length
    }
}

/// Control points on either side of `s2` for the path `s1 → s2 → s3`
///
/// The chord midpoints are shifted so that the point splitting them in
/// proportion to the chord lengths lands on `s2`.
fn control_points(s1: DVec2, s2: DVec2, s3: DVec2) -> (DVec2, DVec2) {
    let m1 = (s1 + s2) / 2.0;
    let m2 = (s2 + s3) / 2.0;

    let l1 = s1.distance(s2);
    let l2 = s2.distance(s3);

    // Three coincident samples: both controls collapse onto s2.
    let k = if l1 + l2 > 0.0 { l2 / (l1 + l2) } else { 0.0 };
    let cm = m2 + (m1 - m2) * k;
    let t = s2 - cm;

    (m1 + t, m2 + t)
}
