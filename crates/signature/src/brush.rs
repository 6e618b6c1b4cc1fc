//! Brush engine for curve generation
//!
//! The brush engine keeps a sliding window of the last four samples and a
//! smoothed velocity. Each sample past the second yields one cubic segment
//! whose end widths shrink as the pen speeds up.

use std::collections::VecDeque;

use signature_config::PadOptions;
use tracing::trace;

use crate::bezier::{Bezier, CurveWidths};
use crate::constants::CURVE_WINDOW;
use crate::types::Point;

/// Width parameters the engine needs from the pad options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushSettings {
    pub min_width: f64,
    pub max_width: f64,
    pub velocity_filter_weight: f64,
}

impl From<&PadOptions> for BrushSettings {
    fn from(options: &PadOptions) -> Self {
        Self {
            min_width: options.min_width,
            max_width: options.max_width,
            velocity_filter_weight: options.velocity_filter_weight,
        }
    }
}

impl BrushSettings {
    /// Width a stroke starts at
    pub fn initial_width(&self) -> f64 {
        (self.min_width + self.max_width) / 2.0
    }

    /// Width for a given smoothed velocity, floored at `min_width`
    pub fn width_for_velocity(&self, velocity: f64) -> f64 {
        (self.max_width / (velocity + 1.0)).max(self.min_width)
    }
}

/// Brush engine that fits curves to incoming points
pub struct BrushEngine {
    /// Settings of the stroke in progress
    settings: BrushSettings,
    /// Replacement settings, applied by the next `begin_stroke`
    pending: Option<BrushSettings>,
    /// Most recent points, at most [`CURVE_WINDOW`]
    last_points: VecDeque<Point>,
    last_velocity: f64,
    last_width: f64,
}

impl BrushEngine {
    pub fn new(settings: BrushSettings) -> Self {
        Self {
            settings,
            pending: None,
            last_points: VecDeque::with_capacity(CURVE_WINDOW),
            last_velocity: 0.0,
            last_width: settings.initial_width(),
        }
    }

    /// Settings the current stroke is drawn with
    pub fn settings(&self) -> &BrushSettings {
        &self.settings
    }

    /// Replace the settings; takes effect from the next stroke
    pub fn set_settings(&mut self, settings: BrushSettings) {
        self.pending = Some(settings);
    }

    /// Start a new stroke
    pub fn begin_stroke(&mut self) {
        if let Some(settings) = self.pending.take() {
            self.settings = settings;
        }
        self.last_points.clear();
        self.last_velocity = 0.0;
        self.last_width = self.settings.initial_width();
    }

    /// Number of points currently buffered
    pub fn buffered(&self) -> usize {
        self.last_points.len()
    }

    pub fn last_velocity(&self) -> f64 {
        self.last_velocity
    }

    pub fn last_width(&self) -> f64 {
        self.last_width
    }

    /// Add a point and return a curve once enough points are buffered
    ///
    /// The third point of a stroke duplicates the first at the front of the
    /// window, so the first segment appears one sample earlier.
    pub fn add_point(&mut self, point: Point) -> Option<Bezier> {
        self.last_points.push_back(point);

        if self.last_points.len() <= 2 {
            return None;
        }

        if self.last_points.len() == 3 {
            let first = self.last_points[0];
            self.last_points.push_front(first);
        }

        let window = [
            self.last_points[0],
            self.last_points[1],
            self.last_points[2],
            self.last_points[3],
        ];
        let widths = self.calculate_curve_widths(&window[1], &window[2]);
        let curve = Bezier::from_points(&window, widths);

        self.last_points.pop_front();

        trace!(
            "BrushEngine::add_point: curve ({:.1}, {:.1}) -> ({:.1}, {:.1}), widths {:.3} -> {:.3}",
            curve.start_point.x,
            curve.start_point.y,
            curve.end_point.x,
            curve.end_point.y,
            widths.start,
            widths.end
        );

        Some(curve)
    }

    /// Smooth the velocity between two points and derive the segment widths
    pub fn calculate_curve_widths(&mut self, start: &Point, end: &Point) -> CurveWidths {
        let weight = self.settings.velocity_filter_weight;
        let velocity = weight * end.velocity_from(start) + (1.0 - weight) * self.last_velocity;
        let new_width = self.settings.width_for_velocity(velocity);

        let widths = CurveWidths {
            start: self.last_width,
            end: new_width,
        };

        self.last_velocity = velocity;
        self.last_width = new_width;

        widths
    }
}
