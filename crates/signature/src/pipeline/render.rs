//! Dot and curve rendering for the signature pipeline

use std::f64::consts::TAU;

use tracing::trace;

use crate::bezier::Bezier;
use crate::canvas::Canvas2DSurface;
use crate::constants::DRAW_STEPS_PER_PIXEL;
use crate::types::Point;

use super::SignaturePad;

impl<S: Canvas2DSurface> SignaturePad<S> {
    /// Paint a single filled disc of the configured dot size
    pub(crate) fn draw_dot(&mut self, color: &str, point: &Point) {
        let radius = self.options.resolve_dot_size();

        self.surface.begin_path();
        self.draw_curve_segment(point.x, point.y, radius);
        self.surface.close_path();
        self.surface.set_fill_style(color);
        self.surface.fill();
    }

    /// Paint a curve as overlapping discs whose radius follows the widths
    ///
    /// All discs go into one path that is filled once, so a segment is
    /// either fully painted or not at all.
    pub(crate) fn draw_curve(&mut self, color: &str, curve: &Bezier) {
        let max_width = self.brush.settings().max_width;
        let steps = curve_steps(curve.length());

        self.surface.begin_path();
        self.surface.set_fill_style(color);

        for i in 0..steps {
            let t = i as f64 / steps as f64;
            let pos = curve.point_at(t);
            let width = curve.width_at(t, max_width);
            self.draw_curve_segment(pos.x, pos.y, width);
        }

        self.surface.close_path();
        self.surface.fill();

        trace!("SignaturePad::draw_curve: {} discs in {}", steps, color);
    }

    fn draw_curve_segment(&mut self, x: f64, y: f64, width: f64) {
        self.surface.move_to(x, y);
        self.surface.arc(x, y, width, 0.0, TAU, false);
        self.is_empty = false;
    }
}

/// Number of discs painted along a curve of `length` pixels
fn curve_steps(length: f64) -> usize {
    (length.floor() as usize)
        .saturating_mul(DRAW_STEPS_PER_PIXEL)
        .max(1)
}
