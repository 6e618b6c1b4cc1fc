//! Stroke intake for the signature pipeline

use tracing::{debug, trace};

use crate::canvas::Canvas2DSurface;
use crate::log::StrokeEvent;
use crate::types::Sample;

use super::{SampleOutcome, SignaturePad};

impl<S: Canvas2DSurface> SignaturePad<S> {
    /// Begin a stroke at `sample`
    ///
    /// Opens a new point group in the current pen colour, resets the curve
    /// window and widths, then records the sample as the first point.
    pub fn stroke_begin(&mut self, sample: Sample) -> SampleOutcome {
        self.flush_pending();

        let group = self.store.begin_group(&self.options.pen_color);
        self.brush.begin_stroke();
        self.stroking = true;
        debug!(
            "SignaturePad::stroke_begin: group {} at ({:.1}, {:.1})",
            group, sample.x, sample.y
        );

        self.stroke_update(sample)
    }

    /// Continue the stroke with a move sample, subject to the throttle
    ///
    /// Samples inside the throttle interval are held back; only the most
    /// recent one survives and runs on a later [`SignaturePad::poll`] or
    /// when the stroke ends.
    pub fn stroke_move(&mut self, sample: Sample) -> SampleOutcome {
        let sample = sample.stamped();
        let now = sample.time.unwrap_or_default();

        match self.limiter.submit(now, sample) {
            Some(sample) => self.stroke_update(sample),
            None => {
                trace!("SignaturePad::stroke_move: deferred until {:?}", self.limiter.deadline());
                SampleOutcome::Deferred
            }
        }
    }

    /// Continue the stroke with a sample, bypassing the throttle
    pub fn stroke_update(&mut self, sample: Sample) -> SampleOutcome {
        // A clear() may have raced with a stroke in progress.
        if self.store.is_empty() {
            return self.stroke_begin(sample);
        }

        let point = sample.to_point();
        let last_point = self.store.last_point().copied();

        if let Some(last) = last_point {
            let distance = point.distance_to(&last);
            if distance <= self.options.min_distance {
                trace!(
                    "SignaturePad::stroke_update: dropped ({:.1}, {:.1}), {:.2}px from last",
                    point.x, point.y, distance
                );
                return SampleOutcome::Dropped;
            }
        }

        let color = self
            .store
            .last_group()
            .map(|g| g.color.clone())
            .unwrap_or_default();
        let curve = self.brush.add_point(point);

        let outcome = match (last_point, curve) {
            (None, _) => {
                self.draw_dot(&color, &point);
                SampleOutcome::Dot(point)
            }
            (Some(_), Some(curve)) => {
                self.draw_curve(&color, &curve);
                SampleOutcome::Curve(curve)
            }
            (Some(_), None) => SampleOutcome::Buffered,
        };

        self.store.push_point(point);
        outcome
    }

    /// End the stroke, recording `sample` as its final point
    ///
    /// [`StrokeEvent::Ended`] is only emitted if a stroke was in progress.
    /// A move sample still held by the throttle is processed first so the
    /// end of a fast stroke is never lost or reordered.
    pub fn stroke_end(&mut self, sample: Sample) -> SampleOutcome {
        self.flush_pending();
        let outcome = self.stroke_update(sample);
        let was_stroking = std::mem::replace(&mut self.stroking, false);
        if !was_stroking {
            return outcome;
        }

        if let Some(group) = self.store.last_group() {
            let event = StrokeEvent::Ended {
                group: self.store.len() - 1,
                points: group.points.len(),
            };
            debug!("SignaturePad::stroke_end: {:?}", event);
            self.store.emit(event);
        }

        outcome
    }

    /// Run a throttled move sample whose deadline has passed
    ///
    /// Hosts call this from their timer or frame loop, ideally at
    /// [`SignaturePad::pending_deadline`].
    pub fn poll(&mut self, now_ms: i64) -> Option<SampleOutcome> {
        self.limiter
            .poll(now_ms)
            .map(|sample| self.stroke_update(sample))
    }

    /// When the held-back move sample becomes due, if there is one
    pub fn pending_deadline(&self) -> Option<i64> {
        self.limiter.deadline()
    }

    fn flush_pending(&mut self) {
        if let Some(sample) = self.limiter.flush() {
            self.stroke_update(sample);
        }
    }
}
