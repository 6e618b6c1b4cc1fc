//! Export and replay of captured strokes

use tracing::{info, warn};

use crate::canvas::Canvas2DSurface;
use crate::error::SignatureError;
use crate::log::StrokeStore;
use crate::types::PointGroup;

use super::SignaturePad;

impl<S: Canvas2DSurface> SignaturePad<S> {
    /// Recorded point groups in stroke order
    pub fn to_data(&self) -> &[PointGroup] {
        self.store.groups()
    }

    /// Clear the pad and redraw `groups`, which then become the stroke data
    ///
    /// Multi-point groups are fed through the curve fitter from a fresh
    /// width state, drawing curves only; single-point groups are drawn as a
    /// dot. Widths come from the stored times, so replay is deterministic.
    ///
    /// The pen colour is left unchanged; it does not take on the colour of
    /// the last replayed group. Call [`SignaturePad::set_pen_color`] to
    /// continue in that colour.
    pub fn from_data(&mut self, groups: Vec<PointGroup>) {
        self.clear();

        for (index, group) in groups.iter().enumerate() {
            match group.points.as_slice() {
                [] => warn!("SignaturePad::from_data: group {} has no points", index),
                [point] => {
                    self.brush.begin_stroke();
                    self.draw_dot(&group.color, point);
                }
                points => {
                    self.brush.begin_stroke();
                    for point in points {
                        if let Some(curve) = self.brush.add_point(*point) {
                            self.draw_curve(&group.color, &curve);
                        }
                    }
                }
            }
        }

        info!(
            "SignaturePad::from_data: restored {} groups, {} points",
            groups.len(),
            groups.iter().map(|g| g.points.len()).sum::<usize>()
        );
        self.store.replace(groups);
    }

    /// Serialize the stroke data as JSON
    pub fn to_json(&self) -> Result<String, SignatureError> {
        self.store.to_json()
    }

    /// Replace the stroke data with groups parsed from JSON
    ///
    /// The pad is left untouched if the JSON is malformed.
    pub fn from_json(&mut self, json: &str) -> Result<(), SignatureError> {
        let groups = StrokeStore::parse_json(json)?;
        self.from_data(groups);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use signature_config::PadOptions;

    use super::*;
    use crate::canvas::RecordingCanvas;
    use crate::types::{Point, Sample};

    fn pad() -> SignaturePad<RecordingCanvas> {
        let options = PadOptions {
            throttle_ms: 0,
            ..Default::default()
        };
        SignaturePad::new(RecordingCanvas::new(100.0, 100.0), options).unwrap()
    }

    fn group(color: &str, points: &[(f64, f64, i64)]) -> PointGroup {
        PointGroup {
            color: color.to_string(),
            points: points.iter().map(|&(x, y, t)| Point::new(x, y, t)).collect(),
        }
    }

    #[test]
    fn test_from_data_replaces_store() {
        let mut pad = pad();
        pad.stroke_begin(Sample::at(50.0, 50.0, 0));

        let groups = vec![
            group("red", &[(0.0, 0.0, 0), (10.0, 0.0, 10), (20.0, 0.0, 20)]),
            group("blue", &[(5.0, 5.0, 30)]),
        ];
        pad.from_data(groups.clone());

        assert_eq!(pad.to_data(), groups.as_slice());
        assert!(!pad.is_empty());
        // Replay leaves the pen colour alone
        assert_eq!(pad.pen_color(), "black");
    }

    #[test]
    fn test_from_data_draws_curves_and_single_dots() {
        let mut pad = pad();
        pad.surface_mut().take_commands();

        pad.from_data(vec![
            group(
                "red",
                &[(0.0, 0.0, 0), (10.0, 0.0, 10), (20.0, 0.0, 20), (30.0, 0.0, 30)],
            ),
            group("blue", &[(5.0, 5.0, 40)]),
        ]);

        let fills = pad.surface().fills();
        // Two curves for the four-point group, no leading dot, then the tap
        assert_eq!(fills.len(), 3);
        assert!(fills[..2].iter().all(|f| f.color == "red" && f.discs.len() > 1));
        assert_eq!(fills[2].color, "blue");
        assert_eq!(fills[2].discs.len(), 1);
    }

    #[test]
    fn test_from_data_skips_empty_groups() {
        let mut pad = pad();
        pad.surface_mut().take_commands();
        pad.from_data(vec![group("red", &[])]);

        assert!(pad.surface().fills().is_empty());
        assert!(pad.is_empty());
        assert_eq!(pad.to_data().len(), 1);
    }

    #[test]
    fn test_stroke_after_replay_appends_new_group() {
        let mut pad = pad();
        pad.from_data(vec![group("red", &[(0.0, 0.0, 0), (10.0, 0.0, 10)])]);
        pad.stroke_begin(Sample::at(50.0, 50.0, 100));

        assert_eq!(pad.to_data().len(), 2);
        assert_eq!(pad.to_data()[1].color, "black");
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        let mut pad = pad();
        pad.stroke_begin(Sample::at(1.0, 1.0, 0));

        assert!(matches!(
            pad.from_json("{not json"),
            Err(SignatureError::Json(_))
        ));
        assert_eq!(pad.to_data().len(), 1);
    }

    #[test]
    fn test_json_round_trip() {
        let mut original = pad();
        original.stroke_begin(Sample::at(0.0, 0.0, 0));
        original.stroke_update(Sample::at(12.5, 3.25, 16));
        original.stroke_end(Sample::at(25.0, 7.0, 33));

        let json = original.to_json().unwrap();
        let mut restored = pad();
        restored.from_json(&json).unwrap();

        assert_eq!(restored.to_data(), original.to_data());
    }

    #[test]
    fn test_from_data_tolerates_extreme_timestamps() {
        let mut pad = pad();
        pad.from_data(vec![group(
            "black",
            &[
                (0.0, 0.0, i64::MIN),
                (10.0, 0.0, i64::MAX),
                (20.0, 0.0, 0),
                (30.0, 0.0, i64::MAX),
            ],
        )]);

        assert!(!pad.is_empty());
        assert!(pad
            .surface()
            .fills()
            .iter()
            .flat_map(|f| f.discs.iter())
            .all(|d| d.radius.is_finite() && d.x.is_finite()));
    }
}
