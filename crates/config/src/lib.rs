//! Shared configuration for the signature pad
//!
//! This crate provides the single source of truth for the tunable stroke
//! parameters (width bounds, jitter filter, velocity smoothing, colours and
//! move-sample throttling) along with their defaults and validation.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Default minimum stroke width in pixels
pub const DEFAULT_MIN_WIDTH: f64 = 0.5;

/// Default maximum stroke width in pixels
pub const DEFAULT_MAX_WIDTH: f64 = 2.5;

/// Default jitter filter threshold in pixels
pub const DEFAULT_MIN_DISTANCE: f64 = 5.0;

/// Default weight of the newest velocity sample
pub const DEFAULT_VELOCITY_FILTER_WEIGHT: f64 = 0.7;

/// Default minimum interval between processed move samples, in milliseconds
pub const DEFAULT_THROTTLE_MS: u64 = 16;

/// Default pen colour
pub const DEFAULT_PEN_COLOR: &str = "black";

/// Default background colour (fully transparent)
pub const DEFAULT_BACKGROUND_COLOR: &str = "rgba(0,0,0,0)";

/// Errors reported when options are out of range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Stroke widths must be finite and positive: min={min}, max={max}")]
    InvalidWidth { min: f64, max: f64 },
    #[error("Minimum width {min} exceeds maximum width {max}")]
    InvertedWidthRange { min: f64, max: f64 },
    #[error("Minimum distance must be finite and non-negative: {0}")]
    InvalidMinDistance(f64),
    #[error("Velocity filter weight must be within [0, 1]: {0}")]
    InvalidVelocityFilterWeight(f64),
    #[error("Dot size must be finite and non-negative: {0}")]
    InvalidDotSize(f64),
}

/// Radius used when a stroke is a single tap.
///
/// `Computed` is evaluated once per dot, so a host can vary the tap size
/// over time (e.g. following a zoom level) without reconfiguring the pad.
#[derive(Clone)]
pub enum DotSize {
    Fixed(f64),
    Computed(Arc<dyn Fn() -> f64 + Send + Sync>),
}

impl DotSize {
    /// Wrap a closure as a computed dot size
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn() -> f64 + Send + Sync + 'static,
    {
        Self::Computed(Arc::new(f))
    }

    /// Resolve the radius for the next dot
    pub fn resolve(&self) -> f64 {
        match self {
            DotSize::Fixed(size) => *size,
            DotSize::Computed(f) => f(),
        }
    }
}

impl fmt::Debug for DotSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DotSize::Fixed(size) => f.debug_tuple("Fixed").field(size).finish(),
            DotSize::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<f64> for DotSize {
    fn from(size: f64) -> Self {
        DotSize::Fixed(size)
    }
}

// Only fixed sizes have a wire form; closures stay in-process.
impl Serialize for DotSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DotSize::Fixed(size) => serializer.serialize_f64(*size),
            DotSize::Computed(_) => Err(serde::ser::Error::custom(
                "computed dot size cannot be serialized",
            )),
        }
    }
}

impl<'de> Deserialize<'de> for DotSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(DotSize::Fixed)
    }
}

/// Options recognised by the signature pad
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PadOptions {
    /// Lower bound on stroke width (reached at high speed)
    pub min_width: f64,
    /// Upper bound on stroke width (approached at rest)
    pub max_width: f64,
    /// Samples closer than this to the previous recorded sample are dropped
    pub min_distance: f64,
    /// Weight of the newest velocity in the exponential filter
    pub velocity_filter_weight: f64,
    /// Tap radius; `None` means the midpoint of the width bounds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dot_size: Option<DotSize>,
    pub pen_color: String,
    pub background_color: String,
    /// Minimum milliseconds between processed move samples (0 disables)
    #[serde(rename = "throttle")]
    pub throttle_ms: u64,
}

impl Default for PadOptions {
    fn default() -> Self {
        Self {
            min_width: DEFAULT_MIN_WIDTH,
            max_width: DEFAULT_MAX_WIDTH,
            min_distance: DEFAULT_MIN_DISTANCE,
            velocity_filter_weight: DEFAULT_VELOCITY_FILTER_WEIGHT,
            dot_size: None,
            pen_color: DEFAULT_PEN_COLOR.to_string(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            throttle_ms: DEFAULT_THROTTLE_MS,
        }
    }
}

impl PadOptions {
    /// Width a stroke starts with before any velocity is known
    pub fn mid_width(&self) -> f64 {
        (self.min_width + self.max_width) / 2.0
    }

    /// Radius for the next dot
    pub fn resolve_dot_size(&self) -> f64 {
        match &self.dot_size {
            Some(dot_size) => dot_size.resolve(),
            None => self.mid_width(),
        }
    }

    /// Check that every option is within its legal range
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.min_width, self.max_width);
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || max <= 0.0 {
            return Err(ConfigError::InvalidWidth { min, max });
        }
        if min > max {
            return Err(ConfigError::InvertedWidthRange { min, max });
        }
        if !self.min_distance.is_finite() || self.min_distance < 0.0 {
            return Err(ConfigError::InvalidMinDistance(self.min_distance));
        }
        if !(0.0..=1.0).contains(&self.velocity_filter_weight) {
            return Err(ConfigError::InvalidVelocityFilterWeight(
                self.velocity_filter_weight,
            ));
        }
        if let Some(DotSize::Fixed(size)) = self.dot_size {
            if !size.is_finite() || size < 0.0 {
                return Err(ConfigError::InvalidDotSize(size));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = PadOptions::default();
        assert_eq!(options.min_width, 0.5);
        assert_eq!(options.max_width, 2.5);
        assert_eq!(options.min_distance, 5.0);
        assert_eq!(options.velocity_filter_weight, 0.7);
        assert_eq!(options.throttle_ms, 16);
        assert_eq!(options.pen_color, "black");
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_dot_size_defaults_to_mid_width() {
        let options = PadOptions::default();
        assert_eq!(options.resolve_dot_size(), 1.5);
    }

    #[test]
    fn test_dot_size_computed_is_evaluated_each_time() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);
        let options = PadOptions {
            dot_size: Some(DotSize::computed(move || {
                calls_clone.fetch_add(1, Ordering::SeqCst) as f64 + 1.0
            })),
            ..Default::default()
        };

        assert_eq!(options.resolve_dot_size(), 1.0);
        assert_eq!(options.resolve_dot_size(), 2.0);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_validate_rejects_inverted_widths() {
        let options = PadOptions {
            min_width: 3.0,
            max_width: 1.0,
            ..Default::default()
        };
        assert_eq!(
            options.validate(),
            Err(ConfigError::InvertedWidthRange { min: 3.0, max: 1.0 })
        );
    }

    #[test]
    fn test_validate_rejects_bad_weight_and_distance() {
        let options = PadOptions {
            velocity_filter_weight: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(ConfigError::InvalidVelocityFilterWeight(_))
        ));

        let options = PadOptions {
            min_distance: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(ConfigError::InvalidMinDistance(_))
        ));

        let options = PadOptions {
            dot_size: Some(DotSize::Fixed(f64::NAN)),
            ..Default::default()
        };
        assert!(matches!(options.validate(), Err(ConfigError::InvalidDotSize(_))));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let options: PadOptions =
            serde_json::from_str(r#"{"minWidth": 1.0, "throttle": 0, "dotSize": 4}"#).unwrap();
        assert_eq!(options.min_width, 1.0);
        assert_eq!(options.max_width, 2.5);
        assert_eq!(options.throttle_ms, 0);
        assert_eq!(options.resolve_dot_size(), 4.0);
    }

    #[test]
    fn test_computed_dot_size_does_not_serialize() {
        let options = PadOptions {
            dot_size: Some(DotSize::computed(|| 2.0)),
            ..Default::default()
        };
        assert!(serde_json::to_string(&options).is_err());
    }
}
