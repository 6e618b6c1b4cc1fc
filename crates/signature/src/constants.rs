/// Smallest elapsed time used for velocity, in milliseconds.
/// Samples sharing a timestamp get a large but finite velocity.
pub const MIN_ELAPSED_MS: f64 = 1e-3;

/// Number of chords used to approximate a curve's arc length.
pub const CURVE_LENGTH_STEPS: usize = 10;

/// Discs painted per pixel of curve length. One per pixel leaves gaps.
pub const DRAW_STEPS_PER_PIXEL: usize = 2;

/// Size of the sliding window used to fit each curve segment.
pub const CURVE_WINDOW: usize = 4;
