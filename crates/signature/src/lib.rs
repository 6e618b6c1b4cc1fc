//! Signature pad stroke engine - smooth variable-width ink from pointer input
//!
//! This crate turns a stream of pointer samples into velocity-weighted
//! Bézier strokes and records them for export and replay:
//! - [`types::Point`] - A timestamped sample, also the persisted point shape
//! - [`bezier`] - Cubic segment fitting and arc-length estimation
//! - [`brush`] - Sliding curve window and velocity-based widths
//! - [`throttle`] - Leading/trailing rate limiter for move samples
//! - [`log`] - Point group storage, JSON interchange and stroke events
//! - [`canvas`] - Drawing capability and a command-recording surface
//! - [`surface`] - CPU raster surface
//! - [`pipeline`] - The signature pad tying it all together
//!
//! Options live in the `signature-config` crate and are re-exported here.

pub mod bezier;
pub mod brush;
pub mod canvas;
pub mod constants;
pub mod error;
pub mod log;
pub mod pipeline;
pub mod surface;
pub mod throttle;
pub mod types;

pub use bezier::*;
pub use brush::*;
pub use canvas::*;
pub use constants::*;
pub use error::*;
pub use log::*;
pub use pipeline::*;
pub use surface::*;
pub use throttle::*;
pub use types::*;

pub use signature_config::{ConfigError, DotSize, PadOptions};
