//! Complete signature pipeline
//!
//! This module provides the stroke engine that connects:
//! - Input handling (begin/move/end samples from the host)
//! - Rate limiting of move samples
//! - Brush engine (curve fitting and velocity-based widths)
//! - Drawing surface (dots and variable-width curves)
//! - Stroke store (capture history for export and replay)
//!
//! Each pad owns all of its state, so any number of pads can live in one
//! process, each attached to its own surface.

mod render;
mod replay;
mod stroke;

use signature_config::PadOptions;
use tracing::info;

use crate::bezier::Bezier;
use crate::brush::{BrushEngine, BrushSettings};
use crate::canvas::Canvas2DSurface;
use crate::error::SignatureError;
use crate::log::{StrokeEvent, StrokeStore};
use crate::throttle::RateLimiter;
use crate::types::{Point, Sample};

/// What the pipeline did with one input sample
#[derive(Debug, Clone, PartialEq)]
pub enum SampleOutcome {
    /// Too close to the previous recorded sample; nothing changed.
    Dropped,
    /// Recorded, but the curve window is still filling.
    Buffered,
    /// First sample of a stroke, drawn as a dot.
    Dot(Point),
    /// Recorded and a curve segment was drawn.
    Curve(Bezier),
    /// Held back by the rate limiter until the next [`SignaturePad::poll`].
    Deferred,
}

/// Signature pad attached to a drawing surface
///
/// Stroke lifecycle:
/// 1. `stroke_begin` opens a point group and draws the first sample as a dot
/// 2. `stroke_move` (rate-limited) or `stroke_update` feeds further samples
/// 3. `stroke_end` records the final sample and closes the stroke
pub struct SignaturePad<S: Canvas2DSurface> {
    pub(crate) surface: S,
    pub(crate) options: PadOptions,
    pub(crate) brush: BrushEngine,
    pub(crate) store: StrokeStore,
    pub(crate) limiter: RateLimiter<Sample>,
    pub(crate) is_empty: bool,
    pub(crate) stroking: bool,
}

impl<S: Canvas2DSurface> SignaturePad<S> {
    /// Attach a pad to `surface`, which is cleared to the background colour
    pub fn new(surface: S, options: PadOptions) -> Result<Self, SignatureError> {
        options.validate()?;
        Ok(Self::attach(surface, options))
    }

    /// Attach a pad with default options
    pub fn with_defaults(surface: S) -> Self {
        Self::attach(surface, PadOptions::default())
    }

    fn attach(surface: S, options: PadOptions) -> Self {
        let mut pad = Self {
            surface,
            brush: BrushEngine::new(BrushSettings::from(&options)),
            store: StrokeStore::new(),
            limiter: RateLimiter::new(options.throttle_ms),
            options,
            is_empty: true,
            stroking: false,
        };
        pad.clear();
        pad
    }

    pub fn options(&self) -> &PadOptions {
        &self.options
    }

    /// Replace the options
    ///
    /// Width settings apply from the next stroke. A changed throttle
    /// interval discards any deferred move sample.
    pub fn set_options(&mut self, options: PadOptions) -> Result<(), SignatureError> {
        options.validate()?;

        self.brush.set_settings(BrushSettings::from(&options));
        if options.throttle_ms != self.options.throttle_ms {
            self.limiter = RateLimiter::new(options.throttle_ms);
        }
        self.options = options;
        Ok(())
    }

    /// Colour used for strokes begun from now on
    pub fn set_pen_color(&mut self, color: impl Into<String>) {
        self.options.pen_color = color.into();
    }

    pub fn pen_color(&self) -> &str {
        &self.options.pen_color
    }

    /// Clear the surface to the background colour and discard all strokes
    ///
    /// Safe to call mid-stroke: the next update re-opens a stroke.
    pub fn clear(&mut self) {
        let (width, height) = (self.surface.width(), self.surface.height());
        self.surface.set_fill_style(&self.options.background_color);
        self.surface.clear_rect(0.0, 0.0, width, height);
        self.surface.fill_rect(0.0, 0.0, width, height);

        self.store.clear();
        self.brush.begin_stroke();
        self.limiter.reset();
        self.is_empty = true;
        self.stroking = false;

        info!("SignaturePad::clear: {}x{} surface reset", width, height);
    }

    /// True until something has been drawn since the last clear
    pub fn is_empty(&self) -> bool {
        self.is_empty
    }

    /// True between `stroke_begin` and `stroke_end`
    pub fn is_stroking(&self) -> bool {
        self.stroking
    }

    /// Register a listener for stroke lifecycle events
    pub fn add_listener<F>(&mut self, listener: F)
    where
        F: Fn(&StrokeEvent) + Send + Sync + 'static,
    {
        self.store.add_listener(listener);
    }

    pub fn store(&self) -> &StrokeStore {
        &self.store
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Detach the pad, returning its surface
    pub fn into_surface(self) -> S {
        self.surface
    }
}
