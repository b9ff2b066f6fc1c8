//! The `LineRenderer` trait every raster-to-vector strategy implements.
//!
//! The trait is object-safe so renderers can be selected at runtime as
//! `dyn LineRenderer`.

use serde_json::Value;

use crate::pixel::PixelBuffer;
use crate::segment::LineSegment;
use crate::settings::RenderSettings;

/// A strategy that turns a pixel grid into pen strokes.
///
/// `generate` is a pure function of its inputs: the pixel buffer is only
/// read, nothing is cached between calls, and stochastic renderers derive
/// all randomness from `settings.seed()`. Calling it twice with the same
/// buffer and settings returns identical segments.
///
/// Every returned endpoint lies within `[0, width) x [0, height)`. An empty
/// buffer yields no segments.
pub trait LineRenderer {
    /// Human-readable renderer name.
    fn name(&self) -> &'static str;

    /// Produces ordered pen strokes approximating the tones of `pixels`.
    fn generate(&self, pixels: &PixelBuffer<'_>, settings: &RenderSettings) -> Vec<LineSegment>;

    /// Current renderer-specific option values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing renderer-specific options, their types, and defaults.
    fn param_schema(&self) -> Value;
}
