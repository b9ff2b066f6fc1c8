//! Validated, immutable settings shared by every renderer.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::RenderError;
use crate::params::{
    ensure_nonzero, ensure_positive, ensure_unit_interval, param_f64, param_u64, param_usize,
};

/// Default spacing between scan lines or seeds, in pixels.
const DEFAULT_LINE_SPACING: f64 = 4.0;
/// Default minimum darkness that triggers drawing.
const DEFAULT_DARKNESS_THRESHOLD: f64 = 0.5;
/// Default PRNG seed for stochastic renderers.
const DEFAULT_SEED: u64 = 42;
/// Default cap on traced path length, in pixels.
const DEFAULT_MAX_LINE_LENGTH: f64 = 50.0;
/// Default walker/sample count for stochastic renderers.
const DEFAULT_ITERATIONS: usize = 1000;

/// Settings for one render call.
///
/// Fields are private and only reachable through validating constructors,
/// so a `RenderSettings` value always satisfies:
/// - `line_spacing > 0`
/// - `darkness_threshold` in [0, 1]
/// - `max_line_length > 0`
/// - `iterations > 0`
///
/// Deserialization goes through [`RenderSettings::from_json`] and therefore
/// validates too.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderSettings {
    line_spacing: f64,
    darkness_threshold: f64,
    seed: u64,
    max_line_length: f64,
    iterations: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            line_spacing: DEFAULT_LINE_SPACING,
            darkness_threshold: DEFAULT_DARKNESS_THRESHOLD,
            seed: DEFAULT_SEED,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl RenderSettings {
    /// Creates validated settings.
    ///
    /// Returns `RenderError::InvalidConfiguration` naming the first field
    /// that is out of range.
    pub fn new(
        line_spacing: f64,
        darkness_threshold: f64,
        seed: u64,
        max_line_length: f64,
        iterations: usize,
    ) -> Result<Self, RenderError> {
        ensure_positive("line_spacing", line_spacing)?;
        ensure_unit_interval("darkness_threshold", darkness_threshold)?;
        ensure_positive("max_line_length", max_line_length)?;
        ensure_nonzero("iterations", iterations)?;
        Ok(Self {
            line_spacing,
            darkness_threshold,
            seed,
            max_line_length,
            iterations,
        })
    }

    /// Builds settings from a JSON object, falling back to defaults for
    /// missing keys, then validates. A key of the wrong JSON type is
    /// rejected rather than defaulted.
    pub fn from_json(params: &Value) -> Result<Self, RenderError> {
        Self::new(
            param_f64(params, "line_spacing", DEFAULT_LINE_SPACING)?,
            param_f64(params, "darkness_threshold", DEFAULT_DARKNESS_THRESHOLD)?,
            param_u64(params, "seed", DEFAULT_SEED)?,
            param_f64(params, "max_line_length", DEFAULT_MAX_LINE_LENGTH)?,
            param_usize(params, "iterations", DEFAULT_ITERATIONS)?,
        )
    }

    /// Same settings with a different seed. Seeds have no range constraint.
    pub fn with_seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }

    /// Pixel distance between scan lines or seed points.
    pub fn line_spacing(&self) -> f64 {
        self.line_spacing
    }

    /// Minimum darkness (inclusive) that is dark enough to draw.
    pub fn darkness_threshold(&self) -> f64 {
        self.darkness_threshold
    }

    /// True if `darkness` meets the threshold.
    pub fn is_dark(&self, darkness: f64) -> bool {
        darkness >= self.darkness_threshold
    }

    /// Seed for stochastic renderers.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Cap on the length of a traced path.
    pub fn max_line_length(&self) -> f64 {
        self.max_line_length
    }

    /// Walker or sample count for stochastic renderers.
    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

impl<'de> Deserialize<'de> for RenderSettings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        RenderSettings::from_json(&value).map_err(serde::de::Error::custom)
    }
}
