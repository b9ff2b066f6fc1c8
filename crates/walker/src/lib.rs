#![deny(unsafe_code)]
//! Random-walk stipple renderer.
//!
//! `iterations` walkers each take `steps_per_walker` steps from a uniformly
//! random start. At every step the walker samples the darkness under it and
//! draws with probability `darkness^(1 / darkness_influence)`, provided the
//! darkness also meets the threshold. A drawing step moves `step_size`
//! pixels in a random direction and emits a segment. Otherwise the walker
//! teleports with 10% probability (to escape light regions) or drifts one
//! undrawn step. All randomness comes from an [`Xorshift64`] seeded with
//! `settings.seed()` and owned by the call.

use log::debug;
use plotline_core::params::{ensure_nonzero, ensure_positive, param_f64, param_usize};
use plotline_core::pixel::clamp;
use plotline_core::{
    LineRenderer, LineSegment, PixelBuffer, Point, RenderError, RenderSettings, Xorshift64,
};
use serde_json::{json, Value};

/// Default number of steps per walker.
const DEFAULT_STEPS_PER_WALKER: usize = 100;
/// Default step length in pixels.
const DEFAULT_STEP_SIZE: f64 = 2.0;
/// Default darkness exponent divisor; higher values draw more in mid-tones.
const DEFAULT_DARKNESS_INFLUENCE: f64 = 1.5;
/// Chance that a non-drawing walker jumps to a fresh random position.
const TELEPORT_PROBABILITY: f64 = 0.1;

/// Options for [`RandomWalker`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkerOptions {
    pub steps_per_walker: usize,
    pub step_size: f64,
    pub darkness_influence: f64,
}

impl Default for WalkerOptions {
    fn default() -> Self {
        Self {
            steps_per_walker: DEFAULT_STEPS_PER_WALKER,
            step_size: DEFAULT_STEP_SIZE,
            darkness_influence: DEFAULT_DARKNESS_INFLUENCE,
        }
    }
}

impl WalkerOptions {
    /// Extracts options from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Result<Self, RenderError> {
        Ok(Self {
            steps_per_walker: param_usize(params, "steps_per_walker", DEFAULT_STEPS_PER_WALKER)?,
            step_size: param_f64(params, "step_size", DEFAULT_STEP_SIZE)?,
            darkness_influence: param_f64(
                params,
                "darkness_influence",
                DEFAULT_DARKNESS_INFLUENCE,
            )?,
        })
    }

    pub fn validate(&self) -> Result<(), RenderError> {
        ensure_nonzero("steps_per_walker", self.steps_per_walker)?;
        ensure_positive("step_size", self.step_size)?;
        ensure_positive("darkness_influence", self.darkness_influence)
    }
}

/// Scatters short random strokes, concentrated in dark regions.
#[derive(Debug, Clone, Default)]
pub struct RandomWalker {
    options: WalkerOptions,
}

/// The bounds a walker is confined to: `[0, width - 1] x [0, height - 1]`.
struct Arena {
    width: f64,
    height: f64,
}

impl Arena {
    fn random_point(&self, rng: &mut Xorshift64) -> Point {
        let x = rng.next_below(self.width);
        let y = rng.next_below(self.height);
        Point::new(x, y)
    }

    /// Moves `step` pixels from `from` at `angle`, clamped to the arena.
    fn step(&self, from: Point, angle: f64, step: f64) -> Point {
        Point::new(
            clamp(from.x + angle.cos() * step, 0.0, self.width - 1.0),
            clamp(from.y + angle.sin() * step, 0.0, self.height - 1.0),
        )
    }
}

impl RandomWalker {
    /// Returns `RenderError::InvalidConfiguration` for zero steps or a
    /// non-positive step size or influence.
    pub fn new(options: WalkerOptions) -> Result<Self, RenderError> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn from_json(params: &Value) -> Result<Self, RenderError> {
        Self::new(WalkerOptions::from_json(params)?)
    }

    pub fn options(&self) -> &WalkerOptions {
        &self.options
    }
}

impl LineRenderer for RandomWalker {
    fn name(&self) -> &'static str {
        "Random Walker"
    }

    fn generate(&self, pixels: &PixelBuffer<'_>, settings: &RenderSettings) -> Vec<LineSegment> {
        let mut lines = Vec::new();
        if pixels.is_empty() {
            return lines;
        }
        let arena = Arena {
            width: pixels.width() as f64,
            height: pixels.height() as f64,
        };
        let mut rng = Xorshift64::new(settings.seed());
        let exponent = 1.0 / self.options.darkness_influence;
        let step = self.options.step_size;
        let mut teleports = 0usize;

        for _ in 0..settings.iterations() {
            let mut at = arena.random_point(&mut rng);

            for _ in 0..self.options.steps_per_walker {
                let darkness = pixels.darkness_at_subpixel(at.x, at.y);
                let draw_probability = darkness.powf(exponent);

                if rng.chance(draw_probability) && settings.is_dark(darkness) {
                    let next = arena.step(at, rng.next_angle(), step);
                    // A step clamped straight back onto the border point
                    // draws nothing.
                    if next != at {
                        lines.push(LineSegment::new(at, next));
                    }
                    at = next;
                } else if rng.chance(TELEPORT_PROBABILITY) {
                    teleports += 1;
                    at = arena.random_point(&mut rng);
                } else {
                    at = arena.step(at, rng.next_angle(), step);
                }
            }
        }

        debug!(
            "random walker: {} segments from {} walkers (seed {}, {teleports} teleports)",
            lines.len(),
            settings.iterations(),
            settings.seed()
        );
        lines
    }

    fn params(&self) -> Value {
        json!({
            "steps_per_walker": self.options.steps_per_walker,
            "step_size": self.options.step_size,
            "darkness_influence": self.options.darkness_influence,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "steps_per_walker": {
                "type": "integer",
                "default": DEFAULT_STEPS_PER_WALKER,
                "min": 1,
                "description": "Steps taken by each walker"
            },
            "step_size": {
                "type": "number",
                "default": DEFAULT_STEP_SIZE,
                "min": 0.0,
                "description": "Stroke length per drawing step, in pixels"
            },
            "darkness_influence": {
                "type": "number",
                "default": DEFAULT_DARKNESS_INFLUENCE,
                "min": 0.0,
                "description": "Draw probability is darkness^(1 / darkness_influence)"
            }
        })
    }
}
