#![deny(unsafe_code)]
//! Flow-field renderer.
//!
//! Seeds are laid on a grid `2 * line_spacing` apart (offset by half a cell)
//! and kept only where the image is dark enough. From each seed a path is
//! traced through the Sobel gradient field of the image's darkness: either
//! along the gradient (towards darker tones) or, by default, perpendicular
//! to it so the stroke follows tone contours. Tracing stops when the
//! gradient vanishes, the path leaves the image or a dark region, or the
//! path reaches `max_line_length`. A step too small to move the pen off its
//! current position also ends the path.

pub mod gradient;

use glam::DVec2;
use log::debug;
use plotline_core::params::{ensure_positive, param_bool, param_f64};
use plotline_core::{
    offsets, LineRenderer, LineSegment, PixelBuffer, RenderError, RenderSettings,
};
use serde_json::{json, Value};

pub use gradient::GradientField;

/// Default distance advanced per traced step, in pixels.
const DEFAULT_STEP_SIZE: f64 = 1.0;
/// Gradient magnitude below which a region counts as flat.
const MIN_GRADIENT: f64 = 0.01;
/// Seed grid spacing as a multiple of `line_spacing`.
const SEED_SPACING_FACTOR: f64 = 2.0;

/// Options for [`FlowField`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowOptions {
    pub step_size: f64,
    /// Trace along the gradient instead of along the contour.
    pub follow_gradient: bool,
}

impl Default for FlowOptions {
    fn default() -> Self {
        Self {
            step_size: DEFAULT_STEP_SIZE,
            follow_gradient: false,
        }
    }
}

impl FlowOptions {
    /// Extracts options from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Result<Self, RenderError> {
        Ok(Self {
            step_size: param_f64(params, "step_size", DEFAULT_STEP_SIZE)?,
            follow_gradient: param_bool(params, "follow_gradient", false)?,
        })
    }

    pub fn validate(&self) -> Result<(), RenderError> {
        ensure_positive("step_size", self.step_size)
    }
}

/// Traces strokes through the image's gradient field.
#[derive(Debug, Clone, Default)]
pub struct FlowField {
    options: FlowOptions,
}

impl FlowField {
    /// Returns `RenderError::InvalidConfiguration` if `step_size` is not positive.
    pub fn new(options: FlowOptions) -> Result<Self, RenderError> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn from_json(params: &Value) -> Result<Self, RenderError> {
        Self::new(FlowOptions::from_json(params)?)
    }

    pub fn options(&self) -> &FlowOptions {
        &self.options
    }

    /// Traces one path from `seed`, appending a segment per accepted step.
    fn trace(
        &self,
        pixels: &PixelBuffer<'_>,
        field: &GradientField,
        settings: &RenderSettings,
        seed: DVec2,
        lines: &mut Vec<LineSegment>,
    ) {
        // Steps must stay strictly inside the last row/column.
        let limit = DVec2::new(pixels.width() as f64 - 1.0, pixels.height() as f64 - 1.0);
        let mut at = seed;
        let mut travelled = 0.0;

        while travelled < settings.max_line_length() {
            let gradient = field.sample_nearest(at);
            if gradient.length() < MIN_GRADIENT {
                break;
            }
            let direction = if self.options.follow_gradient {
                gradient
            } else {
                gradient.perp()
            }
            .normalize_or_zero();

            let next = at + direction * self.options.step_size;
            if next == at {
                break;
            }
            if next.x < 0.0 || next.y < 0.0 || next.x >= limit.x || next.y >= limit.y {
                break;
            }
            if !settings.is_dark(pixels.darkness_at_subpixel(next.x, next.y)) {
                break;
            }

            lines.push(LineSegment::from_coords(at.x, at.y, next.x, next.y));
            travelled += at.distance(next);
            at = next;
        }
    }
}

impl LineRenderer for FlowField {
    fn name(&self) -> &'static str {
        "Flow Field"
    }

    fn generate(&self, pixels: &PixelBuffer<'_>, settings: &RenderSettings) -> Vec<LineSegment> {
        let mut lines = Vec::new();
        if pixels.is_empty() {
            return lines;
        }
        let field = GradientField::sobel(pixels);
        let grid = settings.line_spacing() * SEED_SPACING_FACTOR;
        let (w, h) = (pixels.width() as f64, pixels.height() as f64);

        let mut seeds = 0usize;
        for y in offsets(grid / 2.0, grid, |y| y < h) {
            for x in offsets(grid / 2.0, grid, |x| x < w) {
                if settings.is_dark(pixels.darkness_at_subpixel(x, y)) {
                    seeds += 1;
                    self.trace(pixels, &field, settings, DVec2::new(x, y), &mut lines);
                }
            }
        }

        debug!("flow field: {} segments from {seeds} seeds", lines.len());
        lines
    }

    fn params(&self) -> Value {
        json!({
            "step_size": self.options.step_size,
            "follow_gradient": self.options.follow_gradient,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "step_size": {
                "type": "number",
                "default": DEFAULT_STEP_SIZE,
                "min": 0.0,
                "description": "Distance advanced per traced step"
            },
            "follow_gradient": {
                "type": "boolean",
                "default": false,
                "description": "Trace towards darker tones instead of along tone contours"
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotline_core::Argb;

    /// 20x14 ramp, white at x = 0 and black at x = 19.
    fn ramp() -> Vec<Argb> {
        (0..20 * 14)
            .map(|i| Argb::gray((255 - (i % 20) * 255 / 19) as u8))
            .collect()
    }

    fn settings(spacing: f64, threshold: f64, max_len: f64) -> RenderSettings {
        RenderSettings::new(spacing, threshold, 1, max_len, 10).unwrap()
    }

    #[test]
    fn contour_mode_runs_along_the_tone_boundary() {
        let data = ramp();
        let pixels = PixelBuffer::new(&data, 20, 14).unwrap();
        let lines = FlowField::default().generate(&pixels, &settings(2.0, 0.3, 50.0));
        assert!(!lines.is_empty());
        for l in &lines {
            assert_eq!(l.start().x, l.end().x, "not vertical: {l}");
            assert!(l.end().y > l.start().y, "not moving down: {l}");
        }
    }

    #[test]
    fn gradient_mode_runs_towards_darker_tones() {
        let data = ramp();
        let pixels = PixelBuffer::new(&data, 20, 14).unwrap();
        let flow = FlowField::new(FlowOptions {
            follow_gradient: true,
            ..Default::default()
        })
        .unwrap();
        let lines = flow.generate(&pixels, &settings(2.0, 0.3, 50.0));
        assert!(!lines.is_empty());
        for l in &lines {
            assert_eq!(l.start().y, l.end().y, "not horizontal: {l}");
            assert!(l.end().x > l.start().x, "not moving right: {l}");
        }
    }

    #[test]
    fn max_line_length_caps_each_trace() {
        let data = ramp();
        let pixels = PixelBuffer::new(&data, 20, 14).unwrap();
        // Seeds at x = 6, 10, 14, 18 (x = 2 is too light) and y = 2, 6, 10.
        // Each trace stops after the unit step that passes 1.5 pixels.
        let lines = FlowField::default().generate(&pixels, &settings(2.0, 0.3, 1.5));
        assert_eq!(lines.len(), 4 * 3 * 2);
        assert!(lines.iter().all(|l| (l.length() - 1.0).abs() < 1e-12));
    }

    #[test]
    fn step_size_sets_segment_length() {
        let data = ramp();
        let pixels = PixelBuffer::new(&data, 20, 14).unwrap();
        let flow = FlowField::from_json(&json!({"step_size": 2.0})).unwrap();
        let lines = flow.generate(&pixels, &settings(2.0, 0.3, 50.0));
        assert!(!lines.is_empty());
        assert!(lines.iter().all(|l| (l.length() - 2.0).abs() < 1e-12));
    }

    #[test]
    fn flat_images_give_nothing() {
        let black = vec![Argb::BLACK; 100];
        let white = vec![Argb::WHITE; 100];
        for data in [black, white] {
            let pixels = PixelBuffer::new(&data, 10, 10).unwrap();
            assert!(FlowField::default()
                .generate(&pixels, &settings(1.0, 0.5, 50.0))
                .is_empty());
        }
    }

    #[test]
    fn light_region_stops_the_trace() {
        let data = ramp();
        let pixels = PixelBuffer::new(&data, 20, 14).unwrap();
        let flow = FlowField::new(FlowOptions {
            follow_gradient: true,
            ..Default::default()
        })
        .unwrap();
        // Threshold 1.0: only column 19 is black, and no seed lies on it.
        assert!(flow
            .generate(&pixels, &settings(2.0, 1.0, 50.0))
            .is_empty());
    }

    #[test]
    fn rejects_non_positive_step() {
        assert!(matches!(
            FlowField::from_json(&json!({"step_size": 0.0})),
            Err(RenderError::InvalidConfiguration {
                field: "step_size",
                ..
            })
        ));
    }

    #[test]
    fn rejects_mistyped_options() {
        assert!(matches!(
            FlowField::from_json(&json!({"follow_gradient": "yes"})),
            Err(RenderError::InvalidConfiguration {
                field: "follow_gradient",
                ..
            })
        ));
        assert!(matches!(
            FlowField::from_json(&json!({"step_size": [1.0]})),
            Err(RenderError::InvalidConfiguration {
                field: "step_size",
                ..
            })
        ));
    }

    #[test]
    fn step_below_float_resolution_ends_each_trace() {
        let data = ramp();
        let pixels = PixelBuffer::new(&data, 20, 14).unwrap();
        let flow = FlowField::from_json(&json!({"step_size": 1.0e-300})).unwrap();
        let lines = flow.generate(&pixels, &settings(2.0, 0.3, 1.0));
        assert!(lines.iter().all(|l| l.length() > 0.0), "{lines:?}");
        assert!(lines.is_empty());
    }

    #[test]
    fn repeated_calls_are_identical() {
        let data = ramp();
        let pixels = PixelBuffer::new(&data, 20, 14).unwrap();
        let flow = FlowField::default();
        let s = settings(1.5, 0.2, 20.0);
        assert_eq!(flow.generate(&pixels, &s), flow.generate(&pixels, &s));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn endpoints_inside_buffer(
                w in 1usize..24,
                h in 1usize..24,
                levels in prop::collection::vec(any::<u8>(), 576),
                spacing in 0.5_f64..4.0,
                threshold in 0.0_f64..=1.0,
                follow_gradient: bool,
            ) {
                let data: Vec<Argb> = levels[..w * h].iter().map(|&l| Argb::gray(l)).collect();
                let pixels = PixelBuffer::new(&data, w, h).unwrap();
                let flow = FlowField::new(FlowOptions { follow_gradient, ..Default::default() }).unwrap();
                for l in flow.generate(&pixels, &settings(spacing, threshold, 30.0)) {
                    prop_assert!(pixels.contains(l.start().x, l.start().y), "{l}");
                    prop_assert!(pixels.contains(l.end().x, l.end().y), "{l}");
                    prop_assert!(l.length() > 0.0);
                }
            }
        }
    }
}
