//! Diagonal hatching at 45° and 135°.
//!
//! 45° lines run down-right. Their start points step down the left edge and
//! then right along the top edge. 135° lines run down-left, starting down
//! the right edge and then leftwards along the top edge. Start points are
//! `line_spacing * spacing_factor` apart along each edge. With the default
//! factor of √2 the perpendicular distance between neighbouring diagonals
//! matches `line_spacing`.

use std::f64::consts::SQRT_2;

use log::debug;
use plotline_core::params::{ensure_positive, param_bool, param_f64};
use plotline_core::{LineRenderer, LineSegment, PixelBuffer, RenderError, RenderSettings};
use serde_json::{json, Value};

use crate::run::{indices, scan_runs};

/// Options for [`DiagonalHatch`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagonalOptions {
    /// Draw down-right (45°) lines.
    pub diagonal_45: bool,
    /// Draw down-left (135°) lines.
    pub diagonal_135: bool,
    /// Edge spacing multiplier applied to `line_spacing`.
    pub spacing_factor: f64,
}

impl Default for DiagonalOptions {
    fn default() -> Self {
        Self {
            diagonal_45: true,
            diagonal_135: true,
            spacing_factor: SQRT_2,
        }
    }
}

impl DiagonalOptions {
    /// Extracts options from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Result<Self, RenderError> {
        let d = Self::default();
        Ok(Self {
            diagonal_45: param_bool(params, "diagonal_45", d.diagonal_45)?,
            diagonal_135: param_bool(params, "diagonal_135", d.diagonal_135)?,
            spacing_factor: param_f64(params, "spacing_factor", d.spacing_factor)?,
        })
    }

    pub fn validate(&self) -> Result<(), RenderError> {
        ensure_positive("spacing_factor", self.spacing_factor)
    }
}

/// Hatches the image with diagonal strokes.
#[derive(Debug, Clone, Default)]
pub struct DiagonalHatch {
    options: DiagonalOptions,
}

impl DiagonalHatch {
    /// Returns `RenderError::InvalidConfiguration` if `spacing_factor` is not positive.
    pub fn new(options: DiagonalOptions) -> Result<Self, RenderError> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn from_json(params: &Value) -> Result<Self, RenderError> {
        Self::new(DiagonalOptions::from_json(params)?)
    }

    pub fn options(&self) -> &DiagonalOptions {
        &self.options
    }
}

impl LineRenderer for DiagonalHatch {
    fn name(&self) -> &'static str {
        "Diagonal Hatch"
    }

    fn generate(&self, pixels: &PixelBuffer<'_>, settings: &RenderSettings) -> Vec<LineSegment> {
        let mut lines = Vec::new();
        if pixels.is_empty() {
            return lines;
        }
        let (w, h) = (pixels.width() as isize, pixels.height() as isize);
        let spacing = settings.line_spacing() * self.options.spacing_factor;

        let down_right = move |(sx, sy): (isize, isize)| {
            (0..)
                .map(move |k| (sx + k, sy + k))
                .take_while(move |&(x, y)| x < w && y < h)
        };
        let down_left = move |(sx, sy): (isize, isize)| {
            (0..)
                .map(move |k| (sx - k, sy + k))
                .take_while(move |&(x, y)| x >= 0 && y < h)
        };

        let mut starts = 0usize;
        if self.options.diagonal_45 {
            let left = indices(0.0, spacing, |y| y < h as f64).map(|y| (0, y));
            // (0, 0) already started the left edge.
            let top = indices(spacing, spacing, |x| x < w as f64)
                .filter(|&x| x > 0)
                .map(|x| (x, 0));
            for start in left.chain(top) {
                scan_runs(pixels, settings, down_right(start), &mut lines);
                starts += 1;
            }
        }
        if self.options.diagonal_135 {
            let right = indices(0.0, spacing, |y| y < h as f64).map(|y| (w - 1, y));
            let top = indices((w - 1) as f64 - spacing, -spacing, |x| x >= 0.0).map(|x| (x, 0));
            for start in right.chain(top) {
                scan_runs(pixels, settings, down_left(start), &mut lines);
                starts += 1;
            }
        }

        debug!(
            "diagonal hatch: {} segments from {starts} diagonals on {w}x{h}",
            lines.len()
        );
        lines
    }

    fn params(&self) -> Value {
        json!({
            "diagonal_45": self.options.diagonal_45,
            "diagonal_135": self.options.diagonal_135,
            "spacing_factor": self.options.spacing_factor,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "diagonal_45": {
                "type": "boolean",
                "default": true,
                "description": "Draw down-right diagonals"
            },
            "diagonal_135": {
                "type": "boolean",
                "default": true,
                "description": "Draw down-left diagonals"
            },
            "spacing_factor": {
                "type": "number",
                "default": SQRT_2,
                "min": 0.0,
                "description": "Edge spacing multiplier applied to line_spacing"
            }
        })
    }
}
