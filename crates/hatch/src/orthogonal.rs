//! Horizontal and vertical hatching.
//!
//! Rows are scanned top to bottom and columns left to right, `line_spacing`
//! pixels apart. With adaptive spacing the gap after each scanned line grows
//! as that line gets lighter: `line_spacing * (1 + (1 - mean_darkness) * 2)`,
//! so dark regions receive up to three times as many lines as white ones.
//! Each scanned row or column is visited at most once, however small the
//! spacing.

use log::debug;
use plotline_core::params::param_bool;
use plotline_core::{LineRenderer, LineSegment, PixelBuffer, RenderError, RenderSettings};
use serde_json::{json, Value};

use crate::run::scan_runs;

/// Options for [`OrthogonalHatch`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthogonalOptions {
    /// Scan rows.
    pub horizontal: bool,
    /// Scan columns.
    pub vertical: bool,
    /// Widen the gap after light rows/columns.
    pub adaptive: bool,
}

impl Default for OrthogonalOptions {
    fn default() -> Self {
        Self {
            horizontal: true,
            vertical: true,
            adaptive: false,
        }
    }
}

impl OrthogonalOptions {
    /// Extracts options from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Result<Self, RenderError> {
        let d = Self::default();
        Ok(Self {
            horizontal: param_bool(params, "horizontal", d.horizontal)?,
            vertical: param_bool(params, "vertical", d.vertical)?,
            adaptive: param_bool(params, "adaptive", d.adaptive)?,
        })
    }
}

/// Hatches the image with axis-aligned strokes.
#[derive(Debug, Clone, Default)]
pub struct OrthogonalHatch {
    options: OrthogonalOptions,
}

impl OrthogonalHatch {
    pub fn new(options: OrthogonalOptions) -> Self {
        Self { options }
    }

    pub fn from_json(params: &Value) -> Result<Self, RenderError> {
        Ok(Self::new(OrthogonalOptions::from_json(params)?))
    }

    pub fn options(&self) -> &OrthogonalOptions {
        &self.options
    }

    /// Indices of the rows (or columns) to scan along an axis of `extent`
    /// pixels. `mean_darkness` gives the average darkness of a scanned line
    /// and is only consulted in adaptive mode.
    fn scan_indices(
        &self,
        extent: usize,
        settings: &RenderSettings,
        mean_darkness: impl Fn(usize) -> f64,
    ) -> Vec<usize> {
        let mut indices = Vec::new();
        let mut spacing = settings.line_spacing();
        let mut at = 0.0_f64;

        while at < extent as f64 {
            let index = at as usize;
            indices.push(index);
            if self.options.adaptive {
                spacing = settings.line_spacing() * (1.0 + (1.0 - mean_darkness(index)) * 2.0);
            }
            // Never land on the same index twice.
            at = (at + spacing).max(index as f64 + 1.0);
        }
        indices
    }
}

impl LineRenderer for OrthogonalHatch {
    fn name(&self) -> &'static str {
        "Orthogonal Hatch"
    }

    fn generate(&self, pixels: &PixelBuffer<'_>, settings: &RenderSettings) -> Vec<LineSegment> {
        let mut lines = Vec::new();
        if pixels.is_empty() {
            return lines;
        }
        let (w, h) = (pixels.width(), pixels.height());

        if self.options.horizontal {
            for row in self.scan_indices(h, settings, |y| pixels.mean_row_darkness(y)) {
                let y = row as isize;
                scan_runs(pixels, settings, (0..w as isize).map(|x| (x, y)), &mut lines);
            }
        }
        let horizontal = lines.len();

        if self.options.vertical {
            for col in self.scan_indices(w, settings, |x| pixels.mean_column_darkness(x)) {
                let x = col as isize;
                scan_runs(pixels, settings, (0..h as isize).map(|y| (x, y)), &mut lines);
            }
        }

        debug!(
            "orthogonal hatch: {horizontal} horizontal + {} vertical segments on {w}x{h}",
            lines.len() - horizontal
        );
        lines
    }

    fn params(&self) -> Value {
        json!({
            "horizontal": self.options.horizontal,
            "vertical": self.options.vertical,
            "adaptive": self.options.adaptive,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "horizontal": {
                "type": "boolean",
                "default": true,
                "description": "Scan rows"
            },
            "vertical": {
                "type": "boolean",
                "default": true,
                "description": "Scan columns"
            },
            "adaptive": {
                "type": "boolean",
                "default": false,
                "description": "Space lines further apart after light rows/columns"
            }
        })
    }
}
