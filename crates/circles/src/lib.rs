#![deny(unsafe_code)]
//! Concentric circle renderer.
//!
//! Ring centres sit on a square grid `8 * line_spacing` apart, offset by half
//! a cell. Around each centre, circles of radius `radius_increment`,
//! `2 * radius_increment`, … (below `min(max_radius, 10 * line_spacing)`) are
//! sampled at `circle_segments` evenly spaced angles plus a closing sample at
//! 2π. Neighbouring samples that are both inside the image and dark enough
//! are joined, so circles break into arcs over light areas and at the image
//! border.

use std::f64::consts::TAU;

use log::debug;
use plotline_core::params::{ensure_nonzero, ensure_positive, param_f64, param_usize};
use plotline_core::{
    offsets, LineRenderer, LineSegment, PixelBuffer, Point, RenderError, RenderSettings,
};
use serde_json::{json, Value};

/// Default distance between neighbouring rings.
const DEFAULT_RADIUS_INCREMENT: f64 = 3.0;
/// Default upper bound on ring radius.
const DEFAULT_MAX_RADIUS: f64 = 50.0;
/// Default number of chords per ring.
const DEFAULT_CIRCLE_SEGMENTS: usize = 36;
/// Centre grid spacing as a multiple of `line_spacing`.
const GRID_SPACING_FACTOR: f64 = 8.0;
/// Radius cap as a multiple of `line_spacing`.
const RADIUS_CAP_FACTOR: f64 = 10.0;

/// Options for [`ConcentricCircles`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleOptions {
    pub radius_increment: f64,
    pub max_radius: f64,
    pub circle_segments: usize,
}

impl Default for CircleOptions {
    fn default() -> Self {
        Self {
            radius_increment: DEFAULT_RADIUS_INCREMENT,
            max_radius: DEFAULT_MAX_RADIUS,
            circle_segments: DEFAULT_CIRCLE_SEGMENTS,
        }
    }
}

impl CircleOptions {
    /// Extracts options from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Result<Self, RenderError> {
        Ok(Self {
            radius_increment: param_f64(params, "radius_increment", DEFAULT_RADIUS_INCREMENT)?,
            max_radius: param_f64(params, "max_radius", DEFAULT_MAX_RADIUS)?,
            circle_segments: param_usize(params, "circle_segments", DEFAULT_CIRCLE_SEGMENTS)?,
        })
    }

    pub fn validate(&self) -> Result<(), RenderError> {
        ensure_positive("radius_increment", self.radius_increment)?;
        ensure_positive("max_radius", self.max_radius)?;
        ensure_nonzero("circle_segments", self.circle_segments)
    }
}

/// Draws broken concentric rings whose arcs follow the dark regions.
#[derive(Debug, Clone, Default)]
pub struct ConcentricCircles {
    options: CircleOptions,
}

impl ConcentricCircles {
    /// Returns `RenderError::InvalidConfiguration` for a non-positive
    /// increment or radius, or zero segments.
    pub fn new(options: CircleOptions) -> Result<Self, RenderError> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn from_json(params: &Value) -> Result<Self, RenderError> {
        Self::new(CircleOptions::from_json(params)?)
    }

    pub fn options(&self) -> &CircleOptions {
        &self.options
    }

    /// Appends the dark arcs of one circle to `lines`. Samples that round to
    /// the previous point are merged into it.
    fn trace_circle(
        &self,
        pixels: &PixelBuffer<'_>,
        settings: &RenderSettings,
        centre: Point,
        radius: f64,
        lines: &mut Vec<LineSegment>,
    ) {
        let n = self.options.circle_segments;
        let angle_step = TAU / n as f64;
        let mut prev: Option<Point> = None;

        for i in 0..=n {
            let angle = i as f64 * angle_step;
            let here = Point::new(
                centre.x + radius * angle.cos(),
                centre.y + radius * angle.sin(),
            );
            let dark = pixels.contains(here.x, here.y)
                && settings.is_dark(pixels.darkness_at_subpixel(here.x, here.y));
            if !dark {
                prev = None;
                continue;
            }
            match prev {
                Some(from) if from == here => continue,
                Some(from) => lines.push(LineSegment::new(from, here)),
                None => {}
            }
            prev = Some(here);
        }
    }
}

impl LineRenderer for ConcentricCircles {
    fn name(&self) -> &'static str {
        "Concentric Circles"
    }

    fn generate(&self, pixels: &PixelBuffer<'_>, settings: &RenderSettings) -> Vec<LineSegment> {
        let mut lines = Vec::new();
        if pixels.is_empty() {
            return lines;
        }
        let (w, h) = (pixels.width() as f64, pixels.height() as f64);
        let grid = settings.line_spacing() * GRID_SPACING_FACTOR;
        let max_r = self
            .options
            .max_radius
            .min(settings.line_spacing() * RADIUS_CAP_FACTOR);
        let increment = self.options.radius_increment;
        let radii = || offsets(increment, increment, move |r| r < max_r);
        if radii().next().is_none() {
            return lines;
        }

        let mut centres = 0usize;
        for cy in offsets(grid / 2.0, grid, |y| y < h) {
            for cx in offsets(grid / 2.0, grid, |x| x < w) {
                centres += 1;
                let centre = Point::new(cx, cy);
                for radius in radii() {
                    self.trace_circle(pixels, settings, centre, radius, &mut lines);
                }
            }
        }

        debug!(
            "concentric circles: {} segments around {centres} centres",
            lines.len()
        );
        lines
    }

    fn params(&self) -> Value {
        json!({
            "radius_increment": self.options.radius_increment,
            "max_radius": self.options.max_radius,
            "circle_segments": self.options.circle_segments,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "radius_increment": {
                "type": "number",
                "default": DEFAULT_RADIUS_INCREMENT,
                "min": 0.0,
                "description": "Distance between neighbouring rings"
            },
            "max_radius": {
                "type": "number",
                "default": DEFAULT_MAX_RADIUS,
                "min": 0.0,
                "description": "Largest ring radius (also capped at 10 * line_spacing)"
            },
            "circle_segments": {
                "type": "integer",
                "default": DEFAULT_CIRCLE_SEGMENTS,
                "min": 1,
                "description": "Chords per ring"
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotline_core::{extract_polylines, Argb};

    fn settings(spacing: f64, threshold: f64) -> RenderSettings {
        RenderSettings::new(spacing, threshold, 1, 50.0, 10).unwrap()
    }

    fn circles(radius_increment: f64, max_radius: f64, circle_segments: usize) -> ConcentricCircles {
        ConcentricCircles::new(CircleOptions {
            radius_increment,
            max_radius,
            circle_segments,
        })
        .unwrap()
    }

    #[test]
    fn fully_inside_rings_are_closed_chains() {
        // One centre at (8, 8); radii 3 and 6 stay inside the 16x16 image.
        let data = vec![Argb::BLACK; 256];
        let pixels = PixelBuffer::new(&data, 16, 16).unwrap();
        let lines = circles(3.0, 7.0, 12).generate(&pixels, &settings(2.0, 0.5));
        assert_eq!(lines.len(), 24);

        for (ring, radius) in [(0, 3.0), (1, 6.0)] {
            for seg in &lines[ring * 12..(ring + 1) * 12] {
                let r = seg.start().distance(Point::new(8.0, 8.0));
                assert!((r - radius).abs() < 1e-9, "radius {r}, expected {radius}");
            }
        }
        let polylines = extract_polylines(&lines);
        assert_eq!(polylines.len(), 2);
        let first = polylines[0].points();
        assert!(first[0].distance(first[first.len() - 1]) < 1e-9);
    }

    #[test]
    fn radius_capped_by_line_spacing() {
        let data = vec![Argb::BLACK; 64 * 64];
        let pixels = PixelBuffer::new(&data, 64, 64).unwrap();
        // grid 8 * 4 = 32 -> centres at 16 and 48; cap = min(50, 40) = 40,
        // but every ring is also clipped by the border.
        let lines = circles(3.0, 50.0, 36).generate(&pixels, &settings(4.0, 0.5));
        let centres = [(16.0, 16.0), (48.0, 16.0), (16.0, 48.0), (48.0, 48.0)];
        for seg in &lines {
            let nearest = centres
                .iter()
                .map(|&(x, y)| seg.start().distance(Point::new(x, y)))
                .fold(f64::INFINITY, f64::min);
            assert!(nearest < 40.0, "ring radius {nearest} exceeds cap");
        }
    }

    #[test]
    fn border_breaks_rings_without_wraparound() {
        let data = vec![Argb::BLACK; 256];
        let pixels = PixelBuffer::new(&data, 16, 16).unwrap();
        // Radius 9 around (8, 8) leaves the image at all four sides.
        let lines = circles(9.0, 10.0, 36).generate(&pixels, &settings(2.0, 0.5));
        assert!(!lines.is_empty());
        assert!(lines.len() < 36);
        for seg in &lines {
            assert!(pixels.contains(seg.start().x, seg.start().y));
            assert!(pixels.contains(seg.end().x, seg.end().y));
        }
    }

    #[test]
    fn light_half_is_skipped() {
        // Left half white, right half black.
        let data: Vec<Argb> = (0..256)
            .map(|i| if i % 16 < 8 { Argb::WHITE } else { Argb::BLACK })
            .collect();
        let pixels = PixelBuffer::new(&data, 16, 16).unwrap();
        let lines = circles(3.0, 7.0, 36).generate(&pixels, &settings(2.0, 0.5));
        assert!(!lines.is_empty());
        assert!(lines.iter().all(|l| l.start().x > 7.0 && l.end().x > 7.0));
    }

    #[test]
    fn white_image_gives_nothing() {
        let data = vec![Argb::WHITE; 256];
        let pixels = PixelBuffer::new(&data, 16, 16).unwrap();
        assert!(ConcentricCircles::default()
            .generate(&pixels, &settings(1.0, 0.2))
            .is_empty());
    }

    #[test]
    fn rejects_invalid_options() {
        assert!(ConcentricCircles::from_json(&json!({"circle_segments": 0})).is_err());
        assert!(ConcentricCircles::from_json(&json!({"radius_increment": -1.0})).is_err());
        assert!(ConcentricCircles::from_json(&json!({"max_radius": 0})).is_err());
        assert!(ConcentricCircles::from_json(&json!({})).is_ok());
    }

    #[test]
    fn rejects_mistyped_options() {
        for (params, expected) in [
            (json!({"circle_segments": -3}), "circle_segments"),
            (json!({"circle_segments": 12.5}), "circle_segments"),
            (json!({"max_radius": "large"}), "max_radius"),
        ] {
            match ConcentricCircles::from_json(&params) {
                Err(RenderError::InvalidConfiguration { field, .. }) => assert_eq!(field, expected),
                other => panic!("{params}: expected InvalidConfiguration, got {other:?}"),
            }
        }
    }

    #[test]
    fn vanishing_radius_emits_no_zero_length_chords() {
        let data = vec![Argb::BLACK; 256];
        let pixels = PixelBuffer::new(&data, 16, 16).unwrap();
        // One centre at (8, 8); every sample of the 1e-20 ring rounds to it.
        let lines = circles(1.0e-20, 1.5e-20, 36).generate(&pixels, &settings(2.0, 0.5));
        assert!(lines.iter().all(|l| l.length() > 0.0), "{lines:?}");
        assert!(lines.is_empty());
    }

    #[test]
    fn radius_cap_below_increment_gives_nothing() {
        let data = vec![Argb::BLACK; 256];
        let pixels = PixelBuffer::new(&data, 16, 16).unwrap();
        // cap = min(50, 10 * 1e-9) leaves no ring, however many centres.
        let lines = ConcentricCircles::default().generate(&pixels, &settings(1.0e-9, 0.5));
        assert!(lines.is_empty());
    }

    #[test]
    fn tiny_image_is_handled() {
        let data = vec![Argb::BLACK];
        let pixels = PixelBuffer::new(&data, 1, 1).unwrap();
        let lines = ConcentricCircles::default().generate(&pixels, &settings(0.1, 0.5));
        for seg in &lines {
            assert!(pixels.contains(seg.end().x, seg.end().y));
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn endpoints_inside_and_dark(
                w in 1usize..40,
                h in 1usize..40,
                levels in prop::collection::vec(any::<u8>(), 1600),
                spacing in 0.5_f64..4.0,
                threshold in 0.0_f64..=1.0,
            ) {
                let data: Vec<Argb> = levels[..w * h].iter().map(|&l| Argb::gray(l)).collect();
                let pixels = PixelBuffer::new(&data, w, h).unwrap();
                let s = settings(spacing, threshold);
                for l in ConcentricCircles::default().generate(&pixels, &s) {
                    for p in [l.start(), l.end()] {
                        prop_assert!(pixels.contains(p.x, p.y), "{l}");
                        prop_assert!(s.is_dark(pixels.darkness_at_subpixel(p.x, p.y)), "{l}");
                    }
                }
            }
        }
    }
}
