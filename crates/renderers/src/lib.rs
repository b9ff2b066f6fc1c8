#![deny(unsafe_code)]
//! Renderer registry: maps renderer names to implementations, plus the
//! export and image-boundary helpers shared by front ends.
//!
//! This crate sits between `plotline-core` (which defines the `LineRenderer`
//! trait) and the individual renderer crates (`plotline-hatch`, etc.). Front
//! ends depend on this crate so that name-based dispatch lives in one place.

pub mod export;
pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

use log::debug;
use plotline_circles::ConcentricCircles;
use plotline_core::{
    LineRenderer, LineSegment, PixelBuffer, RenderError, RenderRequest, RenderSettings,
};
use plotline_flow_field::FlowField;
use plotline_hatch::{DiagonalHatch, OrthogonalHatch};
use plotline_walker::RandomWalker;
use serde_json::Value;

pub use export::ExportFormat;

/// All available renderer names.
const RENDERER_NAMES: &[&str] = &["orthogonal", "diagonal", "circles", "flow-field", "walker"];

/// Enumeration of all available line renderers.
///
/// Wraps each renderer and delegates `LineRenderer` trait methods.
/// Use [`RendererKind::from_name`] for string-based construction.
#[derive(Debug, Clone)]
pub enum RendererKind {
    /// Horizontal and vertical hatching.
    Orthogonal(OrthogonalHatch),
    /// 45° and 135° hatching.
    Diagonal(DiagonalHatch),
    /// Broken concentric rings.
    Circles(ConcentricCircles),
    /// Strokes traced through the darkness gradient.
    FlowField(FlowField),
    /// Seeded random-walk stippling.
    Walker(RandomWalker),
}

impl RendererKind {
    /// Constructs a renderer by name from JSON options.
    ///
    /// Returns `RenderError::UnknownRenderer` if the name is not recognized,
    /// or `RenderError::InvalidConfiguration` if an option is out of range.
    pub fn from_name(name: &str, params: &Value) -> Result<Self, RenderError> {
        match name {
            "orthogonal" => Ok(RendererKind::Orthogonal(OrthogonalHatch::from_json(params)?)),
            "diagonal" => Ok(RendererKind::Diagonal(DiagonalHatch::from_json(params)?)),
            "circles" => Ok(RendererKind::Circles(ConcentricCircles::from_json(params)?)),
            "flow-field" => Ok(RendererKind::FlowField(FlowField::from_json(params)?)),
            "walker" => Ok(RendererKind::Walker(RandomWalker::from_json(params)?)),
            _ => Err(RenderError::UnknownRenderer(name.to_string())),
        }
    }

    /// Returns a slice of all recognized renderer names.
    pub fn list_renderers() -> &'static [&'static str] {
        RENDERER_NAMES
    }

    fn inner(&self) -> &dyn LineRenderer {
        match self {
            RendererKind::Orthogonal(r) => r,
            RendererKind::Diagonal(r) => r,
            RendererKind::Circles(r) => r,
            RendererKind::FlowField(r) => r,
            RendererKind::Walker(r) => r,
        }
    }
}

impl LineRenderer for RendererKind {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn generate(&self, pixels: &PixelBuffer<'_>, settings: &RenderSettings) -> Vec<LineSegment> {
        self.inner().generate(pixels, settings)
    }

    fn params(&self) -> Value {
        self.inner().params()
    }

    fn param_schema(&self) -> Value {
        self.inner().param_schema()
    }
}

/// Runs one render request against a pixel buffer.
///
/// A `null` `params` value is treated as `{}`. Errors come only from request
/// validation and renderer construction; the render itself cannot fail.
pub fn render(
    request: &RenderRequest,
    pixels: &PixelBuffer<'_>,
) -> Result<Vec<LineSegment>, RenderError> {
    request.validate()?;
    let empty = Value::Object(Default::default());
    let params = if request.params.is_null() {
        &empty
    } else {
        &request.params
    };
    let renderer = RendererKind::from_name(&request.renderer, params)?;
    debug!(
        "rendering {} ({}) on {}x{}",
        request.renderer,
        renderer.name(),
        pixels.width(),
        pixels.height()
    );
    Ok(renderer.generate(pixels, &request.settings))
}
