#![deny(unsafe_code)]
//! Core types and traits for the plotline raster-to-vector system.
//!
//! Provides the `LineRenderer` trait, the `PixelBuffer` darkness sampler,
//! `RenderSettings`/`RenderRequest` configuration, the `LineSegment` output
//! primitive, `Polyline` assembly, the `Xorshift64` PRNG, and parameter helpers.

pub mod color;
pub mod error;
pub mod params;
pub mod path;
pub mod pixel;
pub mod prng;
pub mod renderer;
pub mod request;
pub mod segment;
pub mod settings;

pub use color::Argb;
pub use error::RenderError;
pub use path::{extract_polylines, total_length, Polyline};
pub use pixel::{offsets, PixelBuffer};
pub use prng::Xorshift64;
pub use renderer::LineRenderer;
pub use request::RenderRequest;
pub use segment::{LineSegment, Point};
pub use settings::RenderSettings;
