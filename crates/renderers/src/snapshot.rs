//! PNG input decoding and line-preview output.
//!
//! This module is feature-gated behind `png` (default on) so that callers
//! with their own image pipeline can depend on the registry without pulling
//! in the `image` crate. The byte conversions live in [`crate::pixel`].

use std::path::Path;

use log::debug;
use plotline_core::{Argb, LineSegment, RenderError};

use crate::pixel::{rasterize_segments, rgba_to_argb};

/// A decoded source image, ready to wrap in a `PixelBuffer`.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Argb>,
}

/// Decodes an image file into ARGB pixels.
///
/// Returns `RenderError::Image` if the file cannot be opened or decoded.
pub fn load_pixels(path: &Path) -> Result<LoadedImage, RenderError> {
    let img = image::open(path)
        .map_err(|e| RenderError::Image(format!("{}: {e}", path.display())))?
        .to_rgba8();
    let (width, height) = (img.width() as usize, img.height() as usize);
    let pixels = rgba_to_argb(img.as_raw());
    debug!("loaded {} ({width}x{height})", path.display());
    Ok(LoadedImage {
        width,
        height,
        pixels,
    })
}

/// Writes a black-on-white PNG preview of `segments`.
///
/// Returns `RenderError::InvalidDimensions` if the dimensions overflow `u32`,
/// or `RenderError::Image` on encode or write failure.
pub fn write_preview_png(
    segments: &[LineSegment],
    width: usize,
    height: usize,
    path: &Path,
) -> Result<(), RenderError> {
    let w = u32::try_from(width).map_err(|_| RenderError::InvalidDimensions)?;
    let h = u32::try_from(height).map_err(|_| RenderError::InvalidDimensions)?;
    let rgba = rasterize_segments(segments, width, height);
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| RenderError::Image("RGBA buffer size mismatch".into()))?;
    img.save(path)
        .map_err(|e| RenderError::Image(format!("{}: {e}", path.display())))
}
