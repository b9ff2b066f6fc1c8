//! Read-only pixel buffer with total darkness sampling.
//!
//! A [`PixelBuffer`] borrows a caller-owned row-major slice of [`Argb`]
//! pixels. Every query is total: reads outside `[0, width) x [0, height)`
//! return opaque white (darkness 0) instead of failing, so renderers can
//! read neighbours at the border without special-casing.

use crate::color::{darkness, Argb};
use crate::error::RenderError;

/// Borrowed row-major pixel grid.
#[derive(Debug, Clone, Copy)]
pub struct PixelBuffer<'a> {
    width: usize,
    height: usize,
    data: &'a [Argb],
}

impl<'a> PixelBuffer<'a> {
    /// Wraps `data` as a `width x height` grid.
    ///
    /// Zero-sized grids are accepted; renderers produce no segments for them.
    /// Returns `RenderError::InvalidDimensions` if `width * height` overflows,
    /// or `RenderError::BufferSizeMismatch` if `data` has the wrong length.
    pub fn new(data: &'a [Argb], width: usize, height: usize) -> Result<Self, RenderError> {
        let expected = width
            .checked_mul(height)
            .ok_or(RenderError::InvalidDimensions)?;
        if data.len() != expected {
            return Err(RenderError::BufferSizeMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Grid width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The underlying row-major pixels.
    pub fn data(&self) -> &'a [Argb] {
        self.data
    }

    /// True if the grid has no pixels.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// True if the point lies within `[0, width) x [0, height)`.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.width as f64 && y < self.height as f64
    }

    /// The pixel at `(x, y)`, or opaque white when out of bounds.
    pub fn safe_pixel(&self, x: isize, y: isize) -> Argb {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return Argb::WHITE;
        }
        self.data[y as usize * self.width + x as usize]
    }

    /// Darkness of the pixel at `(x, y)`; 0 when out of bounds.
    pub fn darkness_at(&self, x: isize, y: isize) -> f64 {
        darkness(self.safe_pixel(x, y))
    }

    /// Bilinearly interpolated darkness at a fractional coordinate.
    ///
    /// Out-of-bounds neighbours contribute white. Non-finite coordinates
    /// sample as white. The result is always in [0, 1].
    pub fn darkness_at_subpixel(&self, x: f64, y: f64) -> f64 {
        if !x.is_finite() || !y.is_finite() {
            return 0.0;
        }
        let fx0 = x.floor();
        let fy0 = y.floor();
        let fx = x - fx0;
        let fy = y - fy0;
        let x0 = fx0 as isize;
        let y0 = fy0 as isize;
        let x1 = x0.saturating_add(1);
        let y1 = y0.saturating_add(1);

        let d00 = self.darkness_at(x0, y0);
        let d10 = self.darkness_at(x1, y0);
        let d01 = self.darkness_at(x0, y1);
        let d11 = self.darkness_at(x1, y1);

        let top = d00 * (1.0 - fx) + d10 * fx;
        let bottom = d01 * (1.0 - fx) + d11 * fx;
        clamp(top * (1.0 - fy) + bottom * fy, 0.0, 1.0)
    }

    /// Mean darkness along row `y`. Returns 0 for an empty grid.
    pub fn mean_row_darkness(&self, y: usize) -> f64 {
        if self.width == 0 {
            return 0.0;
        }
        let sum: f64 = (0..self.width)
            .map(|x| self.darkness_at(x as isize, y as isize))
            .sum();
        sum / self.width as f64
    }

    /// Mean darkness along column `x`. Returns 0 for an empty grid.
    pub fn mean_column_darkness(&self, x: usize) -> f64 {
        if self.height == 0 {
            return 0.0;
        }
        let sum: f64 = (0..self.height)
            .map(|y| self.darkness_at(x as isize, y as isize))
            .sum();
        sum / self.height as f64
    }
}

/// Clamps `value` into `[min, max]`. Total: never panics, even when
/// `min > max` (the lower bound is checked first).
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Evenly spaced offsets `start, start + step, …` while `keep` holds.
///
/// `step` may be negative. Stops once adding `step` no longer changes the
/// value, so a step below float resolution cannot loop forever.
pub fn offsets(start: f64, step: f64, keep: impl Fn(f64) -> bool) -> impl Iterator<Item = f64> {
    std::iter::successors(Some(start), move |&v| {
        let next = v + step;
        (next != v).then_some(next)
    })
    .take_while(move |&v| keep(v))
}
