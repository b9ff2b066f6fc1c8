//! Per-pixel Sobel gradient of darkness.
//!
//! Kernels (applied to darkness, so vectors point towards darker pixels):
//!
//! ```text
//!       [-1 0 1]        [-1 -2 -1]
//! Gx =  [-2 0 2]   Gy = [ 0  0  0]
//!       [-1 0 1]        [ 1  2  1]
//! ```
//!
//! Only interior pixels get a gradient; the one-pixel border stays zero.

use glam::DVec2;
use plotline_core::PixelBuffer;

/// Dense row-major gradient vectors, one per pixel.
///
/// Derived once per flow-field render call and dropped with it.
#[derive(Debug, Clone)]
pub struct GradientField {
    width: usize,
    height: usize,
    data: Vec<DVec2>,
}

impl GradientField {
    /// Applies the Sobel operator to the darkness of every interior pixel.
    pub fn sobel(pixels: &PixelBuffer<'_>) -> Self {
        let (width, height) = (pixels.width(), pixels.height());
        let mut data = vec![DVec2::ZERO; width * height];

        for y in 1..height.saturating_sub(1) {
            for x in 1..width.saturating_sub(1) {
                let d = |dx: isize, dy: isize| pixels.darkness_at(x as isize + dx, y as isize + dy);
                let (tl, tm, tr) = (d(-1, -1), d(0, -1), d(1, -1));
                let (ml, mr) = (d(-1, 0), d(1, 0));
                let (bl, bm, br) = (d(-1, 1), d(0, 1), d(1, 1));

                // Kernel sums written as differences of mirrored taps, so
                // flat neighbourhoods give exactly zero.
                let gx = (tr - tl) + 2.0 * (mr - ml) + (br - bl);
                let gy = (bl - tl) + 2.0 * (bm - tm) + (br - tr);
                data[y * width + x] = DVec2::new(gx, gy);
            }
        }

        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Gradient at integer pixel `(x, y)`; zero outside the grid.
    pub fn get(&self, x: usize, y: usize) -> DVec2 {
        if x >= self.width || y >= self.height {
            return DVec2::ZERO;
        }
        self.data[y * self.width + x]
    }

    /// Nearest-neighbour (truncating) lookup at a fractional position.
    ///
    /// Zero at negative coordinates and in the last row/column, where the
    /// Sobel stencil has no support.
    pub fn sample_nearest(&self, at: DVec2) -> DVec2 {
        if !(at.x >= 0.0 && at.y >= 0.0) {
            return DVec2::ZERO;
        }
        let (ix, iy) = (at.x as usize, at.y as usize);
        if ix >= self.width.saturating_sub(1) || iy >= self.height.saturating_sub(1) {
            return DVec2::ZERO;
        }
        self.get(ix, iy)
    }
}
