//! 8-bit ARGB pixel type and luminance functions.
//!
//! Brightness uses the Rec. 601 luma weights (0.299, 0.587, 0.114). The
//! weights are applied as integer per-mille factors so that pure white maps
//! to exactly 1.0 and pure black to exactly 0.0.

use serde::{Deserialize, Serialize};

/// A single pixel with 8-bit alpha, red, green, and blue channels.
///
/// Alpha is carried through from the source image but does not affect
/// brightness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Argb {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Argb {
    /// Opaque white, returned for every out-of-bounds read.
    pub const WHITE: Argb = Argb::opaque(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Argb = Argb::opaque(0, 0, 0);

    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Fully opaque color from red, green, and blue.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { a: 255, r, g, b }
    }

    /// Fully opaque gray with all three channels set to `level`.
    pub const fn gray(level: u8) -> Self {
        Self::opaque(level, level, level)
    }

    /// Unpacks a `0xAARRGGBB` word.
    pub const fn from_u32(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// Packs into a `0xAARRGGBB` word.
    pub const fn to_u32(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }
}

/// Perceived brightness in [0, 1]: `(0.299 R + 0.587 G + 0.114 B) / 255`.
pub fn brightness(color: Argb) -> f64 {
    let weighted = 299 * color.r as u32 + 587 * color.g as u32 + 114 * color.b as u32;
    weighted as f64 / 255_000.0
}

/// Darkness in [0, 1]: `1 - brightness`. White is 0, black is 1.
pub fn darkness(color: Argb) -> f64 {
    1.0 - brightness(color)
}
