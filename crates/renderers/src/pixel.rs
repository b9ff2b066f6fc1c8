//! Conversions between RGBA8 byte buffers and plotline types.
//!
//! This module is always available (no feature gate) so that callers with
//! their own image decoding can still feed renderers and draw previews.

use plotline_core::{Argb, LineSegment, Point};

/// Packs an RGBA8 byte buffer into [`Argb`] pixels.
///
/// Trailing bytes that do not form a whole pixel are ignored.
pub fn rgba_to_argb(rgba: &[u8]) -> Vec<Argb> {
    rgba.chunks_exact(4)
        .map(|px| Argb::new(px[3], px[0], px[1], px[2]))
        .collect()
}

/// Unpacks [`Argb`] pixels into an RGBA8 byte buffer.
pub fn argb_to_rgba(pixels: &[Argb]) -> Vec<u8> {
    pixels.iter().flat_map(|p| [p.r, p.g, p.b, p.a]).collect()
}

/// Draws `segments` as one-pixel black strokes on an opaque white
/// `width x height` canvas, returned as RGBA8 bytes.
///
/// Points are rounded to the nearest pixel and strokes are stepped with a
/// DDA, so zero-length segments still mark their pixel. Segments are clipped
/// to the canvas before stepping.
pub fn rasterize_segments(segments: &[LineSegment], width: usize, height: usize) -> Vec<u8> {
    let mut canvas = vec![Argb::WHITE; width * height];
    let mut plot = |p: Point| {
        let (x, y) = (p.x.round(), p.y.round());
        if x >= 0.0 && y >= 0.0 && (x as usize) < width && (y as usize) < height {
            canvas[y as usize * width + x as usize] = Argb::BLACK;
        }
    };
    let max = Point::new(width as f64 - 1.0, height as f64 - 1.0);

    for s in segments {
        let Some((a, b)) = clip(s.start(), s.end(), max) else {
            continue;
        };
        let steps = (b.x - a.x).abs().max((b.y - a.y).abs()).ceil() as usize;
        if steps == 0 {
            plot(a);
            continue;
        }
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            plot(Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t));
        }
    }

    argb_to_rgba(&canvas)
}

/// Liang-Barsky clip of `a -> b` to `[0, max.x] x [0, max.y]`.
fn clip(a: Point, b: Point, max: Point) -> Option<(Point, Point)> {
    if !(a.x.is_finite() && a.y.is_finite() && b.x.is_finite() && b.y.is_finite()) {
        return None;
    }
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [
        (-dx, a.x),
        (dx, max.x - a.x),
        (-dy, a.y),
        (dy, max.y - a.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
        }
    }
    if t0 > t1 {
        return None;
    }
    let at = |t: f64| Point::new(a.x + dx * t, a.y + dy * t);
    Some((at(t0), at(t1)))
}
