//! Run-length threshold scanning along a pixel path.

use plotline_core::{offsets, LineSegment, PixelBuffer, Point, RenderSettings};

/// Walks `path` and appends one segment per maximal run of dark pixels.
///
/// A run spans from its first dark pixel to its last; a run of a single
/// pixel yields a zero-length dot. Returns the number of segments appended.
pub(crate) fn scan_runs<I>(
    pixels: &PixelBuffer<'_>,
    settings: &RenderSettings,
    path: I,
    out: &mut Vec<LineSegment>,
) -> usize
where
    I: IntoIterator<Item = (isize, isize)>,
{
    let before = out.len();
    let mut run: Option<(Point, Point)> = None;

    for (x, y) in path {
        let here = Point::new(x as f64, y as f64);
        if settings.is_dark(pixels.darkness_at(x, y)) {
            run = Some(match run {
                Some((start, _)) => (start, here),
                None => (here, here),
            });
        } else if let Some((start, end)) = run.take() {
            out.push(LineSegment::new(start, end));
        }
    }
    if let Some((start, end)) = run {
        out.push(LineSegment::new(start, end));
    }

    out.len() - before
}

/// Pixel indices `floor(start), floor(start ± step), …` while `keep` holds.
///
/// A step shorter than one pixel advances one pixel at a time, so no index
/// is produced twice and tiny spacings stay bounded by the image size.
pub(crate) fn indices(
    start: f64,
    step: f64,
    keep: impl Fn(f64) -> bool,
) -> impl Iterator<Item = isize> {
    let step = if step.abs() < 1.0 { step.signum() } else { step };
    offsets(start, step, keep).map(|v| v.floor() as isize)
}
