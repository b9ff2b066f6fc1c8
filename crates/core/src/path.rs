//! Greedy chaining of raw segments into pen-down polylines.
//!
//! A plotter lifts the pen between polylines, so fewer, longer chains plot
//! faster. Chaining here is local and greedy: the first unused segment
//! starts a chain, and the chain grows by the first unused segment (in input
//! order) whose start touches the chain's current end. No global ordering is
//! attempted.

use log::debug;
use serde::Serialize;

use crate::segment::{LineSegment, Point};

/// Maximum distance between a chain's end and the next segment's start for
/// the two to be joined, in pixels.
pub const CONNECT_TOLERANCE: f64 = 0.1;

/// A chain of segments drawn without lifting the pen.
///
/// Each segment's end lies within [`CONNECT_TOLERANCE`] of the next
/// segment's start. Built only by [`extract_polylines`]; never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    segments: Vec<LineSegment>,
}

impl Polyline {
    /// The segments in drawing order.
    pub fn segments(&self) -> &[LineSegment] {
        &self.segments
    }

    /// Number of segments in the chain.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false for polylines produced by [`extract_polylines`].
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Vertices in drawing order: the first segment's start, then every
    /// segment's end.
    pub fn points(&self) -> Vec<Point> {
        let mut points = Vec::with_capacity(self.segments.len() + 1);
        if let Some(first) = self.segments.first() {
            points.push(first.start());
        }
        points.extend(self.segments.iter().map(LineSegment::end));
        points
    }

    /// Total pen-down length of the chain.
    pub fn length(&self) -> f64 {
        total_length(&self.segments)
    }
}

/// Sum of the Euclidean lengths of `segments`.
pub fn total_length(segments: &[LineSegment]) -> f64 {
    segments.iter().map(LineSegment::length).sum()
}

fn touches(a: Point, b: Point) -> bool {
    a.distance_squared(b) < CONNECT_TOLERANCE * CONNECT_TOLERANCE
}

/// Groups `segments` into polylines by greedy end-to-start chaining.
///
/// O(n²) in the worst case. Deterministic for a given input order; each
/// segment appears in exactly one polyline, and disconnected segments
/// become single-segment polylines.
pub fn extract_polylines(segments: &[LineSegment]) -> Vec<Polyline> {
    let mut used = vec![false; segments.len()];
    let mut polylines = Vec::new();

    for head in 0..segments.len() {
        if used[head] {
            continue;
        }
        used[head] = true;
        let mut chain = vec![segments[head]];
        let mut tail = segments[head].end();

        while let Some(next) =
            (0..segments.len()).find(|&j| !used[j] && touches(tail, segments[j].start()))
        {
            used[next] = true;
            chain.push(segments[next]);
            tail = segments[next].end();
        }

        polylines.push(Polyline { segments: chain });
    }

    debug!(
        "chained {} segments into {} polylines",
        segments.len(),
        polylines.len()
    );
    polylines
}
