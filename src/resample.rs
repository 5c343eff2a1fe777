//! Arc-length resampling of a closed boundary.
//!
//! Boundaries from contour extraction have wildly uneven vertex spacing
//! (long straight runs collapse to two vertices, bends keep dozens).
//! Curvature estimates are only comparable between points when the
//! spacing is uniform, so every boundary is resampled first.

use kurbo::Point;

use crate::error::{RacingLineError, Result};
use crate::geom::{segment_lengths, PointSequence, Topology};

/// Resample a closed polygon to exactly `count` points spaced evenly by
/// arc length, starting at the polygon's first vertex.
///
/// The closing segment (last vertex back to first) is part of the walk.
/// Open input is walked as an open path instead.
pub fn resample(polygon: &PointSequence, count: usize) -> Result<PointSequence> {
    polygon.require(2)?;
    if count == 0 {
        return Err(RacingLineError::invalid("resample count must be at least 1"));
    }

    let points = polygon.points();
    let lengths = segment_lengths(points, polygon.is_closed());

    // cumulative[i] = arc length at the start of segment i.
    let mut cumulative = Vec::with_capacity(lengths.len() + 1);
    cumulative.push(0.0);
    for len in &lengths {
        let last = cumulative[cumulative.len() - 1];
        cumulative.push(last + len);
    }
    let perimeter = cumulative[cumulative.len() - 1];

    let n = points.len();
    let end_point = match polygon.topology() {
        Topology::Closed => points[0],
        Topology::Open => points[n - 1],
    };

    let resampled = (0..count)
        .map(|k| {
            let distance = k as f64 / count as f64 * perimeter;
            point_at(points, &lengths, &cumulative, distance).unwrap_or(end_point)
        })
        .collect();

    Ok(PointSequence::new(resampled, polygon.topology()))
}

/// Point at `distance` along the walk, or `None` past the end.
fn point_at(points: &[Point], lengths: &[f64], cumulative: &[f64], distance: f64) -> Option<Point> {
    let n = points.len();
    // First segment whose end reaches `distance`.
    let seg = cumulative[1..].partition_point(|&end| end < distance);
    if seg >= lengths.len() {
        return None;
    }
    let start = points[seg];
    let end = points[(seg + 1) % n];
    let len = lengths[seg];
    if len <= 0.0 {
        return Some(start);
    }
    let t = ((distance - cumulative[seg]) / len).clamp(0.0, 1.0);
    Some(start.lerp(end, t))
}
