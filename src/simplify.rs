//! Curve simplification (Ramer–Douglas–Peucker).
//!
//! Keeps the fewest vertices such that every dropped point lies within
//! `epsilon` of the chord that replaced it. Both endpoints always survive,
//! and running it twice with the same tolerance changes nothing.

use kurbo::Point;

use crate::error::{RacingLineError, Result};
use crate::geom::{perpendicular_distance, PointSequence};

/// Simplify a sequence, keeping its topology.
///
/// Closed sequences are treated as the open path from their first to their
/// last stored point; the closing segment is never simplified away.
/// Fewer than 3 points are already minimal and come back unchanged.
pub fn simplify(sequence: &PointSequence, epsilon: f64) -> Result<PointSequence> {
    if !epsilon.is_finite() || epsilon <= 0.0 {
        return Err(RacingLineError::invalid(format!(
            "simplify epsilon must be positive, got {epsilon}"
        )));
    }
    let points = sequence.points();
    if points.len() < 3 {
        return Ok(sequence.clone());
    }

    let kept = simplify_indices(points, epsilon);
    let simplified = kept.into_iter().map(|i| points[i]).collect();
    Ok(PointSequence::new(simplified, sequence.topology()))
}

/// Indices of the retained points, in order.
pub fn simplify_indices(points: &[Point], epsilon: f64) -> Vec<usize> {
    match points.len() {
        0 => Vec::new(),
        1 => vec![0],
        n => {
            let mut kept = vec![0];
            split(points, 0, n - 1, epsilon, &mut kept);
            kept
        }
    }
}

/// Emit the retained indices of `(first, last]`.
///
/// The left half is emitted before the right and the split point only
/// once, which is the concatenation of the two sub-results with the
/// shared split vertex dropped.
fn split(points: &[Point], first: usize, last: usize, epsilon: f64, kept: &mut Vec<usize>) {
    let mut max_dist = 0.0;
    let mut index = first;
    for i in (first + 1)..last {
        let d = perpendicular_distance(points[i], points[first], points[last]);
        if d > max_dist {
            max_dist = d;
            index = i;
        }
    }

    if max_dist > epsilon {
        split(points, first, index, epsilon, kept);
        split(points, index, last, epsilon, kept);
    } else {
        kept.push(last);
    }
}
