//! Discrete curvature and turn direction per point.
//!
//! Curvature here is an unsigned magnitude: `2·sin(θ) / (|v1| + |v2|)`,
//! where θ is the turn angle between the incoming and outgoing edges.
//! For points on a circle of radius R this tends to 1/R as spacing shrinks.
//! Which way the path bends is reported separately by [`turn_directions`],
//! from the sign of the cross product of the same two edges.

use rayon::prelude::*;

use crate::geom::{PointSequence, LENGTH_EPSILON};

/// Curvature at or below this is treated as a straight (1/pixel).
pub const STRAIGHT_CURVATURE: f64 = 1e-9;

/// One curvature value per point, same order as the source sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct CurvatureProfile {
    pub values: Vec<f64>,
}

impl CurvatureProfile {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }
}

/// Side the path bends toward, in a y-up frame.
///
/// On screen (y down) `Left` appears as a clockwise turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// Counter-clockwise: positive cross product.
    Left,
    /// Clockwise: negative cross product.
    Right,
    Straight,
}

impl Turn {
    /// +1 for left, −1 for right, 0 for straight.
    pub fn sign(self) -> f64 {
        match self {
            Turn::Left => 1.0,
            Turn::Right => -1.0,
            Turn::Straight => 0.0,
        }
    }
}

/// Curvature at every point. Endpoints of open sequences are 0.
pub fn estimate(sequence: &PointSequence) -> CurvatureProfile {
    if sequence.is_empty() {
        return CurvatureProfile { values: Vec::new() };
    }
    let values = (0..sequence.len())
        .into_par_iter()
        .map(|i| curvature_at(sequence, i))
        .collect();
    CurvatureProfile { values }
}

/// Turn direction at every point, in the same order as [`estimate`].
pub fn turn_directions(sequence: &PointSequence) -> Vec<Turn> {
    if sequence.is_empty() {
        return Vec::new();
    }
    (0..sequence.len())
        .into_par_iter()
        .map(|i| turn_at(sequence, i))
        .collect()
}

fn curvature_at(sequence: &PointSequence, i: usize) -> f64 {
    let points = sequence.points();
    let (prev, next) = sequence.neighbors(i);
    let v1 = points[i] - points[prev];
    let v2 = points[next] - points[i];
    let (len1, len2) = (v1.hypot(), v2.hypot());
    if len1 < LENGTH_EPSILON || len2 < LENGTH_EPSILON {
        return 0.0;
    }
    let cos_theta = (v1.dot(v2) / (len1 * len2)).clamp(-1.0, 1.0);
    let theta = cos_theta.acos();
    2.0 * theta.sin() / (len1 + len2)
}

fn turn_at(sequence: &PointSequence, i: usize) -> Turn {
    let points = sequence.points();
    let (prev, next) = sequence.neighbors(i);
    let v1 = points[i] - points[prev];
    let v2 = points[next] - points[i];
    let (len1, len2) = (v1.hypot(), v2.hypot());
    if len1 < LENGTH_EPSILON || len2 < LENGTH_EPSILON {
        return Turn::Straight;
    }
    // Normalised cross product = sin of the signed turn angle.
    let sin_theta = v1.cross(v2) / (len1 * len2);
    if sin_theta > 1e-12 {
        Turn::Left
    } else if sin_theta < -1e-12 {
        Turn::Right
    } else {
        Turn::Straight
    }
}
