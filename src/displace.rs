//! Lateral displacement of a centerline into a racing line.
//!
//! 1. Raw target per point: `aggressiveness · f(κ, v) · max_displacement`,
//!    with `f = 1 − v / v_top` on bends and 0 on straights. Slower corners
//!    therefore push the line further out.
//! 2. Sign: the line moves toward the outside of the bend, i.e. against
//!    the turn direction along the left normal `(−ty, tx)`.
//! 3. Smoothing: `d_i = (1 − s)·raw_i + s·d_{i−1}`, one sequential pass.
//!    Closed loops seed `d_{−1}` with the last point's raw value; open
//!    paths start at `d_0 = raw_0`.
//! 4. Clamp `|d_i| ≤ max_displacement` and offset the point.

use kurbo::{Point, Vec2};
use rayon::prelude::*;

use crate::config::BehavioralParameters;
use crate::curvature::{turn_directions, CurvatureProfile, STRAIGHT_CURVATURE};
use crate::error::{RacingLineError, Result};
use crate::geom::{unit, PointSequence, Topology};
use crate::speed::SpeedProfile;

/// A displaced sequence and the signed offset applied at each point.
#[derive(Debug, Clone, PartialEq)]
pub struct Displacement {
    pub line: PointSequence,
    /// Signed distance along each point's left normal.
    pub offsets: Vec<f64>,
}

/// Offset every point of `sequence` along its normal.
pub fn displace(
    sequence: &PointSequence,
    curvature: &CurvatureProfile,
    speeds: &SpeedProfile,
    behavior: &BehavioralParameters,
) -> Result<Displacement> {
    sequence.require(3)?;
    behavior.validate()?;
    let n = sequence.len();
    if curvature.len() != n || speeds.len() != n {
        return Err(RacingLineError::invalid(format!(
            "profile lengths ({} curvature, {} speed) do not match {} points",
            curvature.len(),
            speeds.len(),
            n
        )));
    }

    let turns = turn_directions(sequence);
    let raw: Vec<f64> = (0..n)
        .into_par_iter()
        .map(|i| {
            let magnitude = raw_magnitude(curvature.values[i], speeds.ratio(i), behavior);
            -turns[i].sign() * magnitude
        })
        .collect();

    let offsets = smooth(&raw, sequence.topology(), behavior);

    let points = sequence.points();
    let line = (0..n)
        .into_par_iter()
        .map(|i| points[i] + offsets[i] * normal_at(sequence, i))
        .collect::<Vec<Point>>();

    Ok(Displacement {
        line: PointSequence::new(line, sequence.topology()),
        offsets,
    })
}

/// Unsigned raw target; non-decreasing in curvature, never negative.
fn raw_magnitude(curvature: f64, speed_ratio: f64, behavior: &BehavioralParameters) -> f64 {
    if curvature <= STRAIGHT_CURVATURE {
        return 0.0;
    }
    let demand = (1.0 - speed_ratio).clamp(0.0, 1.0);
    behavior.aggressiveness * demand * behavior.max_displacement
}

fn smooth(raw: &[f64], topology: Topology, behavior: &BehavioralParameters) -> Vec<f64> {
    let s = behavior.smoothness;
    let cap = behavior.max_displacement;
    let mut offsets = Vec::with_capacity(raw.len());
    let mut prev = match topology {
        Topology::Closed => raw[raw.len() - 1],
        Topology::Open => raw[0],
    };
    for &r in raw {
        let d = ((1.0 - s) * r + s * prev).clamp(-cap, cap);
        offsets.push(d);
        prev = d;
    }
    offsets
}

/// Left normal of the central-difference tangent; zero where the
/// neighbours coincide.
fn normal_at(sequence: &PointSequence, i: usize) -> Vec2 {
    let points = sequence.points();
    let (prev, next) = sequence.neighbors(i);
    match unit(points[next] - points[prev]) {
        Some(t) => Vec2::new(-t.y, t.x),
        None => Vec2::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PhysicalParameters;
    use crate::curvature::estimate;
    use crate::speed::speed_profile;
    use approx::assert_abs_diff_eq;

    fn run(sequence: &PointSequence, behavior: &BehavioralParameters) -> Displacement {
        let curvature = estimate(sequence);
        let speeds = speed_profile(&curvature, &PhysicalParameters::default()).unwrap();
        displace(sequence, &curvature, &speeds, behavior).unwrap()
    }

    #[test]
    fn straight_line_is_not_displaced() {
        let line = PointSequence::open((0..10).map(|i| Point::new(i as f64 * 3.0, 7.0)).collect());
        for (aggressiveness, smoothness) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.3, 0.8)] {
            let behavior = BehavioralParameters::default()
                .with_aggressiveness(aggressiveness)
                .with_smoothness(smoothness);
            let out = run(&line, &behavior);
            assert!(out.offsets.iter().all(|&d| d == 0.0));
            assert_eq!(out.line, line);
        }
    }

    #[test]
    fn moves_to_outside_of_bend() {
        // Counter-clockwise circle: every point turns left, so the line
        // moves away from the center.
        let circle = PointSequence::closed(
            (0..24)
                .map(|i| {
                    let a = i as f64 / 24.0 * std::f64::consts::TAU;
                    Point::new(10.0 * a.cos(), 10.0 * a.sin())
                })
                .collect(),
        );
        let behavior = BehavioralParameters::default().with_max_displacement(2.0);
        let out = run(&circle, &behavior);
        for (p, q) in circle.points().iter().zip(out.line.points()) {
            assert!(q.to_vec2().hypot() > p.to_vec2().hypot());
        }
        assert!(out.offsets.iter().all(|&d| d < 0.0 && d.abs() <= 2.0));
    }

    #[test]
    fn smoothing_blends_with_previous_point() {
        let raw = [0.0, 4.0, 0.0, 0.0];
        let behavior = BehavioralParameters::default()
            .with_smoothness(0.5)
            .with_max_displacement(10.0);
        let open = smooth(&raw, Topology::Open, &behavior);
        assert_eq!(open, vec![0.0, 2.0, 1.0, 0.5]);

        let raw = [0.0, 0.0, 0.0, 4.0];
        let closed = smooth(&raw, Topology::Closed, &behavior);
        assert_abs_diff_eq!(closed[0], 2.0);
        assert_abs_diff_eq!(closed[1], 1.0);
    }

    #[test]
    fn offsets_respect_cap() {
        let raw = [50.0, -50.0, 50.0];
        let behavior = BehavioralParameters::default()
            .with_smoothness(0.0)
            .with_max_displacement(3.0);
        let out = smooth(&raw, Topology::Open, &behavior);
        assert_eq!(out, vec![3.0, -3.0, 3.0]);
    }

    #[test]
    fn raw_target_grows_with_curvature() {
        let physical = PhysicalParameters::default();
        let behavior = BehavioralParameters::default();
        let mut last = 0.0;
        for i in 0..100 {
            let k = i as f64 * 0.01;
            let ratio = crate::speed::cornering_speed(k, &physical) / physical.top_speed;
            let raw = raw_magnitude(k, ratio, &behavior);
            assert!(raw >= last);
            assert!(raw >= 0.0);
            last = raw;
        }
    }

    #[test]
    fn rejects_mismatched_profiles() {
        let triangle = PointSequence::closed_from_tuples(&[(0.0, 0.0), (4.0, 0.0), (0.0, 3.0)]);
        let curvature = estimate(&triangle);
        let speeds = SpeedProfile {
            values: vec![1.0; 2],
            top_speed: 1.0,
        };
        let err = displace(&triangle, &curvature, &speeds, &BehavioralParameters::default());
        assert!(matches!(err, Err(RacingLineError::InvalidArgument(_))));

        let pair = PointSequence::closed_from_tuples(&[(0.0, 0.0), (4.0, 0.0)]);
        let err = displace(&pair, &estimate(&pair), &speeds, &BehavioralParameters::default());
        assert!(matches!(err, Err(RacingLineError::DegenerateInput { .. })));
    }
}
