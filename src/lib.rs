//! raceline: track boundary polygon → racing line + speed profile.
//!
//! Takes the closed outline of a track (as produced by an upstream
//! boundary detector), resamples it, estimates curvature, derives a
//! friction-limited speed at every point and offsets the path toward the
//! outside of each bend.
//!
//! # Example
//!
//! ```
//! use raceline::{compute_racing_line, BehavioralParameters, PhysicalParameters, PointSequence};
//!
//! let boundary = PointSequence::closed_from_tuples(&[
//!     (0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0),
//! ]);
//! let behavior = BehavioralParameters::default().with_target_points(8);
//! let result = compute_racing_line(&boundary, &PhysicalParameters::default(), &behavior)?;
//! assert_eq!(result.line.len(), 8);
//! # Ok::<(), raceline::RacingLineError>(())
//! ```

#![forbid(unsafe_code)]

mod config;
mod geom;

pub mod curvature;
pub mod displace;
pub mod error;
pub mod resample;
pub mod simplify;
pub mod speed;

// Re-export kurbo so callers build points with the same version.
pub use kurbo;

pub use config::{kmh_to_mps, mps_to_kmh, BehavioralParameters, PhysicalParameters, GRAVITY};
pub use curvature::{CurvatureProfile, Turn};
pub use error::{RacingLineError, Result};
pub use geom::{PointSequence, Topology};
pub use speed::SpeedProfile;

use log::{debug, info, trace};
use std::time::Instant;

/// Everything one pipeline run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct RacingLine {
    /// The racing line, one point per centerline point.
    pub line: PointSequence,
    /// Maximum sustainable speed at each point (m/s).
    pub speeds: SpeedProfile,
    /// Curvature of the centerline at each point (1/pixel).
    pub curvature: CurvatureProfile,
    /// Signed offset applied along each point's left normal (pixels).
    pub displacements: Vec<f64>,
    /// The resampled (and optionally simplified) boundary the line was built from.
    pub centerline: PointSequence,
}

impl RacingLine {
    /// The racing line and its speed profile.
    pub fn into_parts(self) -> (PointSequence, SpeedProfile) {
        (self.line, self.speeds)
    }

    /// Largest absolute offset from the centerline.
    pub fn max_offset(&self) -> f64 {
        self.displacements.iter().fold(0.0, |m, d| m.max(d.abs()))
    }
}

/// Full pipeline: boundary → racing line + speed profile.
///
/// Resample → (optional) simplify → curvature → speed → displace.
/// Fails before doing any work if the boundary has fewer than 3 points or
/// any parameter is out of range; there is no partial output.
pub fn compute_racing_line(
    boundary: &PointSequence,
    physical: &PhysicalParameters,
    behavior: &BehavioralParameters,
) -> Result<RacingLine> {
    let t_start = Instant::now();

    boundary.require(3)?;
    boundary.require_finite()?;
    physical.validate()?;
    behavior.validate()?;

    // ── Resample ──────────────────────────────────────────
    let mut centerline = resample::resample(boundary, behavior.target_points)?;
    debug!(
        "resample: {} vertices -> {} points, perimeter {:.1} px, {}",
        boundary.len(),
        centerline.len(),
        boundary.perimeter(),
        winding_name(boundary),
    );

    // ── Simplify ──────────────────────────────────────────
    if let Some(epsilon) = behavior.simplify_epsilon {
        let before = centerline.len();
        centerline = simplify::simplify(&centerline, epsilon)?;
        debug!("simplify: {} -> {} points (epsilon {})", before, centerline.len(), epsilon);
    }
    centerline.require(3)?;

    // ── Curvature & speed ─────────────────────────────────
    let curvature = curvature::estimate(&centerline);
    let speeds = speed::speed_profile(&curvature, physical)?;
    debug!(
        "speed: {:.2}..{:.2} m/s (mean {:.2}), peak curvature {:.4}/px",
        speeds.min(),
        speeds.max(),
        speeds.mean(),
        curvature.max(),
    );

    // ── Displace ──────────────────────────────────────────
    let displaced = displace::displace(&centerline, &curvature, &speeds, behavior)?;
    for (i, d) in displaced.offsets.iter().enumerate() {
        trace!(
            "point {}: curvature {:.5}, speed {:.2}, offset {:.3}",
            i,
            curvature.values[i],
            speeds.values[i],
            d
        );
    }

    let result = RacingLine {
        line: displaced.line,
        speeds,
        curvature,
        displacements: displaced.offsets,
        centerline,
    };
    info!(
        "racing line: {} points, max offset {:.2} px, min speed {:.1} km/h ({}ms)",
        result.line.len(),
        result.max_offset(),
        mps_to_kmh(result.speeds.min()),
        t_start.elapsed().as_millis(),
    );
    Ok(result)
}

fn winding_name(sequence: &PointSequence) -> &'static str {
    let area = sequence.signed_area();
    if area > 0.0 {
        "counter-clockwise"
    } else if area < 0.0 {
        "clockwise"
    } else {
        "zero area"
    }
}
