//! Friction-limited cornering speed per point.
//!
//! Each point is treated as steady circular motion on a circle of radius
//! 1/κ: lateral friction supplies at most μ·g, so `v = sqrt(μ·g·r)`,
//! capped at the vehicle's top speed. There is no braking or acceleration
//! pass between points.

use rayon::prelude::*;

use crate::config::PhysicalParameters;
use crate::curvature::{CurvatureProfile, STRAIGHT_CURVATURE};
use crate::error::Result;

/// Maximum sustainable speed per point, in m/s.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedProfile {
    pub values: Vec<f64>,
    /// The cap every value respects.
    pub top_speed: f64,
}

impl SpeedProfile {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    /// Fraction of top speed available at point `i`, in [0, 1].
    pub fn ratio(&self, i: usize) -> f64 {
        (self.values[i] / self.top_speed).clamp(0.0, 1.0)
    }
}

/// Speed limit for every point of a curvature profile.
///
/// Curvature is in 1/pixel; `pixels_per_meter` converts it before the
/// physics runs.
pub fn speed_profile(curvature: &CurvatureProfile, physical: &PhysicalParameters) -> Result<SpeedProfile> {
    physical.validate()?;
    let values = curvature
        .values
        .par_iter()
        .map(|&k| cornering_speed(k, physical))
        .collect();
    Ok(SpeedProfile {
        values,
        top_speed: physical.top_speed,
    })
}

/// `min(v_top, sqrt(μ·g·r))` for one curvature value (1/pixel).
pub fn cornering_speed(curvature: f64, physical: &PhysicalParameters) -> f64 {
    if curvature <= STRAIGHT_CURVATURE {
        return physical.top_speed;
    }
    let radius_m = 1.0 / (curvature * physical.pixels_per_meter);
    (physical.lateral_limit() * radius_m).sqrt().min(physical.top_speed)
}
