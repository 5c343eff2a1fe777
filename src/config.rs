//! Physical and behavioral parameters for one pipeline run.
//!
//! Both structs are plain values: build them once (from defaults, a preset
//! or CLI flags), validate, and pass them by reference. Nothing in the
//! crate mutates them.

use crate::error::{RacingLineError, Result};

/// Standard gravity used by the cornering model (m/s²).
pub const GRAVITY: f64 = 9.8;

/// Vehicle and surface properties for the cornering-speed model.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalParameters {
    /// Vehicle top speed in m/s. Every speed in a profile is capped here.
    pub top_speed: f64,
    /// Tyre/track friction coefficient (μ). Karts on asphalt sit around 1.5.
    pub friction: f64,
    /// Gravitational acceleration in m/s².
    pub gravity: f64,
    /// Image scale. Curvature is measured in 1/pixel and converted to 1/meter
    /// with this factor before the speed model runs.
    pub pixels_per_meter: f64,
}

impl Default for PhysicalParameters {
    fn default() -> Self {
        Self {
            top_speed: kmh_to_mps(55.0),
            friction: 1.5,
            gravity: GRAVITY,
            pixels_per_meter: 1.0,
        }
    }
}

impl PhysicalParameters {
    /// Defaults with a top speed given in km/h.
    pub fn from_kmh(top_speed_kmh: f64) -> Self {
        Self {
            top_speed: kmh_to_mps(top_speed_kmh),
            ..Self::default()
        }
    }

    /// Builder-style setter for top speed (m/s).
    #[must_use]
    pub fn with_top_speed(mut self, value: f64) -> Self {
        self.top_speed = value;
        self
    }

    /// Builder-style setter for the friction coefficient.
    #[must_use]
    pub fn with_friction(mut self, value: f64) -> Self {
        self.friction = value;
        self
    }

    /// Builder-style setter for gravity.
    #[must_use]
    pub fn with_gravity(mut self, value: f64) -> Self {
        self.gravity = value;
        self
    }

    /// Builder-style setter for the image scale.
    #[must_use]
    pub fn with_pixels_per_meter(mut self, value: f64) -> Self {
        self.pixels_per_meter = value;
        self
    }

    /// Derive the image scale from a boundary perimeter in pixels and the
    /// known real-world track length in meters.
    #[must_use]
    pub fn with_track_length(mut self, perimeter_px: f64, track_length_m: f64) -> Self {
        self.pixels_per_meter = perimeter_px / track_length_m;
        self
    }

    /// Lateral acceleration limit μ·g.
    pub fn lateral_limit(&self) -> f64 {
        self.friction * self.gravity
    }

    /// Reject values the speed model cannot work with.
    pub fn validate(&self) -> Result<()> {
        positive("top_speed", self.top_speed)?;
        positive("friction", self.friction)?;
        positive("gravity", self.gravity)?;
        positive("pixels_per_meter", self.pixels_per_meter)?;
        Ok(())
    }
}

/// How the racing line reacts to the track: how far it swings out and how
/// quickly it settles.
#[derive(Debug, Clone, PartialEq)]
pub struct BehavioralParameters {
    // -- Displacement --
    /// Fraction of `max_displacement` used at the tightest corners, in [0, 1].
    /// 0 reproduces the centerline, 1 swings out the full amount.
    pub aggressiveness: f64,
    /// Weight of the previous point's displacement in the smoothing blend,
    /// in [0, 1]. Higher = lazier transitions between corners and straights.
    pub smoothness: f64,
    /// Hard cap on lateral offset, in pixels.
    pub max_displacement: f64,

    // -- Sampling --
    /// Number of arc-length-uniform points the boundary is resampled to.
    pub target_points: usize,
    /// Optional curve-simplification tolerance in pixels, applied after
    /// resampling. `None` skips the stage.
    pub simplify_epsilon: Option<f64>,
}

impl Default for BehavioralParameters {
    fn default() -> Self {
        Self {
            aggressiveness: 0.7,
            smoothness: 0.5,
            max_displacement: 20.0,
            target_points: 100,
            simplify_epsilon: None,
        }
    }
}

impl BehavioralParameters {
    /// Builder-style setter for aggressiveness.
    #[must_use]
    pub fn with_aggressiveness(mut self, value: f64) -> Self {
        self.aggressiveness = value;
        self
    }

    /// Builder-style setter for smoothness.
    #[must_use]
    pub fn with_smoothness(mut self, value: f64) -> Self {
        self.smoothness = value;
        self
    }

    /// Builder-style setter for the displacement cap.
    #[must_use]
    pub fn with_max_displacement(mut self, value: f64) -> Self {
        self.max_displacement = value;
        self
    }

    /// Builder-style setter for the resampled point count.
    #[must_use]
    pub fn with_target_points(mut self, value: usize) -> Self {
        self.target_points = value;
        self
    }

    /// Builder-style setter for the simplification tolerance.
    #[must_use]
    pub fn with_simplify_epsilon(mut self, value: f64) -> Self {
        self.simplify_epsilon = Some(value);
        self
    }

    pub fn validate(&self) -> Result<()> {
        unit_interval("aggressiveness", self.aggressiveness)?;
        unit_interval("smoothness", self.smoothness)?;
        if !self.max_displacement.is_finite() || self.max_displacement < 0.0 {
            return Err(RacingLineError::invalid(format!(
                "max_displacement must be finite and >= 0, got {}",
                self.max_displacement
            )));
        }
        if self.target_points == 0 {
            return Err(RacingLineError::invalid("target_points must be at least 1"));
        }
        if let Some(epsilon) = self.simplify_epsilon {
            positive("simplify_epsilon", epsilon)?;
        }
        Ok(())
    }
}

/// Convert km/h to m/s.
pub fn kmh_to_mps(kmh: f64) -> f64 {
    kmh / 3.6
}

/// Convert m/s to km/h.
pub fn mps_to_kmh(mps: f64) -> f64 {
    mps * 3.6
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RacingLineError::invalid(format!(
            "{name} must be positive, got {value}"
        )))
    }
}

fn unit_interval(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(RacingLineError::invalid(format!(
            "{name} must be within [0, 1], got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn defaults_validate() {
        let physical = PhysicalParameters::default();
        assert_relative_eq!(physical.top_speed, 55.0 / 3.6);
        assert!(physical.validate().is_ok());
        assert!(BehavioralParameters::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_friction() {
        let physical = PhysicalParameters::default().with_friction(0.0);
        assert!(matches!(
            physical.validate(),
            Err(RacingLineError::InvalidArgument(_))
        ));
        let physical = PhysicalParameters::default().with_friction(-1.0);
        assert!(physical.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_behavior() {
        let params = BehavioralParameters::default().with_aggressiveness(1.5);
        assert!(params.validate().is_err());
        let params = BehavioralParameters::default().with_smoothness(-0.1);
        assert!(params.validate().is_err());
        let params = BehavioralParameters::default().with_simplify_epsilon(-2.0);
        assert!(params.validate().is_err());
        let params = BehavioralParameters::default().with_target_points(0);
        assert!(params.validate().is_err());
        let params = BehavioralParameters::default().with_max_displacement(f64::NAN);
        assert!(params.validate().is_err());
    }

    #[test]
    fn track_length_sets_scale() {
        let physical = PhysicalParameters::default().with_track_length(1886.0, 943.0);
        assert_relative_eq!(physical.pixels_per_meter, 2.0);
    }

    #[test]
    fn unit_conversions() {
        assert_relative_eq!(mps_to_kmh(kmh_to_mps(55.0)), 55.0, max_relative = 1e-12);
        assert_relative_eq!(
            PhysicalParameters::from_kmh(36.0).top_speed,
            10.0,
            max_relative = 1e-12
        );
    }
}
