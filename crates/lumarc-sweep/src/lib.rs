#![warn(missing_docs)]

//! Spherical arc trajectories for the moving emitter plane.
//!
//! A trajectory is an ordered sequence of sample poses on a sphere
//! around the sensor assembly, generated from a radius, a step angle
//! and a list of secondary levels. Two sweep modes are supported:
//! horizontal circles vary the azimuth at fixed elevations, vertical
//! circles vary the elevation at fixed azimuths.

use log::debug;
use lumarc_math::{Point3, Spherical};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from trajectory generation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SweepError {
    /// The sweep radius must be positive.
    #[error("sweep radius must be positive, got {0}")]
    NonPositiveRadius(f64),

    /// The step angle must be positive.
    #[error("step angle must be positive, got {0}")]
    NonPositiveStep(f64),

    /// At least one secondary level is required.
    #[error("no sweep levels supplied")]
    EmptyLevels,
}

/// Result type for trajectory generation.
pub type Result<T> = std::result::Result<T, SweepError>;

/// How the emitter sweeps over the sphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepMode {
    /// Vary the azimuth over `[0, 360)` at each fixed elevation level.
    HorizontalCircles,
    /// Vary the elevation over `[90, -90)` at each fixed azimuth level.
    VerticalCircles,
}

/// One sample pose of the arc trajectory.
///
/// Immutable once produced; the runner derives each emitter pose from
/// its predecessor and the step it is moving to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcStep {
    /// Ordinal position in the trajectory.
    pub index: usize,
    /// Cartesian sample position.
    pub position: Point3,
    /// Azimuth angle in degrees.
    pub theta_deg: f64,
    /// Elevation (polar) angle in degrees.
    pub phi_deg: f64,
}

impl ArcStep {
    /// The angle swept within a circle for the given mode.
    pub fn primary_deg(&self, mode: SweepMode) -> f64 {
        match mode {
            SweepMode::HorizontalCircles => self.theta_deg,
            SweepMode::VerticalCircles => self.phi_deg,
        }
    }

    /// The angle that selects the circle for the given mode. A change
    /// between consecutive steps marks the start of a new circle.
    pub fn secondary_deg(&self, mode: SweepMode) -> f64 {
        match mode {
            SweepMode::HorizontalCircles => self.phi_deg,
            SweepMode::VerticalCircles => self.theta_deg,
        }
    }
}

/// Parameters of an arc sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcTrajectory {
    /// Sphere radius.
    pub radius: f64,
    /// Step angle in degrees for the swept primary angle.
    pub step_deg: f64,
    /// Secondary levels in degrees: elevations for horizontal circles,
    /// azimuths for vertical circles.
    pub levels: Vec<f64>,
    /// Sweep mode.
    pub mode: SweepMode,
}

impl ArcTrajectory {
    /// Generate the ordered sample sequence.
    ///
    /// Samples of successive levels are concatenated in level order.
    /// The primary angle ranges are half-open, so a step that does not
    /// evenly divide the sweep keeps its partial final interval and the
    /// first sample of each circle is never dropped.
    pub fn generate(&self) -> Result<Vec<ArcStep>> {
        if self.radius <= 0.0 {
            return Err(SweepError::NonPositiveRadius(self.radius));
        }
        if self.step_deg <= 0.0 {
            return Err(SweepError::NonPositiveStep(self.step_deg));
        }
        if self.levels.is_empty() {
            return Err(SweepError::EmptyLevels);
        }

        let mut steps = Vec::new();
        for &level in &self.levels {
            let primaries = match self.mode {
                SweepMode::HorizontalCircles => arange(0.0, 360.0, self.step_deg),
                SweepMode::VerticalCircles => arange(90.0, -90.0, -self.step_deg),
            };
            debug!("level {level}: {} samples", primaries.len());
            for primary in primaries {
                let (theta_deg, phi_deg) = match self.mode {
                    SweepMode::HorizontalCircles => (primary, level),
                    SweepMode::VerticalCircles => (level, primary),
                };
                let position =
                    Spherical::new(self.radius, theta_deg.to_radians(), phi_deg.to_radians())
                        .to_cartesian();
                steps.push(ArcStep {
                    index: steps.len(),
                    position,
                    theta_deg,
                    phi_deg,
                });
            }
        }
        debug!("generated {} trajectory steps", steps.len());
        Ok(steps)
    }
}

/// Evenly spaced values over the half-open interval `[start, stop)`.
///
/// The count is `ceil((stop - start) / step)`, so a partial final
/// interval is included rather than dropped. A step moving away from
/// `stop` yields no values.
pub fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if step == 0.0 {
        return Vec::new();
    }
    let count = ((stop - start) / step).ceil();
    if count <= 0.0 {
        return Vec::new();
    }
    (0..count as usize)
        .map(|i| start + i as f64 * step)
        .collect()
}
