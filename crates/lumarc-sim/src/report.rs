//! Records collected while a simulation runs.
//!
//! The flat record structs serialize directly to CSV rows; the report
//! structs bundle them per run and for the whole batch.

use lumarc_math::Point3;
use serde::Serialize;

/// Final state of one ray at one arc step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RayOutcome {
    /// The ray passed the aperture and landed inside a sensor area.
    Hit,
    /// The ray was gated, never met a target plane, or landed outside
    /// every sensor area.
    Miss,
    /// The ray has not been evaluated at the current pose.
    Undetermined,
}

/// Aggregate counts for one arc step of one run.
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    /// Which run produced this record.
    pub simulation_id: usize,
    /// Ordinal of the arc step.
    pub step_index: usize,
    /// Rays evaluated at the step.
    pub ray_count: usize,
    /// Rays that reached a sensor area.
    pub hits: usize,
    /// Rays that did not.
    pub misses: usize,
    /// Wall-clock duration of the step evaluation.
    pub runtime_seconds: f64,
}

/// Hit count of a single sensor area at one arc step.
#[derive(Debug, Clone, Serialize)]
pub struct SensorRecord {
    /// Which run produced this record.
    pub simulation_id: usize,
    /// Ordinal of the arc step.
    pub step_index: usize,
    /// Title of the sensor area.
    pub sensor_name: String,
    /// Rays that landed inside the area.
    pub hit_count: usize,
}

/// Pose of the emitter plane at one arc step.
///
/// The trajectory is identical across runs, so poses are recorded once
/// per batch rather than once per run.
#[derive(Debug, Clone, Serialize)]
pub struct PoseRecord {
    /// Ordinal of the arc step.
    pub step_index: usize,
    /// Azimuth angle of the step in degrees.
    pub theta_deg: f64,
    /// Polar angle of the step in degrees.
    pub phi_deg: f64,
    /// Emitter centre x.
    pub x: f64,
    /// Emitter centre y.
    pub y: f64,
    /// Emitter centre z.
    pub z: f64,
    /// Local right axis x component.
    pub right_x: f64,
    /// Local right axis y component.
    pub right_y: f64,
    /// Local right axis z component.
    pub right_z: f64,
    /// Local up axis x component.
    pub up_x: f64,
    /// Local up axis y component.
    pub up_y: f64,
    /// Local up axis z component.
    pub up_z: f64,
    /// Facing direction x component.
    pub normal_x: f64,
    /// Facing direction y component.
    pub normal_y: f64,
    /// Facing direction z component.
    pub normal_z: f64,
}

/// Per-ray detail kept when `keep_ray_records` is enabled.
#[derive(Debug, Clone)]
pub struct RayRecord {
    /// Which run produced this record.
    pub simulation_id: usize,
    /// Ordinal of the arc step.
    pub step_index: usize,
    /// Index of the ray within its run.
    pub ray_index: usize,
    /// Final state of the ray at the step.
    pub outcome: RayOutcome,
    /// Title of the sensor area the ray landed in, for hits.
    pub area: Option<String>,
    /// Intersection with the sensor plane, when one exists.
    pub intersection: Option<Point3>,
}

/// Everything one run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Which run produced this report.
    pub simulation_id: usize,
    /// One record per arc step.
    pub steps: Vec<StepRecord>,
    /// One record per sensor area per arc step.
    pub sensors: Vec<SensorRecord>,
    /// One record per arc step.
    pub poses: Vec<PoseRecord>,
    /// Per-ray details, empty unless `keep_ray_records` is enabled.
    pub rays: Vec<RayRecord>,
}

/// Combined results of a whole batch of runs.
#[derive(Debug, Clone, Default)]
pub struct SimulationReport {
    /// Step records of every run, in run order.
    pub steps: Vec<StepRecord>,
    /// Sensor records of every run, in run order.
    pub sensors: Vec<SensorRecord>,
    /// Emitter poses along the trajectory.
    pub poses: Vec<PoseRecord>,
    /// Per-ray details, empty unless `keep_ray_records` is enabled.
    pub rays: Vec<RayRecord>,
}

impl SimulationReport {
    /// Total sensor hits across all runs and steps.
    pub fn total_hits(&self) -> usize {
        self.steps.iter().map(|record| record.hits).sum()
    }

    /// Total misses across all runs and steps.
    pub fn total_misses(&self) -> usize {
        self.steps.iter().map(|record| record.misses).sum()
    }
}
