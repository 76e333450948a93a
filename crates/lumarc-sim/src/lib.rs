//! Illumination sweep simulation.
//!
//! A planar emitter walks an arc trajectory around a rig of target
//! planes. At every trajectory step the emitter's rays are tested
//! against an aperture gate and a sensor plane, and hit statistics are
//! collected per step, per sensor area and optionally per ray.

#![warn(missing_docs)]

pub mod error;
pub mod report;
pub mod runner;
pub mod settings;

pub use error::{Result, SimError};
pub use report::{
    PoseRecord, RayOutcome, RayRecord, RunReport, SensorRecord, SimulationReport, StepRecord,
};
pub use runner::{RunnerState, SimulationRunner};
pub use settings::{
    AreaConfig, ArcConfig, PlaneConfig, PlaneSet, RayMode, Settings, SimulationConfig,
};

use log::info;

/// Run the configured batch and aggregate its records.
///
/// Each run draws its rays from `seed + run`, so any single run can be
/// reproduced in isolation. The trajectory does not change between
/// runs; pose records are taken from the first.
pub fn run_simulation(settings: &Settings) -> Result<SimulationReport> {
    settings.validate()?;

    let mut report = SimulationReport::default();
    for run in 0..settings.simulation.num_runs {
        let runner = SimulationRunner::new(settings, run)?;
        let run_report = runner.run()?;
        if run == 0 {
            report.poses = run_report.poses;
        }
        report.steps.extend(run_report.steps);
        report.sensors.extend(run_report.sensors);
        report.rays.extend(run_report.rays);
    }

    info!(
        "batch complete: {} runs, {} hits, {} misses",
        settings.simulation.num_runs,
        report.total_hits(),
        report.total_misses()
    );
    Ok(report)
}
