//! CSV export of simulation records.

use std::path::Path;

use anyhow::{Context, Result};
use lumarc_sim::SimulationReport;
use serde::Serialize;

/// File name of the per-step results table.
pub const RESULTS_FILE: &str = "results.csv";
/// File name of the per-sensor-area results table.
pub const SENSOR_RESULTS_FILE: &str = "sensor_results.csv";
/// File name of the emitter pose table.
pub const ARC_ANGLES_FILE: &str = "arc_angles.csv";

/// Write the report's tables into the given directory, creating it if
/// needed.
pub fn write_reports(report: &SimulationReport, directory: &Path) -> Result<()> {
    std::fs::create_dir_all(directory)
        .with_context(|| format!("creating {}", directory.display()))?;

    write_table(&report.steps, &directory.join(RESULTS_FILE))?;
    write_table(&report.sensors, &directory.join(SENSOR_RESULTS_FILE))?;
    write_table(&report.poses, &directory.join(ARC_ANGLES_FILE))?;
    Ok(())
}

fn write_table<T: Serialize>(records: &[T], path: &Path) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
