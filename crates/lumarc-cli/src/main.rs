//! lumarc CLI - arc-sweep illumination test simulator.
//!
//! Runs ray batches from a moving emitter plane against an aperture
//! gate and a sensor plane, and exports the hit statistics as CSV.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lumarc_sim::{run_simulation, Settings};
use lumarc_sweep::ArcTrajectory;

mod cli;
mod export;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::init_logger(cli.log_level.clone().into());

    match cli.command {
        Commands::Run { config, output } => run(config, &output)?,
        Commands::Init { path, force } => init(&path, force)?,
        Commands::Steps { config } => steps(config)?,
    }

    Ok(())
}

fn load_settings(config: Option<PathBuf>) -> Result<Settings> {
    match config {
        Some(path) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("reading settings from {}", path.display()))?;
            let settings = serde_json::from_str(&text)
                .with_context(|| format!("parsing settings from {}", path.display()))?;
            Ok(settings)
        }
        None => Ok(Settings::default()),
    }
}

fn run(config: Option<PathBuf>, output: &PathBuf) -> Result<()> {
    let settings = load_settings(config)?;
    let report = run_simulation(&settings)?;
    export::write_reports(&report, output)?;

    let evaluated = report.total_hits() + report.total_misses();
    println!(
        "Evaluated {} ray tests over {} steps in {} run(s)",
        evaluated,
        report.poses.len(),
        settings.simulation.num_runs
    );
    println!("  Hits:   {}", report.total_hits());
    println!("  Misses: {}", report.total_misses());
    println!("Results written to {}", output.display());
    Ok(())
}

fn init(path: &PathBuf, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists, pass --force to overwrite", path.display());
    }
    let text = serde_json::to_string_pretty(&Settings::default())?;
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    println!("Wrote default settings to {}", path.display());
    Ok(())
}

fn steps(config: Option<PathBuf>) -> Result<()> {
    let settings = load_settings(config)?;
    settings.validate()?;

    let arc = &settings.arc;
    if !arc.execute_movements {
        println!("Movements are disabled; the emitter holds its configured pose.");
        return Ok(());
    }

    let trajectory = ArcTrajectory {
        radius: arc.radius,
        step_deg: arc.step_deg,
        levels: arc.levels.clone(),
        mode: arc.mode,
    }
    .generate()?;

    println!("{} trajectory steps:", trajectory.len());
    for step in &trajectory {
        println!(
            "  {:>4}  theta {:>7.2}  phi {:>7.2}  at ({:>8.3}, {:>8.3}, {:>8.3})",
            step.index,
            step.theta_deg,
            step.phi_deg,
            step.position.x,
            step.position.y,
            step.position.z
        );
    }
    Ok(())
}
