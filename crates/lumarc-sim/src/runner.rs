//! The sweep runner: pose transitions and per-step ray evaluation.

use std::time::Instant;

use log::{debug, info};
use lumarc_geom::{Area, Plane, Ray};
use lumarc_math::{Axis, Point3, Rotation, Tolerance};
use lumarc_sweep::{ArcStep, ArcTrajectory, SweepMode};
use lumarc_trace::{classify, intersect, Classification};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;

use crate::error::Result;
use crate::report::{PoseRecord, RayOutcome, RayRecord, RunReport, SensorRecord, StepRecord};
use crate::settings::{AreaConfig, RayMode, Settings};

/// Progress of a runner through its trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    /// Constructed; no step evaluated yet.
    Initial,
    /// The pose at the given step index is current and evaluated.
    AtStep(usize),
    /// Every trajectory step has been evaluated.
    Completed,
}

/// Outcome of one ray against the gate and sensor targets.
struct RayEvaluation {
    outcome: RayOutcome,
    sensor_area: Option<usize>,
    intersection: Option<Point3>,
}

impl RayEvaluation {
    fn miss() -> Self {
        Self {
            outcome: RayOutcome::Miss,
            sensor_area: None,
            intersection: None,
        }
    }
}

/// Drives a single run: the emitter walks the arc trajectory and its
/// rays are evaluated against the aperture gate and the sensor targets
/// at every step.
pub struct SimulationRunner {
    simulation_id: usize,
    source: Plane,
    sensor: Plane,
    aperture: Plane,
    sensor_areas: Vec<Area>,
    aperture_areas: Vec<Area>,
    trajectory: Vec<ArcStep>,
    mode: SweepMode,
    primary_rotation: Rotation,
    secondary_axis: Axis,
    current_secondary_deg: f64,
    ray_mode: RayMode,
    keep_ray_records: bool,
    rays: Vec<Ray>,
    outcomes: Vec<RayOutcome>,
    state: RunnerState,
    step_records: Vec<StepRecord>,
    sensor_records: Vec<SensorRecord>,
    pose_records: Vec<PoseRecord>,
    ray_records: Vec<RayRecord>,
}

impl SimulationRunner {
    /// Build a runner for one run of the batch.
    ///
    /// Validates the settings, moves the emitter onto the first
    /// trajectory pose (initial rotation, then translation) and samples
    /// the run's rays from the emitter surface with seed
    /// `seed + simulation_id`.
    pub fn new(settings: &Settings, simulation_id: usize) -> Result<Self> {
        settings.validate()?;

        let mut source = settings.planes.source.build()?;
        let sensor = settings.planes.sensor.build()?;
        let aperture = settings.planes.aperture.build()?;
        let sensor_areas = settings
            .sensor_areas
            .iter()
            .map(AreaConfig::build)
            .collect::<Result<Vec<_>>>()?;
        let aperture_areas = settings
            .aperture_areas
            .iter()
            .map(AreaConfig::build)
            .collect::<Result<Vec<_>>>()?;

        let arc = &settings.arc;
        let mode = arc.mode;
        let (trajectory, current_secondary_deg) = if arc.execute_movements {
            let steps = ArcTrajectory {
                radius: arc.radius,
                step_deg: arc.step_deg,
                levels: arc.levels.clone(),
                mode,
            }
            .generate()?;
            let initial =
                Rotation::about(arc.initial_axis()?, arc.initial_rotation_deg.to_radians());
            source.rotate(&initial);
            let translation = steps[0].position - source.position;
            source.translate(&translation);
            let secondary = steps[0].secondary_deg(mode);
            (steps, secondary)
        } else {
            // Stationary rig: a single evaluation at the configured pose
            let steps = vec![ArcStep {
                index: 0,
                position: source.position,
                theta_deg: 0.0,
                phi_deg: 0.0,
            }];
            (steps, 0.0)
        };

        let primary_step_deg = match mode {
            SweepMode::HorizontalCircles => arc.step_deg,
            SweepMode::VerticalCircles => -arc.step_deg,
        };
        let primary_rotation = Rotation::about(arc.primary_axis()?, primary_step_deg.to_radians());
        let secondary_axis = arc.secondary_axis()?;

        let seed = settings.simulation.seed.wrapping_add(simulation_id as u64);
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let rays: Vec<Ray> = source
            .sample_local_points(settings.simulation.num_rays, &mut rng)
            .into_iter()
            .map(|local| Ray::from_local(local, &source))
            .collect();
        let outcomes = vec![RayOutcome::Undetermined; rays.len()];

        info!(
            "run {simulation_id}: {} rays over {} trajectory steps",
            rays.len(),
            trajectory.len()
        );

        Ok(Self {
            simulation_id,
            source,
            sensor,
            aperture,
            sensor_areas,
            aperture_areas,
            trajectory,
            mode,
            primary_rotation,
            secondary_axis,
            current_secondary_deg,
            ray_mode: settings.simulation.ray_mode,
            keep_ray_records: settings.simulation.keep_ray_records,
            rays,
            outcomes,
            state: RunnerState::Initial,
            step_records: Vec::new(),
            sensor_records: Vec::new(),
            pose_records: Vec::new(),
            ray_records: Vec::new(),
        })
    }

    /// Current progress through the trajectory.
    pub fn state(&self) -> RunnerState {
        self.state
    }

    /// The emitter plane at its current pose.
    pub fn source(&self) -> &Plane {
        &self.source
    }

    /// The trajectory the runner walks.
    pub fn trajectory(&self) -> &[ArcStep] {
        &self.trajectory
    }

    /// Outcome of each ray at the current pose.
    pub fn outcomes(&self) -> &[RayOutcome] {
        &self.outcomes
    }

    /// Move to the next trajectory step and evaluate every ray there.
    ///
    /// The first call evaluates the starting pose without moving.
    pub fn step(&mut self) -> Result<RunnerState> {
        let next = match self.state {
            RunnerState::Initial => 0,
            RunnerState::AtStep(index) if index + 1 < self.trajectory.len() => index + 1,
            RunnerState::AtStep(_) | RunnerState::Completed => {
                self.state = RunnerState::Completed;
                return Ok(RunnerState::Completed);
            }
        };
        if next > 0 {
            let target = self.trajectory[next];
            self.advance_pose(&target);
        }
        self.evaluate(next)?;
        self.state = RunnerState::AtStep(next);
        Ok(self.state)
    }

    /// Drive the runner to completion and hand back its records.
    pub fn run(mut self) -> Result<RunReport> {
        while self.step()? != RunnerState::Completed {}
        Ok(RunReport {
            simulation_id: self.simulation_id,
            steps: self.step_records,
            sensors: self.sensor_records,
            poses: self.pose_records,
            rays: self.ray_records,
        })
    }

    /// Transition the emitter pose onto the given step.
    ///
    /// Order is fixed: primary rotation, secondary correction when the
    /// step starts a new circle, then translation onto the sample
    /// position.
    fn advance_pose(&mut self, target: &ArcStep) {
        self.source.rotate(&self.primary_rotation);

        let secondary = target.secondary_deg(self.mode);
        let tolerance = Tolerance::DEFAULT;
        if !tolerance.angles_equal(
            self.current_secondary_deg.to_radians(),
            secondary.to_radians(),
        ) {
            let delta = self.current_secondary_deg - secondary;
            let correction = Rotation::about(self.secondary_axis, (-delta).to_radians());
            self.source.rotate(&correction);
            debug!(
                "step {}: secondary correction of {} degrees",
                target.index, -delta
            );
            self.current_secondary_deg = secondary;
        }

        let translation = target.position - self.source.position;
        self.source.translate(&translation);
    }

    /// Evaluate every ray at the current pose and record the counts.
    fn evaluate(&mut self, step_index: usize) -> Result<()> {
        let started = Instant::now();

        if self.ray_mode == RayMode::Attached {
            let source = &self.source;
            self.rays.iter_mut().for_each(|ray| ray.attach(source));
        }

        let evaluations = self
            .rays
            .par_iter()
            .map(|ray| self.evaluate_ray(ray))
            .collect::<Result<Vec<_>>>()?;

        let mut hits = 0;
        let mut misses = 0;
        let mut counts = vec![0usize; self.sensor_areas.len()];
        for (ray_index, evaluation) in evaluations.iter().enumerate() {
            self.outcomes[ray_index] = evaluation.outcome;
            match evaluation.outcome {
                RayOutcome::Hit => hits += 1,
                RayOutcome::Miss | RayOutcome::Undetermined => misses += 1,
            }
            if let Some(area_index) = evaluation.sensor_area {
                counts[area_index] += 1;
            }
            if self.keep_ray_records {
                self.ray_records.push(RayRecord {
                    simulation_id: self.simulation_id,
                    step_index,
                    ray_index,
                    outcome: evaluation.outcome,
                    area: evaluation
                        .sensor_area
                        .map(|index| self.sensor_areas[index].title.clone()),
                    intersection: evaluation.intersection,
                });
            }
        }

        for (area, count) in self.sensor_areas.iter().zip(&counts) {
            self.sensor_records.push(SensorRecord {
                simulation_id: self.simulation_id,
                step_index,
                sensor_name: area.title.clone(),
                hit_count: *count,
            });
        }

        let step = self.trajectory[step_index];
        self.pose_records.push(PoseRecord {
            step_index,
            theta_deg: step.theta_deg,
            phi_deg: step.phi_deg,
            x: self.source.position.x,
            y: self.source.position.y,
            z: self.source.position.z,
            right_x: self.source.frame.right.x,
            right_y: self.source.frame.right.y,
            right_z: self.source.frame.right.z,
            up_x: self.source.frame.up.x,
            up_y: self.source.frame.up.y,
            up_z: self.source.frame.up.z,
            normal_x: self.source.frame.normal.x,
            normal_y: self.source.frame.normal.y,
            normal_z: self.source.frame.normal.z,
        });

        let runtime_seconds = started.elapsed().as_secs_f64();
        debug!("step {step_index}: {hits} hits, {misses} misses");
        self.step_records.push(StepRecord {
            simulation_id: self.simulation_id,
            step_index,
            ray_count: self.rays.len(),
            hits,
            misses,
            runtime_seconds,
        });
        Ok(())
    }

    /// Classify one ray: aperture gate first, then the sensor targets.
    fn evaluate_ray(&self, ray: &Ray) -> Result<RayEvaluation> {
        let Some(gate_point) = intersect(&self.aperture, ray) else {
            return Ok(RayEvaluation::miss());
        };
        if matches!(
            classify(&self.aperture_areas, &gate_point)?,
            Classification::Miss
        ) {
            return Ok(RayEvaluation::miss());
        }

        let Some(point) = intersect(&self.sensor, ray) else {
            return Ok(RayEvaluation::miss());
        };
        match classify(&self.sensor_areas, &point)? {
            Classification::Hit(area) => {
                let index = self
                    .sensor_areas
                    .iter()
                    .position(|candidate| std::ptr::eq(candidate, area));
                Ok(RayEvaluation {
                    outcome: RayOutcome::Hit,
                    sensor_area: index,
                    intersection: Some(point),
                })
            }
            Classification::Miss => Ok(RayEvaluation {
                outcome: RayOutcome::Miss,
                sensor_area: None,
                intersection: Some(point),
            }),
        }
    }
}
