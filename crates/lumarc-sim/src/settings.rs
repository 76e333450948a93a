//! Simulation settings and their validation.
//!
//! Settings deserialize from JSON and are checked up front so that a
//! bad rig fails before any ray is traced.

use lumarc_geom::{Area, Plane};
use lumarc_math::{Axis, Point3, Vec3};
use lumarc_sweep::SweepMode;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Geometry of one configured plane.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaneConfig {
    /// Name used in records and logs.
    pub title: String,
    /// Centre position.
    pub position: [f64; 3],
    /// Facing direction. Target planes are registered with the
    /// direction rays travel through them.
    pub direction: [f64; 3],
    /// Extent along the local right axis.
    pub width: f64,
    /// Extent along the local up axis.
    pub length: f64,
}

impl PlaneConfig {
    /// Build the plane this record describes.
    pub fn build(&self) -> Result<Plane> {
        Ok(Plane::new(
            &self.title,
            Point3::from(self.position),
            Vec3::from(self.direction),
            self.width,
            self.length,
        )?)
    }
}

/// Geometry of one target area.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaConfig {
    /// Name used in records and logs.
    pub title: String,
    /// Centre position.
    pub position: [f64; 3],
    /// Facing direction of the area outline.
    pub direction: [f64; 3],
    /// Extent along the local right axis.
    pub width: f64,
    /// Extent along the local up axis.
    pub length: f64,
}

impl AreaConfig {
    /// Build the area this record describes.
    pub fn build(&self) -> Result<Area> {
        Ok(Area::new(
            &self.title,
            Point3::from(self.position),
            Vec3::from(self.direction),
            self.width,
            self.length,
        )?)
    }
}

/// The three planes of the rig.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaneSet {
    /// The moving emitter plane.
    pub source: PlaneConfig,
    /// The final target plane.
    pub sensor: PlaneConfig,
    /// The gating plane between emitter and sensor.
    pub aperture: PlaneConfig,
}

/// Whether rays follow the emitter or keep their creation pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RayMode {
    /// Rays take the emitter pose again at every step.
    #[default]
    Attached,
    /// Rays keep the pose they were created with.
    Fixed,
}

/// Ray generation and repetition parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Rays sampled per run.
    pub num_rays: usize,
    /// Independent repetitions of the whole sweep.
    pub num_runs: usize,
    /// Base seed. Run `n` draws its rays from `seed + n`.
    pub seed: u64,
    /// Ray attachment mode.
    #[serde(default)]
    pub ray_mode: RayMode,
    /// Keep per-ray records in the report.
    #[serde(default)]
    pub keep_ray_records: bool,
}

/// Arc movement parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArcConfig {
    /// Radius of the sphere the emitter moves on.
    pub radius: f64,
    /// Primary step angle in degrees.
    pub step_deg: f64,
    /// Secondary angles in degrees, one ring or meridian each.
    pub levels: Vec<f64>,
    /// Rotation applied once before the sweep, in degrees.
    pub initial_rotation_deg: f64,
    /// Axis label of the initial rotation ("x", "y" or "z").
    pub initial_rotation_axis: String,
    /// Axis label of the per-step primary rotation.
    pub primary_axis: String,
    /// Axis label of the secondary correction rotation.
    pub secondary_axis: String,
    /// Which family of circles the sweep walks.
    pub mode: SweepMode,
    /// When false the emitter holds its configured pose and a single
    /// evaluation step runs.
    pub execute_movements: bool,
}

impl ArcConfig {
    /// Parsed axis of the initial rotation.
    pub fn initial_axis(&self) -> Result<Axis> {
        parse_axis(&self.initial_rotation_axis)
    }

    /// Parsed axis of the primary rotation.
    pub fn primary_axis(&self) -> Result<Axis> {
        parse_axis(&self.primary_axis)
    }

    /// Parsed axis of the secondary correction rotation.
    pub fn secondary_axis(&self) -> Result<Axis> {
        parse_axis(&self.secondary_axis)
    }
}

fn parse_axis(label: &str) -> Result<Axis> {
    Axis::from_label(label)
        .ok_or_else(|| SimError::Config(format!("unknown rotation axis label {label:?}")))
}

/// Complete settings for a simulation batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// The source, sensor and aperture planes.
    pub planes: PlaneSet,
    /// Sensor target areas. Classification follows list order.
    pub sensor_areas: Vec<AreaConfig>,
    /// Aperture pass areas. Classification follows list order.
    pub aperture_areas: Vec<AreaConfig>,
    /// Ray generation and repetition parameters.
    pub simulation: SimulationConfig,
    /// Arc movement parameters.
    pub arc: ArcConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            planes: PlaneSet {
                source: PlaneConfig {
                    title: "source_plane".to_string(),
                    position: [0.0, 0.0, 1.0],
                    direction: [0.0, 0.0, -1.0],
                    width: 10.0,
                    length: 10.0,
                },
                sensor: PlaneConfig {
                    title: "sensor_plane".to_string(),
                    position: [0.0, 0.0, 0.0],
                    direction: [0.0, 0.0, -1.0],
                    width: 10.0,
                    length: 10.0,
                },
                aperture: PlaneConfig {
                    title: "aperture_plane".to_string(),
                    position: [0.0, 0.0, 0.5],
                    direction: [0.0, 0.0, -1.0],
                    width: 5.0,
                    length: 5.0,
                },
            },
            sensor_areas: vec![AreaConfig {
                title: "sensor_a".to_string(),
                position: [0.0, 0.0, 0.0],
                direction: [0.0, 0.0, 1.0],
                width: 2.0,
                length: 2.0,
            }],
            aperture_areas: vec![AreaConfig {
                title: "full_aperture".to_string(),
                position: [0.0, 0.0, 0.5],
                direction: [0.0, 0.0, 1.0],
                width: 10.0,
                length: 10.0,
            }],
            simulation: SimulationConfig {
                num_rays: 1000,
                num_runs: 1,
                seed: 0,
                ray_mode: RayMode::Attached,
                keep_ray_records: false,
            },
            arc: ArcConfig {
                radius: 9.0,
                step_deg: 90.0,
                levels: vec![90.0, 60.0, 30.0],
                initial_rotation_deg: 90.0,
                initial_rotation_axis: "y".to_string(),
                primary_axis: "z".to_string(),
                secondary_axis: "y".to_string(),
                mode: SweepMode::HorizontalCircles,
                execute_movements: true,
            },
        }
    }
}

impl Settings {
    /// Check every field combination the runner relies on.
    pub fn validate(&self) -> Result<()> {
        for plane in [
            &self.planes.source,
            &self.planes.sensor,
            &self.planes.aperture,
        ] {
            validate_extent(&plane.title, plane.width, plane.length)?;
            validate_direction(&plane.title, &plane.direction)?;
        }
        if self.sensor_areas.is_empty() {
            return Err(SimError::Config("sensor_areas must not be empty".to_string()));
        }
        if self.aperture_areas.is_empty() {
            return Err(SimError::Config(
                "aperture_areas must not be empty".to_string(),
            ));
        }
        for area in self.sensor_areas.iter().chain(self.aperture_areas.iter()) {
            validate_extent(&area.title, area.width, area.length)?;
            validate_direction(&area.title, &area.direction)?;
        }
        if self.simulation.num_rays == 0 {
            return Err(SimError::Config("num_rays must be at least 1".to_string()));
        }
        if self.simulation.num_runs == 0 {
            return Err(SimError::Config("num_runs must be at least 1".to_string()));
        }
        if self.arc.execute_movements {
            if self.arc.radius <= 0.0 {
                return Err(SimError::Config(format!(
                    "arc radius must be positive, got {}",
                    self.arc.radius
                )));
            }
            if self.arc.step_deg <= 0.0 {
                return Err(SimError::Config(format!(
                    "arc step must be positive, got {}",
                    self.arc.step_deg
                )));
            }
            if self.arc.levels.is_empty() {
                return Err(SimError::Config("arc levels must not be empty".to_string()));
            }
        }
        self.arc.initial_axis()?;
        self.arc.primary_axis()?;
        self.arc.secondary_axis()?;
        Ok(())
    }
}

fn validate_extent(title: &str, width: f64, length: f64) -> Result<()> {
    if width <= 0.0 || length <= 0.0 {
        return Err(SimError::Config(format!(
            "{title}: width and length must be positive, got {width} x {length}"
        )));
    }
    Ok(())
}

fn validate_direction(title: &str, direction: &[f64; 3]) -> Result<()> {
    if Vec3::from(*direction).norm() == 0.0 {
        return Err(SimError::Config(format!(
            "{title}: direction must be non-zero"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_validate() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_settings_roundtrip_through_json() {
        let settings = Settings::default();
        let text = serde_json::to_string_pretty(&settings).unwrap();
        let back: Settings = serde_json::from_str(&text).unwrap();
        assert_eq!(back.planes.source.title, settings.planes.source.title);
        assert_eq!(back.simulation.num_rays, settings.simulation.num_rays);
        assert_eq!(back.arc.levels, settings.arc.levels);
        assert_eq!(back.arc.mode, settings.arc.mode);
        assert!(back.validate().is_ok());
    }

    #[test]
    fn test_ray_mode_defaults_to_attached() {
        let text = r#"{"num_rays": 10, "num_runs": 1, "seed": 4}"#;
        let config: SimulationConfig = serde_json::from_str(text).unwrap();
        assert_eq!(config.ray_mode, RayMode::Attached);
        assert!(!config.keep_ray_records);
    }

    #[test]
    fn test_unknown_axis_label_rejected() {
        let mut settings = Settings::default();
        settings.arc.secondary_axis = "w".to_string();
        let error = settings.validate().unwrap_err();
        assert!(error.to_string().contains("axis"));
    }

    #[test]
    fn test_uppercase_axis_label_rejected() {
        let mut settings = Settings::default();
        settings.arc.primary_axis = "Z".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_zero_direction_rejected() {
        let mut settings = Settings::default();
        settings.planes.sensor.direction = [0.0, 0.0, 0.0];
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_empty_sensor_areas_rejected() {
        let mut settings = Settings::default();
        settings.sensor_areas.clear();
        let error = settings.validate().unwrap_err();
        assert!(error.to_string().contains("sensor_areas"));
    }

    #[test]
    fn test_zero_rays_rejected() {
        let mut settings = Settings::default();
        settings.simulation.num_rays = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_negative_radius_rejected() {
        let mut settings = Settings::default();
        settings.arc.radius = -1.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_arc_fields_ignored_when_movements_disabled() {
        let mut settings = Settings::default();
        settings.arc.execute_movements = false;
        settings.arc.radius = 0.0;
        settings.arc.levels.clear();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_plane_config_builds_plane() {
        let plane = Settings::default().planes.source.build().unwrap();
        assert_eq!(plane.title, "source_plane");
        assert_eq!(plane.position, Point3::new(0.0, 0.0, 1.0));
    }
}
