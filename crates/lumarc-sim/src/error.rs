//! Error types for simulation setup and execution.

use thiserror::Error;

/// Errors raised while building or running a simulation.
#[derive(Error, Debug)]
pub enum SimError {
    /// The settings describe an unusable rig.
    #[error("invalid settings: {0}")]
    Config(String),
    /// A plane or area could not be constructed.
    #[error(transparent)]
    Geometry(#[from] lumarc_geom::GeomError),
    /// Ray classification failed.
    #[error(transparent)]
    Trace(#[from] lumarc_trace::TraceError),
    /// The arc trajectory could not be generated.
    #[error(transparent)]
    Sweep(#[from] lumarc_sweep::SweepError),
}

/// Convenience alias for simulation results.
pub type Result<T> = std::result::Result<T, SimError>;
