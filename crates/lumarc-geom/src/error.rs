//! Error types for the geometry layer.

use thiserror::Error;

/// Errors from constructing geometric entities.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeomError {
    /// A zero-length direction vector cannot define a local frame.
    #[error("zero-length direction vector")]
    ZeroDirection,
}

/// Result type for geometry operations.
pub type Result<T> = std::result::Result<T, GeomError>;
