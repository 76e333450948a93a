#![warn(missing_docs)]

//! Geometric entities for the lumarc illumination simulator.
//!
//! Provides the oriented rectangular planes the simulator moves along an
//! arc, the orthonormal local frames that track their orientation, the
//! rectangular target areas used for hit-testing, and the rays anchored
//! in a moving plane's local coordinates.

pub mod area;
pub mod error;
pub mod frame;
pub mod plane;
pub mod ray;

pub use area::Area;
pub use error::{GeomError, Result};
pub use frame::Frame;
pub use plane::Plane;
pub use ray::Ray;
