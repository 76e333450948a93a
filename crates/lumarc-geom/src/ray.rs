//! Rays anchored in a plane's local frame.

use lumarc_math::{Dir3, Point3};

use crate::plane::Plane;

/// A ray anchored in the local frame of an emitting plane.
///
/// The world-space pose is a snapshot of the owning plane's pose taken
/// at the last `attach`; callers re-attach after every plane movement
/// when rays are meant to track the emitter.
#[derive(Debug, Clone)]
pub struct Ray {
    /// Anchor position in the owning plane's local frame (`z = 0` for
    /// points sampled on the plane surface).
    pub local_position: Point3,
    /// World-space origin.
    pub position: Point3,
    /// World-space direction (the owning plane's normal).
    pub direction: Dir3,
}

impl Ray {
    /// Create a ray at a local anchor, snapshotting the plane's pose.
    pub fn from_local(local_position: Point3, plane: &Plane) -> Self {
        let mut ray = Self {
            local_position,
            position: Point3::origin(),
            direction: plane.frame.normal,
        };
        ray.attach(plane);
        ray
    }

    /// Recompute the world pose from the plane's current pose.
    pub fn attach(&mut self, plane: &Plane) {
        self.position = plane.local_to_world(&self.local_position);
        self.direction = plane.frame.normal;
    }

    /// Evaluate the ray at parameter `t`: `position + t * direction`.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.position + t * self.direction.as_ref()
    }
}
