//! Rectangular target regions for hit-testing projected intersections.

use lumarc_math::{Point3, Vec3};

use crate::error::Result;
use crate::frame::Frame;
use crate::plane::rect_corners;

/// A rectangular target zone coplanar with a sensor or aperture plane.
///
/// Hit-testing is a 2D box check on a point the intersection engine has
/// already projected onto the parent plane; the area consumes the
/// point's first two coordinates only.
#[derive(Debug, Clone)]
pub struct Area {
    /// Name used in reports (the sensor id in result tables).
    pub title: String,
    /// Centre position in world space.
    pub position: Point3,
    /// Orthonormal local frame derived from the facing direction.
    pub frame: Frame,
    /// Extent along the first in-plane axis.
    pub width: f64,
    /// Extent along the second in-plane axis.
    pub length: f64,
    /// Derived corners (TL, TR, BR, BL).
    pub corners: [Point3; 4],
}

impl Area {
    /// Create an area from its centre, facing direction and extents.
    pub fn new(
        title: impl Into<String>,
        position: Point3,
        direction: Vec3,
        width: f64,
        length: f64,
    ) -> Result<Self> {
        let frame = Frame::from_direction(&direction)?;
        let corners = rect_corners(&position, &frame, width, length);
        Ok(Self {
            title: title.into(),
            position,
            frame,
            width,
            length,
            corners,
        })
    }

    /// Test whether a projected intersection point lands inside the area.
    ///
    /// Boundaries are inclusive on both sides, so a point exactly on an
    /// edge counts as a hit.
    pub fn contains(&self, point: &Point3) -> bool {
        let half_w = self.width / 2.0;
        let half_l = self.length / 2.0;
        self.position.x - half_w <= point.x
            && point.x <= self.position.x + half_w
            && self.position.y - half_l <= point.y
            && point.y <= self.position.y + half_l
    }
}
