//! Oriented rectangular planes tracked through rotation and translation.

use lumarc_math::{Point3, Rotation, Vec3};
use rand::Rng;

use crate::error::Result;
use crate::frame::Frame;

/// Corner positions of a rectangle spanned by a frame, in top-left,
/// top-right, bottom-right, bottom-left order of the right/up basis.
pub(crate) fn rect_corners(
    position: &Point3,
    frame: &Frame,
    width: f64,
    length: f64,
) -> [Point3; 4] {
    let half_w = width / 2.0;
    let half_l = length / 2.0;
    let right = frame.right.as_ref();
    let up = frame.up.as_ref();
    [
        position - half_w * right + half_l * up,
        position + half_w * right + half_l * up,
        position + half_w * right - half_l * up,
        position - half_w * right - half_l * up,
    ]
}

/// An oriented rectangle: centre position, orthonormal frame, extents
/// and derived corner points.
///
/// The emitter plane of a simulation is mutated in place as it advances
/// along the arc; the sensor and aperture planes stay fixed. Corners are
/// recomputed after every rotation or translation so they always satisfy
/// `corners = position ± (width/2) right ± (length/2) up`.
#[derive(Debug, Clone)]
pub struct Plane {
    /// Name used in reports and logs.
    pub title: String,
    /// Centre position in world space.
    pub position: Point3,
    /// Orthonormal local frame.
    pub frame: Frame,
    /// Extent along the local right axis.
    pub width: f64,
    /// Extent along the local up axis.
    pub length: f64,
    /// Derived corners (TL, TR, BR, BL).
    pub corners: [Point3; 4],
}

impl Plane {
    /// Create a plane from its centre, facing direction and extents.
    pub fn new(
        title: impl Into<String>,
        position: Point3,
        direction: Vec3,
        width: f64,
        length: f64,
    ) -> Result<Self> {
        let frame = Frame::from_direction(&direction)?;
        let mut plane = Self {
            title: title.into(),
            position,
            frame,
            width,
            length,
            corners: [Point3::origin(); 4],
        };
        plane.update_corners();
        Ok(plane)
    }

    /// Rotate the plane in place.
    ///
    /// The frame is re-derived from the rotated normal, so repeated
    /// rotations cannot accumulate non-orthonormality. Corners are
    /// recomputed from the new frame.
    pub fn rotate(&mut self, rotation: &Rotation) {
        self.frame = self.frame.rotated(rotation);
        self.update_corners();
    }

    /// Translate the plane in place. Orientation is untouched.
    pub fn translate(&mut self, translation: &Vec3) {
        self.position += *translation;
        self.update_corners();
    }

    /// Recompute corners from the current position, frame and extents.
    pub fn update_corners(&mut self) {
        self.corners = rect_corners(&self.position, &self.frame, self.width, self.length);
    }

    /// Map a point in the plane's local frame to world space.
    pub fn local_to_world(&self, local: &Point3) -> Point3 {
        self.position
            + local.x * self.frame.right.as_ref()
            + local.y * self.frame.up.as_ref()
            + local.z * self.frame.normal.as_ref()
    }

    /// Sample `quantity` points uniformly over the rectangle.
    ///
    /// Points are returned in local coordinates with `z = 0`.
    pub fn sample_local_points(&self, quantity: usize, rng: &mut impl Rng) -> Vec<Point3> {
        let half_w = self.width / 2.0;
        let half_l = self.length / 2.0;
        (0..quantity)
            .map(|_| {
                let x = rng.random_range(-half_w..=half_w);
                let y = rng.random_range(-half_l..=half_l);
                Point3::new(x, y, 0.0)
            })
            .collect()
    }
}
