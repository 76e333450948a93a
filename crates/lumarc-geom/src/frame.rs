//! Orthonormal local frames for oriented planes.

use lumarc_math::{Dir3, Rotation, Tolerance, Vec3};

use crate::error::{GeomError, Result};

/// An orthonormal (right, up, normal) basis attached to a plane.
///
/// The basis is derived deterministically from the normal and the world
/// up reference, so two planes facing the same way always carry the same
/// frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    /// Unit vector along the plane's width axis.
    pub right: Dir3,
    /// Unit vector along the plane's length axis.
    pub up: Dir3,
    /// Unit normal the plane faces along.
    pub normal: Dir3,
}

impl Frame {
    /// Derive a frame from a facing direction.
    ///
    /// Fails when the direction has (near-)zero length, since no normal
    /// can be recovered from it.
    pub fn from_direction(direction: &Vec3) -> Result<Self> {
        if direction.norm() < Tolerance::DEFAULT.linear {
            return Err(GeomError::ZeroDirection);
        }
        Ok(Self::from_unit(Dir3::new_normalize(*direction)))
    }

    /// Derive a frame from an already-normalized normal.
    ///
    /// `right = normalize(reference x normal)` and `up = normal x right`,
    /// with the world up `(0, 1, 0)` as reference. When the normal is
    /// parallel (or anti-parallel) to the reference, `(1, 0, 0)` is
    /// substituted to keep the cross product non-degenerate.
    pub fn from_unit(normal: Dir3) -> Self {
        let n = normal.into_inner();
        let reference = if Vec3::y().cross(&n).norm() < Tolerance::DEFAULT.angular {
            Vec3::x()
        } else {
            Vec3::y()
        };
        let right = Dir3::new_normalize(reference.cross(&n));
        let up = Dir3::new_normalize(n.cross(right.as_ref()));
        Self { right, up, normal }
    }

    /// The frame after a rotation.
    ///
    /// The rotation is applied to the normal and the basis re-derived
    /// from the result, so repeated rotations cannot accumulate
    /// non-orthonormality.
    pub fn rotated(&self, rotation: &Rotation) -> Self {
        let n = rotation.apply_vec(self.normal.as_ref());
        Self::from_unit(Dir3::new_normalize(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn assert_orthonormal(frame: &Frame) {
        let r = frame.right.as_ref();
        let u = frame.up.as_ref();
        let n = frame.normal.as_ref();
        assert!(r.dot(u).abs() < 1e-9);
        assert!(r.dot(n).abs() < 1e-9);
        assert!(u.dot(n).abs() < 1e-9);
        assert!((r.norm() - 1.0).abs() < 1e-9);
        assert!((u.norm() - 1.0).abs() < 1e-9);
        assert!((n.norm() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_orthonormal_for_many_directions() {
        let directions = [
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-0.3, 2.0, -5.0),
            Vec3::new(1e-3, 1.0, 1e-3),
            Vec3::new(7.0, -0.2, 0.1),
        ];
        for direction in directions {
            let frame = Frame::from_direction(&direction).unwrap();
            assert_orthonormal(&frame);
        }
    }

    #[test]
    fn test_down_facing_frame() {
        let frame = Frame::from_direction(&Vec3::new(0.0, 0.0, -1.0)).unwrap();
        assert!((frame.right.as_ref() - Vec3::new(-1.0, 0.0, 0.0)).norm() < 1e-12);
        assert!((frame.up.as_ref() - Vec3::new(0.0, 1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_world_up_fallback() {
        // Normal parallel to the world up reference
        let frame = Frame::from_direction(&Vec3::new(0.0, 1.0, 0.0)).unwrap();
        assert_orthonormal(&frame);
        assert!((frame.right.as_ref() - Vec3::new(0.0, 0.0, 1.0)).norm() < 1e-12);
        assert!((frame.up.as_ref() - Vec3::new(1.0, 0.0, 0.0)).norm() < 1e-12);

        // Anti-parallel takes the fallback too
        let frame = Frame::from_direction(&Vec3::new(0.0, -1.0, 0.0)).unwrap();
        assert_orthonormal(&frame);
    }

    #[test]
    fn test_zero_direction_rejected() {
        let result = Frame::from_direction(&Vec3::zeros());
        assert_eq!(result.unwrap_err(), GeomError::ZeroDirection);
    }

    #[test]
    fn test_rotated_stays_orthonormal() {
        let mut frame = Frame::from_direction(&Vec3::new(0.0, 0.0, 1.0)).unwrap();
        let rotation = Rotation::about_x(PI / 2.0);
        // Quarter turn about X carries the normal onto -Y, which needs
        // the fallback reference during re-derivation
        frame = frame.rotated(&rotation);
        assert!((frame.normal.as_ref() - Vec3::new(0.0, -1.0, 0.0)).norm() < 1e-9);
        assert_orthonormal(&frame);
    }

    #[test]
    fn test_frame_is_deterministic() {
        let a = Frame::from_direction(&Vec3::new(0.4, -1.0, 2.0)).unwrap();
        let b = Frame::from_direction(&Vec3::new(0.8, -2.0, 4.0)).unwrap();
        assert!((a.right.as_ref() - b.right.as_ref()).norm() < 1e-12);
        assert!((a.up.as_ref() - b.up.as_ref()).norm() < 1e-12);
        assert!((a.normal.as_ref() - b.normal.as_ref()).norm() < 1e-12);
    }
}
