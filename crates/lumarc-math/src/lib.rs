#![warn(missing_docs)]

//! Math types for the lumarc illumination simulator.
//!
//! Thin wrappers around nalgebra providing domain-specific types
//! for ray/plane geometry: points, vectors, directions, axis-labelled
//! rotation matrices, spherical coordinates, and tolerance constants.

use nalgebra::{Matrix3, Unit, Vector3};
use std::fmt;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A principal world axis, used to label rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// The world X axis.
    X,
    /// The world Y axis.
    Y,
    /// The world Z axis.
    Z,
}

impl Axis {
    /// Parse an axis from its lowercase label (`"x"`, `"y"` or `"z"`).
    ///
    /// Returns `None` for any other label; callers that accept axis
    /// labels from configuration must reject `None` rather than
    /// substitute a default.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "x" => Some(Axis::X),
            "y" => Some(Axis::Y),
            "z" => Some(Axis::Z),
            _ => None,
        }
    }

    /// The unit vector along this axis.
    pub fn unit(&self) -> Vec3 {
        match self {
            Axis::X => Vec3::x(),
            Axis::Y => Vec3::y(),
            Axis::Z => Vec3::z(),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// A 3x3 rotation matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Rotation {
    /// The underlying 3x3 matrix.
    pub matrix: Matrix3<f64>,
}

impl Rotation {
    /// Identity rotation.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    /// Rotation about the X axis by `angle` radians.
    pub fn about_x(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix3::identity();
        m[(1, 1)] = c;
        m[(1, 2)] = -s;
        m[(2, 1)] = s;
        m[(2, 2)] = c;
        Self { matrix: m }
    }

    /// Rotation about the Y axis by `angle` radians.
    pub fn about_y(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix3::identity();
        m[(0, 0)] = c;
        m[(0, 2)] = s;
        m[(2, 0)] = -s;
        m[(2, 2)] = c;
        Self { matrix: m }
    }

    /// Rotation about the Z axis by `angle` radians.
    pub fn about_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix3::identity();
        m[(0, 0)] = c;
        m[(0, 1)] = -s;
        m[(1, 0)] = s;
        m[(1, 1)] = c;
        Self { matrix: m }
    }

    /// Rotation about a labelled world axis by `angle` radians.
    pub fn about(axis: Axis, angle: f64) -> Self {
        match axis {
            Axis::X => Self::about_x(angle),
            Axis::Y => Self::about_y(angle),
            Axis::Z => Self::about_z(angle),
        }
    }

    /// Rotate a vector.
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        self.matrix * v
    }

    /// Compose: apply `self` after `other`.
    pub fn then(&self, other: &Rotation) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::identity()
    }
}

/// A spherical coordinate `(rho, theta, phi)` with angles in radians.
///
/// `theta` is the azimuth measured from +X in the XY plane and `phi`
/// the polar angle measured from +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    /// Radius (distance from the origin).
    pub rho: f64,
    /// Azimuth angle in radians.
    pub theta: f64,
    /// Polar (elevation) angle in radians.
    pub phi: f64,
}

impl Spherical {
    /// Create a spherical coordinate from radius and angles in radians.
    pub fn new(rho: f64, theta: f64, phi: f64) -> Self {
        Self { rho, theta, phi }
    }

    /// Convert to Cartesian coordinates.
    ///
    /// `x = rho sin(phi) cos(theta)`, `y = rho sin(phi) sin(theta)`,
    /// `z = rho cos(phi)`.
    pub fn to_cartesian(&self) -> Point3 {
        let (sp, cp) = self.phi.sin_cos();
        let (st, ct) = self.theta.sin_cos();
        Point3::new(self.rho * sp * ct, self.rho * sp * st, self.rho * cp)
    }

    /// Recover the spherical coordinate of a Cartesian point.
    ///
    /// `theta` is reported in `[-pi, pi]` via `atan2` and `phi` in
    /// `[0, pi]`. The origin maps to all-zero angles.
    pub fn from_cartesian(p: &Point3) -> Self {
        let rho = p.coords.norm();
        if rho == 0.0 {
            return Self::new(0.0, 0.0, 0.0);
        }
        let theta = p.y.atan2(p.x);
        let phi = (p.z / rho).acos();
        Self { rho, theta, phi }
    }
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance.
    pub linear: f64,
    /// Angular tolerance in radians.
    pub angular: f64,
}

impl Tolerance {
    /// Default tolerances (1e-9 linear, 1e-9 rad angular).
    pub const DEFAULT: Self = Self {
        linear: 1e-9,
        angular: 1e-9,
    };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }

    /// Check if two angles are effectively equal (in radians).
    pub fn angles_equal(&self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.angular
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_axis_from_label() {
        assert_eq!(Axis::from_label("x"), Some(Axis::X));
        assert_eq!(Axis::from_label("y"), Some(Axis::Y));
        assert_eq!(Axis::from_label("z"), Some(Axis::Z));
        assert_eq!(Axis::from_label("w"), None);
        assert_eq!(Axis::from_label("X"), None);
        assert_eq!(Axis::from_label(""), None);
    }

    #[test]
    fn test_axis_unit() {
        assert_eq!(Axis::X.unit(), Vec3::x());
        assert_eq!(Axis::Y.unit(), Vec3::y());
        assert_eq!(Axis::Z.unit(), Vec3::z());
    }

    #[test]
    fn test_rotation_z_90() {
        let r = Rotation::about_z(PI / 2.0);
        let v = r.apply_vec(&Vec3::x());
        assert!(v.x.abs() < 1e-12);
        assert!((v.y - 1.0).abs() < 1e-12);
        assert!(v.z.abs() < 1e-12);
    }

    #[test]
    fn test_rotation_x_90() {
        let r = Rotation::about_x(PI / 2.0);
        let v = r.apply_vec(&Vec3::y());
        assert!(v.x.abs() < 1e-12);
        assert!(v.y.abs() < 1e-12);
        assert!((v.z - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rotation_y_90() {
        let r = Rotation::about_y(PI / 2.0);
        let v = r.apply_vec(&Vec3::z());
        assert!((v.x - 1.0).abs() < 1e-12);
        assert!(v.y.abs() < 1e-12);
        assert!(v.z.abs() < 1e-12);
    }

    #[test]
    fn test_rotation_about_matches_labelled() {
        let angle = 0.37;
        assert_eq!(Rotation::about(Axis::X, angle), Rotation::about_x(angle));
        assert_eq!(Rotation::about(Axis::Y, angle), Rotation::about_y(angle));
        assert_eq!(Rotation::about(Axis::Z, angle), Rotation::about_z(angle));
    }

    #[test]
    fn test_rotation_preserves_norm() {
        let r = Rotation::about_y(1.2);
        let v = Vec3::new(3.0, -4.0, 12.0);
        assert_relative_eq!(r.apply_vec(&v).norm(), v.norm(), epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_compose() {
        // Two quarter turns about Z equal a half turn
        let quarter = Rotation::about_z(PI / 2.0);
        let half = quarter.then(&quarter);
        let v = half.apply_vec(&Vec3::x());
        assert!((v.x + 1.0).abs() < 1e-12);
        assert!(v.y.abs() < 1e-12);
    }

    #[test]
    fn test_spherical_to_cartesian() {
        // phi = 90 deg puts the point in the XY plane
        let s = Spherical::new(9.0, 0.0, PI / 2.0);
        let p = s.to_cartesian();
        assert!((p.x - 9.0).abs() < 1e-9);
        assert!(p.y.abs() < 1e-9);
        assert!(p.z.abs() < 1e-9);

        // phi = 0 is the north pole
        let pole = Spherical::new(5.0, 1.0, 0.0).to_cartesian();
        assert!(pole.x.abs() < 1e-9);
        assert!(pole.y.abs() < 1e-9);
        assert!((pole.z - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_spherical_roundtrip() {
        // Conversion composed with its inverse recovers (rho, theta, phi)
        let cases = [
            (1.0, 0.3, 0.2),
            (9.0, -2.1, 1.5),
            (4.2, 3.0, 2.9),
            (0.5, -0.01, 0.01),
            (100.0, 1.0, PI / 2.0),
        ];
        for (rho, theta, phi) in cases {
            let s = Spherical::new(rho, theta, phi);
            let back = Spherical::from_cartesian(&s.to_cartesian());
            assert_relative_eq!(back.rho, rho, epsilon = 1e-6);
            assert_relative_eq!(back.theta, theta, epsilon = 1e-6);
            assert_relative_eq!(back.phi, phi, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_spherical_origin() {
        let s = Spherical::from_cartesian(&Point3::origin());
        assert_eq!(s.rho, 0.0);
        assert_eq!(s.theta, 0.0);
        assert_eq!(s.phi, 0.0);
    }

    #[test]
    fn test_tolerance_points_equal() {
        let tol = Tolerance::DEFAULT;
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(1.0 + 1e-10, 2.0, 3.0);
        assert!(tol.points_equal(&a, &b));
        let c = Point3::new(1.001, 2.0, 3.0);
        assert!(!tol.points_equal(&a, &c));
    }

    #[test]
    fn test_tolerance_angles_equal() {
        let tol = Tolerance::DEFAULT;
        assert!(tol.angles_equal(1.0, 1.0 + 1e-10));
        assert!(!tol.angles_equal(1.0, 1.001));
    }
}
