#![warn(missing_docs)]

//! Ray-plane intersection and target-area classification.
//!
//! The intersection is the closed-form parametric solution for an
//! infinite plane, gated to the front-facing side; bounding to a finite
//! rectangle is the job of the target areas, which classify the
//! projected intersection point.

use lumarc_geom::{Area, Plane, Ray};
use lumarc_math::Point3;
use thiserror::Error;

/// Errors from classifying intersection points.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TraceError {
    /// Classification was asked against an empty area list. This is a
    /// configuration problem, not a legitimate miss.
    #[error("no target areas to classify against")]
    EmptyAreaSet,
}

/// Result type for classification operations.
pub type Result<T> = std::result::Result<T, TraceError>;

/// Outcome of classifying an intersection point against target areas.
#[derive(Debug, Clone, Copy)]
pub enum Classification<'a> {
    /// The point landed inside an area.
    Hit(&'a Area),
    /// The point landed outside every area.
    Miss,
}

/// Intersect a ray with a plane.
///
/// With `N` the plane normal, `P` the plane position, `A` the ray origin
/// and `D` the ray direction, the solution is `t = (N·P - N·A) / (N·D)`
/// and the point `A + t D`. A ray that is parallel to the plane or
/// approaches it from behind (`N·D <= 0`) has no intersection; that is
/// an ordinary miss for the caller, not an error. Planes are registered
/// with the direction rays pass through them, so legitimate passage
/// always has a positive denominator.
pub fn intersect(plane: &Plane, ray: &Ray) -> Option<Point3> {
    let normal = plane.frame.normal.as_ref();
    let denom = normal.dot(ray.direction.as_ref());
    if denom <= 0.0 {
        return None;
    }
    let t = (normal.dot(&plane.position.coords) - normal.dot(&ray.position.coords)) / denom;
    Some(ray.at(t))
}

/// Classify an intersection point against an ordered list of areas.
///
/// The first area containing the point wins; a point inside none of
/// them is a miss. An empty list is rejected so a misconfigured target
/// cannot masquerade as a permanent miss.
pub fn classify<'a>(areas: &'a [Area], point: &Point3) -> Result<Classification<'a>> {
    if areas.is_empty() {
        return Err(TraceError::EmptyAreaSet);
    }
    for area in areas {
        if area.contains(point) {
            return Ok(Classification::Hit(area));
        }
    }
    Ok(Classification::Miss)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumarc_math::Vec3;

    fn sensor_plane() -> Plane {
        // Registered with the passage direction of downward rays
        Plane::new(
            "sensor",
            Point3::origin(),
            Vec3::new(0.0, 0.0, -1.0),
            10.0,
            10.0,
        )
        .unwrap()
    }

    fn source_plane() -> Plane {
        Plane::new(
            "source",
            Point3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 0.0, -1.0),
            10.0,
            10.0,
        )
        .unwrap()
    }

    #[test]
    fn test_perpendicular_ray_hits_origin() {
        // Emitter ray from (0, 0, 1) travelling (0, 0, -1) meets the
        // sensor plane at the origin
        let plane = sensor_plane();
        let ray = Ray::from_local(Point3::origin(), &source_plane());
        let point = intersect(&plane, &ray).unwrap();
        assert!((point - Point3::origin()).norm() < 1e-12);
    }

    #[test]
    fn test_offset_ray_keeps_lateral_position() {
        let plane = sensor_plane();
        let ray = Ray::from_local(Point3::new(3.0, 4.0, 0.0), &source_plane());
        let point = intersect(&plane, &ray).unwrap();
        // right = -X, up = +Y on the down-facing source
        assert!((point - Point3::new(-3.0, 4.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_receding_ray_has_no_intersection() {
        // N·D < 0: the ray approaches from the back side
        let plane = Plane::new(
            "sensor",
            Point3::origin(),
            Vec3::new(0.0, 0.0, 1.0),
            10.0,
            10.0,
        )
        .unwrap();
        let ray = Ray::from_local(Point3::origin(), &source_plane());
        assert!(intersect(&plane, &ray).is_none());
    }

    #[test]
    fn test_parallel_ray_has_no_intersection() {
        // N·D = 0: the ray runs inside a parallel plane
        let plane = Plane::new(
            "wall",
            Point3::new(0.0, 5.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            10.0,
            10.0,
        )
        .unwrap();
        let ray = Ray::from_local(Point3::origin(), &source_plane());
        assert!(intersect(&plane, &ray).is_none());
    }

    #[test]
    fn test_angled_ray_solves_parametric_form() {
        // Emitter tilted so rays travel along (-1, 0, -1) / sqrt(2)
        let emitter = Plane::new(
            "source",
            Point3::new(0.0, 0.0, 1.0),
            Vec3::new(-1.0, 0.0, -1.0),
            4.0,
            4.0,
        )
        .unwrap();
        let ray = Ray::from_local(Point3::origin(), &emitter);
        let point = intersect(&sensor_plane(), &ray).unwrap();
        // Dropping one unit in z walks one unit along -x
        assert!((point - Point3::new(-1.0, 0.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_classify_first_match_wins() {
        let areas = vec![
            Area::new(
                "inner",
                Point3::origin(),
                Vec3::new(0.0, 0.0, 1.0),
                2.0,
                2.0,
            )
            .unwrap(),
            Area::new(
                "outer",
                Point3::origin(),
                Vec3::new(0.0, 0.0, 1.0),
                8.0,
                8.0,
            )
            .unwrap(),
        ];
        // Inside both areas: the first in list order is reported
        match classify(&areas, &Point3::new(0.5, 0.5, 0.0)).unwrap() {
            Classification::Hit(area) => assert_eq!(area.title, "inner"),
            Classification::Miss => panic!("expected a hit"),
        }
        // Inside the second only
        match classify(&areas, &Point3::new(3.0, 0.0, 0.0)).unwrap() {
            Classification::Hit(area) => assert_eq!(area.title, "outer"),
            Classification::Miss => panic!("expected a hit"),
        }
    }

    #[test]
    fn test_classify_miss_outside_all_areas() {
        let areas = vec![Area::new(
            "sensor_a",
            Point3::origin(),
            Vec3::new(0.0, 0.0, 1.0),
            2.0,
            2.0,
        )
        .unwrap()];
        let outcome = classify(&areas, &Point3::new(6.0, 6.0, 0.0)).unwrap();
        assert!(matches!(outcome, Classification::Miss));
    }

    #[test]
    fn test_classify_empty_area_list_is_an_error() {
        let outcome = classify(&[], &Point3::origin());
        assert_eq!(outcome.unwrap_err(), TraceError::EmptyAreaSet);
    }
}
