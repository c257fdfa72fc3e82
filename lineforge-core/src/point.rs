//! Point types and related functionality

use nalgebra::{Point2, Point3, Vector3};

/// A 3D point with double precision coordinates
pub type Point3d = Point3<f64>;

/// A 3D vector with double precision components
pub type Vector3d = Vector3<f64>;

/// A projected 2D point
pub type Point2d = Point2<f64>;

/// Project a point onto the unit sphere around the origin.
///
/// The origin itself has no direction and is returned unchanged.
pub fn normalize_onto_unit_sphere(point: &Point3d) -> Point3d {
    let length = point.coords.norm();
    if length == 0.0 {
        return *point;
    }
    Point3d::from(point.coords / length)
}

/// Midpoint of two points
pub fn midpoint(a: &Point3d, b: &Point3d) -> Point3d {
    nalgebra::center(a, b)
}

/// Spherical decomposition of a vector: `(theta, phi, r)`.
///
/// `theta` is the azimuth in the XY plane, `phi` the angle from the +Z axis
/// and `r` the length. A zero vector has no defined direction and yields
/// `None`.
pub fn to_polar(v: &Vector3d) -> Option<(f64, f64, f64)> {
    let r = v.norm();
    if r == 0.0 {
        return None;
    }
    let theta = v.y.atan2(v.x);
    let phi = (v.z / r).clamp(-1.0, 1.0).acos();
    Some((theta, phi, r))
}
