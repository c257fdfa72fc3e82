//! 3D transformation utilities
//!
//! Matrices act on column vectors, so a pipeline "first `a`, then `b`" is the
//! product `b * a`. [`Transform3D::then`] spells that order out so callers can
//! write transforms in the order they happen.

use crate::figure::Figure;
use crate::point::*;
use nalgebra::{Matrix4, Vector3};
use serde::{Deserialize, Serialize};

/// A 4x4 homogeneous transformation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub matrix: Matrix4<f64>,
}

impl Transform3D {
    /// Create an identity transformation
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Create a uniform scaling transformation
    pub fn scaling(factor: f64) -> Self {
        Self {
            matrix: Matrix4::new_scaling(factor),
        }
    }

    /// Rotation about the X axis, angle in radians
    pub fn rotation_x(angle: f64) -> Self {
        Self {
            matrix: Matrix4::from_axis_angle(&Vector3::x_axis(), angle),
        }
    }

    /// Rotation about the Y axis, angle in radians
    pub fn rotation_y(angle: f64) -> Self {
        Self {
            matrix: Matrix4::from_axis_angle(&Vector3::y_axis(), angle),
        }
    }

    /// Rotation about the Z axis, angle in radians
    pub fn rotation_z(angle: f64) -> Self {
        Self {
            matrix: Matrix4::from_axis_angle(&Vector3::z_axis(), angle),
        }
    }

    /// Create a translation transformation
    pub fn translation(offset: Vector3d) -> Self {
        Self {
            matrix: Matrix4::new_translation(&offset),
        }
    }

    /// View transform that moves `eye` to the origin looking down -Z at the
    /// world origin.
    ///
    /// An eye on the Z axis has no defined azimuth; `atan2(0, 0) = 0` is used,
    /// which still gives a valid right-handed frame.
    pub fn eye_point(eye: &Point3d) -> Self {
        let r = eye.coords.norm();
        let theta = eye.y.atan2(eye.x);
        let phi = if r == 0.0 {
            0.0
        } else {
            (eye.z / r).clamp(-1.0, 1.0).acos()
        };
        let (st, ct) = theta.sin_cos();
        let (sp, cp) = phi.sin_cos();

        #[rustfmt::skip]
        let matrix = Matrix4::new(
            -st,       ct,       0.0, 0.0,
            -ct * cp, -st * cp,  sp,  0.0,
             ct * sp,  st * sp,  cp,  -r,
             0.0,      0.0,      0.0, 1.0,
        );
        Self { matrix }
    }

    /// Model transform of a scene entry: scale, rotate about X, Y and Z
    /// (degrees), translate to `center`.
    pub fn model(scale: f64, rotate_degrees: [f64; 3], center: Vector3d) -> Self {
        Self::scaling(scale)
            .then(Self::rotation_x(rotate_degrees[0].to_radians()))
            .then(Self::rotation_y(rotate_degrees[1].to_radians()))
            .then(Self::rotation_z(rotate_degrees[2].to_radians()))
            .then(Self::translation(center))
    }

    /// Apply the transformation to a point
    pub fn transform_point(&self, point: &Point3d) -> Point3d {
        let homogeneous = self.matrix * point.to_homogeneous();
        Point3d::from_homogeneous(homogeneous).unwrap_or(*point)
    }

    /// Compose this transformation with another: `self` after `other`
    pub fn compose(self, other: Self) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Pipeline composition: `self` first, then `next`
    pub fn then(self, next: Self) -> Self {
        next.compose(self)
    }

    /// Map every point of a figure through this transform in place
    pub fn apply(&self, figure: &mut Figure) {
        for point in &mut figure.points {
            *point = self.transform_point(point);
        }
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}
