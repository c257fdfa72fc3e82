//! Core traits for lineforge

use crate::{figure::*, point::*, transform::Transform3D};

/// Trait for objects that can be transformed
pub trait Transformable {
    /// Apply a transformation to the object
    fn transform(&mut self, transform: &Transform3D);
}

/// Trait for objects with an axis-aligned extent
pub trait Bounded {
    /// Get the bounding box of the object
    fn bounding_box(&self) -> (Point3d, Point3d);

    /// Get the center point of the object
    fn center(&self) -> Point3d {
        let (min, max) = self.bounding_box();
        nalgebra::center(&min, &max)
    }
}

impl Transformable for Figure {
    fn transform(&mut self, transform: &Transform3D) {
        transform.apply(self);
    }
}

impl Transformable for Figures3D {
    fn transform(&mut self, transform: &Transform3D) {
        for figure in self.iter_mut() {
            transform.apply(figure);
        }
    }
}

impl Bounded for Figure {
    fn bounding_box(&self) -> (Point3d, Point3d) {
        if self.points.is_empty() {
            return (Point3d::origin(), Point3d::origin());
        }

        let mut min = self.points[0];
        let mut max = self.points[0];

        for point in &self.points {
            min.x = min.x.min(point.x);
            min.y = min.y.min(point.y);
            min.z = min.z.min(point.z);

            max.x = max.x.max(point.x);
            max.y = max.y.max(point.y);
            max.z = max.z.max(point.z);
        }

        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn test_bounding_box_and_center() {
        let fig = Figure::from_points_and_faces(
            vec![
                Point3d::new(-1.0, 2.0, 0.0),
                Point3d::new(3.0, -2.0, 1.0),
                Point3d::new(0.0, 0.0, 5.0),
            ],
            vec![[0, 1, 2]],
        );
        let (min, max) = fig.bounding_box();
        assert_eq!(min, Point3d::new(-1.0, -2.0, 0.0));
        assert_eq!(max, Point3d::new(3.0, 2.0, 5.0));
        assert_eq!(fig.center(), Point3d::new(1.0, 0.0, 2.5));
    }

    #[test]
    fn test_transform_scene() {
        let fig = Figure::from_points_and_faces(vec![Point3d::new(1.0, 1.0, 1.0)], Vec::<Face>::new());
        let mut scene: Figures3D = vec![fig.clone(), fig];
        scene.transform(&Transform3D::translation(Vector3::new(1.0, 0.0, 0.0)));
        assert!(scene.iter().all(|f| f.points[0] == Point3d::new(2.0, 1.0, 1.0)));
    }
}
