//! Perspective projection of eye-space figures onto the `z = -d` plane

use crate::line::{Line2D, Lines2D};
use lineforge_core::{try_reserve, Figures3D, Point2d, Point3d, Result};
use tracing::debug;

/// Distance from the eye to the projection plane
pub const PROJECTION_DISTANCE: f64 = 1.0;

/// Perspective divide: `(d·x / -z, d·y / -z)`.
///
/// Points with `z = 0` lie in the eye plane and have no finite image.
pub fn project_point(point: &Point3d, d: f64) -> Point2d {
    Point2d::new(d * point.x / -point.z, d * point.y / -point.z)
}

/// Project every edge of every face into a 2D line carrying the eye-space
/// depths of its endpoints and the figure's base color.
///
/// A face `[a, b, c]` yields the lines `a-b`, `b-c` and `c-a`.
pub fn project_figures(figures: &Figures3D) -> Result<Lines2D> {
    let edge_count = figures
        .iter()
        .flat_map(|fig| fig.faces.iter())
        .fold(0usize, |acc, face| acc.saturating_add(face.len()));
    let mut lines = Vec::new();
    try_reserve(&mut lines, edge_count)?;

    for fig in figures {
        let projected: Vec<Point2d> = fig
            .points
            .iter()
            .map(|p| project_point(p, PROJECTION_DISTANCE))
            .collect();
        let color = fig.material.ambient;
        for face in &fig.faces {
            for (a, b) in face.edges() {
                lines.push(Line2D::new(
                    projected[a],
                    projected[b],
                    fig.points[a].z,
                    fig.points[b].z,
                    color,
                ));
            }
        }
    }

    debug!(figures = figures.len(), lines = lines.len(), "projected scene");
    Ok(lines)
}
