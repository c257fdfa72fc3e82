//! Projected line segments

use lineforge_core::{Color, Point2d};

/// One projected face edge.
///
/// `z1` and `z2` are the eye-space depths of the endpoints before the
/// perspective divide, kept for depth testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line2D {
    pub p1: Point2d,
    pub p2: Point2d,
    pub z1: f64,
    pub z2: f64,
    pub color: Color,
}

/// All projected edges of a scene, in figure and face order
pub type Lines2D = Vec<Line2D>;

impl Line2D {
    pub fn new(p1: Point2d, p2: Point2d, z1: f64, z2: f64, color: Color) -> Self {
        Self { p1, p2, z1, z2, color }
    }

    /// Length of the segment in projected units
    pub fn length(&self) -> f64 {
        (self.p2 - self.p1).norm()
    }
}

/// Smallest axis-aligned rectangle holding every endpoint, as
/// `(min, max)`. `None` when there are no lines.
pub fn bounds(lines: &[Line2D]) -> Option<(Point2d, Point2d)> {
    let mut endpoints = lines.iter().flat_map(|l| [l.p1, l.p2]);
    let first = endpoints.next()?;
    Some(endpoints.fold((first, first), |(min, max), p| {
        (min.inf(&p), max.sup(&p))
    }))
}
