//! Parametric meshes sampled on circles: cone, cylinder, open tube and torus
//!
//! Circles are sampled at `cos(2πi/n)`, `sin(2πi/n)`. Side faces wind
//! counter-clockwise seen from outside; caps that face -Z list their ring in
//! reverse.

use lineforge_core::{
    check_budget, mesh_footprint, Error, Face, Figure, Point3d, Result, GEOMETRY_BUDGET,
};
use std::f64::consts::PI;

fn circle_point(i: usize, n: usize, z: f64) -> Point3d {
    let angle = 2.0 * PI * i as f64 / n as f64;
    Point3d::new(angle.cos(), angle.sin(), z)
}

fn require_sides(n: usize, what: &str) -> Result<()> {
    if n < 3 {
        return Err(Error::InvalidData(format!(
            "{} needs at least 3 sides, got {}",
            what, n
        )));
    }
    Ok(())
}

fn require_budget(footprint: Option<usize>, what: &str, n: usize) -> Result<()> {
    check_budget(footprint, GEOMETRY_BUDGET, format_args!("{} with {} sides", what, n))
}

/// One face holding `n` indices, as used for caps
fn cap_footprint(n: usize) -> Option<usize> {
    mesh_footprint(0, 1, n)
}

/// Bytes of an `n`-sided [`tube`]: `2n` points and `n` quads
pub fn tube_footprint(n: usize) -> Option<usize> {
    mesh_footprint(n.checked_mul(2)?, n, 4)
}

/// Cone over the unit circle with its apex at `(0, 0, height)`.
///
/// Produces `n + 1` points: `n` triangular side faces plus one ground face.
pub fn cone(n: usize, height: f64) -> Result<Figure> {
    require_sides(n, "cone")?;
    let footprint = n
        .checked_add(1)
        .and_then(|points| mesh_footprint(points, n, 3))
        .and_then(|sides| sides.checked_add(cap_footprint(n)?));
    require_budget(footprint, "cone", n)?;
    let mut fig = Figure::new();
    for i in 0..n {
        fig.add_point(circle_point(i, n, 0.0));
    }
    let apex = fig.add_point(Point3d::new(0.0, 0.0, height));

    for i in 0..n {
        fig.add_face([i, (i + 1) % n, apex]);
    }
    fig.add_face(Face::new((0..n).rev().collect()));
    Ok(fig)
}

/// Closed cylinder: two unit circles at `z = 0` and `z = height`, `n` quad
/// sides, a ground face and a roof face.
pub fn cylinder(n: usize, height: f64) -> Result<Figure> {
    require_sides(n, "cylinder")?;
    let footprint = tube_footprint(n)
        .and_then(|sides| sides.checked_add(cap_footprint(n)?.checked_mul(2)?));
    require_budget(footprint, "cylinder", n)?;
    let mut fig = tube(n, height)?;
    fig.add_face(Face::new((0..n).rev().collect()));
    fig.add_face(Face::new((n..2 * n).collect()));
    Ok(fig)
}

/// Cylinder without caps, used to extrude edges of thick figures.
pub fn tube(n: usize, height: f64) -> Result<Figure> {
    require_sides(n, "cylinder")?;
    require_budget(tube_footprint(n), "tube", n)?;
    let mut fig = Figure::new();
    for i in 0..n {
        fig.add_point(circle_point(i, n, 0.0));
    }
    for i in 0..n {
        fig.add_point(circle_point(i, n, height));
    }
    for i in 0..n {
        let next = (i + 1) % n;
        fig.add_face([i, next, n + next, n + i]);
    }
    Ok(fig)
}

/// Torus around the Z axis with major radius `major` and tube radius
/// `minor`, sampled with `n` rings of `m` points each.
pub fn torus(n: usize, m: usize, major: f64, minor: f64) -> Result<Figure> {
    require_sides(n, "torus ring count")?;
    require_sides(m, "torus tube")?;
    let footprint = n.checked_mul(m).and_then(|cells| mesh_footprint(cells, cells, 4));
    require_budget(footprint, "torus", n)?;
    let mut fig = Figure::new();
    for i in 0..n {
        let u = 2.0 * PI * i as f64 / n as f64;
        for j in 0..m {
            let v = 2.0 * PI * j as f64 / m as f64;
            let ring = major + minor * v.cos();
            fig.add_point(Point3d::new(ring * u.cos(), ring * u.sin(), minor * v.sin()));
        }
    }

    let index = |i: usize, j: usize| (i % n) * m + (j % m);
    for i in 0..n {
        for j in 0..m {
            fig.add_face([index(i, j), index(i + 1, j), index(i + 1, j + 1), index(i, j + 1)]);
        }
    }
    Ok(fig)
}
