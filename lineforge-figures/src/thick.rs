//! Thick figures: every vertex becomes a sphere and every edge a tube

use crate::parametric::{tube, tube_footprint};
use crate::subdivision::{sphere, sphere_footprint};
use itertools::Itertools;
use lineforge_core::{
    check_budget, to_polar, try_reserve, Error, Figure, Figures3D, Result, Transform3D, GEOMETRY_BUDGET,
};
use tracing::debug;

/// Distinct edges of a face. A two-point face is a single segment, so its
/// wrap-around edge is not repeated.
fn face_segments(indexes: &[usize]) -> Vec<(usize, usize)> {
    match indexes.len() {
        0 | 1 => Vec::new(),
        2 => vec![(indexes[0], indexes[1])],
        _ => indexes.iter().copied().circular_tuple_windows().collect(),
    }
}

/// Replace `fig` by a sphere of radius `radius` on each vertex (icosahedron
/// subdivided `m` times) and a tube of radius `radius` with `n` sides along
/// each face edge.
///
/// Spheres come first, in point order, followed by the tubes in face order.
/// The output shares no topology with the source.
///
/// A two-index face is one segment and yields one tube, although projection
/// draws it as two coincident lines.
pub fn thick_figures(fig: &Figure, radius: f64, n: usize, m: usize) -> Result<Figures3D> {
    if radius <= 0.0 || !radius.is_finite() {
        return Err(Error::InvalidData(format!(
            "thick figure radius must be positive, got {}",
            radius
        )));
    }
    fig.validate()?;

    let edge_count: usize = fig.faces.iter().map(|f| face_segments(&f.point_indexes).len()).sum();
    let spheres = sphere_footprint(m).and_then(|bytes| bytes.checked_mul(fig.point_count()));
    let tubes = tube_footprint(n).and_then(|bytes| bytes.checked_mul(edge_count));
    let footprint = spheres.zip(tubes).and_then(|(s, t)| s.checked_add(t));
    check_budget(
        footprint,
        GEOMETRY_BUDGET,
        format_args!("thick figure of {} spheres and {} tubes", fig.point_count(), edge_count),
    )?;

    let mut out = Vec::new();
    try_reserve(&mut out, fig.point_count().saturating_add(edge_count))?;

    let ball = sphere(m)?;
    for point in &fig.points {
        let mut copy = ball.clone();
        Transform3D::scaling(radius)
            .then(Transform3D::translation(point.coords))
            .apply(&mut copy);
        out.push(copy);
    }

    for face in &fig.faces {
        for (a, b) in face_segments(&face.point_indexes) {
            let p1 = fig.points[a];
            let p2 = fig.points[b];
            let (theta, phi, length) = to_polar(&(p2 - p1)).ok_or_else(|| {
                Error::MalformedGeometry(format!(
                    "edge {} -> {} has zero length and no direction",
                    a, b
                ))
            })?;
            let mut cylinder = tube(n, length / radius)?;
            Transform3D::scaling(radius)
                .then(Transform3D::rotation_y(phi))
                .then(Transform3D::rotation_z(theta))
                .then(Transform3D::translation(p1.coords))
                .apply(&mut cylinder);
            out.push(cylinder);
        }
    }

    debug!(
        spheres = fig.point_count(),
        tubes = edge_count,
        "built thick figure"
    );
    Ok(out)
}
