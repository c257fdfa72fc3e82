//! Triangle subdivision and sphere tessellation

use crate::platonic;
use lineforge_core::{
    check_budget, mesh_footprint, midpoint, try_reserve, Error, Face, Figure, Result, GEOMETRY_BUDGET,
};
use std::collections::HashMap;
use tracing::debug;

/// Split every triangular face into four by inserting edge midpoints.
///
/// Triangle `(a, b, c)` with midpoints `ab`, `bc`, `ca` becomes
/// `(a, ab, ca)`, `(b, bc, ab)`, `(c, ca, bc)` and `(ab, bc, ca)`, all with
/// the winding of the source triangle. Midpoints are shared between neighbouring
/// faces.
pub fn split_triangles(fig: &mut Figure) -> Result<()> {
    if let Some(face) = fig.faces.iter().find(|f| f.len() != 3) {
        return Err(Error::MalformedGeometry(format!(
            "triangle subdivision needs triangular faces, found one with {} indices",
            face.len()
        )));
    }
    fig.validate()?;

    let face_count = fig.faces.len();
    let new_face_count = face_count.checked_mul(4).ok_or_else(|| {
        Error::ResourceExhausted(format!("{} faces cannot be subdivided further", face_count))
    })?;
    // Each face adds at most three midpoints.
    let new_midpoints = face_count.saturating_mul(3);
    let footprint = fig
        .point_count()
        .checked_add(new_midpoints)
        .and_then(|points| mesh_footprint(points, new_face_count, 3));
    check_budget(footprint, GEOMETRY_BUDGET, format_args!("subdividing {} triangles", face_count))?;

    let mut faces = Vec::new();
    try_reserve(&mut faces, new_face_count)?;
    try_reserve(&mut fig.points, new_midpoints)?;

    let mut midpoints: HashMap<(usize, usize), usize> = HashMap::new();
    midpoints.try_reserve(new_midpoints)?;
    let mut mid = |fig: &mut Figure, a: usize, b: usize| -> usize {
        let key = if a < b { (a, b) } else { (b, a) };
        if let Some(&index) = midpoints.get(&key) {
            return index;
        }
        let point = midpoint(&fig.points[a], &fig.points[b]);
        let index = fig.add_point(point);
        midpoints.insert(key, index);
        index
    };

    let old_faces = std::mem::take(&mut fig.faces);
    for face in &old_faces {
        let (a, b, c) = (face.point_indexes[0], face.point_indexes[1], face.point_indexes[2]);
        let ab = mid(fig, a, b);
        let bc = mid(fig, b, c);
        let ca = mid(fig, c, a);
        faces.push(Face::from([a, ab, ca]));
        faces.push(Face::from([b, bc, ab]));
        faces.push(Face::from([c, ca, bc]));
        faces.push(Face::from([ab, bc, ca]));
    }
    fig.faces = faces;
    Ok(())
}

/// Apply [`split_triangles`] `times` times
pub fn subdivide(fig: &mut Figure, times: usize) -> Result<()> {
    for _ in 0..times {
        split_triangles(fig)?;
    }
    Ok(())
}

/// Bytes an `n`-times subdivided icosahedron occupies: `20 * 4^n` triangles
/// over `10 * 4^n + 2` points
pub fn sphere_footprint(n: usize) -> Option<usize> {
    let growth = 4usize.checked_pow(u32::try_from(n).ok()?)?;
    let faces = growth.checked_mul(20)?;
    let points = growth.checked_mul(10)?.checked_add(2)?;
    mesh_footprint(points, faces, 3)
}

/// Unit sphere: an icosahedron subdivided `n` times with every point pushed
/// onto the unit sphere afterwards
pub fn sphere(n: usize) -> Result<Figure> {
    check_budget(sphere_footprint(n), GEOMETRY_BUDGET, format_args!("sphere with {} subdivisions", n))?;
    let mut fig = platonic::icosahedron();
    subdivide(&mut fig, n)?;
    fig.normalize_points();
    debug!(
        subdivisions = n,
        points = fig.point_count(),
        faces = fig.face_count(),
        "tessellated sphere"
    );
    Ok(fig)
}
