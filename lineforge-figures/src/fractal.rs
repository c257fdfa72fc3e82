//! Recursive replacement: self-similar fractals and the Menger sponge

use lineforge_core::{
    check_budget, try_reserve, Bounded, Error, Figure, Figures3D, Result, Transform3D, Vector3d,
    GEOMETRY_BUDGET,
};
use tracing::debug;

/// Number of figures `per_step` replacements produce after `iterations`
/// steps, or a resource error when that count does not fit in memory.
fn output_count(per_step: usize, iterations: usize) -> Result<usize> {
    u32::try_from(iterations)
        .ok()
        .and_then(|k| per_step.checked_pow(k))
        .ok_or_else(|| {
            Error::ResourceExhausted(format!(
                "{} iterations of {}-way replacement overflow the figure count",
                iterations, per_step
            ))
        })
}

/// Refuse to start a replacement whose `count` copies of `fig` would not fit
/// in the geometry budget.
fn check_copies(fig: &Figure, count: usize, what: &str) -> Result<()> {
    let footprint = fig.footprint().and_then(|bytes| bytes.checked_mul(count));
    check_budget(footprint, GEOMETRY_BUDGET, format_args!("{} of {} figures", what, count))
}

/// Replace a figure by copies of itself, one per vertex, scaled by
/// `1 / scale` and moved so that the copy's vertex `i` lands on the source's
/// vertex `i`. Each step feeds its output back in as the next step's input.
///
/// Zero iterations returns the source figure unchanged.
pub fn generate_fractal(fig: &Figure, iterations: usize, scale: f64) -> Result<Figures3D> {
    if scale == 0.0 || !scale.is_finite() {
        return Err(Error::InvalidData(format!(
            "fractal scale must be finite and non-zero, got {}",
            scale
        )));
    }
    let total = output_count(fig.point_count(), iterations)?;
    check_copies(fig, total, "fractal")?;
    debug!(iterations, scale, figures = total, "generating fractal");

    let shrink = Transform3D::scaling(1.0 / scale);
    let mut current = vec![fig.clone()];
    for _ in 0..iterations {
        let mut next = Vec::new();
        try_reserve(&mut next, current.len().saturating_mul(fig.point_count()))?;
        for source in &current {
            for (i, anchor) in source.points.iter().enumerate() {
                let mut copy = source.clone();
                shrink.apply(&mut copy);
                let offset = *anchor - copy.points[i];
                Transform3D::translation(offset).apply(&mut copy);
                next.push(copy);
            }
        }
        current = next;
    }
    Ok(current)
}

/// Offsets, in units of one third of the cube's size, of the 20 sub-cubes a
/// Menger sponge keeps: every cell of the 3x3x3 grid except the centre and
/// the six face centres.
fn menger_cells() -> impl Iterator<Item = Vector3d> {
    (-1..=1)
        .flat_map(|x| (-1..=1).flat_map(move |y| (-1..=1).map(move |z| [x, y, z])))
        .filter(|cell| cell.iter().filter(|&&c| c == 0).count() <= 1)
        .map(|[x, y, z]| Vector3d::new(x as f64, y as f64, z as f64))
}

/// Menger sponge: every cube is replaced by the 20 kept thirds of itself,
/// `iterations` times. Zero iterations returns the cube unchanged.
pub fn menger_sponge(cube: &Figure, iterations: usize) -> Result<Figures3D> {
    let total = output_count(20, iterations)?;
    check_copies(cube, total, "Menger sponge")?;
    debug!(iterations, figures = total, "generating Menger sponge");

    let mut current = vec![cube.clone()];
    for _ in 0..iterations {
        let mut next = Vec::new();
        try_reserve(&mut next, current.len().saturating_mul(20))?;
        for source in &current {
            let (min, max) = source.bounding_box();
            let centre = source.center();
            let cell_size = (max - min) / 3.0;
            let shrink = Transform3D::translation(-centre.coords).then(Transform3D::scaling(1.0 / 3.0));
            for cell in menger_cells() {
                let target = centre.coords + cell.component_mul(&cell_size);
                let mut copy = source.clone();
                shrink.then(Transform3D::translation(target)).apply(&mut copy);
                next.push(copy);
            }
        }
        current = next;
    }
    Ok(current)
}
