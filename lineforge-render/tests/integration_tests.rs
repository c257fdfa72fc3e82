//! Integration tests for projection and rasterization

use approx::assert_relative_eq;
use lineforge_core::{Color, Figure, Material, Point3d, Transform3D};
use lineforge_figures::{cube, tetrahedron};
use lineforge_render::*;

fn viewed_from(mut fig: Figure, eye: Point3d) -> Figure {
    Transform3D::eye_point(&eye).apply(&mut fig);
    fig
}

#[test]
fn test_cube_projects_to_24_lines() {
    let fig = viewed_from(cube(), Point3d::new(0.0, 0.0, 10.0));
    let lines = project_figures(&vec![fig]).unwrap();
    assert_eq!(lines.len(), 24);
    for line in &lines {
        assert!(line.z1 < 0.0 && line.z2 < 0.0);
    }
}

#[test]
fn test_projected_lines_stay_inside_canvas() {
    let fig = viewed_from(cube(), Point3d::new(3.0, 4.0, 6.0))
        .with_material(Material::plain(Color::WHITE));
    let lines = project_figures(&vec![fig]).unwrap();
    let vp = Viewport::fit(&lines, 100.0).unwrap();
    assert_eq!(vp.width.max(vp.height), 100);
    for line in &lines {
        for p in [line.p1, line.p2] {
            let (x, y) = vp.map(&p);
            assert!(x >= 0 && x < vp.width as i64);
            assert!(y >= 0 && y < vp.height as i64);
        }
    }
}

#[test]
fn test_depths_do_not_depend_on_projection_distance() {
    let fig = viewed_from(tetrahedron(), Point3d::new(5.0, -2.0, 3.0));
    let lines = project_figures(&vec![fig.clone()]).unwrap();
    for (line, (a, _)) in lines.iter().zip(fig.faces.iter().flat_map(|f| f.edges())) {
        assert_eq!(line.z1, fig.points[a].z);
        let far = project_point(&fig.points[a], 2.0);
        assert_relative_eq!(far.coords, line.p1.coords * 2.0, epsilon = 1e-12);
    }
}

#[test]
fn test_fitting_preserves_length_ratios() {
    let fig = viewed_from(cube(), Point3d::new(4.0, 1.0, 2.0));
    let lines = project_figures(&vec![fig]).unwrap();
    let vp = Viewport::fit(&lines, 500.0).unwrap();
    let scaled = |l: &Line2D| {
        let a = l.p1 * vp.scale;
        let b = l.p2 * vp.scale;
        (b - a).norm()
    };
    let ratio = scaled(&lines[0]) / lines[0].length();
    for line in &lines[1..] {
        assert_relative_eq!(scaled(line) / line.length(), ratio, epsilon = 1e-9);
    }
}

#[test]
fn test_zbuffer_nearer_square_hides_farther() {
    let red = Color::new(1.0, 0.0, 0.0);
    let blue = Color::new(0.0, 0.0, 1.0);
    let square = |z: f64, color: Color| {
        Figure::from_points_and_faces(
            vec![
                Point3d::new(-z, -z, z),
                Point3d::new(z, -z, z),
                Point3d::new(z, z, z),
                Point3d::new(-z, z, z),
            ],
            vec![[0, 1, 2, 3]],
        )
        .with_material(Material::plain(color))
    };
    // Both squares project onto the same outline; the near one is drawn
    // first, so only depth testing keeps it on top.
    let near = square(-2.0, red);
    let far = square(-6.0, blue);
    let lines = project_figures(&vec![near, far]).unwrap();

    let buffered = fit_and_draw(&lines, 60.0, Color::BLACK, true).unwrap();
    let plain = fit_and_draw(&lines, 60.0, Color::BLACK, false).unwrap();
    let vp = Viewport::fit(&lines, 60.0).unwrap();
    let (x, y) = vp.map(&lines[0].p1);
    assert_eq!(buffered.pixel(x as u32, y as u32), Some([255, 0, 0]));
    assert_eq!(plain.pixel(x as u32, y as u32), Some([0, 0, 255]));
}
