//! Platonic solids and the truncated icosahedron
//!
//! Every generator returns a canonical figure centred on the origin with
//! unit-scale vertices. Faces are wound counter-clockwise when seen from
//! outside the solid.

use lineforge_core::{Face, Figure, Point3d};
use std::collections::HashMap;
use std::f64::consts::PI;

/// Cube with vertices at `(±1, ±1, ±1)` and 6 quad faces
pub fn cube() -> Figure {
    let points = vec![
        Point3d::new(1.0, -1.0, -1.0),
        Point3d::new(-1.0, 1.0, -1.0),
        Point3d::new(1.0, 1.0, 1.0),
        Point3d::new(-1.0, -1.0, 1.0),
        Point3d::new(1.0, 1.0, -1.0),
        Point3d::new(-1.0, -1.0, -1.0),
        Point3d::new(1.0, -1.0, 1.0),
        Point3d::new(-1.0, 1.0, 1.0),
    ];
    let faces = vec![
        [0, 4, 2, 6],
        [4, 1, 7, 2],
        [1, 5, 3, 7],
        [5, 0, 6, 3],
        [6, 2, 7, 3],
        [0, 5, 1, 4],
    ];
    Figure::from_points_and_faces(points, faces)
}

/// Tetrahedron inscribed in the cube, 4 triangular faces
pub fn tetrahedron() -> Figure {
    let points = vec![
        Point3d::new(1.0, -1.0, -1.0),
        Point3d::new(-1.0, 1.0, -1.0),
        Point3d::new(1.0, 1.0, 1.0),
        Point3d::new(-1.0, -1.0, 1.0),
    ];
    let faces = vec![[0, 1, 2], [1, 3, 2], [0, 3, 1], [0, 2, 3]];
    Figure::from_points_and_faces(points, faces)
}

/// Octahedron with vertices on the axes, 8 triangular faces
pub fn octahedron() -> Figure {
    let points = vec![
        Point3d::new(1.0, 0.0, 0.0),
        Point3d::new(0.0, 1.0, 0.0),
        Point3d::new(-1.0, 0.0, 0.0),
        Point3d::new(0.0, -1.0, 0.0),
        Point3d::new(0.0, 0.0, -1.0),
        Point3d::new(0.0, 0.0, 1.0),
    ];
    let faces = vec![
        [0, 1, 5],
        [1, 2, 5],
        [2, 3, 5],
        [3, 0, 5],
        [1, 0, 4],
        [2, 1, 4],
        [3, 2, 4],
        [0, 3, 4],
    ];
    Figure::from_points_and_faces(points, faces)
}

/// Icosahedron: two poles at `z = ±√5/2` and two staggered pentagon rings
/// at `z = ±1/2`, 20 triangular faces
pub fn icosahedron() -> Figure {
    let pole = 5.0_f64.sqrt() / 2.0;
    let mut points = Vec::with_capacity(12);
    points.push(Point3d::new(0.0, 0.0, pole));
    for i in 0..5 {
        let angle = i as f64 * 2.0 * PI / 5.0;
        points.push(Point3d::new(angle.cos(), angle.sin(), 0.5));
    }
    for i in 0..5 {
        let angle = PI / 5.0 + i as f64 * 2.0 * PI / 5.0;
        points.push(Point3d::new(angle.cos(), angle.sin(), -0.5));
    }
    points.push(Point3d::new(0.0, 0.0, -pole));

    let faces = vec![
        [0, 1, 2],
        [0, 2, 3],
        [0, 3, 4],
        [0, 4, 5],
        [0, 5, 1],
        [1, 6, 2],
        [2, 6, 7],
        [2, 7, 3],
        [3, 7, 8],
        [3, 8, 4],
        [4, 8, 9],
        [4, 9, 5],
        [5, 9, 10],
        [5, 10, 1],
        [1, 10, 6],
        [11, 7, 6],
        [11, 8, 7],
        [11, 9, 8],
        [11, 10, 9],
        [11, 6, 10],
    ];
    Figure::from_points_and_faces(points, faces)
}

/// Dodecahedron as the dual of the icosahedron: one vertex per icosahedron
/// face centroid (20 points), one pentagon per icosahedron vertex (12 faces)
pub fn dodecahedron() -> Figure {
    let ico = icosahedron();
    let points = ico
        .faces
        .iter()
        .map(|face| {
            let sum = face
                .point_indexes
                .iter()
                .fold(nalgebra::Vector3::zeros(), |acc, &i| acc + ico.points[i].coords);
            Point3d::from(sum / face.len() as f64)
        })
        .collect();

    let faces = vec![
        [0, 1, 2, 3, 4],
        [0, 5, 6, 7, 1],
        [1, 7, 8, 9, 2],
        [2, 9, 10, 11, 3],
        [3, 11, 12, 13, 4],
        [4, 13, 14, 5, 0],
        [19, 18, 17, 16, 15],
        [19, 14, 13, 12, 18],
        [18, 12, 11, 10, 17],
        [17, 10, 9, 8, 16],
        [16, 8, 7, 6, 15],
        [15, 6, 5, 14, 19],
    ];
    Figure::from_points_and_faces(points, faces)
}

/// Truncated icosahedron: 60 points, 20 hexagons and 12 pentagons.
///
/// Every icosahedron edge is cut at one and two thirds of its length. Each
/// icosahedron face becomes a hexagon through the six cut points on its
/// edges, and each icosahedron vertex becomes a pentagon through the cut
/// points nearest to it.
pub fn bucky_ball() -> Figure {
    let ico = icosahedron();
    let mut fig = Figure::new();
    // (from, to) -> cut point one third of the way from `from` to `to`
    let mut cuts: HashMap<(usize, usize), usize> = HashMap::new();

    let mut cut = |fig: &mut Figure, from: usize, to: usize| -> usize {
        *cuts.entry((from, to)).or_insert_with(|| {
            let a = ico.points[from];
            let b = ico.points[to];
            fig.add_point(a + (b - a) / 3.0)
        })
    };

    let mut hexagons = Vec::with_capacity(ico.faces.len());
    for face in &ico.faces {
        let [a, b, c] = [face.point_indexes[0], face.point_indexes[1], face.point_indexes[2]];
        hexagons.push(Face::new(vec![
            cut(&mut fig, a, b),
            cut(&mut fig, b, a),
            cut(&mut fig, b, c),
            cut(&mut fig, c, b),
            cut(&mut fig, c, a),
            cut(&mut fig, a, c),
        ]));
    }

    // Around each vertex, a face (v, x, y) says that y follows x
    // counter-clockwise.
    let mut pentagons = Vec::with_capacity(ico.points.len());
    for vertex in 0..ico.points.len() {
        let mut successor = HashMap::new();
        for face in &ico.faces {
            let idx = &face.point_indexes;
            if let Some(pos) = idx.iter().position(|&i| i == vertex) {
                successor.insert(idx[(pos + 1) % 3], idx[(pos + 2) % 3]);
            }
        }
        let Some(&start) = successor.keys().min() else {
            continue;
        };
        let mut ring = Vec::with_capacity(5);
        let mut current = start;
        loop {
            ring.push(cut(&mut fig, vertex, current));
            match successor.get(&current) {
                Some(&next) if next != start => current = next,
                _ => break,
            }
        }
        pentagons.push(Face::new(ring));
    }

    fig.faces = hexagons;
    fig.faces.extend(pentagons);
    fig
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lineforge_core::Vector3d;

    fn assert_outward_winding(fig: &Figure) {
        for face in &fig.faces {
            let p: Vec<_> = face.point_indexes.iter().map(|&i| fig.points[i]).collect();
            let normal = (p[1] - p[0]).cross(&(p[2] - p[0]));
            let centre = p.iter().fold(Vector3d::zeros(), |acc, q| acc + q.coords) / p.len() as f64;
            assert!(normal.dot(&centre) > 0.0, "face {:?} winds inward", face.point_indexes);
        }
    }

    #[test]
    fn test_counts() {
        for (fig, points, faces, sides) in [
            (cube(), 8, 6, 4),
            (tetrahedron(), 4, 4, 3),
            (octahedron(), 6, 8, 3),
            (icosahedron(), 12, 20, 3),
            (dodecahedron(), 20, 12, 5),
        ] {
            assert_eq!(fig.point_count(), points);
            assert_eq!(fig.face_count(), faces);
            assert!(fig.faces.iter().all(|f| f.len() == sides));
            assert!(fig.validate().is_ok());
        }
    }

    #[test]
    fn test_platonic_faces_wind_outward() {
        for fig in [cube(), tetrahedron(), octahedron(), icosahedron(), dodecahedron()] {
            assert_outward_winding(&fig);
        }
    }

    #[test]
    fn test_icosahedron_is_regular() {
        let ico = icosahedron();
        let edge = (ico.points[0] - ico.points[1]).norm();
        for face in &ico.faces {
            for (a, b) in face.edges() {
                assert_relative_eq!((ico.points[a] - ico.points[b]).norm(), edge, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_bucky_ball_topology() {
        let ball = bucky_ball();
        assert_eq!(ball.point_count(), 60);
        assert_eq!(ball.face_count(), 32);
        assert_eq!(ball.faces.iter().filter(|f| f.len() == 6).count(), 20);
        assert_eq!(ball.faces.iter().filter(|f| f.len() == 5).count(), 12);
        assert!(ball.validate().is_ok());
        assert_outward_winding(&ball);
    }

    #[test]
    fn test_bucky_ball_points_equidistant_from_centre() {
        let ball = bucky_ball();
        let r = ball.points[0].coords.norm();
        for p in &ball.points {
            assert_relative_eq!(p.coords.norm(), r, epsilon = 1e-9);
        }
    }
}
