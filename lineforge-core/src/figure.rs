//! Figure data structures: faces, materials and the figure mesh itself

use crate::error::{Error, Result};
use crate::point::*;
use serde::{Deserialize, Serialize};

/// An RGB color with channels in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Build a color from the first three entries of a configuration tuple
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        match values {
            [r, g, b, ..] => Ok(Self::new(*r, *g, *b)),
            _ => Err(Error::InvalidData(format!(
                "color needs 3 components, got {}",
                values.len()
            ))),
        }
    }

    /// Convert to 8-bit channels, clamping out-of-range values
    pub fn to_rgb8(&self) -> [u8; 3] {
        let channel = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b)]
    }
}

/// Reflection properties shared by every figure built from one scene entry
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Material {
    /// Base color; the only attribute the wireframe path draws with
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    pub reflection_coefficient: f64,
}

impl Material {
    /// A material that only carries a base color
    pub fn plain(color: Color) -> Self {
        Self {
            ambient: color,
            ..Default::default()
        }
    }
}

/// A polygon given as an ordered cycle of indices into a figure's points
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Face {
    pub point_indexes: Vec<usize>,
}

impl Face {
    pub fn new(point_indexes: Vec<usize>) -> Self {
        Self { point_indexes }
    }

    pub fn len(&self) -> usize {
        self.point_indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.point_indexes.is_empty()
    }

    /// The edges of the polygon, `k -> k+1` and finally `last -> first`
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.point_indexes.len();
        (0..n).map(move |k| (self.point_indexes[k], self.point_indexes[(k + 1) % n]))
    }
}

impl Face {
    /// Bytes taken by the face including its index buffer
    pub fn footprint(&self) -> Option<usize> {
        self.point_indexes
            .len()
            .checked_mul(std::mem::size_of::<usize>())?
            .checked_add(std::mem::size_of::<Face>())
    }
}

/// Bytes needed for `points` points and `faces` faces of `indexes_per_face`
/// indices each, or `None` if that overflows
pub fn mesh_footprint(points: usize, faces: usize, indexes_per_face: usize) -> Option<usize> {
    let face_bytes = indexes_per_face
        .checked_mul(std::mem::size_of::<usize>())?
        .checked_add(std::mem::size_of::<Face>())?;
    points
        .checked_mul(std::mem::size_of::<Point3d>())?
        .checked_add(faces.checked_mul(face_bytes)?)
}

impl From<Vec<usize>> for Face {
    fn from(point_indexes: Vec<usize>) -> Self {
        Self::new(point_indexes)
    }
}

impl<const N: usize> From<[usize; N]> for Face {
    fn from(point_indexes: [usize; N]) -> Self {
        Self::new(point_indexes.to_vec())
    }
}

/// A 3D mesh: points, faces over those points, and a material
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Figure {
    pub points: Vec<Point3d>,
    pub faces: Vec<Face>,
    pub material: Material,
}

/// An ordered collection of figures making up a scene
pub type Figures3D = Vec<Figure>;

impl Figure {
    /// Create a new empty figure
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a figure from points and faces
    pub fn from_points_and_faces<F: Into<Face>>(points: Vec<Point3d>, faces: Vec<F>) -> Self {
        Self {
            points,
            faces: faces.into_iter().map(Into::into).collect(),
            material: Material::default(),
        }
    }

    /// Get the number of points
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the figure is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() || self.faces.is_empty()
    }

    /// Add a point and return its index
    pub fn add_point(&mut self, point: Point3d) -> usize {
        let index = self.points.len();
        self.points.push(point);
        index
    }

    /// Add a face
    pub fn add_face<F: Into<Face>>(&mut self, face: F) {
        self.faces.push(face.into());
    }

    /// Builder-style material assignment
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Check that every face has at least two indices and that every index
    /// points at an existing point
    pub fn validate(&self) -> Result<()> {
        for (face_index, face) in self.faces.iter().enumerate() {
            if face.len() < 2 {
                return Err(Error::MalformedGeometry(format!(
                    "face {} has {} indices, need at least 2",
                    face_index,
                    face.len()
                )));
            }
            if let Some(&bad) = face.point_indexes.iter().find(|&&i| i >= self.points.len()) {
                return Err(Error::MalformedGeometry(format!(
                    "face {} references point {} but figure has {} points",
                    face_index,
                    bad,
                    self.points.len()
                )));
            }
        }
        Ok(())
    }

    /// Project every point onto the unit sphere
    pub fn normalize_points(&mut self) {
        for point in &mut self.points {
            *point = normalize_onto_unit_sphere(point);
        }
    }

    /// Approximate heap and inline size of the figure in bytes, or `None`
    /// if that number overflows
    pub fn footprint(&self) -> Option<usize> {
        let faces = self
            .faces
            .iter()
            .try_fold(0usize, |acc, face| acc.checked_add(face.footprint()?))?;
        mesh_footprint(self.points.len(), 0, 0)?
            .checked_add(faces)?
            .checked_add(std::mem::size_of::<Figure>())
    }
}
