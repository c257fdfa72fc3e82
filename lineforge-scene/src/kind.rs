//! Scene entry kinds and the base figures they start from

use crate::config::Section;
use lineforge_core::{Error, Face, Figure, Point3d, Result};
use lineforge_figures::{
    bucky_ball, cone, cube, cylinder, dodecahedron, icosahedron, lsystem_figure, octahedron,
    sphere, tetrahedron, torus, LSystemSource,
};
use std::fmt;
use std::str::FromStr;

/// A single figure a scene entry can start from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseShape {
    LineDrawing,
    Cube,
    Tetrahedron,
    Octahedron,
    Icosahedron,
    Dodecahedron,
    BuckyBall,
    Sphere,
    Cone,
    Cylinder,
    Torus,
    LSystem,
}

/// What a scene entry produces, resolved once from its `type` tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FigureKind {
    /// The base figure itself
    Single(BaseShape),
    /// Fractal replacement of a platonic solid or bucky ball
    Fractal(BaseShape),
    MengerSponge,
    /// Spheres on the vertices and tubes along the edges of the base figure
    Thick(BaseShape),
}

const SHAPE_NAMES: [(&str, BaseShape); 12] = [
    ("LineDrawing", BaseShape::LineDrawing),
    ("Cube", BaseShape::Cube),
    ("Tetrahedron", BaseShape::Tetrahedron),
    ("Octahedron", BaseShape::Octahedron),
    ("Icosahedron", BaseShape::Icosahedron),
    ("Dodecahedron", BaseShape::Dodecahedron),
    ("BuckyBall", BaseShape::BuckyBall),
    ("Sphere", BaseShape::Sphere),
    ("Cone", BaseShape::Cone),
    ("Cylinder", BaseShape::Cylinder),
    ("Torus", BaseShape::Torus),
    ("3DLSystem", BaseShape::LSystem),
];

impl BaseShape {
    pub fn name(&self) -> &'static str {
        SHAPE_NAMES
            .iter()
            .find(|(_, shape)| shape == self)
            .map(|(name, _)| *name)
            .unwrap_or("?")
    }

    fn is_solid(&self) -> bool {
        matches!(
            self,
            BaseShape::Cube
                | BaseShape::Tetrahedron
                | BaseShape::Octahedron
                | BaseShape::Icosahedron
                | BaseShape::Dodecahedron
                | BaseShape::BuckyBall
        )
    }

    /// Build the untransformed figure, reading shape parameters from the
    /// entry's section
    pub fn build(&self, section: &Section, lsystems: Option<&dyn LSystemSource>) -> Result<Figure> {
        let fig = match self {
            BaseShape::LineDrawing => line_drawing(section)?,
            BaseShape::Cube => cube(),
            BaseShape::Tetrahedron => tetrahedron(),
            BaseShape::Octahedron => octahedron(),
            BaseShape::Icosahedron => icosahedron(),
            BaseShape::Dodecahedron => dodecahedron(),
            BaseShape::BuckyBall => bucky_ball(),
            BaseShape::Sphere => sphere(section.usize("n")?)?,
            BaseShape::Cone => cone(section.usize("n")?, section.double("height")?)?,
            BaseShape::Cylinder => cylinder(section.usize("n")?, section.double("height")?)?,
            BaseShape::Torus => torus(
                section.usize("n")?,
                section.usize("m")?,
                section.double("R")?,
                section.double("r")?,
            )?,
            BaseShape::LSystem => {
                let input = section.string("inputfile")?;
                let source = lsystems.ok_or_else(|| {
                    Error::Unsupported(format!(
                        "no L-system source configured to load '{}'",
                        input
                    ))
                })?;
                lsystem_figure(&source.load(input)?)?
            }
        };
        Ok(fig)
    }
}

/// Figure given directly as `point<i>` coordinate tuples and `line<j>` index
/// tuples
fn line_drawing(section: &Section) -> Result<Figure> {
    let nr_points = section.usize("nrPoints")?;
    let nr_lines = section.usize("nrLines")?;
    let mut fig = Figure::new();

    for i in 0..nr_points {
        let key = format!("point{}", i);
        match section.double_tuple(&key)?.as_slice() {
            [x, y, z, ..] => {
                fig.add_point(Point3d::new(*x, *y, *z));
            }
            other => {
                return Err(Error::InvalidData(format!(
                    "{} needs 3 coordinates, got {}",
                    key,
                    other.len()
                )))
            }
        }
    }

    for j in 0..nr_lines {
        let key = format!("line{}", j);
        let indexes = section
            .int_tuple(&key)?
            .into_iter()
            .map(|i| {
                usize::try_from(i).map_err(|_| {
                    Error::MalformedGeometry(format!("{} has negative index {}", key, i))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        fig.add_face(Face::new(indexes));
    }

    fig.validate()?;
    Ok(fig)
}

impl FromStr for FigureKind {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self> {
        if tag == "MengerSponge" {
            return Ok(FigureKind::MengerSponge);
        }
        let lookup = |name: &str| {
            SHAPE_NAMES
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, shape)| *shape)
        };
        let kind = if let Some(rest) = tag.strip_prefix("Fractal") {
            lookup(rest)
                .filter(BaseShape::is_solid)
                .map(FigureKind::Fractal)
        } else if let Some(rest) = tag.strip_prefix("Thick") {
            lookup(rest)
                .filter(|s| s.is_solid() || matches!(s, BaseShape::LineDrawing | BaseShape::LSystem))
                .map(FigureKind::Thick)
        } else {
            lookup(tag).map(FigureKind::Single)
        };
        kind.ok_or_else(|| Error::Unsupported(format!("unknown figure type '{}'", tag)))
    }
}

impl fmt::Display for FigureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FigureKind::Single(shape) => write!(f, "{}", shape.name()),
            FigureKind::Fractal(shape) => write!(f, "Fractal{}", shape.name()),
            FigureKind::MengerSponge => write!(f, "MengerSponge"),
            FigureKind::Thick(shape) => write!(f, "Thick{}", shape.name()),
        }
    }
}
