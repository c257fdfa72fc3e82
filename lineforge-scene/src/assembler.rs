//! Building a whole scene from its configuration

use crate::config::{Configuration, Section};
use crate::kind::FigureKind;
use lineforge_core::{Color, Error, Figures3D, Material, Point3d, Result, Transform3D, Transformable, Vector3d};
use lineforge_figures::{generate_fractal, menger_sponge, thick_figures, cube, LSystemSource};
use lineforge_render::{fit_and_draw, project_figures, Canvas};
use std::str::FromStr;
use tracing::{debug, info, warn};

/// How a scene is assembled and drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SceneOptions {
    /// Read `ambientReflection` instead of `color` as the base color
    pub lighting: bool,
    /// Resolve overlapping lines with a Z-buffer
    pub z_buffered: bool,
}

/// Image types a configuration's `General.type` may ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageType {
    Wireframe,
    ZBufferedWireframe,
}

impl FromStr for ImageType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Wireframe" => Ok(ImageType::Wireframe),
            "ZBufferedWireframe" => Ok(ImageType::ZBufferedWireframe),
            other => Err(Error::Unsupported(format!("image type '{}'", other))),
        }
    }
}

fn vector3(values: &[f64], what: &str) -> Result<Vector3d> {
    match values {
        [x, y, z, ..] => Ok(Vector3d::new(*x, *y, *z)),
        _ => Err(Error::InvalidData(format!(
            "{} needs 3 components, got {}",
            what,
            values.len()
        ))),
    }
}

/// Turns scene entries into eye-space figures
pub struct SceneAssembler<'a> {
    options: SceneOptions,
    lsystems: Option<&'a dyn LSystemSource>,
}

impl<'a> SceneAssembler<'a> {
    pub fn new(options: SceneOptions) -> Self {
        Self {
            options,
            lsystems: None,
        }
    }

    /// Use `source` to resolve `3DLSystem` entries
    pub fn with_lsystems(mut self, source: &'a dyn LSystemSource) -> Self {
        self.lsystems = Some(source);
        self
    }

    /// Material of an entry. The base color comes from `ambientReflection`
    /// when lighting is on and from `color` otherwise.
    pub fn material(&self, section: &Section) -> Result<Material> {
        let base_key = if self.options.lighting {
            "ambientReflection"
        } else {
            "color"
        };
        Ok(Material {
            ambient: Color::from_slice(&section.double_tuple(base_key)?)?,
            diffuse: Color::from_slice(&section.double_tuple_or("diffuseReflection", &[0.0; 3])?)?,
            specular: Color::from_slice(&section.double_tuple_or("specularReflection", &[0.0; 3])?)?,
            reflection_coefficient: section.double_or("reflectionCoefficient", 0.0)?,
        })
    }

    /// Model transform of an entry: scale, rotations about X, Y and Z in
    /// degrees, then translation to `center`
    pub fn model_transform(&self, section: &Section) -> Result<Transform3D> {
        Ok(Transform3D::model(
            section.double("scale")?,
            [
                section.double("rotateX")?,
                section.double("rotateY")?,
                section.double("rotateZ")?,
            ],
            vector3(&section.double_tuple("center")?, "center")?,
        ))
    }

    /// Figures of one entry, in eye space
    pub fn entry_figures(&self, section: &Section, eye: &Transform3D) -> Result<Figures3D> {
        let tag = section.string("type")?;
        let kind = match FigureKind::from_str(tag) {
            Ok(kind) => kind,
            Err(_) => {
                warn!(section = %section.name, tag, "skipping unknown figure type");
                return Ok(Vec::new());
            }
        };

        let mut figures = match kind {
            FigureKind::Single(shape) => vec![shape.build(section, self.lsystems)?],
            FigureKind::Fractal(shape) => {
                let base = shape.build(section, self.lsystems)?;
                generate_fractal(
                    &base,
                    section.usize("nrIterations")?,
                    section.double("fractalScale")?,
                )?
            }
            FigureKind::MengerSponge => menger_sponge(&cube(), section.usize("nrIterations")?)?,
            FigureKind::Thick(shape) => {
                let base = shape.build(section, self.lsystems)?;
                thick_figures(
                    &base,
                    section.double("radius")?,
                    section.usize("n")?,
                    section.usize("m")?,
                )?
            }
        };

        let material = self.material(section)?;
        let transform = self.model_transform(section)?.then(*eye);
        for fig in &mut figures {
            fig.material = material;
        }
        figures.transform(&transform);

        debug!(section = %section.name, %kind, figures = figures.len(), "assembled entry");
        Ok(figures)
    }

    /// All figures of the scene, entry by entry in `Figure0..FigureN` order.
    ///
    /// Entries that need a capability this assembler lacks (such as an
    /// L-system without a source) are logged and left out; every other
    /// failure aborts the scene.
    pub fn assemble(&self, config: &Configuration) -> Result<Figures3D> {
        let general = config.section("General")?;
        let eye_point = vector3(&general.double_tuple("eye")?, "eye")?;
        let eye = Transform3D::eye_point(&Point3d::from(eye_point));
        let nr_figures = general.usize("nrFigures")?;

        let mut scene = Vec::new();
        for i in 0..nr_figures {
            let section = config.section(&format!("Figure{}", i))?;
            match self.entry_figures(section, &eye) {
                Ok(figures) => scene.extend(figures),
                Err(Error::Unsupported(reason)) => {
                    warn!(section = %section.name, %reason, "leaving entry out of the scene");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(scene)
    }

    /// Assemble, project and rasterize the scene into a canvas whose longer
    /// side is `General.size` pixels
    pub fn render(&self, config: &Configuration) -> Result<Canvas> {
        let general = config.section("General")?;
        let size = general.usize("size")?;
        let background = Color::from_slice(&general.double_tuple("backgroundcolor")?)?;

        let scene = self.assemble(config)?;
        let lines = project_figures(&scene)?;
        info!(
            figures = scene.len(),
            lines = lines.len(),
            size,
            z_buffered = self.options.z_buffered,
            "rendering wireframe"
        );
        fit_and_draw(&lines, size as f64, background, self.options.z_buffered)
    }
}

/// Render a wireframe scene with explicit options
pub fn render_wireframe(
    config: &Configuration,
    options: SceneOptions,
    lsystems: Option<&dyn LSystemSource>,
) -> Result<Canvas> {
    let mut assembler = SceneAssembler::new(options);
    if let Some(source) = lsystems {
        assembler = assembler.with_lsystems(source);
    }
    assembler.render(config)
}

/// Render a configuration according to its `General.type`.
///
/// Returns `Ok(None)` for image types this engine does not draw.
pub fn generate_image(config: &Configuration, lsystems: Option<&dyn LSystemSource>) -> Result<Option<Canvas>> {
    let tag = config.section("General")?.string("type")?;
    let image_type = match ImageType::from_str(tag) {
        Ok(image_type) => image_type,
        Err(_) => {
            warn!(tag, "unsupported image type");
            return Ok(None);
        }
    };
    let options = SceneOptions {
        z_buffered: image_type == ImageType::ZBufferedWireframe,
        ..SceneOptions::default()
    };
    render_wireframe(config, options, lsystems).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Value;
    use approx::assert_relative_eq;

    fn entry() -> Section {
        Section::new("Figure0")
            .with("type", Value::Str("Cube".to_string()))
            .with("scale", Value::Int(1))
            .with("rotateX", Value::Int(0))
            .with("rotateY", Value::Int(0))
            .with("rotateZ", Value::Int(0))
            .with("center", Value::IntTuple(vec![0, 0, 0]))
            .with("color", Value::DoubleTuple(vec![1.0, 0.5, 0.0]))
    }

    #[test]
    fn test_material_defaults() {
        let assembler = SceneAssembler::new(SceneOptions::default());
        let material = assembler.material(&entry()).unwrap();
        assert_eq!(material.ambient, Color::new(1.0, 0.5, 0.0));
        assert_eq!(material.diffuse, Color::BLACK);
        assert_eq!(material.reflection_coefficient, 0.0);
    }

    #[test]
    fn test_lighting_reads_ambient_reflection() {
        let assembler = SceneAssembler::new(SceneOptions {
            lighting: true,
            ..SceneOptions::default()
        });
        assert!(assembler.material(&entry()).is_err());
        let section = entry().with("ambientReflection", Value::DoubleTuple(vec![0.2, 0.2, 0.2]));
        assert_eq!(assembler.material(&section).unwrap().ambient, Color::new(0.2, 0.2, 0.2));
    }

    #[test]
    fn test_identity_model_keeps_points() {
        let assembler = SceneAssembler::new(SceneOptions::default());
        let figures = assembler
            .entry_figures(&entry(), &Transform3D::identity())
            .unwrap();
        assert_eq!(figures.len(), 1);
        let expected = cube();
        assert_eq!(figures[0].faces, expected.faces);
        assert_eq!(figures[0].material, assembler.material(&entry()).unwrap());
        for (got, want) in figures[0].points.iter().zip(&expected.points) {
            assert_relative_eq!(*got, *want, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_unknown_type_yields_nothing() {
        let assembler = SceneAssembler::new(SceneOptions::default());
        let section = entry().with("type", Value::Str("Road".to_string()));
        let figures = assembler
            .entry_figures(&section, &Transform3D::identity())
            .unwrap();
        assert!(figures.is_empty());
    }

    #[test]
    fn test_image_types() {
        assert_eq!("Wireframe".parse::<ImageType>().unwrap(), ImageType::Wireframe);
        assert!("ZBuffering".parse::<ImageType>().is_err());
    }
}
