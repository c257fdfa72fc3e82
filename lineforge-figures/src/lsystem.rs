//! Turtle interpretation of already-rewritten 3D L-system strings
//!
//! Parsing a grammar and rewriting it is left to an [`LSystemSource`]; this
//! module only walks the resulting command string.

use lineforge_core::{Error, Figure, Point3d, Result, Vector3d};
use std::collections::HashMap;
use tracing::debug;

/// A fully rewritten L-system ready for the turtle
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LSystemProgram {
    /// Command string after all replacements
    pub commands: String,
    /// Turn angle in degrees
    pub angle: f64,
    /// Whether moving along a symbol leaves a line behind
    pub draw: HashMap<char, bool>,
}

/// Something that turns an L-system input file name into a program
pub trait LSystemSource {
    fn load(&self, input_file: &str) -> Result<LSystemProgram>;
}

impl LSystemSource for HashMap<String, LSystemProgram> {
    fn load(&self, input_file: &str) -> Result<LSystemProgram> {
        self.get(input_file).cloned().ok_or_else(|| {
            Error::InvalidData(format!("no L-system registered for '{}'", input_file))
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct Turtle {
    position: Point3d,
    heading: Vector3d,
    left: Vector3d,
    up: Vector3d,
}

impl Turtle {
    fn new() -> Self {
        Self {
            position: Point3d::origin(),
            heading: Vector3d::x(),
            left: Vector3d::y(),
            up: Vector3d::z(),
        }
    }

    fn rotate(a: Vector3d, b: Vector3d, angle: f64) -> (Vector3d, Vector3d) {
        let (sin, cos) = angle.sin_cos();
        (a * cos + b * sin, -a * sin + b * cos)
    }

    /// Turn left about U
    fn yaw(&mut self, angle: f64) {
        (self.heading, self.left) = Self::rotate(self.heading, self.left, angle);
    }

    /// Pitch up about L
    fn pitch(&mut self, angle: f64) {
        (self.heading, self.up) = Self::rotate(self.heading, self.up, angle);
    }

    /// Roll about H
    fn roll(&mut self, angle: f64) {
        (self.left, self.up) = Self::rotate(self.left, self.up, -angle);
    }
}

/// Walk `program` with a 3D turtle and collect the drawn segments.
///
/// Symbols: `+`/`-` turn about U, `^`/`&` pitch about L, `\`/`/` roll about
/// H, `|` turns around, `(`/`)` save and restore the turtle. Anything else
/// moves one unit forward and emits a two-point face when its draw flag is
/// set.
pub fn lsystem_figure(program: &LSystemProgram) -> Result<Figure> {
    let delta = program.angle.to_radians();
    let mut turtle = Turtle::new();
    let mut stack = Vec::new();
    let mut fig = Figure::new();

    for symbol in program.commands.chars() {
        match symbol {
            '+' => turtle.yaw(delta),
            '-' => turtle.yaw(-delta),
            '^' => turtle.pitch(delta),
            '&' => turtle.pitch(-delta),
            '\\' => turtle.roll(delta),
            '/' => turtle.roll(-delta),
            '|' => {
                turtle.heading = -turtle.heading;
                turtle.left = -turtle.left;
            }
            '(' => stack.push(turtle),
            ')' => {
                turtle = stack.pop().ok_or_else(|| {
                    Error::InvalidData("unbalanced ')' in L-system commands".to_string())
                })?;
            }
            other => {
                let start = turtle.position;
                turtle.position += turtle.heading;
                if program.draw.get(&other).copied().unwrap_or(false) {
                    let a = fig.add_point(start);
                    let b = fig.add_point(turtle.position);
                    fig.add_face([a, b]);
                }
            }
        }
    }

    debug!(
        symbols = program.commands.len(),
        segments = fig.face_count(),
        "interpreted L-system"
    );
    Ok(fig)
}
