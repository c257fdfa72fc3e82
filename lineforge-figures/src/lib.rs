//! # Lineforge Figures
//!
//! Generators and recursive refiners for wireframe figures.
//!
//! Generators build a [`Figure`](lineforge_core::Figure) from a handful of
//! parameters: the platonic solids, the bucky ball, cones, cylinders, tori,
//! tessellated spheres and turtle-walked L-systems. Refiners turn one figure
//! into many: fractal replacement, the Menger sponge and thick extrusion.

pub mod platonic;
pub mod parametric;
pub mod subdivision;
pub mod fractal;
pub mod thick;
pub mod lsystem;

// Re-export commonly used items
pub use platonic::*;
pub use parametric::*;
pub use subdivision::*;
pub use fractal::*;
pub use thick::*;
pub use lsystem::*;
