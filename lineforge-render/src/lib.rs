//! # Lineforge Render
//!
//! Turns eye-space figures into pixels: perspective projection to 2D lines,
//! fitting those lines into a canvas, and drawing them with or without a
//! Z-buffer.

pub mod line;
pub mod projection;
pub mod zbuffer;
pub mod canvas;
pub mod viewport;

pub use line::*;
pub use projection::*;
pub use zbuffer::*;
pub use canvas::*;
pub use viewport::*;
