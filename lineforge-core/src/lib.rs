//! Core data structures and traits for lineforge
//!
//! This crate provides the fundamental types of the wireframe pipeline:
//! points, faces, figures with their materials, homogeneous transforms,
//! and the shared error type.

pub mod point;
pub mod figure;
pub mod traits;
pub mod transform;
pub mod error;

pub use point::*;
pub use figure::*;
pub use traits::*;
pub use transform::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix4, Point2, Point3, Vector3};
