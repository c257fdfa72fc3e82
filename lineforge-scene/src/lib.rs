//! # Lineforge Scene
//!
//! Reads scene descriptions and turns them into images. A [`Configuration`]
//! holds typed sections; each `Figure<i>` section names a [`FigureKind`]
//! that the [`SceneAssembler`] builds, transforms into eye space and hands
//! to the renderer.

pub mod config;
pub mod ini;
pub mod kind;
pub mod assembler;

pub use config::*;
pub use kind::*;
pub use assembler::*;
