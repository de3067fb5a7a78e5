//! Core domain types for tessera.
//!
//! This module contains the fundamental types used throughout the pipeline:
//! - `Colour` - RGBA colour values
//! - `Point` / `Triangle` - integer geometry in canvas space
//! - `Palette` - quantization targets parsed from `R,G,B[,A]:...`
//! - `Mesh` - point list plus index triples from a mesh provider

mod colour;
mod geometry;
mod mesh;
mod palette;

pub use colour::Colour;
pub use geometry::{Point, Triangle};
pub use mesh::Mesh;
pub use palette::{ColourMetric, Palette};
