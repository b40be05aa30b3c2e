//! Shape rasterization on top of ring traversal.

pub mod shape;

pub use shape::{draw_circle, draw_square, ShapeStyle};
