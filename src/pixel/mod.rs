//! Pixel storage primitives: colors, positions and the buffer trait.

pub mod buffer;
pub mod color;

pub use buffer::{ArrayBuffer, PixelBuffer, Region};
#[cfg(test)]
pub(crate) use buffer::FailingBuffer;
pub use color::{alpha_index, Color, Coord, COORD_LIMIT};
