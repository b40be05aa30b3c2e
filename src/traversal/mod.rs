//! Ring traversal and proximity search.
//!
//! - **Square rings**: ordered positions at a fixed Chebyshev distance from a center
//! - **Proximity search**: nearest pixel meeting an alpha threshold, ring by ring
//!
//! Both the alpha extension filter and the shape rasterizer are built on these.

pub mod ring;
pub mod search;

pub use ring::{farthest_edge_radius, ring_len, square_ring, within_circle, SquareRing};
pub use search::{find_opaque_pos, SearchOptions};
