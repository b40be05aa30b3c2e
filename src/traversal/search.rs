//! Nearest opaque pixel search.
//!
//! Rings of growing radius are scanned around a center until a pixel whose
//! alpha reaches a threshold is found. Candidates are ranked by ring index
//! (Chebyshev distance) first and by position along the ring second, so a
//! pixel on ring `r` always wins over any pixel on ring `r + 1`, even one
//! that is closer in Euclidean terms.

use serde::{Deserialize, Serialize};

use super::ring::{farthest_edge_radius, square_ring, within_circle};
use crate::error::Result;
use crate::pixel::{Coord, PixelBuffer};

/// Options for [`find_opaque_pos`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Minimum alpha a pixel needs to qualify. Negative values are treated
    /// as 0; values above 255 never match.
    pub good_minimum: i32,
    /// Largest ring radius to scan. `None` scans out to the farthest edge.
    pub max_radius: Option<usize>,
    /// Skip ring positions beyond `radius + sqrt(2)` of the center.
    pub circular: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            good_minimum: 255,
            max_radius: None,
            circular: false,
        }
    }
}

impl SearchOptions {
    pub fn with_good_minimum(good_minimum: i32) -> Self {
        Self {
            good_minimum,
            ..Self::default()
        }
    }
}

/// Find the position closest to `center` whose alpha is at least
/// `options.good_minimum`.
///
/// Returns `Ok(None)` when nothing within the scanned radius qualifies.
/// Fails if the buffer has no alpha channel, the center lies beyond
/// [`COORD_LIMIT`](crate::pixel::COORD_LIMIT) or a pixel read fails.
pub fn find_opaque_pos<B>(buffer: &B, center: Coord, options: &SearchOptions) -> Result<Option<Coord>>
where
    B: PixelBuffer + ?Sized,
{
    let alpha = buffer.alpha_index()?;
    let center = center.check_range()?;
    let good_minimum = options.good_minimum.max(0);
    // Rings past the farthest edge hold no in-bounds position.
    let edge = farthest_edge_radius(center, buffer.width(), buffer.height());
    let max_radius = options.max_radius.map_or(edge, |r| r.min(edge));

    for radius in 0..=max_radius {
        for pos in square_ring(center, radius) {
            let Some((x, y)) = buffer.index_of(pos) else {
                continue;
            };
            if options.circular && !within_circle(center, pos, radius) {
                continue;
            }
            let pixel = buffer.get_pixel(x, y)?;
            if i32::from(pixel.as_slice()[alpha]) >= good_minimum {
                return Ok(Some(pos));
            }
        }
    }

    Ok(None)
}
