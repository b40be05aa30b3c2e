//! Square ring traversal.
//!
//! [`SquareRing`] walks the boundary of the axis-aligned square of half-width
//! `radius` around a center: the set of positions at Chebyshev distance
//! exactly `radius`. The walk starts at the top-left corner and goes
//! clockwise: right along the top edge, down the right edge, left along the
//! bottom edge, then up the left edge, stopping just before it would revisit
//! the corner it started from.
//!
//! Radius 0 yields only the center. Radius `r >= 1` yields `8 * r` distinct
//! positions as long as the square fits in `isize`; bounds beyond that
//! saturate instead of overflowing.

use std::iter::FusedIterator;

use crate::pixel::Coord;

/// Edge currently being walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Right,
    Down,
    Left,
    Up,
}

/// Number of positions on the ring of `radius`.
#[inline]
pub fn ring_len(radius: usize) -> usize {
    if radius == 0 {
        1
    } else {
        radius.saturating_mul(8)
    }
}

/// Iterator over the positions of one square ring.
#[derive(Debug, Clone)]
pub struct SquareRing {
    left: isize,
    right: isize,
    top: isize,
    bottom: isize,
    x: isize,
    y: isize,
    edge: Edge,
    remaining: usize,
}

impl SquareRing {
    pub fn new(center: Coord, radius: usize) -> Self {
        let r = isize::try_from(radius).unwrap_or(isize::MAX);
        let (left, top) = (center.x.saturating_sub(r), center.y.saturating_sub(r));
        Self {
            left,
            right: center.x.saturating_add(r),
            top,
            bottom: center.y.saturating_add(r),
            x: left,
            y: top,
            edge: Edge::Right,
            remaining: ring_len(radius),
        }
    }

    /// Move to the next position.
    ///
    /// The four edge checks are deliberately independent `if`s and not an
    /// `else if` chain: hitting a corner switches edges and the new edge
    /// moves in the same step. On a radius 0 ring every bound is the center,
    /// so one step runs through all four edges.
    fn advance(&mut self) {
        if self.edge == Edge::Right {
            self.x = self.x.saturating_add(1);
            if self.x > self.right {
                self.x = self.right;
                self.edge = Edge::Down;
            }
        }
        if self.edge == Edge::Down {
            self.y = self.y.saturating_add(1);
            if self.y > self.bottom {
                self.y = self.bottom;
                self.edge = Edge::Left;
            }
        }
        if self.edge == Edge::Left {
            self.x = self.x.saturating_sub(1);
            if self.x < self.left {
                self.x = self.left;
                self.edge = Edge::Up;
            }
        }
        if self.edge == Edge::Up {
            self.y = self.y.saturating_sub(1);
        }
    }
}

impl Iterator for SquareRing {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        if self.remaining == 0 {
            return None;
        }
        let current = Coord::new(self.x, self.y);
        self.remaining -= 1;
        // One more left-edge step would land back on the start corner.
        if self.remaining > 0 {
            self.advance();
        }
        Some(current)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for SquareRing {}

impl FusedIterator for SquareRing {}

/// Positions of the ring of `radius` around `center`.
pub fn square_ring(center: Coord, radius: usize) -> SquareRing {
    SquareRing::new(center, radius)
}

/// Distance from `center` to the farthest edge of a `width x height` grid.
///
/// Rings up to this radius cover every in-bounds position.
pub fn farthest_edge_radius(center: Coord, width: usize, height: usize) -> usize {
    let width = isize::try_from(width).unwrap_or(isize::MAX);
    let height = isize::try_from(height).unwrap_or(isize::MAX);
    [
        center.x.unsigned_abs(),
        center.x.abs_diff(width),
        center.y.unsigned_abs(),
        center.y.abs_diff(height),
    ]
    .into_iter()
    .max()
    .unwrap_or(0)
}

/// Slack added to the radius when a ring is trimmed to a circle. One pixel
/// diagonal keeps boundary pixels that float rounding would otherwise drop.
pub const CIRCLE_MARGIN: f64 = std::f64::consts::SQRT_2 + f64::EPSILON;

/// Whether `pos` on the ring of `radius` around `center` survives circular
/// trimming.
#[inline]
pub fn within_circle(center: Coord, pos: Coord, radius: usize) -> bool {
    center.distance(pos) <= radius as f64 + CIRCLE_MARGIN
}
