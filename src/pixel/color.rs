//! Pixel values and positions.
//!
//! A [`Color`] holds 1 to 4 `u8` channels laid out the same way as the
//! innermost axis of an `(height, width, channels)` array:
//!
//! | Channels | Layout | Alpha |
//! |----------|--------|-------|
//! | 1 | Gray | none |
//! | 2 | Gray + alpha | index 1 |
//! | 3 | RGB | none |
//! | 4 | RGBA | index 3 |

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Largest channel count a pixel can carry.
pub const MAX_CHANNELS: usize = 4;

/// Index of the alpha channel for a channel count, if the layout has one.
#[inline]
pub fn alpha_index(channels: usize) -> Option<usize> {
    match channels {
        2 => Some(1),
        4 => Some(3),
        _ => None,
    }
}

/// Largest absolute coordinate a search or shape center may have.
pub const COORD_LIMIT: isize = i32::MAX as isize;

/// Integer pixel position. Components are signed so that positions on a
/// ring around an edge pixel can fall outside the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coord {
    pub x: isize,
    pub y: isize,
}

impl Coord {
    pub const fn new(x: isize, y: isize) -> Self {
        Self { x, y }
    }

    /// Fail with [`Error::CoordinateOutOfRange`] unless both components lie
    /// within `±COORD_LIMIT`.
    pub fn check_range(self) -> Result<Self> {
        let limit = -COORD_LIMIT..=COORD_LIMIT;
        if limit.contains(&self.x) && limit.contains(&self.y) {
            Ok(self)
        } else {
            Err(Error::CoordinateOutOfRange { x: self.x, y: self.y })
        }
    }

    /// Chebyshev distance, `max(|dx|, |dy|)`. This is the ring radius on
    /// which `other` lies around `self`.
    #[inline]
    pub fn chebyshev(self, other: Coord) -> usize {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Coord) -> f64 {
        let dx = (other.x - self.x) as f64;
        let dy = (other.y - self.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(isize, isize)> for Coord {
    fn from((x, y): (isize, isize)) -> Self {
        Self { x, y }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((x, y): (usize, usize)) -> Self {
        Self {
            x: x as isize,
            y: y as isize,
        }
    }
}

/// A pixel value with 1 to 4 channels.
///
/// Unused slots are always zero, so the derived equality compares only the
/// live channels and the channel count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    values: [u8; MAX_CHANNELS],
    channels: u8,
}

impl Color {
    /// Build a color from a slice of channel values.
    pub fn new(values: &[u8]) -> Result<Self> {
        if values.is_empty() || values.len() > MAX_CHANNELS {
            return Err(Error::InvalidChannelCount(values.len()));
        }
        let mut packed = [0u8; MAX_CHANNELS];
        packed[..values.len()].copy_from_slice(values);
        Ok(Self {
            values: packed,
            channels: values.len() as u8,
        })
    }

    pub const fn gray(v: u8) -> Self {
        Self { values: [v, 0, 0, 0], channels: 1 }
    }

    pub const fn gray_alpha(v: u8, a: u8) -> Self {
        Self { values: [v, a, 0, 0], channels: 2 }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { values: [r, g, b, 0], channels: 3 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { values: [r, g, b, a], channels: 4 }
    }

    /// Opaque black for a layout: `(0)`, `(0, 255)`, `(0, 0, 0)` or
    /// `(0, 0, 0, 255)`.
    pub fn opaque_black(channels: usize) -> Result<Self> {
        match channels {
            1 => Ok(Self::gray(0)),
            2 => Ok(Self::gray_alpha(0, 255)),
            3 => Ok(Self::rgb(0, 0, 0)),
            4 => Ok(Self::rgba(0, 0, 0, 255)),
            n => Err(Error::InvalidChannelCount(n)),
        }
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels as usize
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.values[..self.channels()]
    }

    #[inline]
    pub fn alpha(&self) -> Option<u8> {
        alpha_index(self.channels()).map(|i| self.values[i])
    }

    /// Replace the alpha channel. Layouts without alpha are returned as is.
    #[inline]
    pub fn with_alpha(mut self, alpha: u8) -> Self {
        if let Some(i) = alpha_index(self.channels()) {
            self.values[i] = alpha;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_bad_channel_counts() {
        assert_eq!(Color::new(&[]), Err(Error::InvalidChannelCount(0)));
        assert_eq!(
            Color::new(&[1, 2, 3, 4, 5]),
            Err(Error::InvalidChannelCount(5))
        );
    }

    #[test]
    fn test_alpha_position() {
        assert_eq!(Color::gray(7).alpha(), None);
        assert_eq!(Color::gray_alpha(7, 9).alpha(), Some(9));
        assert_eq!(Color::rgb(1, 2, 3).alpha(), None);
        assert_eq!(Color::rgba(1, 2, 3, 4).alpha(), Some(4));
    }

    #[test]
    fn test_with_alpha_keeps_color_channels() {
        let c = Color::rgba(10, 20, 30, 40).with_alpha(200);
        assert_eq!(c.as_slice(), &[10, 20, 30, 200]);

        // No alpha to replace
        let c = Color::rgb(10, 20, 30).with_alpha(200);
        assert_eq!(c.as_slice(), &[10, 20, 30]);
    }

    #[test]
    fn test_equality_ignores_unused_slots() {
        assert_eq!(Color::new(&[1, 2, 3]).unwrap(), Color::rgb(1, 2, 3));
        assert_ne!(Color::rgb(0, 0, 0), Color::rgba(0, 0, 0, 0));
    }

    #[test]
    fn test_opaque_black_per_layout() {
        assert_eq!(Color::opaque_black(2).unwrap().as_slice(), &[0, 255]);
        assert_eq!(Color::opaque_black(4).unwrap().as_slice(), &[0, 0, 0, 255]);
        assert!(Color::opaque_black(5).is_err());
    }

    #[test]
    fn test_coord_distances() {
        let a = Coord::new(5, 5);
        assert_eq!(a.chebyshev(Coord::new(3, 6)), 2);
        assert_eq!(a.chebyshev(a), 0);
        assert!((a.distance(Coord::new(8, 9)) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_coord_range() {
        assert!(Coord::new(-COORD_LIMIT, COORD_LIMIT).check_range().is_ok());
        assert_eq!(
            Coord::new(isize::MIN, 0).check_range(),
            Err(Error::CoordinateOutOfRange { x: isize::MIN, y: 0 })
        );
        assert!(Coord::new(0, COORD_LIMIT + 1).check_range().is_err());
    }
}
