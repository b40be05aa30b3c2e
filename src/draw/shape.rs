//! Square and circle outlines drawn from ring traversal.
//!
//! A stroked shape is the ring of one radius. A filled shape paints every
//! ring from radius 0 out to the farthest buffer edge, so it covers the whole
//! buffer (minus the trimmed ring corners in circular mode). Circular mode
//! drops ring positions farther than `radius + sqrt(2)` from the center, the
//! same trimming the proximity search applies.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pixel::{Color, Coord, PixelBuffer, Region};
use crate::traversal::{farthest_edge_radius, square_ring, within_circle};

/// How a shape is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeStyle {
    /// Paint every ring out to the farthest edge instead of one outline.
    pub filled: bool,
    /// Trim ring positions to a circle.
    pub circular: bool,
}

/// Draw a square outline of `radius` around `center`.
///
/// # Arguments
/// * `buffer` - Target buffer, committed once after drawing
/// * `center` - Shape center, may lie outside the buffer
/// * `radius` - Ring radius (ignored when `style.filled` is set)
/// * `color` - Must match the buffer's channel count. `None` draws opaque black.
/// * `style` - Filled and/or circular
///
/// # Returns
/// Number of pixels written
pub fn draw_square<B>(
    buffer: &mut B,
    center: Coord,
    radius: usize,
    color: Option<&Color>,
    style: ShapeStyle,
) -> Result<usize>
where
    B: PixelBuffer + ?Sized,
{
    let channels = buffer.channels();
    let color = match color {
        Some(c) => *c,
        None => Color::opaque_black(channels)?,
    };
    if color.channels() != channels {
        return Err(Error::ChannelMismatch {
            expected: channels,
            got: color.channels(),
        });
    }

    let center = center.check_range()?;
    let (width, height) = (buffer.width(), buffer.height());
    let edge = farthest_edge_radius(center, width, height);
    let radii = if style.filled { 0..=edge } else { radius..=radius };

    let mut written = 0;
    // Rings past the farthest edge hold no in-bounds position.
    let radii = radii.take_while(|&r| r <= edge);
    let painted = paint_rings(buffer, center, radii, &color, style.circular, &mut written);
    // Flush whatever was written, also when a write failed midway.
    buffer.commit(Region::full(width, height));
    painted?;

    log::trace!("draw_square: {} pixels around ({}, {})", written, center.x, center.y);
    Ok(written)
}

fn paint_rings<B>(
    buffer: &mut B,
    center: Coord,
    radii: impl Iterator<Item = usize>,
    color: &Color,
    circular: bool,
    written: &mut usize,
) -> Result<()>
where
    B: PixelBuffer + ?Sized,
{
    for r in radii {
        for pos in square_ring(center, r) {
            if circular && !within_circle(center, pos, r) {
                continue;
            }
            let Some((x, y)) = buffer.index_of(pos) else {
                continue;
            };
            buffer.set_pixel(x, y, color)?;
            *written += 1;
        }
    }
    Ok(())
}

/// Draw a circle of `radius` around `center`: [`draw_square`] in circular mode.
pub fn draw_circle<B>(
    buffer: &mut B,
    center: Coord,
    radius: usize,
    color: Option<&Color>,
    filled: bool,
) -> Result<usize>
where
    B: PixelBuffer + ?Sized,
{
    draw_square(buffer, center, radius, color, ShapeStyle { filled, circular: true })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::{ArrayBuffer, FailingBuffer};
    use ndarray::{Array3, Axis};

    fn rgba_buffer(width: usize, height: usize) -> ArrayBuffer {
        ArrayBuffer::new(Array3::<u8>::zeros((height, width, 4))).unwrap()
    }

    fn painted(buf: &ArrayBuffer) -> usize {
        buf.view().index_axis(Axis(2), 3).iter().filter(|&&a| a > 0).count()
    }

    #[test]
    fn test_stroke_radius_one() {
        let mut buf = rgba_buffer(5, 5);
        let red = Color::rgba(255, 0, 0, 255);
        let written = draw_square(&mut buf, Coord::new(2, 2), 1, Some(&red), ShapeStyle::default()).unwrap();

        assert_eq!(written, 8);
        assert_eq!(painted(&buf), 8);
        assert_eq!(buf.get_pixel(1, 1).unwrap(), red);
        // Center is not on ring 1
        assert_eq!(buf.get_pixel(2, 2).unwrap(), Color::rgba(0, 0, 0, 0));
        assert_eq!(buf.last_commit(), Some(Region::full(5, 5)));
    }

    #[test]
    fn test_radius_zero_is_single_pixel() {
        let mut buf = rgba_buffer(3, 3);
        let written = draw_square(&mut buf, Coord::new(1, 1), 0, None, ShapeStyle::default()).unwrap();
        assert_eq!(written, 1);
        // Default color is opaque black
        assert_eq!(buf.get_pixel(1, 1).unwrap(), Color::rgba(0, 0, 0, 255));
    }

    #[test]
    fn test_clipped_at_corner() {
        let mut buf = rgba_buffer(4, 4);
        let written = draw_square(&mut buf, Coord::new(0, 0), 1, None, ShapeStyle::default()).unwrap();
        // Only (1, 0), (1, 1), (0, 1) are inside
        assert_eq!(written, 3);
    }

    #[test]
    fn test_filled_covers_buffer() {
        let mut buf = rgba_buffer(6, 4);
        let style = ShapeStyle { filled: true, circular: false };
        let written = draw_square(&mut buf, Coord::new(1, 2), 0, None, style).unwrap();
        assert_eq!(written, 24);
        assert_eq!(painted(&buf), 24);
    }

    #[test]
    fn test_circle_trims_corners() {
        let mut buf = rgba_buffer(9, 9);
        let written = draw_circle(&mut buf, Coord::new(4, 4), 4, None, false).unwrap();

        // 32 ring positions minus the 4 corners at ~5.66 > 4 + sqrt(2)
        assert_eq!(written, 28);
        assert_eq!(buf.get_pixel(0, 0).unwrap().alpha(), Some(0));
        assert_eq!(buf.get_pixel(8, 8).unwrap().alpha(), Some(0));
        assert_eq!(buf.get_pixel(8, 7).unwrap().alpha(), Some(255));
    }

    #[test]
    fn test_channel_mismatch_writes_nothing() {
        let mut buf = rgba_buffer(3, 3);
        let err = draw_square(&mut buf, Coord::new(1, 1), 1, Some(&Color::rgb(1, 2, 3)), ShapeStyle::default())
            .unwrap_err();
        assert_eq!(err, Error::ChannelMismatch { expected: 4, got: 3 });
        assert_eq!(painted(&buf), 0);
        assert_eq!(buf.last_commit(), None);
    }

    #[test]
    fn test_gray_buffer_default_color() {
        let mut buf = ArrayBuffer::new(Array3::<u8>::from_elem((3, 3, 1), 9)).unwrap();
        draw_square(&mut buf, Coord::new(1, 1), 1, None, ShapeStyle::default()).unwrap();
        assert_eq!(buf.get_pixel(0, 0).unwrap(), Color::gray(0));
        assert_eq!(buf.get_pixel(1, 1).unwrap(), Color::gray(9));
    }

    #[test]
    fn test_radius_beyond_buffer_writes_nothing() {
        let mut buf = rgba_buffer(3, 3);
        let written = draw_square(&mut buf, Coord::new(1, 1), usize::MAX, None, ShapeStyle::default()).unwrap();
        assert_eq!(written, 0);
        assert_eq!(buf.last_commit(), Some(Region::full(3, 3)));
    }

    #[test]
    fn test_extreme_center_is_rejected() {
        let mut buf = rgba_buffer(3, 3);
        let err = draw_square(&mut buf, Coord::new(isize::MIN, 0), 1, None, ShapeStyle::default()).unwrap_err();
        assert_eq!(err, Error::CoordinateOutOfRange { x: isize::MIN, y: 0 });
    }

    #[test]
    fn test_failed_write_still_commits() {
        let mut buf = FailingBuffer::new(rgba_buffer(5, 5), 3);
        let result = draw_square(&mut buf, Coord::new(2, 2), 1, None, ShapeStyle::default());

        assert!(result.is_err());
        assert_eq!(buf.commits, 1);
        assert_eq!(painted(&buf.inner), 3);
    }
}
