//! Pixel buffer abstraction and its ndarray-backed implementation.
//!
//! Every algorithm in this crate reads and writes pixels through
//! [`PixelBuffer`], so a host application can plug in its own image storage.
//! [`ArrayBuffer`] is the in-memory implementation used by the bindings and
//! tests. It stores pixels as `(height, width, channels)`, matching the
//! array layout used by the rest of the filters.
//!
//! Algorithms take the buffer by `&mut` for the whole run. Buffers that
//! proxy external storage must not be written by anyone else while a run is
//! in progress.

use ndarray::{Array3, ArrayView3};

use super::color::{alpha_index, Color, Coord, MAX_CHANNELS};
use crate::error::{Error, Result};

/// Inclusive-exclusive rectangle handed to [`PixelBuffer::commit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl Region {
    /// The whole `width x height` area.
    pub const fn full(width: usize, height: usize) -> Self {
        Self { x0: 0, y0: 0, x1: width, y1: height }
    }
}

/// Mutable access to a grid of pixels.
pub trait PixelBuffer {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Channels per pixel (1 to 4).
    fn channels(&self) -> usize;

    fn get_pixel(&self, x: usize, y: usize) -> Result<Color>;

    /// Write a pixel. The color's channel count must equal
    /// [`channels`](Self::channels).
    fn set_pixel(&mut self, x: usize, y: usize, color: &Color) -> Result<()>;

    /// Flush pending writes in `region` to the backing store.
    fn commit(&mut self, _region: Region) {}

    /// Map a signed position to array indices if it lies inside the buffer.
    #[inline]
    fn index_of(&self, pos: Coord) -> Option<(usize, usize)> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        (x < self.width() && y < self.height()).then_some((x, y))
    }

    /// Alpha channel index, or [`Error::NoAlphaChannel`] for gray/RGB buffers.
    fn alpha_index(&self) -> Result<usize> {
        alpha_index(self.channels()).ok_or(Error::NoAlphaChannel(self.channels()))
    }
}

/// In-memory pixel buffer backed by an `Array3<u8>`.
#[derive(Debug, Clone)]
pub struct ArrayBuffer {
    data: Array3<u8>,
    last_commit: Option<Region>,
}

impl ArrayBuffer {
    /// Wrap an `(height, width, channels)` array.
    pub fn new(data: Array3<u8>) -> Result<Self> {
        let channels = data.dim().2;
        if channels == 0 || channels > MAX_CHANNELS {
            return Err(Error::InvalidChannelCount(channels));
        }
        // Keep a row-major layout so `into_raw` hands back plain interleaved bytes.
        let data = if data.is_standard_layout() {
            data
        } else {
            data.as_standard_layout().into_owned()
        };
        Ok(Self { data, last_commit: None })
    }

    /// Copy an array view into a new buffer.
    pub fn from_view(view: ArrayView3<u8>) -> Result<Self> {
        Self::new(view.to_owned())
    }

    /// Build a buffer from interleaved bytes (length = width * height * channels).
    pub fn from_raw(data: Vec<u8>, width: usize, height: usize, channels: usize) -> Result<Self> {
        let len = data.len();
        let array = Array3::from_shape_vec((height, width, channels), data).map_err(|_| {
            Error::InvalidDimensions { len, width, height, channels }
        })?;
        Self::new(array)
    }

    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.data.view()
    }

    pub fn into_inner(self) -> Array3<u8> {
        self.data
    }

    /// Interleaved bytes in row-major order.
    pub fn into_raw(self) -> Vec<u8> {
        self.data.into_raw_vec_and_offset().0
    }

    /// Region passed to the most recent [`PixelBuffer::commit`].
    pub fn last_commit(&self) -> Option<Region> {
        self.last_commit
    }

    fn check_bounds(&self, x: usize, y: usize) -> Result<()> {
        let (height, width, _) = self.data.dim();
        if x >= width || y >= height {
            return Err(Error::OutOfBounds {
                x: x as isize,
                y: y as isize,
                width,
                height,
            });
        }
        Ok(())
    }
}

impl PixelBuffer for ArrayBuffer {
    #[inline]
    fn width(&self) -> usize {
        self.data.dim().1
    }

    #[inline]
    fn height(&self) -> usize {
        self.data.dim().0
    }

    #[inline]
    fn channels(&self) -> usize {
        self.data.dim().2
    }

    fn get_pixel(&self, x: usize, y: usize) -> Result<Color> {
        self.check_bounds(x, y)?;
        let channels = self.channels();
        let mut values = [0u8; MAX_CHANNELS];
        for (c, v) in values.iter_mut().take(channels).enumerate() {
            *v = self.data[[y, x, c]];
        }
        Color::new(&values[..channels])
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: &Color) -> Result<()> {
        self.check_bounds(x, y)?;
        let expected = self.channels();
        if color.channels() != expected {
            return Err(Error::ChannelMismatch {
                expected,
                got: color.channels(),
            });
        }
        for (c, &v) in color.as_slice().iter().enumerate() {
            self.data[[y, x, c]] = v;
        }
        Ok(())
    }

    fn commit(&mut self, region: Region) {
        self.last_commit = Some(region);
    }
}

/// Host-style buffer whose writes start failing after a fixed count.
#[cfg(test)]
pub(crate) struct FailingBuffer {
    pub inner: ArrayBuffer,
    pub writes_left: usize,
    pub commits: usize,
}

#[cfg(test)]
impl FailingBuffer {
    pub fn new(inner: ArrayBuffer, writes_left: usize) -> Self {
        Self { inner, writes_left, commits: 0 }
    }
}

#[cfg(test)]
impl PixelBuffer for FailingBuffer {
    fn width(&self) -> usize {
        self.inner.width()
    }

    fn height(&self) -> usize {
        self.inner.height()
    }

    fn channels(&self) -> usize {
        self.inner.channels()
    }

    fn get_pixel(&self, x: usize, y: usize) -> Result<Color> {
        self.inner.get_pixel(x, y)
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: &Color) -> Result<()> {
        if self.writes_left == 0 {
            return Err(Error::OutOfBounds {
                x: x as isize,
                y: y as isize,
                width: 0,
                height: 0,
            });
        }
        self.writes_left -= 1;
        self.inner.set_pixel(x, y, color)
    }

    fn commit(&mut self, region: Region) {
        self.commits += 1;
        self.inner.commit(region);
    }
}
