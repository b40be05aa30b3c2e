//! Alpha binarization.
//!
//! Forces every alpha value to either 0 or 255: alpha strictly above the
//! threshold becomes 255, anything else becomes 0. Color channels are left
//! untouched.
//!
//! ## Supported Formats
//!
//! Only layouts with alpha are accepted:
//! - **Gray + alpha**: (height, width, 2)
//! - **RGBA**: (height, width, 4)

use ndarray::{Array3, ArrayView3};
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::pixel::{alpha_index, PixelBuffer, Region};

/// Binarize a single alpha value.
#[inline]
pub fn binarize(alpha: u8, threshold: i32) -> u8 {
    if i32::from(alpha) > threshold {
        255
    } else {
        0
    }
}

/// Binarize the alpha channel of an image - u8 version.
///
/// # Arguments
/// * `input` - Image with 2 or 4 channels (height, width, channels)
/// * `threshold` - Alpha above this becomes 255, the rest 0. Values below 0
///   make everything opaque, 255 and above make everything transparent.
///
/// # Returns
/// New image with the same shape and color channels
pub fn threshold_alpha_u8(input: ArrayView3<u8>, threshold: i32) -> Result<Array3<u8>> {
    let channels = input.dim().2;
    let alpha = alpha_index(channels).ok_or(Error::NoAlphaChannel(channels))?;

    let mut output = input.as_standard_layout().into_owned();
    if let Some(data) = output.as_slice_mut() {
        data.par_chunks_mut(channels).for_each(|px| {
            px[alpha] = binarize(px[alpha], threshold);
        });
    }
    Ok(output)
}

/// Binarize the alpha channel of a buffer in place, then commit it.
///
/// The buffer is committed even if a pixel access fails partway through.
pub fn threshold_alpha<B>(buffer: &mut B, threshold: i32) -> Result<()>
where
    B: PixelBuffer + ?Sized,
{
    let alpha = buffer.alpha_index()?;
    let (width, height) = (buffer.width(), buffer.height());

    let binarized = binarize_pixels(buffer, alpha, threshold);
    buffer.commit(Region::full(width, height));
    binarized
}

fn binarize_pixels<B>(buffer: &mut B, alpha: usize, threshold: i32) -> Result<()>
where
    B: PixelBuffer + ?Sized,
{
    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            let pixel = buffer.get_pixel(x, y)?;
            let a = pixel.as_slice()[alpha];
            buffer.set_pixel(x, y, &pixel.with_alpha(binarize(a, threshold)))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::{ArrayBuffer, FailingBuffer};

    #[test]
    fn test_binarize_is_strictly_greater() {
        assert_eq!(binarize(128, 128), 0);
        assert_eq!(binarize(129, 128), 255);
        assert_eq!(binarize(0, -1), 255);
        assert_eq!(binarize(255, 255), 0);
    }

    #[test]
    fn test_threshold_alpha_u8_rgba() {
        let mut img = Array3::<u8>::zeros((2, 2, 4));
        for (i, a) in [10u8, 127, 128, 200].into_iter().enumerate() {
            img[[i / 2, i % 2, 0]] = 77;
            img[[i / 2, i % 2, 3]] = a;
        }

        let result = threshold_alpha_u8(img.view(), 127).unwrap();

        assert_eq!(result[[0, 0, 3]], 0);
        assert_eq!(result[[0, 1, 3]], 0);
        assert_eq!(result[[1, 0, 3]], 255);
        assert_eq!(result[[1, 1, 3]], 255);
        // Color untouched
        assert!(result.outer_iter().all(|row| row.outer_iter().all(|px| px[0] == 77)));
    }

    #[test]
    fn test_threshold_alpha_u8_gray_alpha() {
        let mut img = Array3::<u8>::zeros((1, 2, 2));
        img[[0, 0, 1]] = 50;
        img[[0, 1, 1]] = 51;
        let result = threshold_alpha_u8(img.view(), 50).unwrap();
        assert_eq!(result[[0, 0, 1]], 0);
        assert_eq!(result[[0, 1, 1]], 255);
    }

    #[test]
    fn test_threshold_alpha_u8_rejects_rgb() {
        let img = Array3::<u8>::zeros((1, 1, 3));
        assert_eq!(
            threshold_alpha_u8(img.view(), 128).unwrap_err(),
            Error::NoAlphaChannel(3)
        );
    }

    #[test]
    fn test_threshold_alpha_in_place_commits() {
        let mut img = Array3::<u8>::zeros((1, 3, 4));
        img[[0, 0, 3]] = 5;
        img[[0, 1, 3]] = 129;
        img[[0, 2, 3]] = 255;
        let mut buf = ArrayBuffer::new(img).unwrap();

        threshold_alpha(&mut buf, 128).unwrap();

        let alphas: Vec<u8> = (0..3).map(|x| buf.view()[[0, x, 3]]).collect();
        assert_eq!(alphas, vec![0, 255, 255]);
        assert_eq!(buf.last_commit(), Some(Region::full(3, 1)));
    }

    #[test]
    fn test_threshold_outside_alpha_range() {
        let mut img = Array3::<u8>::zeros((1, 2, 2));
        img[[0, 1, 1]] = 255;

        let result = threshold_alpha_u8(img.view(), 300).unwrap();
        assert_eq!((result[[0, 0, 1]], result[[0, 1, 1]]), (0, 0));

        let result = threshold_alpha_u8(img.view(), -1).unwrap();
        assert_eq!((result[[0, 0, 1]], result[[0, 1, 1]]), (255, 255));
    }

    #[test]
    fn test_threshold_alpha_commits_after_failed_write() {
        let mut img = Array3::<u8>::zeros((1, 3, 4));
        img[[0, 0, 3]] = 200;
        img[[0, 1, 3]] = 200;
        let mut buf = FailingBuffer::new(ArrayBuffer::new(img).unwrap(), 1);

        assert!(threshold_alpha(&mut buf, 128).is_err());
        assert_eq!(buf.commits, 1);
        assert_eq!(buf.inner.view()[[0, 0, 3]], 255);
    }
}
