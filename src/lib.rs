//! Channel Tools
//!
//! Alpha channel utilities for preparing images for formats that discard
//! partial transparency, such as indexed-color export. Pixels in a "bad"
//! alpha band are filled with the color of the nearest opaque pixel so that
//! no dark or stale fringe shows up once alpha is flattened.
//!
//! ## Building blocks
//! - [`traversal`]: square ring traversal and the ring-by-ring proximity search
//! - [`filters`]: alpha extension (color bleeding) and alpha binarization
//! - [`draw`]: square/circle rasterization over the same ring traversal
//! - [`pixel`]: colors, positions and the [`PixelBuffer`] trait
//!
//! ## Image Format
//! Buffers hold `u8` channels in `(height, width, channels)` order:
//! - **Grayscale**: 1 channel
//! - **Gray + alpha**: 2 channels
//! - **RGB**: 3 channels
//! - **RGBA**: 4 channels
//!
//! Alpha-dependent operations need the 2- or 4-channel layouts.
//!
//! ## Bindings
//! Python bindings via PyO3 (`python` feature) and WASM bindings for
//! JavaScript (`wasm` feature) operate on whole arrays and return new ones.

pub mod draw;
pub mod error;
pub mod filters;
pub mod pixel;
pub mod progress;
pub mod traversal;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{Error, Result};
pub use pixel::{ArrayBuffer, Color, Coord, PixelBuffer, Region};
pub use progress::{DiagnosticSink, ProgressSink};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::draw::{draw_square as draw_square_impl, ShapeStyle};
    use crate::error::Error;
    use crate::filters::alpha_extend::{extend_alpha as extend_alpha_impl, ExtendConfig};
    use crate::filters::alpha_threshold::threshold_alpha_u8;
    use crate::pixel::{ArrayBuffer, Color, Coord};
    use crate::traversal::{find_opaque_pos as find_opaque_pos_impl, SearchOptions};

    impl From<Error> for PyErr {
        fn from(err: Error) -> PyErr {
            PyValueError::new_err(err.to_string())
        }
    }

    fn parse_color(color: Option<Vec<u8>>) -> PyResult<Option<Color>> {
        Ok(color.as_deref().map(Color::new).transpose()?)
    }

    // ========================================================================
    // Alpha Extension
    // ========================================================================

    /// Fill partially transparent pixels with the nearest opaque color.
    ///
    /// # Arguments
    /// * `image` - Gray+alpha or RGBA u8 image (height, width, 2|4)
    /// * `minimum` / `maximum` - Alpha band to fill, clamped to 0-254
    /// * `make_opaque` - Take the donor's alpha instead of keeping the pixel's own
    /// * `good_minimum` - Alpha a donor pixel needs (default 255)
    /// * `enable_threshold` / `threshold` - Binarize alpha (> threshold becomes 255)
    /// * `max_radius` - Cap on the donor search radius
    ///
    /// # Returns
    /// `(image, completed)`; `completed` is False when the scan stopped
    /// because no donor pixel was reachable.
    #[pyfunction]
    #[pyo3(signature = (
        image,
        minimum=1,
        maximum=254,
        make_opaque=false,
        good_minimum=255,
        enable_threshold=false,
        threshold=128,
        max_radius=None,
    ))]
    #[allow(clippy::too_many_arguments)]
    pub fn extend_alpha<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        minimum: i32,
        maximum: i32,
        make_opaque: bool,
        good_minimum: i32,
        enable_threshold: bool,
        threshold: i32,
        max_radius: Option<usize>,
    ) -> PyResult<(Bound<'py, PyArray3<u8>>, bool)> {
        let mut buffer = ArrayBuffer::from_view(image.as_array())?;
        let config = ExtendConfig {
            minimum,
            maximum,
            good_minimum,
            make_opaque,
            enable_threshold,
            threshold,
            max_radius,
        };
        let report = extend_alpha_impl(&mut buffer, &config)?;
        Ok((buffer.into_inner().into_pyarray(py), !report.is_aborted()))
    }

    /// Binarize alpha: values above `threshold` become 255, the rest 0.
    #[pyfunction]
    #[pyo3(signature = (image, threshold=128))]
    pub fn threshold_alpha<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        threshold: i32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let result = threshold_alpha_u8(image.as_array(), threshold)?;
        Ok(result.into_pyarray(py))
    }

    // ========================================================================
    // Proximity Search
    // ========================================================================

    /// Position `(x, y)` of the pixel nearest to `(x, y)` with alpha at least
    /// `good_minimum`, or None.
    #[pyfunction]
    #[pyo3(signature = (image, x, y, good_minimum=255, max_radius=None, circular=false))]
    pub fn find_opaque_pos(
        image: PyReadonlyArray3<'_, u8>,
        x: isize,
        y: isize,
        good_minimum: i32,
        max_radius: Option<usize>,
        circular: bool,
    ) -> PyResult<Option<(isize, isize)>> {
        let buffer = ArrayBuffer::from_view(image.as_array())?;
        let options = SearchOptions {
            good_minimum,
            max_radius,
            circular,
        };
        let found = find_opaque_pos_impl(&buffer, Coord::new(x, y), &options)?;
        Ok(found.map(|p| (p.x, p.y)))
    }

    // ========================================================================
    // Shapes
    // ========================================================================

    /// Draw a square outline (or fill) around `(x, y)`.
    ///
    /// `color` must have one value per image channel; None draws opaque black.
    #[pyfunction]
    #[pyo3(signature = (image, x, y, radius, color=None, filled=false, circular=false))]
    #[allow(clippy::too_many_arguments)]
    pub fn draw_square<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        x: isize,
        y: isize,
        radius: usize,
        color: Option<Vec<u8>>,
        filled: bool,
        circular: bool,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let mut buffer = ArrayBuffer::from_view(image.as_array())?;
        let color = parse_color(color)?;
        draw_square_impl(
            &mut buffer,
            Coord::new(x, y),
            radius,
            color.as_ref(),
            ShapeStyle { filled, circular },
        )?;
        Ok(buffer.into_inner().into_pyarray(py))
    }

    /// Draw a circle outline (or fill) around `(x, y)`.
    #[pyfunction]
    #[pyo3(signature = (image, x, y, radius, color=None, filled=false))]
    pub fn draw_circle<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        x: isize,
        y: isize,
        radius: usize,
        color: Option<Vec<u8>>,
        filled: bool,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        draw_square(py, image, x, y, radius, color, filled, true)
    }

    #[pymodule]
    pub fn channel_tools(m: &Bound<'_, PyModule>) -> PyResult<()> {
        // Alpha filters
        m.add_function(wrap_pyfunction!(extend_alpha, m)?)?;
        m.add_function(wrap_pyfunction!(threshold_alpha, m)?)?;

        // Search
        m.add_function(wrap_pyfunction!(find_opaque_pos, m)?)?;

        // Shapes
        m.add_function(wrap_pyfunction!(draw_square, m)?)?;
        m.add_function(wrap_pyfunction!(draw_circle, m)?)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::channel_tools;
