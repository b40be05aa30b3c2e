//! WebAssembly exports for the alpha tools.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Images are
//! passed as flat interleaved `u8` arrays (length = width * height * channels)
//! and results are returned as new arrays. Invalid input is thrown as a
//! string error.

use wasm_bindgen::prelude::*;

use crate::draw::{draw_square, ShapeStyle};
use crate::error::Error;
use crate::filters::alpha_extend::{extend_alpha, ExtendConfig, ExtendOutcome, ExtendReport};
use crate::filters::alpha_threshold::threshold_alpha;
use crate::pixel::{ArrayBuffer, Color, Coord};
use crate::traversal::{find_opaque_pos, SearchOptions};

fn js_error(err: Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// ============================================================================
// Alpha Extension
// ============================================================================

/// Filled image plus how the run ended.
#[wasm_bindgen]
pub struct ExtendAlphaResult {
    data: Vec<u8>,
    report: ExtendReport,
}

#[wasm_bindgen]
impl ExtendAlphaResult {
    /// Flat array with the filled image
    #[wasm_bindgen(getter)]
    pub fn data(&self) -> Vec<u8> {
        self.data.clone()
    }

    /// False when the scan stopped because no donor pixel was reachable.
    #[wasm_bindgen(getter)]
    pub fn completed(&self) -> bool {
        !self.report.is_aborted()
    }

    /// Column of the pixel the scan stopped at.
    #[wasm_bindgen(getter, js_name = abortX)]
    pub fn abort_x(&self) -> Option<i32> {
        self.abort_at().map(|(x, _)| x)
    }

    /// Row of the pixel the scan stopped at.
    #[wasm_bindgen(getter, js_name = abortY)]
    pub fn abort_y(&self) -> Option<i32> {
        self.abort_at().map(|(_, y)| y)
    }

    #[wasm_bindgen(getter)]
    pub fn bled(&self) -> usize {
        self.report.bled
    }

    #[wasm_bindgen(getter)]
    pub fn thresholded(&self) -> usize {
        self.report.thresholded
    }
}

impl ExtendAlphaResult {
    fn abort_at(&self) -> Option<(i32, i32)> {
        match self.report.outcome {
            ExtendOutcome::Completed => None,
            ExtendOutcome::Aborted { at } => Some((at.x as i32, at.y as i32)),
        }
    }
}

/// Fill the alpha band `[minimum, maximum]` with the nearest opaque color.
///
/// # Arguments
/// * `data` - Flat gray+alpha or RGBA bytes
/// * `width` / `height` / `channels` - Image shape (channels 2 or 4)
/// * `minimum` / `maximum` - Alpha band to fill (defaults 1 and 254)
/// * `make_opaque` - Take the donor's alpha
/// * `good_minimum` - Alpha a donor pixel needs (default 255)
/// * `enable_threshold` / `threshold` - Binarize alpha (default off, 128)
/// * `max_radius` - Cap on the donor search radius, `undefined` for none
///
/// # Returns
/// The filled image and whether the scan completed
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn extend_alpha_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    minimum: i32,
    maximum: i32,
    make_opaque: bool,
    good_minimum: i32,
    enable_threshold: bool,
    threshold: i32,
    max_radius: Option<usize>,
) -> Result<ExtendAlphaResult, JsValue> {
    let mut buffer = ArrayBuffer::from_raw(data.to_vec(), width, height, channels).map_err(js_error)?;
    let config = ExtendConfig {
        minimum,
        maximum,
        good_minimum,
        make_opaque,
        enable_threshold,
        threshold,
        max_radius,
    };
    let report = extend_alpha(&mut buffer, &config).map_err(js_error)?;
    Ok(ExtendAlphaResult {
        data: buffer.into_raw(),
        report,
    })
}

/// Binarize alpha: values above `threshold` become 255, the rest 0.
#[wasm_bindgen]
pub fn threshold_alpha_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    threshold: i32,
) -> Result<Vec<u8>, JsValue> {
    let mut buffer = ArrayBuffer::from_raw(data.to_vec(), width, height, channels).map_err(js_error)?;
    threshold_alpha(&mut buffer, threshold).map_err(js_error)?;
    Ok(buffer.into_raw())
}

// ============================================================================
// Proximity Search
// ============================================================================

/// Nearest position to `(x, y)` with alpha at least `good_minimum`.
///
/// # Returns
/// `[x, y]`, or an empty array when no pixel qualifies
#[wasm_bindgen]
pub fn find_opaque_pos_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    x: i32,
    y: i32,
    good_minimum: i32,
) -> Result<Vec<i32>, JsValue> {
    let buffer = ArrayBuffer::from_raw(data.to_vec(), width, height, channels).map_err(js_error)?;
    let options = SearchOptions::with_good_minimum(good_minimum);
    let found = find_opaque_pos(&buffer, Coord::new(x as isize, y as isize), &options).map_err(js_error)?;
    Ok(found.map(|p| vec![p.x as i32, p.y as i32]).unwrap_or_default())
}

// ============================================================================
// Shapes
// ============================================================================

/// Draw a square or circle around `(x, y)`.
///
/// `color` needs one value per channel; an empty array draws opaque black.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn draw_shape_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    x: i32,
    y: i32,
    radius: usize,
    color: &[u8],
    filled: bool,
    circular: bool,
) -> Result<Vec<u8>, JsValue> {
    let mut buffer = ArrayBuffer::from_raw(data.to_vec(), width, height, channels).map_err(js_error)?;
    let color = if color.is_empty() {
        None
    } else {
        Some(Color::new(color).map_err(js_error)?)
    };
    draw_square(
        &mut buffer,
        Coord::new(x as isize, y as isize),
        radius,
        color.as_ref(),
        ShapeStyle { filled, circular },
    )
    .map_err(js_error)?;
    Ok(buffer.into_raw())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extend_alpha_wasm_reports_abort() {
        let result = extend_alpha_wasm(&[0u8; 16], 2, 2, 4, 0, 254, false, 255, false, 128, None).unwrap();

        assert!(!result.completed());
        assert_eq!((result.abort_x(), result.abort_y()), (Some(0), Some(0)));
        assert_eq!(result.data(), vec![0u8; 16]);
    }

    #[test]
    fn test_extend_alpha_wasm_completed_run() {
        // Transparent pixel next to an opaque red one
        let data = [0, 0, 0, 0, 255, 0, 0, 255];
        let result = extend_alpha_wasm(&data, 2, 1, 4, 0, 254, false, 255, false, 128, Some(1)).unwrap();

        assert!(result.completed());
        assert_eq!(result.abort_x(), None);
        assert_eq!(result.bled(), 1);
        assert_eq!(result.data(), vec![255, 0, 0, 0, 255, 0, 0, 255]);
    }
}
