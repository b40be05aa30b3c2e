//! Alpha extension (color bleeding).
//!
//! Pixels whose alpha falls in a "bad" band take their color from the
//! nearest pixel whose alpha reaches `good_minimum`. This keeps fringes
//! clean once partial transparency is discarded later, e.g. when converting
//! to an indexed palette. Optionally every alpha value is also binarized
//! against a threshold in the same pass.
//!
//! The scan is row-major and fully deterministic. If no pixel in reach
//! qualifies as a donor and thresholding is off, the scan stops at that
//! pixel. Writes made before the stop are kept and committed.

use serde::{Deserialize, Serialize};

use super::alpha_threshold::binarize;
use crate::error::Result;
use crate::pixel::{Coord, PixelBuffer, Region};
use crate::progress::{DiagnosticSink, ProgressSink};
use crate::traversal::{find_opaque_pos, SearchOptions};

/// Largest alpha the bad band may reach. Fully opaque pixels are never bled.
pub const BAND_LIMIT: i32 = 254;

/// Settings for [`extend_alpha`].
///
/// Fields are signed so that out-of-range values coming from a host can be
/// clamped instead of rejected, see [`normalized`](Self::normalized).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtendConfig {
    /// Lowest alpha (inclusive) of the band to fill.
    pub minimum: i32,
    /// Highest alpha (inclusive) of the band to fill.
    pub maximum: i32,
    /// Alpha a donor pixel needs.
    pub good_minimum: i32,
    /// Keep the donor's alpha instead of the filled pixel's own alpha.
    pub make_opaque: bool,
    /// Binarize every alpha value against `threshold`.
    pub enable_threshold: bool,
    pub threshold: i32,
    /// Cap on the donor search radius. `None` searches the whole buffer.
    pub max_radius: Option<usize>,
}

impl Default for ExtendConfig {
    fn default() -> Self {
        Self {
            minimum: 1,
            maximum: 254,
            good_minimum: 255,
            make_opaque: false,
            enable_threshold: false,
            threshold: 128,
            max_radius: None,
        }
    }
}

impl ExtendConfig {
    /// Clamp the band into `[0, 254]` and `good_minimum` to at least 0.
    ///
    /// `good_minimum` has no upper clamp: above 255 no donor can exist.
    pub fn normalized(&self) -> Self {
        Self {
            minimum: self.minimum.clamp(0, BAND_LIMIT),
            maximum: self.maximum.clamp(0, BAND_LIMIT),
            good_minimum: self.good_minimum.max(0),
            ..*self
        }
    }

    #[inline]
    fn in_band(&self, alpha: u8) -> bool {
        let alpha = i32::from(alpha);
        alpha >= self.minimum && alpha <= self.maximum
    }

    fn search_options(&self) -> SearchOptions {
        SearchOptions {
            good_minimum: self.good_minimum,
            max_radius: self.max_radius,
            circular: false,
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtendOutcome {
    /// Every pixel was visited.
    Completed,
    /// No donor was reachable from the pixel at `at` and thresholding was
    /// off. Pixels after it were not visited.
    Aborted { at: Coord },
}

/// Summary of one [`extend_alpha`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendReport {
    pub outcome: ExtendOutcome,
    /// Pixels that received a donor color.
    pub bled: usize,
    /// Pixels whose alpha was binarized.
    pub thresholded: usize,
    /// Band pixels that found themselves as nearest donor.
    pub self_matches: usize,
}

impl ExtendReport {
    pub fn is_aborted(&self) -> bool {
        matches!(self.outcome, ExtendOutcome::Aborted { .. })
    }
}

/// Per-run mutable state: counters plus the one-shot warning guards.
struct Scan<'a> {
    report: ExtendReport,
    warned_self_match: bool,
    warned_no_donor: bool,
    diagnostics: Option<&'a mut dyn DiagnosticSink>,
}

impl Scan<'_> {
    fn warn_self_match(&mut self, pos: Coord) {
        if std::mem::replace(&mut self.warned_self_match, true) {
            return;
        }
        let message = format!(
            "pixel at ({}, {}) is in the fill band but is its own nearest donor; \
             lower good_minimum or maximum",
            pos.x, pos.y
        );
        self.emit(&message);
    }

    fn warn_no_donor(&mut self, good_minimum: i32) {
        if std::mem::replace(&mut self.warned_no_donor, true) {
            return;
        }
        let message = format!("the image has no pixels with alpha at or above {}", good_minimum);
        self.emit(&message);
    }

    fn emit(&mut self, message: &str) {
        log::warn!("{}", message);
        if let Some(sink) = self.diagnostics.as_deref_mut() {
            sink.warn(message);
        }
    }
}

/// Fill the bad alpha band of `buffer` with color from the nearest donor.
///
/// Warnings only go to the `log` facade. See [`extend_alpha_with`] to
/// observe progress or receive warnings directly.
pub fn extend_alpha<B>(buffer: &mut B, config: &ExtendConfig) -> Result<ExtendReport>
where
    B: PixelBuffer + ?Sized,
{
    extend_alpha_with(buffer, config, None, None)
}

/// [`extend_alpha`] with optional progress and diagnostic sinks.
///
/// For every pixel with alpha in `[minimum, maximum]`:
/// 1. Search the nearest pixel with alpha `>= good_minimum`.
/// 2. If it is another pixel with a different color, copy its color. Alpha
///    is the donor's if `make_opaque` is set, otherwise the pixel keeps its
///    own. With thresholding on, alpha is binarized from the original value.
/// 3. If the pixel found itself, warn once and leave it alone.
/// 4. If nothing was found, warn once and stop the scan, unless
///    thresholding is on.
///
/// With thresholding on, every pixel not handled in step 2 has its alpha
/// binarized as well. The buffer is committed once at the end, also when
/// the scan stops early or a pixel access fails.
pub fn extend_alpha_with<B>(
    buffer: &mut B,
    config: &ExtendConfig,
    progress: Option<&mut dyn ProgressSink>,
    diagnostics: Option<&mut dyn DiagnosticSink>,
) -> Result<ExtendReport>
where
    B: PixelBuffer + ?Sized,
{
    let config = config.normalized();
    let alpha = buffer.alpha_index()?;
    let (width, height) = (buffer.width(), buffer.height());

    log::debug!("extend_alpha: {}x{} buffer, {:?}", width, height, config);

    let mut scan = Scan {
        report: ExtendReport {
            outcome: ExtendOutcome::Completed,
            bled: 0,
            thresholded: 0,
            self_matches: 0,
        },
        warned_self_match: false,
        warned_no_donor: false,
        diagnostics,
    };

    let scanned = scan_pixels(buffer, &config, alpha, &mut scan, progress);
    // Partial writes are flushed both after an abort and after a failed access.
    buffer.commit(Region::full(width, height));
    scanned?;

    let report = scan.report;
    log::debug!(
        "extend_alpha: {:?}, bled {}, thresholded {}, self matches {}",
        report.outcome,
        report.bled,
        report.thresholded,
        report.self_matches
    );
    Ok(report)
}

fn scan_pixels<B>(
    buffer: &mut B,
    config: &ExtendConfig,
    alpha: usize,
    scan: &mut Scan<'_>,
    mut progress: Option<&mut dyn ProgressSink>,
) -> Result<()>
where
    B: PixelBuffer + ?Sized,
{
    let (width, height) = (buffer.width(), buffer.height());
    let total = (width * height) as f32;
    let search = config.search_options();

    for y in 0..height {
        for x in 0..width {
            let pos = Coord::from((x, y));
            let pixel = buffer.get_pixel(x, y)?;
            let original_alpha = pixel.as_slice()[alpha];
            let mut thresholded = false;

            if config.in_band(original_alpha) {
                match find_opaque_pos(&*buffer, pos, &search)? {
                    Some(found) if found == pos => {
                        scan.report.self_matches += 1;
                        scan.warn_self_match(pos);
                    }
                    Some(found) => {
                        // Found positions are always in bounds.
                        let donor = buffer.get_pixel(found.x as usize, found.y as usize)?;
                        if donor != pixel {
                            let mut bled = if config.make_opaque {
                                donor
                            } else {
                                donor.with_alpha(original_alpha)
                            };
                            if config.enable_threshold {
                                bled = bled.with_alpha(binarize(original_alpha, config.threshold));
                                thresholded = true;
                                scan.report.thresholded += 1;
                            }
                            buffer.set_pixel(x, y, &bled)?;
                            scan.report.bled += 1;
                        }
                    }
                    None => {
                        scan.warn_no_donor(config.good_minimum);
                        if !config.enable_threshold {
                            scan.report.outcome = ExtendOutcome::Aborted { at: pos };
                            return Ok(());
                        }
                    }
                }
            }

            if config.enable_threshold && !thresholded {
                let binary = pixel.with_alpha(binarize(original_alpha, config.threshold));
                buffer.set_pixel(x, y, &binary)?;
                scan.report.thresholded += 1;
            }

            if let Some(sink) = progress.as_deref_mut() {
                sink.report((y * width + x + 1) as f32 / total);
            }
        }
    }
    Ok(())
}
