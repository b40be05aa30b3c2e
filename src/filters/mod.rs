//! Alpha channel filters.
//!
//! ## Supported Formats
//!
//! Both filters need an alpha channel:
//!
//! | Format | Shape | Type | Alpha |
//! |--------|-------|------|-------|
//! | GrayAlpha8 | (H, W, 2) | u8 | channel 1 |
//! | RGBA8 | (H, W, 4) | u8 | channel 3 |
//!
//! Gray and RGB inputs are rejected with [`Error::NoAlphaChannel`](crate::Error::NoAlphaChannel).
//!
//! ## Filters
//!
//! - **Alpha extension**: fills a band of partially transparent pixels with the
//!   color of the nearest opaque pixel, optionally binarizing alpha
//! - **Alpha threshold**: binarizes alpha to 0 or 255 on its own

pub mod alpha_extend;
pub mod alpha_threshold;

pub use alpha_extend::{extend_alpha, extend_alpha_with, ExtendConfig, ExtendOutcome, ExtendReport};
pub use alpha_threshold::{threshold_alpha, threshold_alpha_u8};
