//! Error type shared by all buffer operations.
//!
//! Only caller contract violations are errors. A search that finds nothing
//! and an extension scan that aborts are ordinary outcomes and are reported
//! through `Option` and [`ExtendOutcome`](crate::filters::ExtendOutcome).

/// Errors raised when a buffer or color does not satisfy an operation's
/// requirements.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("unsupported channel count {0}, expected 1 to 4")]
    InvalidChannelCount(usize),
    #[error("color has {got} channels but the buffer has {expected}")]
    ChannelMismatch { expected: usize, got: usize },
    #[error("pixel ({x}, {y}) is outside the {width}x{height} buffer")]
    OutOfBounds {
        x: isize,
        y: isize,
        width: usize,
        height: usize,
    },
    #[error("coordinate ({x}, {y}) is outside the supported range")]
    CoordinateOutOfRange { x: isize, y: isize },
    #[error("buffer with {0} channels has no alpha channel")]
    NoAlphaChannel(usize),
    #[error("data length {len} does not match {width}x{height}x{channels}")]
    InvalidDimensions {
        len: usize,
        width: usize,
        height: usize,
        channels: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
