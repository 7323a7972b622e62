use thiserror::Error;

/// Errors from extending a data square.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErasureError {
    /// No shares were given.
    #[error("cannot extend an empty data square")]
    Empty,
    /// The share count is not a perfect square.
    #[error("{0} shares do not form a square")]
    NotSquare(usize),
    /// The original width is beyond what GF(2^8) can extend.
    #[error("original width {width} exceeds the codec limit of {max}")]
    TooWide {
        /// Requested original width.
        width: usize,
        /// Largest supported original width.
        max: usize,
    },
    /// Shares differ in size.
    #[error("share {index} is {actual} bytes, expected {expected}")]
    ShareSize {
        /// Row-major index of the offending share.
        index: usize,
        /// Size of the first share.
        expected: usize,
        /// Size found.
        actual: usize,
    },
    /// Shares have zero length.
    #[error("shares must not be empty")]
    EmptyShare,
    /// The codec refused its input.
    #[error("reed-solomon codec: {0}")]
    Codec(String),
    /// An encoding thread panicked.
    #[error("encoding worker panicked")]
    WorkerPanicked,
}
