use std::fmt;

use dah_erasure::ErasureError;
use dah_nmt::NmtError;
use thiserror::Error;

/// Which tree of an index a share was pushed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// The row tree.
    Row,
    /// The column tree.
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => f.write_str("row"),
            Axis::Column => f.write_str("column"),
        }
    }
}

/// Fatal errors from header computation. None of them is retried and none
/// leaves a partial header behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The square width is zero or odd.
    #[error("square width {0} must be even and positive")]
    InvalidWidth(usize),
    /// The original share list does not cover the original quadrant.
    #[error("width {width} needs {expected} original shares, got {actual}")]
    ShareCountMismatch {
        /// Extended width.
        width: usize,
        /// `(width / 2)^2`.
        expected: usize,
        /// Shares supplied.
        actual: usize,
    },
    /// A share does not have the fixed share size.
    #[error("{axis} {index}, position {position}: share is {actual} bytes, expected {expected}")]
    InvalidShareSize {
        /// Tree the share was destined for.
        axis: Axis,
        /// Row or column index.
        index: usize,
        /// Position within the row or column.
        position: usize,
        /// Required size.
        expected: usize,
        /// Size found.
        actual: usize,
    },
    /// The square returned a row or column with the wrong number of shares.
    #[error("{axis} {index} has {actual} shares, expected {expected}")]
    InvalidLineLength {
        /// Whether a row or a column was short.
        axis: Axis,
        /// Row or column index.
        index: usize,
        /// Square width.
        expected: usize,
        /// Shares returned.
        actual: usize,
    },
    /// The tree refused a share.
    #[error("{axis} {index}, position {position}: could not push share")]
    Push {
        /// Tree the share was pushed into.
        axis: Axis,
        /// Row or column index.
        index: usize,
        /// Position within the row or column.
        position: usize,
        /// Tree error.
        #[source]
        source: NmtError,
    },
    /// A worker count of zero was requested.
    #[error("worker count must be at least 1")]
    NoWorkers,
    /// Extending the original square failed.
    #[error(transparent)]
    Erasure(#[from] ErasureError),
    /// A worker thread panicked before finishing its share of the queue.
    #[error("a root computation worker panicked")]
    WorkerPanicked,
    /// All workers finished but a root slot was never written.
    #[error("{axis} root {index} was never computed")]
    IncompleteHeader {
        /// Missing root's axis.
        axis: Axis,
        /// Missing root's index.
        index: usize,
    },
}
