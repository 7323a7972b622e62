//! Two-dimensional Reed-Solomon extension of a square of equally sized
//! shares.
//!
//! An original `k × k` square is extended to `2k × 2k`:
//!
//! ```text
//!  Q0 | Q1      Q0: original data
//!  ---+---      Q1: row-wise extension of Q0
//!  Q2 | Q3      Q2: column-wise extension of Q0
//!               Q3: row-wise extension of Q2
//! ```
//!
//! The code works over GF(2^8), so an extended row holds at most 256 shares.

#![warn(missing_docs)]

mod codec;
mod error;
mod square;

#[cfg(test)]
mod tests;

pub use codec::MAX_ORIGINAL_WIDTH;
pub use error::ErasureError;
pub use square::ExtendedDataSquare;
