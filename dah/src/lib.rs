//! Data availability header computation.
//!
//! Every row and column of an [`ExtendedDataSquare`] is committed to with a
//! namespaced Merkle root. Shares of the original quadrant keep their own
//! namespace; parity shares are committed under
//! [`PARITY_SHARES_NAMESPACE_ID`]. The resulting [`DataAvailabilityHeader`]
//! hashes down to a single [`HeaderDigest`].
//!
//! [`compute_header`] runs on the calling thread for one worker and on a
//! pool of scoped threads otherwise. Both strategies produce bit-identical
//! headers.

#![warn(missing_docs)]

mod engine;
mod error;
mod header;
pub mod mock;
mod share;
mod square;


pub use dah_costs::{CostContext, CostResult, OperationCost};
pub use dah_erasure::{ErasureError, ExtendedDataSquare};
pub use dah_nmt::{NamespaceId, NamespacedDigest};
pub use engine::{compute_header, compute_header_parallel, compute_header_single};
pub use error::{Axis, Error};
pub use header::{DataAvailabilityHeader, HeaderDigest};
pub use share::{NamespacedShare, NAMESPACE_SIZE, PARITY_SHARES_NAMESPACE_ID, SHARE_SIZE};
pub use square::DataSquare;

/// Alias for `core::result::Result<T, Error>`.
pub type Result<T> = core::result::Result<T, Error>;
