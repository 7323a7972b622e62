use thiserror::Error;

use crate::NamespaceId;

/// Errors from namespaced Merkle tree operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NmtError {
    /// A leaf could not be interpreted.
    #[error("invalid data: {0}")]
    InvalidData(String),
    /// A leaf's namespace is smaller than the one pushed before it.
    #[error("namespace {pushed} pushed after {previous}; leaves must be ordered by namespace")]
    NamespaceOrder {
        /// Namespace of the last accepted leaf.
        previous: NamespaceId,
        /// Namespace of the rejected leaf.
        pushed: NamespaceId,
    },
}
