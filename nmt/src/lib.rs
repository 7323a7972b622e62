//! Namespaced Merkle tree using Blake3.
//!
//! Leaves are namespace-prefixed byte strings pushed in nondecreasing
//! namespace order. Every node commits to the namespace range of the leaves
//! beneath it, so a root digest is `min_namespace || max_namespace || hash`:
//!
//! - leaf:  `blake3(0x00 || namespace || payload)`
//! - inner: `blake3(0x01 || left_digest || right_digest)`
//!
//! The tree is split RFC 6962 style: the left subtree of `n` leaves holds the
//! largest power of two strictly smaller than `n`.

#![warn(missing_docs)]

mod error;
pub(crate) mod hash;
mod namespace;
mod tree;


pub use error::NmtError;
pub use hash::{NamespacedDigest, DIGEST_SIZE, HASH_SIZE};
pub use namespace::{NamespaceId, MAX_NAMESPACE_ID, NAMESPACE_SIZE};
pub use tree::NamespacedMerkleTree;
