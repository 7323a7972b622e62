use std::fmt;

use crate::{NamespaceId, NAMESPACE_SIZE};

/// Size of the Blake3 output.
pub const HASH_SIZE: usize = 32;

/// Serialized size of a [`NamespacedDigest`].
pub const DIGEST_SIZE: usize = 2 * NAMESPACE_SIZE + HASH_SIZE;

/// Domain tag prepended to leaf hash inputs.
pub(crate) const LEAF_DOMAIN_TAG: u8 = 0x00;
/// Domain tag prepended to inner node hash inputs.
pub(crate) const INTERNAL_DOMAIN_TAG: u8 = 0x01;

/// A node commitment: the namespace range below the node and its hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NamespacedDigest {
    /// Smallest namespace covered.
    pub min: NamespaceId,
    /// Largest namespace covered.
    pub max: NamespaceId,
    /// Blake3 hash of the node.
    pub hash: [u8; HASH_SIZE],
}

impl NamespacedDigest {
    /// Digest of a tree without leaves.
    pub fn empty() -> Self {
        NamespacedDigest {
            min: NamespaceId::default(),
            max: NamespaceId::default(),
            hash: *blake3::hash(&[]).as_bytes(),
        }
    }

    /// `min || max || hash`.
    pub fn to_bytes(&self) -> [u8; DIGEST_SIZE] {
        let mut out = [0u8; DIGEST_SIZE];
        out[..NAMESPACE_SIZE].copy_from_slice(self.min.as_bytes());
        out[NAMESPACE_SIZE..2 * NAMESPACE_SIZE].copy_from_slice(self.max.as_bytes());
        out[2 * NAMESPACE_SIZE..].copy_from_slice(&self.hash);
        out
    }
}

impl fmt::Debug for NamespacedDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl fmt::Display for NamespacedDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.min, self.max, hex::encode(self.hash))
    }
}

/// Hash a namespace-prefixed leaf. The namespace is both its min and max.
pub(crate) fn leaf_digest(namespace: NamespaceId, data: &[u8]) -> NamespacedDigest {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&[LEAF_DOMAIN_TAG]);
    hasher.update(data);
    NamespacedDigest {
        min: namespace,
        max: namespace,
        hash: *hasher.finalize().as_bytes(),
    }
}

/// Hash two children into their parent.
///
/// With `ignore_max_namespace`, a right subtree made only of maximum
/// namespace leaves does not widen the parent's range.
pub(crate) fn node_digest(
    left: &NamespacedDigest,
    right: &NamespacedDigest,
    ignore_max_namespace: bool,
) -> NamespacedDigest {
    let min = left.min.min(right.min);
    let max = if ignore_max_namespace && left.min.is_max() {
        left.min
    } else if ignore_max_namespace && right.min.is_max() {
        left.max
    } else {
        left.max.max(right.max)
    };

    let mut hasher = blake3::Hasher::new();
    hasher.update(&[INTERNAL_DOMAIN_TAG]);
    hasher.update(&left.to_bytes());
    hasher.update(&right.to_bytes());
    NamespacedDigest {
        min,
        max,
        hash: *hasher.finalize().as_bytes(),
    }
}
