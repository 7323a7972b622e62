use dah_nmt::{NamespaceId, MAX_NAMESPACE_ID};

pub use dah_nmt::NAMESPACE_SIZE;

/// Size in bytes of one cell of the data square.
pub const SHARE_SIZE: usize = 256;

/// Namespace under which every parity share is committed.
pub const PARITY_SHARES_NAMESPACE_ID: NamespaceId = MAX_NAMESPACE_ID;

/// A share of original data and the namespace it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespacedShare {
    /// Namespace of the share.
    pub namespace: NamespaceId,
    /// Share payload.
    pub data: Vec<u8>,
}

impl NamespacedShare {
    /// Pair a payload with its namespace.
    pub fn new(namespace: NamespaceId, data: Vec<u8>) -> Self {
        NamespacedShare { namespace, data }
    }

    /// Wrap a parity payload with the parity sentinel.
    pub fn parity(data: Vec<u8>) -> Self {
        NamespacedShare::new(PARITY_SHARES_NAMESPACE_ID, data)
    }

    /// Tree leaf encoding, `namespace || data`.
    pub fn to_leaf(&self) -> Vec<u8> {
        let mut leaf = Vec::with_capacity(NAMESPACE_SIZE + self.data.len());
        write_leaf(&mut leaf, &self.namespace, &self.data);
        leaf
    }
}

/// Overwrite `buf` with `namespace || data`.
pub(crate) fn write_leaf(buf: &mut Vec<u8>, namespace: &NamespaceId, data: &[u8]) {
    buf.clear();
    buf.extend_from_slice(namespace.as_bytes());
    buf.extend_from_slice(data);
}
