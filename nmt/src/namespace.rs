use std::fmt;

use crate::NmtError;

/// Size in bytes of a namespace identifier.
pub const NAMESPACE_SIZE: usize = 8;

/// The largest representable namespace. Parity data is committed under it.
pub const MAX_NAMESPACE_ID: NamespaceId = NamespaceId([0xFF; NAMESPACE_SIZE]);

/// Fixed-size namespace identifier, ordered lexicographically.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NamespaceId(pub [u8; NAMESPACE_SIZE]);

impl NamespaceId {
    /// Read the namespace prefix of a leaf.
    pub fn from_prefix(data: &[u8]) -> Result<Self, NmtError> {
        let prefix = data.get(..NAMESPACE_SIZE).ok_or_else(|| {
            NmtError::InvalidData(format!(
                "leaf of {} bytes is shorter than the {} byte namespace",
                data.len(),
                NAMESPACE_SIZE
            ))
        })?;
        let mut id = [0u8; NAMESPACE_SIZE];
        id.copy_from_slice(prefix);
        Ok(NamespaceId(id))
    }

    /// Raw bytes of the identifier.
    pub fn as_bytes(&self) -> &[u8; NAMESPACE_SIZE] {
        &self.0
    }

    /// True for the maximum namespace.
    pub fn is_max(&self) -> bool {
        *self == MAX_NAMESPACE_ID
    }
}

impl From<[u8; NAMESPACE_SIZE]> for NamespaceId {
    fn from(value: [u8; NAMESPACE_SIZE]) -> Self {
        NamespaceId(value)
    }
}

impl fmt::Display for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NamespaceId({})", self)
    }
}
