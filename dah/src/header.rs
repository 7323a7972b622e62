use std::fmt;

use dah_nmt::{NamespacedDigest, HASH_SIZE};

use crate::{Axis, Error};

/// Row and column roots of an extended data square, index-aligned with it.
///
/// Only ever constructed complete: every row and column root is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataAvailabilityHeader {
    row_roots: Vec<NamespacedDigest>,
    column_roots: Vec<NamespacedDigest>,
}

impl DataAvailabilityHeader {
    pub(crate) fn from_roots(
        row_roots: Vec<NamespacedDigest>,
        column_roots: Vec<NamespacedDigest>,
    ) -> Self {
        debug_assert_eq!(row_roots.len(), column_roots.len());
        DataAvailabilityHeader {
            row_roots,
            column_roots,
        }
    }

    /// Width of the committed square.
    pub fn width(&self) -> usize {
        self.row_roots.len()
    }

    /// Roots of rows `0..width`.
    pub fn row_roots(&self) -> &[NamespacedDigest] {
        &self.row_roots
    }

    /// Roots of columns `0..width`.
    pub fn column_roots(&self) -> &[NamespacedDigest] {
        &self.column_roots
    }

    /// Root of row `index`, if in range.
    pub fn row_root(&self, index: usize) -> Option<&NamespacedDigest> {
        self.row_roots.get(index)
    }

    /// Root of column `index`, if in range.
    pub fn column_root(&self, index: usize) -> Option<&NamespacedDigest> {
        self.column_roots.get(index)
    }

    /// Hash of all row roots followed by all column roots.
    pub fn hash(&self) -> HeaderDigest {
        let mut hasher = blake3::Hasher::new();
        for root in self.row_roots.iter().chain(&self.column_roots) {
            hasher.update(&root.to_bytes());
        }
        HeaderDigest(*hasher.finalize().as_bytes())
    }
}

/// Content address of a [`DataAvailabilityHeader`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeaderDigest([u8; HASH_SIZE]);

impl HeaderDigest {
    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }
}

impl fmt::Display for HeaderDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for HeaderDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HeaderDigest({})", self)
    }
}

/// Position-addressed root storage filled by the workers of the parallel
/// strategy. Each slot is written by exactly one worker.
pub(crate) struct RootSlots {
    rows: Vec<Option<NamespacedDigest>>,
    columns: Vec<Option<NamespacedDigest>>,
}

impl RootSlots {
    pub(crate) fn new(width: usize) -> Self {
        RootSlots {
            rows: vec![None; width],
            columns: vec![None; width],
        }
    }

    pub(crate) fn fill(
        &mut self,
        index: usize,
        row_root: NamespacedDigest,
        column_root: NamespacedDigest,
    ) {
        debug_assert!(self.rows[index].is_none(), "row {} written twice", index);
        self.rows[index] = Some(row_root);
        self.columns[index] = Some(column_root);
    }

    /// Turn the slots into a header, failing on the first empty slot.
    pub(crate) fn into_header(self) -> Result<DataAvailabilityHeader, Error> {
        let row_roots = collect_slots(self.rows, Axis::Row)?;
        let column_roots = collect_slots(self.columns, Axis::Column)?;
        Ok(DataAvailabilityHeader::from_roots(row_roots, column_roots))
    }
}

fn collect_slots(
    slots: Vec<Option<NamespacedDigest>>,
    axis: Axis,
) -> Result<Vec<NamespacedDigest>, Error> {
    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| slot.ok_or(Error::IncompleteHeader { axis, index }))
        .collect()
}
