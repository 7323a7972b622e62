//! Random squares for tests and benchmarks.
//!
//! Namespaces are assigned so that they never decrease along any row or
//! column of the original quadrant, which is what the tree push order
//! requires.

use rand::Rng;

use crate::{Error, ExtendedDataSquare, NamespaceId, NamespacedShare, NAMESPACE_SIZE, SHARE_SIZE};

/// Namespace of the `index`-th original share in row-major order.
///
/// The last byte carries the index while it fits; every later share shares
/// one fixed namespace that is larger than all of them.
pub fn mock_namespace(index: usize) -> NamespaceId {
    let mut id = [0u8; NAMESPACE_SIZE];
    match u8::try_from(index) {
        Ok(byte) => id[NAMESPACE_SIZE - 1] = byte,
        Err(_) => id[NAMESPACE_SIZE - 2] = 100,
    }
    NamespaceId(id)
}

/// `original_width^2` random shares of [`SHARE_SIZE`] bytes, tagged with
/// [`mock_namespace`].
pub fn mock_shares<R: Rng + ?Sized>(original_width: usize, rng: &mut R) -> Vec<NamespacedShare> {
    (0..original_width * original_width)
        .map(|index| {
            let mut data = vec![0u8; SHARE_SIZE];
            rng.fill(data.as_mut_slice());
            NamespacedShare::new(mock_namespace(index), data)
        })
        .collect()
}

/// Random original shares and their extension to a square of
/// `extended_width`.
pub fn mock_square<R: Rng + ?Sized>(
    extended_width: usize,
    rng: &mut R,
) -> Result<(Vec<NamespacedShare>, ExtendedDataSquare), Error> {
    if extended_width == 0 || extended_width % 2 != 0 {
        return Err(Error::InvalidWidth(extended_width));
    }
    let shares = mock_shares(extended_width / 2, rng);
    let square = extend(&shares)?;
    Ok((shares, square))
}

/// Extend the payloads of `shares` on the calling thread.
pub fn extend(shares: &[NamespacedShare]) -> Result<ExtendedDataSquare, Error> {
    let payloads: Vec<&[u8]> = shares.iter().map(|share| share.data.as_slice()).collect();
    Ok(ExtendedDataSquare::compute(&payloads)?)
}
