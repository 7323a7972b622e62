use reed_solomon_erasure::galois_8::ReedSolomon;

use crate::ErasureError;

/// Largest original width GF(2^8) allows: `2 * k` shards must fit in 256.
pub const MAX_ORIGINAL_WIDTH: usize = 128;

/// Systematic `k`-of-`2k` codec for one row or column.
pub(crate) struct LineCodec {
    rs: ReedSolomon,
}

impl LineCodec {
    pub(crate) fn new(original_width: usize) -> Result<Self, ErasureError> {
        let rs = ReedSolomon::new(original_width, original_width)
            .map_err(|e| ErasureError::Codec(format!("{:?}", e)))?;
        Ok(LineCodec { rs })
    }

    /// Fill the parity half of `line` from its data half.
    ///
    /// `line` holds `2k` equally sized shards; the last `k` are overwritten.
    pub(crate) fn encode(&self, line: &mut [Vec<u8>]) -> Result<(), ErasureError> {
        self.rs
            .encode(line)
            .map_err(|e| ErasureError::Codec(format!("{:?}", e)))
    }
}
