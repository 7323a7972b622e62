use std::thread;

use tracing::debug;

use crate::{
    codec::{LineCodec, MAX_ORIGINAL_WIDTH},
    ErasureError,
};

/// An erasure-coded square of `width × width` shares, stored row-major.
///
/// `width` is always even; the top-left `width/2 × width/2` quadrant is the
/// original data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedDataSquare {
    width: usize,
    share_size: usize,
    cells: Vec<Vec<u8>>,
}

impl ExtendedDataSquare {
    /// Extend a row-major original square on the calling thread.
    pub fn compute<S: AsRef<[u8]>>(shares: &[S]) -> Result<Self, ErasureError> {
        let mut square = Self::with_original(shares)?;
        let codec = LineCodec::new(square.original_width())?;
        let k = square.original_width();
        let width = square.width;

        for row in square.cells.chunks_mut(width).take(k) {
            codec.encode(row)?;
        }
        for column in 0..k {
            let parity = square.encode_column(&codec, column)?;
            square.write_column_parity(column, parity);
        }
        for row in square.cells.chunks_mut(width).skip(k) {
            codec.encode(row)?;
        }

        debug!(width, share_size = square.share_size, "extended data square");
        Ok(square)
    }

    /// Extend a row-major original square, spreading each phase's rows or
    /// columns over `workers` scoped threads.
    ///
    /// The result is identical to [`ExtendedDataSquare::compute`].
    pub fn compute_parallel<S: AsRef<[u8]>>(
        shares: &[S],
        workers: usize,
    ) -> Result<Self, ErasureError> {
        if workers <= 1 {
            return Self::compute(shares);
        }
        let mut square = Self::with_original(shares)?;
        let k = square.original_width();
        let width = square.width;

        {
            let (top, _) = square.cells.split_at_mut(k * width);
            encode_rows_parallel(top, width, k, workers)?;
        }

        let columns = encode_columns_parallel(&square, workers)?;
        for (column, parity) in columns.into_iter().enumerate() {
            square.write_column_parity(column, parity);
        }

        {
            let (_, bottom) = square.cells.split_at_mut(k * width);
            encode_rows_parallel(bottom, width, k, workers)?;
        }

        debug!(
            width,
            share_size = square.share_size,
            workers,
            "extended data square in parallel"
        );
        Ok(square)
    }

    /// Lay out the original shares in the top-left quadrant, parity zeroed.
    fn with_original<S: AsRef<[u8]>>(shares: &[S]) -> Result<Self, ErasureError> {
        if shares.is_empty() {
            return Err(ErasureError::Empty);
        }
        let k = integer_sqrt(shares.len());
        if k * k != shares.len() {
            return Err(ErasureError::NotSquare(shares.len()));
        }
        if k > MAX_ORIGINAL_WIDTH {
            return Err(ErasureError::TooWide {
                width: k,
                max: MAX_ORIGINAL_WIDTH,
            });
        }
        let share_size = shares[0].as_ref().len();
        if share_size == 0 {
            return Err(ErasureError::EmptyShare);
        }
        if let Some((index, share)) = shares
            .iter()
            .enumerate()
            .find(|(_, share)| share.as_ref().len() != share_size)
        {
            return Err(ErasureError::ShareSize {
                index,
                expected: share_size,
                actual: share.as_ref().len(),
            });
        }

        let width = 2 * k;
        let mut cells = vec![vec![0u8; share_size]; width * width];
        for (i, share) in shares.iter().enumerate() {
            let (row, column) = (i / k, i % k);
            cells[row * width + column].copy_from_slice(share.as_ref());
        }
        Ok(ExtendedDataSquare {
            width,
            share_size,
            cells,
        })
    }

    /// Compute the parity half of one original column.
    fn encode_column(
        &self,
        codec: &LineCodec,
        column: usize,
    ) -> Result<Vec<Vec<u8>>, ErasureError> {
        let k = self.original_width();
        let mut line: Vec<Vec<u8>> = (0..k)
            .map(|row| self.cell(row, column).to_vec())
            .chain((0..k).map(|_| vec![0u8; self.share_size]))
            .collect();
        codec.encode(&mut line)?;
        Ok(line.split_off(k))
    }

    fn write_column_parity(&mut self, column: usize, parity: Vec<Vec<u8>>) {
        let k = self.original_width();
        for (offset, share) in parity.into_iter().enumerate() {
            self.cells[(k + offset) * self.width + column] = share;
        }
    }

    /// Number of shares on one side.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Width of the original quadrant.
    pub fn original_width(&self) -> usize {
        self.width / 2
    }

    /// Size of every share in bytes.
    pub fn share_size(&self) -> usize {
        self.share_size
    }

    /// Share at `(row, column)`.
    ///
    /// Panics if either index is out of bounds.
    pub fn cell(&self, row: usize, column: usize) -> &[u8] {
        assert!(row < self.width && column < self.width, "cell out of bounds");
        &self.cells[row * self.width + column]
    }

    /// Shares of row `index`, left to right.
    pub fn row(&self, index: usize) -> Vec<&[u8]> {
        self.cells[index * self.width..(index + 1) * self.width]
            .iter()
            .map(Vec::as_slice)
            .collect()
    }

    /// Shares of column `index`, top to bottom.
    pub fn column(&self, index: usize) -> Vec<&[u8]> {
        (0..self.width).map(|row| self.cell(row, index)).collect()
    }

    /// True if `(row, column)` lies in the original quadrant.
    pub fn is_original(&self, row: usize, column: usize) -> bool {
        let k = self.original_width();
        row < k && column < k
    }

    /// Replace the share at `(row, column)`.
    ///
    /// Parity is not recomputed. Intended for building malformed squares in
    /// tests of downstream consumers.
    pub fn set_cell(&mut self, row: usize, column: usize, share: Vec<u8>) {
        assert!(row < self.width && column < self.width, "cell out of bounds");
        self.cells[row * self.width + column] = share;
    }
}

/// Encode every row in `rows` (a run of `width`-share rows) on up to
/// `workers` threads. Each thread owns a contiguous band of rows.
fn encode_rows_parallel(
    rows: &mut [Vec<u8>],
    width: usize,
    k: usize,
    workers: usize,
) -> Result<(), ErasureError> {
    let row_count = rows.len() / width;
    let rows_per_worker = row_count.div_ceil(workers).max(1);

    thread::scope(|scope| {
        let handles: Vec<_> = rows
            .chunks_mut(rows_per_worker * width)
            .map(|band| {
                scope.spawn(move || {
                    let codec = LineCodec::new(k)?;
                    for row in band.chunks_mut(width) {
                        codec.encode(row)?;
                    }
                    Ok::<_, ErasureError>(())
                })
            })
            .collect();
        join_all(handles).map(|_| ())
    })
}

/// Compute the parity halves of all original columns on up to `workers`
/// threads, returned in column order.
fn encode_columns_parallel(
    square: &ExtendedDataSquare,
    workers: usize,
) -> Result<Vec<Vec<Vec<u8>>>, ErasureError> {
    let k = square.original_width();
    let columns: Vec<usize> = (0..k).collect();
    let columns_per_worker = k.div_ceil(workers).max(1);

    thread::scope(|scope| {
        let handles: Vec<_> = columns
            .chunks(columns_per_worker)
            .map(|band| {
                scope.spawn(move || {
                    let codec = LineCodec::new(k)?;
                    band.iter()
                        .map(|&column| square.encode_column(&codec, column))
                        .collect::<Result<Vec<_>, ErasureError>>()
                })
            })
            .collect();
        join_all(handles).map(|bands| bands.into_iter().flatten().collect())
    })
}

fn join_all<T>(
    handles: Vec<thread::ScopedJoinHandle<'_, Result<T, ErasureError>>>,
) -> Result<Vec<T>, ErasureError> {
    let mut out = Vec::with_capacity(handles.len());
    let mut first_error = None;
    for handle in handles {
        match handle.join() {
            Ok(Ok(value)) => out.push(value),
            Ok(Err(e)) => {
                first_error.get_or_insert(e);
            }
            Err(_) => {
                first_error.get_or_insert(ErasureError::WorkerPanicked);
            }
        }
    }
    match first_error {
        Some(e) => Err(e),
        None => Ok(out),
    }
}

fn integer_sqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}
