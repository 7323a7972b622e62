use dah_erasure::ExtendedDataSquare;

/// Read access to an erasure-coded square.
///
/// The engine only ever reads rows and columns, so any square layout can be
/// committed to. Implementations are shared read-only between workers.
pub trait DataSquare: Sync {
    /// Number of shares on one side.
    fn width(&self) -> usize;
    /// Shares of row `index`, left to right.
    fn row(&self, index: usize) -> Vec<&[u8]>;
    /// Shares of column `index`, top to bottom.
    fn column(&self, index: usize) -> Vec<&[u8]>;
}

impl DataSquare for ExtendedDataSquare {
    fn width(&self) -> usize {
        ExtendedDataSquare::width(self)
    }

    fn row(&self, index: usize) -> Vec<&[u8]> {
        ExtendedDataSquare::row(self, index)
    }

    fn column(&self, index: usize) -> Vec<&[u8]> {
        ExtendedDataSquare::column(self, index)
    }
}
