use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver},
        Mutex,
    },
    thread,
};

use dah_costs::{
    cost_return_on_error, cost_return_on_error_no_add, CostResult, CostsExt, OperationCost,
};
use dah_nmt::{NamespaceId, NamespacedDigest, NamespacedMerkleTree, NAMESPACE_SIZE};
use tracing::debug;

use crate::{
    header::{DataAvailabilityHeader, RootSlots},
    share::{write_leaf, PARITY_SHARES_NAMESPACE_ID, SHARE_SIZE},
    Axis, DataSquare, Error, NamespacedShare,
};

/// Compute the header of `square` with `workers` threads.
///
/// `original` holds the `(width/2)^2` shares of the original quadrant in
/// row-major order; their namespaces replace the parity sentinel for that
/// quadrant. One worker runs on the calling thread.
pub fn compute_header<S: DataSquare>(
    square: &S,
    original: &[NamespacedShare],
    workers: usize,
) -> CostResult<DataAvailabilityHeader, Error> {
    match workers {
        0 => Err(Error::NoWorkers).wrap_with_cost(OperationCost::default()),
        1 => compute_header_single(square, original),
        _ => compute_header_parallel(square, original, workers),
    }
}

/// Compute the header one index at a time on the calling thread.
pub fn compute_header_single<S: DataSquare>(
    square: &S,
    original: &[NamespacedShare],
) -> CostResult<DataAvailabilityHeader, Error> {
    let mut cost = OperationCost::default();
    cost_return_on_error_no_add!(&cost, validate(square, original));

    let width = square.width();
    let mut row_roots = Vec::with_capacity(width);
    let mut column_roots = Vec::with_capacity(width);
    for index in 0..width {
        let (row_root, column_root) =
            cost_return_on_error!(&mut cost, index_roots(square, original, index));
        row_roots.push(row_root);
        column_roots.push(column_root);
    }

    debug!(width, hash_calls = cost.total_hash_calls(), "computed header");
    Ok(DataAvailabilityHeader::from_roots(row_roots, column_roots)).wrap_with_cost(cost)
}

/// Compute the header on `workers` scoped threads draining a queue of
/// indices.
///
/// Returns only after every worker has been joined. The first worker error
/// stops the others from claiming further indices and is returned; no
/// partial header escapes.
pub fn compute_header_parallel<S: DataSquare>(
    square: &S,
    original: &[NamespacedShare],
    workers: usize,
) -> CostResult<DataAvailabilityHeader, Error> {
    let mut cost = OperationCost::default();
    if workers == 0 {
        return Err(Error::NoWorkers).wrap_with_cost(cost);
    }
    cost_return_on_error_no_add!(&cost, validate(square, original));

    let width = square.width();
    let (sender, receiver) = mpsc::sync_channel::<usize>(width);
    let jobs = Mutex::new(receiver);
    let slots = Mutex::new(RootSlots::new(width));
    let abort = AtomicBool::new(false);

    let outcomes: Vec<Result<OperationCost, Error>> = thread::scope(|scope| {
        scope.spawn(move || {
            for index in 0..width {
                if sender.send(index).is_err() {
                    break;
                }
            }
        });

        let (jobs, slots, abort) = (&jobs, &slots, &abort);
        let handles: Vec<_> = (0..workers)
            .map(|_| scope.spawn(move || drain_jobs(square, original, jobs, slots, abort)))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or(Err(Error::WorkerPanicked)))
            .collect()
    });

    cost += outcomes
        .iter()
        .filter_map(|outcome| outcome.as_ref().ok())
        .copied()
        .sum::<OperationCost>();
    if let Some(e) = outcomes.into_iter().find_map(Result::err) {
        return Err(e).wrap_with_cost(cost);
    }

    let slots = cost_return_on_error_no_add!(
        &cost,
        slots.into_inner().map_err(|_| Error::WorkerPanicked)
    );
    let header = cost_return_on_error_no_add!(&cost, slots.into_header());

    debug!(
        width,
        workers,
        hash_calls = cost.total_hash_calls(),
        "computed header in parallel"
    );
    Ok(header).wrap_with_cost(cost)
}

/// Worker body: claim indices until the queue is closed and drained, or
/// until any worker has failed.
fn drain_jobs<S: DataSquare>(
    square: &S,
    original: &[NamespacedShare],
    jobs: &Mutex<Receiver<usize>>,
    slots: &Mutex<RootSlots>,
    abort: &AtomicBool,
) -> Result<OperationCost, Error> {
    let mut cost = OperationCost::default();
    loop {
        if abort.load(Ordering::Acquire) {
            return Ok(cost);
        }
        let next = jobs.lock().map_err(|_| Error::WorkerPanicked)?.recv();
        let Ok(index) = next else {
            return Ok(cost);
        };

        match index_roots(square, original, index).unwrap_add_cost(&mut cost) {
            Ok((row_root, column_root)) => {
                slots
                    .lock()
                    .map_err(|_| Error::WorkerPanicked)?
                    .fill(index, row_root, column_root);
            }
            Err(e) => {
                abort.store(true, Ordering::Release);
                return Err(e);
            }
        }
    }
}

/// Build the row and column trees of `index` and return their roots.
fn index_roots<S: DataSquare>(
    square: &S,
    original: &[NamespacedShare],
    index: usize,
) -> CostResult<(NamespacedDigest, NamespacedDigest), Error> {
    let mut cost = OperationCost::default();
    let width = square.width();
    let half = width / 2;
    let row = square.row(index);
    let column = square.column(index);
    for (axis, line) in [(Axis::Row, &row), (Axis::Column, &column)] {
        if line.len() != width {
            return Err(Error::InvalidLineLength {
                axis,
                index,
                expected: width,
                actual: line.len(),
            })
            .wrap_with_cost(cost);
        }
    }

    let mut row_tree = NamespacedMerkleTree::with_capacity(width);
    let mut column_tree = NamespacedMerkleTree::with_capacity(width);
    let mut leaf = Vec::with_capacity(NAMESPACE_SIZE + SHARE_SIZE);

    for position in 0..width {
        let (row_share, column_share) = if index < half && position < half {
            (
                ShareRef::original(&original[index * half + position]),
                ShareRef::original(&original[position * half + index]),
            )
        } else {
            (
                ShareRef::parity(row[position]),
                ShareRef::parity(column[position]),
            )
        };
        cost_return_on_error!(
            &mut cost,
            push_share(
                &mut row_tree,
                &mut leaf,
                row_share,
                (Axis::Row, index, position)
            )
        );
        cost_return_on_error!(
            &mut cost,
            push_share(
                &mut column_tree,
                &mut leaf,
                column_share,
                (Axis::Column, index, position),
            )
        );
    }

    let row_root = row_tree.root().unwrap_add_cost(&mut cost);
    let column_root = column_tree.root().unwrap_add_cost(&mut cost);
    Ok((row_root, column_root)).wrap_with_cost(cost)
}

/// A share about to be pushed, borrowed from either the original list or
/// the square.
struct ShareRef<'a> {
    namespace: &'a NamespaceId,
    data: &'a [u8],
}

impl<'a> ShareRef<'a> {
    fn original(share: &'a NamespacedShare) -> Self {
        ShareRef {
            namespace: &share.namespace,
            data: &share.data,
        }
    }

    fn parity(data: &'a [u8]) -> Self {
        ShareRef {
            namespace: &PARITY_SHARES_NAMESPACE_ID,
            data,
        }
    }
}

fn push_share(
    tree: &mut NamespacedMerkleTree,
    leaf: &mut Vec<u8>,
    share: ShareRef<'_>,
    (axis, index, position): (Axis, usize, usize),
) -> CostResult<(), Error> {
    if share.data.len() != SHARE_SIZE {
        return Err(Error::InvalidShareSize {
            axis,
            index,
            position,
            expected: SHARE_SIZE,
            actual: share.data.len(),
        })
        .wrap_with_cost(OperationCost::default());
    }
    write_leaf(leaf, share.namespace, share.data);
    tree.push(leaf).map_err(|source| Error::Push {
        axis,
        index,
        position,
        source,
    })
}

fn validate<S: DataSquare>(square: &S, original: &[NamespacedShare]) -> Result<(), Error> {
    let width = square.width();
    if width == 0 || width % 2 != 0 {
        return Err(Error::InvalidWidth(width));
    }
    let half = width / 2;
    if original.len() != half * half {
        return Err(Error::ShareCountMismatch {
            width,
            expected: half * half,
            actual: original.len(),
        });
    }
    Ok(())
}
