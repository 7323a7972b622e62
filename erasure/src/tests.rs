use assert_matches::assert_matches;
use rand::{rngs::StdRng, RngCore, SeedableRng};

use super::*;
use crate::codec::LineCodec;

fn random_shares(count: usize, size: usize, seed: u64) -> Vec<Vec<u8>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let mut share = vec![0u8; size];
            rng.fill_bytes(&mut share);
            share
        })
        .collect()
}

#[test]
fn test_rejects_empty_input() {
    let shares: Vec<Vec<u8>> = vec![];
    assert_matches!(ExtendedDataSquare::compute(&shares), Err(ErasureError::Empty));
}

#[test]
fn test_rejects_non_square_count() {
    let shares = random_shares(5, 8, 1);
    assert_matches!(
        ExtendedDataSquare::compute(&shares),
        Err(ErasureError::NotSquare(5))
    );
}

#[test]
fn test_rejects_mismatched_share_sizes() {
    let mut shares = random_shares(4, 8, 2);
    shares[2].push(0);
    assert_matches!(
        ExtendedDataSquare::compute(&shares),
        Err(ErasureError::ShareSize {
            index: 2,
            expected: 8,
            actual: 9
        })
    );
}

#[test]
fn test_rejects_empty_shares() {
    let shares = vec![Vec::<u8>::new(); 4];
    assert_matches!(
        ExtendedDataSquare::compute(&shares),
        Err(ErasureError::EmptyShare)
    );
}

#[test]
fn test_rejects_too_wide() {
    let k = MAX_ORIGINAL_WIDTH + 1;
    let shares = vec![vec![1u8]; k * k];
    assert_matches!(
        ExtendedDataSquare::compute(&shares),
        Err(ErasureError::TooWide { width, max }) if width == k && max == MAX_ORIGINAL_WIDTH
    );
}

#[test]
fn test_original_quadrant_is_preserved() {
    let k = 4;
    let shares = random_shares(k * k, 16, 3);
    let eds = ExtendedDataSquare::compute(&shares).expect("extend");
    assert_eq!(eds.width(), 2 * k);
    assert_eq!(eds.original_width(), k);
    assert_eq!(eds.share_size(), 16);
    for row in 0..k {
        for column in 0..k {
            assert!(eds.is_original(row, column));
            assert_eq!(eds.cell(row, column), shares[row * k + column].as_slice());
        }
    }
    assert!(!eds.is_original(k, 0));
    assert!(!eds.is_original(0, k));
}

#[test]
fn test_rows_and_columns_agree_with_cells() {
    let k = 3;
    let shares = random_shares(k * k, 8, 4);
    let eds = ExtendedDataSquare::compute(&shares).expect("extend");
    for i in 0..eds.width() {
        let row = eds.row(i);
        let column = eds.column(i);
        assert_eq!(row.len(), eds.width());
        for j in 0..eds.width() {
            assert_eq!(row[j], eds.cell(i, j));
            assert_eq!(column[j], eds.cell(j, i));
        }
    }
}

#[test]
fn test_every_row_and_column_is_a_codeword() {
    let k = 4;
    let shares = random_shares(k * k, 32, 5);
    let eds = ExtendedDataSquare::compute(&shares).expect("extend");
    let codec = LineCodec::new(k).expect("codec");

    let check = |line: Vec<&[u8]>| {
        let mut reencoded: Vec<Vec<u8>> = line[..k]
            .iter()
            .map(|s| s.to_vec())
            .chain((0..k).map(|_| vec![0u8; 32]))
            .collect();
        codec.encode(&mut reencoded).expect("encode");
        let expected: Vec<Vec<u8>> = line.iter().map(|s| s.to_vec()).collect();
        assert_eq!(reencoded, expected);
    };

    for i in 0..eds.width() {
        check(eds.row(i));
        check(eds.column(i));
    }
}

#[test]
fn test_parallel_matches_serial() {
    for k in [1, 2, 3, 8, 16] {
        let shares = random_shares(k * k, 64, k as u64);
        let serial = ExtendedDataSquare::compute(&shares).expect("serial");
        for workers in [1, 2, 3, 4, 8, 32] {
            let parallel =
                ExtendedDataSquare::compute_parallel(&shares, workers).expect("parallel");
            assert_eq!(serial, parallel, "k={} workers={}", k, workers);
        }
    }
}

#[test]
fn test_extension_is_deterministic() {
    let shares = random_shares(16, 256, 6);
    let a = ExtendedDataSquare::compute(&shares).expect("extend");
    let b = ExtendedDataSquare::compute(&shares).expect("extend");
    assert_eq!(a, b);
}

#[test]
fn test_set_cell_replaces_share() {
    let shares = random_shares(4, 8, 7);
    let mut eds = ExtendedDataSquare::compute(&shares).expect("extend");
    eds.set_cell(3, 3, vec![9u8; 8]);
    assert_eq!(eds.cell(3, 3), &[9u8; 8]);
}
