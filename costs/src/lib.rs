#![deny(missing_docs)]
//! Interface crate to unify how the hashing work of an operation is passed
//! along with its result.

use std::{
    iter::Sum,
    ops::{Add, AddAssign},
};

pub mod context;

pub use context::{CostContext, CostResult, CostsExt};

/// Piece of data representing the hashing work done by an operation.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct OperationCost {
    /// How many leaves were hashed (one per pushed share).
    pub hash_leaf_calls: u32,
    /// How many inner nodes were hashed.
    pub hash_node_calls: u32,
    /// How many namespaced shares were pushed into trees.
    pub pushed_shares: u32,
}

impl OperationCost {
    /// Returns true if no work is recorded.
    pub fn is_nothing(&self) -> bool {
        self == &Self::default()
    }

    /// Helper function to build default `OperationCost` with different
    /// `hash_leaf_calls`.
    pub fn with_hash_leaf_calls(hash_leaf_calls: u32) -> Self {
        OperationCost {
            hash_leaf_calls,
            ..Default::default()
        }
    }

    /// Helper function to build default `OperationCost` with different
    /// `hash_node_calls`.
    pub fn with_hash_node_calls(hash_node_calls: u32) -> Self {
        OperationCost {
            hash_node_calls,
            ..Default::default()
        }
    }

    /// Helper function to build default `OperationCost` with different
    /// `pushed_shares`.
    pub fn with_pushed_shares(pushed_shares: u32) -> Self {
        OperationCost {
            pushed_shares,
            ..Default::default()
        }
    }

    /// Total number of hash invocations, leaves and inner nodes together.
    pub fn total_hash_calls(&self) -> u64 {
        self.hash_leaf_calls as u64 + self.hash_node_calls as u64
    }
}

impl Add for OperationCost {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        OperationCost {
            hash_leaf_calls: self.hash_leaf_calls + rhs.hash_leaf_calls,
            hash_node_calls: self.hash_node_calls + rhs.hash_node_calls,
            pushed_shares: self.pushed_shares + rhs.pushed_shares,
        }
    }
}

impl AddAssign for OperationCost {
    fn add_assign(&mut self, rhs: Self) {
        self.hash_leaf_calls += rhs.hash_leaf_calls;
        self.hash_node_calls += rhs.hash_node_calls;
        self.pushed_shares += rhs.pushed_shares;
    }
}

impl Sum for OperationCost {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(OperationCost::default(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map() {
        let initial = CostContext {
            value: 75,
            cost: OperationCost {
                hash_node_calls: 3,
                ..Default::default()
            },
        };

        let mapped = initial.map(|x| x + 25);
        assert_eq!(
            mapped,
            CostContext {
                value: 100,
                cost: OperationCost {
                    hash_node_calls: 3,
                    ..Default::default()
                },
            }
        );
    }

    #[test]
    fn test_sum_and_total() {
        let costs = vec![
            OperationCost {
                hash_leaf_calls: 4,
                hash_node_calls: 3,
                pushed_shares: 4,
            },
            OperationCost {
                hash_leaf_calls: 2,
                hash_node_calls: 1,
                pushed_shares: 2,
            },
        ];
        let total: OperationCost = costs.into_iter().sum();
        assert_eq!(total.hash_leaf_calls, 6);
        assert_eq!(total.hash_node_calls, 4);
        assert_eq!(total.pushed_shares, 6);
        assert_eq!(total.total_hash_calls(), 10);
        assert!(!total.is_nothing());
        assert!(OperationCost::default().is_nothing());
    }

    #[test]
    fn test_cost_return_on_error_keeps_accumulated_cost() {
        fn step(fail: bool) -> CostResult<u32, &'static str> {
            let value = if fail { Err("boom") } else { Ok(1) };
            value.wrap_with_cost(OperationCost::with_hash_leaf_calls(1))
        }

        fn run(fail_second: bool) -> CostResult<u32, &'static str> {
            let mut cost = OperationCost::default();
            let a = crate::cost_return_on_error!(&mut cost, step(false));
            let b = crate::cost_return_on_error!(&mut cost, step(fail_second));
            Ok(a + b).wrap_with_cost(cost)
        }

        let ok = run(false);
        assert_eq!(ok.value, Ok(2));
        assert_eq!(ok.cost.hash_leaf_calls, 2);

        let err = run(true);
        assert_eq!(err.value, Err("boom"));
        assert_eq!(err.cost.hash_leaf_calls, 2);
    }
}
