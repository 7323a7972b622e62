use dah_costs::{CostContext, CostResult, CostsExt, OperationCost};

use crate::{
    hash::{leaf_digest, node_digest},
    NamespaceId, NamespacedDigest, NmtError,
};

/// An append-only namespaced Merkle tree.
///
/// Leaf hashes are computed on push; inner nodes are only hashed when the
/// root is requested, so a tree is meant to be filled once and then rooted.
#[derive(Debug, Clone)]
pub struct NamespacedMerkleTree {
    leaves: Vec<NamespacedDigest>,
    ignore_max_namespace: bool,
}

impl Default for NamespacedMerkleTree {
    fn default() -> Self {
        Self::new()
    }
}

impl NamespacedMerkleTree {
    /// Create an empty tree that ignores the maximum namespace when
    /// computing node ranges.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty tree with room for `leaves` pushes.
    pub fn with_capacity(leaves: usize) -> Self {
        NamespacedMerkleTree {
            leaves: Vec::with_capacity(leaves),
            ignore_max_namespace: true,
        }
    }

    /// Toggle the maximum namespace rule (see [`crate::MAX_NAMESPACE_ID`]).
    pub fn ignore_max_namespace(mut self, ignore: bool) -> Self {
        self.ignore_max_namespace = ignore;
        self
    }

    /// Number of leaves pushed so far.
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// True if nothing has been pushed.
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Namespace of the last pushed leaf.
    pub fn last_namespace(&self) -> Option<NamespaceId> {
        self.leaves.last().map(|leaf| leaf.max)
    }

    /// Append a namespace-prefixed leaf.
    ///
    /// Fails if `data` is shorter than a namespace or if its namespace is
    /// smaller than the previous leaf's. A failed push leaves the tree
    /// unchanged.
    pub fn push(&mut self, data: &[u8]) -> CostResult<(), NmtError> {
        let namespace = match NamespaceId::from_prefix(data) {
            Ok(namespace) => namespace,
            Err(e) => return Err(e).wrap_with_cost(OperationCost::default()),
        };
        if let Some(previous) = self.last_namespace() {
            if namespace < previous {
                return Err(NmtError::NamespaceOrder {
                    previous,
                    pushed: namespace,
                })
                .wrap_with_cost(OperationCost::default());
            }
        }

        self.leaves.push(leaf_digest(namespace, data));
        Ok(()).wrap_with_cost(OperationCost {
            hash_leaf_calls: 1,
            pushed_shares: 1,
            ..Default::default()
        })
    }

    /// Compute the root digest.
    ///
    /// Returns [`NamespacedDigest::empty`] with no cost for an empty tree.
    pub fn root(&self) -> CostContext<NamespacedDigest> {
        if self.leaves.is_empty() {
            return NamespacedDigest::empty().wrap_with_cost(OperationCost::default());
        }
        let mut hash_node_calls = 0;
        let root = self.subtree_root(&self.leaves, &mut hash_node_calls);
        root.wrap_with_cost(OperationCost::with_hash_node_calls(hash_node_calls))
    }

    fn subtree_root(&self, leaves: &[NamespacedDigest], calls: &mut u32) -> NamespacedDigest {
        match leaves {
            [single] => *single,
            _ => {
                let split = split_point(leaves.len());
                let left = self.subtree_root(&leaves[..split], calls);
                let right = self.subtree_root(&leaves[split..], calls);
                *calls += 1;
                node_digest(&left, &right, self.ignore_max_namespace)
            }
        }
    }
}

/// Largest power of two strictly smaller than `n`. `n` must be at least 2.
pub(crate) fn split_point(n: usize) -> usize {
    debug_assert!(n >= 2);
    let k = n.next_power_of_two();
    if k == n {
        n / 2
    } else {
        k / 2
    }
}
