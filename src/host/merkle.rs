//! Keccak-256 Merkle whitelist proofs with sorted-pair hashing.
//!
//! Interior nodes are `keccak(min(a, b) ‖ max(a, b))`, so proofs carry no
//! left/right flags.  A leaf for an account is `keccak(address bytes)`.

use crate::domain::{Address, Digest};
use crate::traits::ProofVerifier;

/// The leaf committed for `account`.
#[must_use]
pub fn account_leaf(account: &Address) -> Digest {
    Digest::keccak(account.as_bytes())
}

/// Verifies sorted-pair Keccak Merkle proofs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeccakMerkleVerifier;

impl ProofVerifier for KeccakMerkleVerifier {
    fn verify(&self, root: &Digest, leaf: &Digest, proof: &[Digest]) -> bool {
        let computed = proof
            .iter()
            .fold(*leaf, |node, sibling| Digest::hash_sorted_pair(&node, sibling));
        computed == *root
    }
}

/// A complete tree over a fixed leaf list, for issuing proofs.
///
/// An odd node at the end of a level is promoted unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    levels: Vec<Vec<Digest>>,
}

impl MerkleTree {
    /// Builds the tree. An empty leaf list yields the zero root.
    #[must_use]
    pub fn new(leaves: Vec<Digest>) -> Self {
        let mut levels = vec![leaves];
        while levels.last().map_or(0, Vec::len) > 1 {
            let Some(current) = levels.last() else {
                break;
            };
            let next = current
                .chunks(2)
                .map(|pair| match pair {
                    [a, b] => Digest::hash_sorted_pair(a, b),
                    [a] => *a,
                    _ => Digest::ZERO,
                })
                .collect();
            levels.push(next);
        }
        Self { levels }
    }

    /// Builds the tree over [`account_leaf`] of each account.
    #[must_use]
    pub fn from_accounts(accounts: &[Address]) -> Self {
        Self::new(accounts.iter().map(account_leaf).collect())
    }

    /// The root, or [`Digest::ZERO`] for an empty tree.
    #[must_use]
    pub fn root(&self) -> Digest {
        self.levels
            .last()
            .and_then(|top| top.first())
            .copied()
            .unwrap_or(Digest::ZERO)
    }

    /// Sibling path for the leaf at `index`, or `None` if out of range.
    #[must_use]
    pub fn proof(&self, mut index: usize) -> Option<Vec<Digest>> {
        let leaves = self.levels.first()?;
        if index >= leaves.len() {
            return None;
        }
        let mut path = Vec::new();
        for level in &self.levels[..self.levels.len().saturating_sub(1)] {
            let sibling = index ^ 1;
            if let Some(node) = level.get(sibling) {
                path.push(*node);
            }
            index /= 2;
        }
        Some(path)
    }
}
