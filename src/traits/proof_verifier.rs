use crate::domain::Digest;

/// Decides whether `leaf` belongs to the set committed to by `root`.
pub trait ProofVerifier: Clone {
    /// `true` if `proof` links `leaf` to `root`.
    fn verify(&self, root: &Digest, leaf: &Digest, proof: &[Digest]) -> bool;
}
