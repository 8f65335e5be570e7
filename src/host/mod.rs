//! In-memory collaborators for embedding and tests.

mod ledger;
mod merkle;
mod venue;

pub use ledger::InMemoryTokenLedger;
pub use merkle::{account_leaf, KeccakMerkleVerifier, MerkleTree};
pub use venue::{InMemoryVenue, VenuePosition};

use crate::traits::Collaborators;

/// The fully in-memory host.
pub type InMemoryHost = Collaborators<InMemoryTokenLedger, InMemoryVenue, KeccakMerkleVerifier>;
