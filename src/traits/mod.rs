//! Seams to the external collaborators.
//!
//! The engine talks to the outside world only through these traits:
//! [`TokenLedger`] for balances, [`LiquidityVenue`] for listing migration,
//! and [`ProofVerifier`] for whitelist proofs.  [`Host`] bundles the three
//! so that state and facets are generic over one parameter.
//!
//! In-memory implementations live in [`crate::host`].

mod host;
mod liquidity_venue;
mod proof_verifier;
mod token_ledger;

pub use host::{Collaborators, Host};
pub use liquidity_venue::LiquidityVenue;
pub use proof_verifier::ProofVerifier;
pub use token_ledger::{TokenLedger, TokenMetadata};
