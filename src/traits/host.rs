//! Bundles the external collaborators behind one type parameter.

use super::{LiquidityVenue, ProofVerifier, TokenLedger};

/// Everything the engine needs from its environment.
///
/// The [`World`](crate::state::World) is generic over a single `Host` so
/// that engine functions and facets carry one type parameter instead of
/// three.  [`Collaborators`] is the stock implementation.
pub trait Host: Clone {
    /// Token ledger.
    type Ledger: TokenLedger;
    /// Listing venue.
    type Venue: LiquidityVenue;
    /// Whitelist verifier.
    type Verifier: ProofVerifier;

    /// Shared access to the ledger.
    fn ledger(&self) -> &Self::Ledger;
    /// Exclusive access to the ledger.
    fn ledger_mut(&mut self) -> &mut Self::Ledger;
    /// Shared access to the venue.
    fn venue(&self) -> &Self::Venue;
    /// Exclusive access to the venue.
    fn venue_mut(&mut self) -> &mut Self::Venue;
    /// The whitelist verifier.
    fn verifier(&self) -> &Self::Verifier;
}

/// A plain product of the three collaborators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collaborators<T, V, P> {
    /// Token ledger.
    pub ledger: T,
    /// Listing venue.
    pub venue: V,
    /// Whitelist verifier.
    pub verifier: P,
}

impl<T, V, P> Collaborators<T, V, P> {
    /// Bundles the three collaborators.
    pub const fn new(ledger: T, venue: V, verifier: P) -> Self {
        Self {
            ledger,
            venue,
            verifier,
        }
    }
}

impl<T, V, P> Host for Collaborators<T, V, P>
where
    T: TokenLedger,
    V: LiquidityVenue,
    P: ProofVerifier,
{
    type Ledger = T;
    type Venue = V;
    type Verifier = P;

    fn ledger(&self) -> &T {
        &self.ledger
    }

    fn ledger_mut(&mut self) -> &mut T {
        &mut self.ledger
    }

    fn venue(&self) -> &V {
        &self.venue
    }

    fn venue_mut(&mut self) -> &mut V {
        &mut self.venue
    }

    fn verifier(&self) -> &P {
        &self.verifier
    }
}
