//! The external market a pool migrates to once its sale completes.

use crate::domain::{Address, Amount};
use crate::error::Result;

/// Accepts the two listing legs of a pool.
///
/// Before calling [`add_liquidity`](Self::add_liquidity) the engine moves
/// both legs into the router's account on the token ledger; the venue
/// trusts that balance and only records the position.
pub trait LiquidityVenue: Clone {
    /// Seeds a `base`/`quote` position at `router` and credits the minted
    /// liquidity to `lp_recipient`.  Returns the liquidity minted.
    ///
    /// # Errors
    ///
    /// Implementation-defined; reported as
    /// [`LaunchpadError::Venue`](crate::error::LaunchpadError::Venue).
    fn add_liquidity(
        &mut self,
        router: Address,
        base_token: Address,
        quote_token: Address,
        base: Amount,
        quote: Amount,
        lp_recipient: Address,
    ) -> Result<Amount>;
}
