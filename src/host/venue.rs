//! An in-memory listing venue.

use std::collections::BTreeMap;

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{Address, Amount};
use crate::error::{LaunchpadError, Result};
use crate::math::CheckedArithmetic;
use crate::traits::LiquidityVenue;

/// A pair position held by the venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VenuePosition {
    /// Quote token of the pair.
    pub quote_token: Address,
    /// Base reserve.
    pub base: Amount,
    /// Quote reserve.
    pub quote: Amount,
    /// Liquidity units minted so far.
    pub liquidity: Amount,
}

/// A [`LiquidityVenue`] that records positions per `(router, base token)`
/// and mints `⌊√(base · quote)⌋` liquidity units per deposit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryVenue {
    positions: BTreeMap<(Address, Address), VenuePosition>,
    lp_balances: BTreeMap<(Address, Address), Amount>,
}

impl InMemoryVenue {
    /// Creates an empty venue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The position seeded through `router` for `base_token`.
    #[must_use]
    pub fn position(&self, router: &Address, base_token: &Address) -> Option<VenuePosition> {
        self.positions.get(&(*router, *base_token)).copied()
    }

    /// Liquidity units of `base_token`'s pair held by `holder`.
    #[must_use]
    pub fn lp_balance(&self, base_token: &Address, holder: &Address) -> Amount {
        self.lp_balances
            .get(&(*base_token, *holder))
            .copied()
            .unwrap_or(Amount::ZERO)
    }
}

impl LiquidityVenue for InMemoryVenue {
    fn add_liquidity(
        &mut self,
        router: Address,
        base_token: Address,
        quote_token: Address,
        base: Amount,
        quote: Amount,
        lp_recipient: Address,
    ) -> Result<Amount> {
        if base.is_zero() || quote.is_zero() {
            return Err(LaunchpadError::Venue("both legs must be non-zero".to_owned()));
        }
        let product = U256::from(base.get()) * U256::from(quote.get());
        let minted = Amount::new(product.integer_sqrt().low_u128());

        let venue_err = |e: LaunchpadError| LaunchpadError::Venue(e.to_string());
        let mut position = self
            .positions
            .get(&(router, base_token))
            .copied()
            .unwrap_or(VenuePosition {
                quote_token,
                ..VenuePosition::default()
            });
        if position.quote_token != quote_token {
            return Err(LaunchpadError::Venue(format!(
                "pair for {base_token} is quoted in {}",
                position.quote_token
            )));
        }
        position.base = position.base.safe_add(&base).map_err(venue_err)?;
        position.quote = position.quote.safe_add(&quote).map_err(venue_err)?;
        position.liquidity = position.liquidity.safe_add(&minted).map_err(venue_err)?;
        let held = self
            .lp_balance(&base_token, &lp_recipient)
            .safe_add(&minted)
            .map_err(venue_err)?;

        self.positions.insert((router, base_token), position);
        self.lp_balances.insert((base_token, lp_recipient), held);
        info!(%router, %base_token, %base, %quote, %minted, "liquidity added");
        Ok(minted)
    }
}
