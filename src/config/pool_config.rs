//! Pool-creation templates.

use serde::{Deserialize, Serialize};

use crate::domain::{Amount, BasisPoints};
use crate::error::{LaunchpadError, Result};

/// A named template for creating pools.
///
/// Templates are copied into each [`Pool`](crate::pool::Pool) at creation,
/// so later edits or removals never reach existing pools.
///
/// # Derived Values
///
/// - Initial price (quote per base): `initial_virtual_quote_reserve / initial_virtual_base_reserve`
/// - Sale target: a pool lists once `total_selling_base_amount` has been sold.
///
/// # Validation
///
/// - Both initial virtual reserves must be non-zero.
/// - `total_selling_base_amount` must be non-zero and must not exceed the
///   initial virtual base reserve.
/// - `default_listing_rate` must be non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Virtual base reserve a new pool starts from.
    pub initial_virtual_base_reserve: Amount,
    /// Virtual quote reserve a new pool starts from.
    pub initial_virtual_quote_reserve: Amount,
    /// Base tokens minted into custody and offered on the curve.
    pub total_selling_base_amount: Amount,
    /// Upper bound on base tokens seeded into the venue at listing.
    pub max_listing_base_amount: Amount,
    /// Upper bound on quote seeded into the venue at listing.
    pub max_listing_quote_amount: Amount,
    /// Base per quote at listing, scaled by 10 000.
    pub default_listing_rate: BasisPoints,
    /// Quote paid to the fee receiver when the pool lists.
    pub listing_fee: Amount,
}

impl PoolConfig {
    /// Validates all template invariants.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::InvalidConfig`] naming the violated rule.
    pub fn validate(&self) -> Result<()> {
        if self.initial_virtual_base_reserve.is_zero() {
            return Err(LaunchpadError::InvalidConfig(
                "initial virtual base reserve must be positive",
            ));
        }
        if self.initial_virtual_quote_reserve.is_zero() {
            return Err(LaunchpadError::InvalidConfig(
                "initial virtual quote reserve must be positive",
            ));
        }
        if self.total_selling_base_amount.is_zero() {
            return Err(LaunchpadError::InvalidConfig(
                "total selling base amount must be positive",
            ));
        }
        if self.total_selling_base_amount > self.initial_virtual_base_reserve {
            return Err(LaunchpadError::InvalidConfig(
                "total selling base amount exceeds virtual base reserve",
            ));
        }
        if self.default_listing_rate.get() == 0 {
            return Err(LaunchpadError::InvalidConfig("listing rate must be positive"));
        }
        Ok(())
    }
}
