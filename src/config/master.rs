//! Global protocol configuration.

use serde::{Deserialize, Serialize};

use crate::domain::{Address, BasisPoints};
use crate::error::Result;

/// The singleton protocol configuration.
///
/// Admin identity and the pause flag live in
/// [`AccessRegistry`](crate::access::AccessRegistry); this struct holds the
/// economic parameters only.
///
/// # Validation
///
/// Both rates must not exceed the 10 000 bp denominator.  Values are
/// stored exactly as given: there is no clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterConfig {
    /// Asset that pools are priced and paid in.
    pub quote_asset: Address,
    /// Receives the protocol fee share and listing fees.
    pub fee_receiver: Address,
    /// Protocol fee charged on every trade.
    pub fee_bps: BasisPoints,
    /// Portion of the trade amount paid to a referrer, out of the protocol fee.
    pub ref_bps: BasisPoints,
}

impl MasterConfig {
    /// Creates a validated master configuration.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidFeeRate`](crate::error::LaunchpadError::InvalidFeeRate)
    /// if either rate exceeds the denominator.
    pub fn new(
        quote_asset: Address,
        fee_receiver: Address,
        fee_bps: BasisPoints,
        ref_bps: BasisPoints,
    ) -> Result<Self> {
        let config = Self {
            quote_asset,
            fee_receiver,
            fee_bps,
            ref_bps,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the rate bounds.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidFeeRate`](crate::error::LaunchpadError::InvalidFeeRate)
    /// if either rate exceeds the denominator.
    pub fn validate(&self) -> Result<()> {
        self.fee_bps.validate()?;
        self.ref_bps.validate()?;
        Ok(())
    }
}
