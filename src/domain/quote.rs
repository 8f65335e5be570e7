//! Trade direction and the outcome of pricing a trade.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::Amount;
use crate::error::LaunchpadError;

/// Direction of a trade against the curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Quote asset in, base token out.
    Buy,
    /// Base token in, quote asset out.
    Sell,
}

impl Side {
    /// Maps the wire-level `is_buy` flag to a side.
    #[must_use]
    pub const fn from_is_buy(is_buy: bool) -> Self {
        if is_buy {
            Self::Buy
        } else {
            Self::Sell
        }
    }

    /// Returns `true` for [`Side::Buy`].
    #[must_use]
    pub const fn is_buy(&self) -> bool {
        matches!(self, Self::Buy)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// A priced trade: what goes in, what comes out, and the fee split.
///
/// Fees are denominated in the input asset.  `amount_in` is the gross
/// input; the curve only sees [`net_amount_in`](Self::net_amount_in).
///
/// # Invariants
///
/// - `protocol_fee + pool_fee <= amount_in`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quote {
    side: Side,
    amount_in: Amount,
    amount_out: Amount,
    protocol_fee: Amount,
    pool_fee: Amount,
}

impl Quote {
    /// Creates a quote, checking that the fees fit inside the input.
    ///
    /// # Errors
    ///
    /// - [`LaunchpadError::Overflow`] if the fee sum overflows.
    /// - [`LaunchpadError::InvalidFeeRate`] if the fees exceed `amount_in`.
    pub fn new(
        side: Side,
        amount_in: Amount,
        amount_out: Amount,
        protocol_fee: Amount,
        pool_fee: Amount,
    ) -> crate::error::Result<Self> {
        let total = protocol_fee
            .checked_add(&pool_fee)
            .ok_or(LaunchpadError::Overflow("total fee overflow"))?;
        if total > amount_in {
            return Err(LaunchpadError::InvalidFeeRate);
        }
        Ok(Self {
            side,
            amount_in,
            amount_out,
            protocol_fee,
            pool_fee,
        })
    }

    /// Trade direction.
    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }

    /// Gross input.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Output after fees, rounded down.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Share owed to the protocol (fee receiver and referrer).
    pub const fn protocol_fee(&self) -> Amount {
        self.protocol_fee
    }

    /// Share owed to the pool owner.
    pub const fn pool_fee(&self) -> Amount {
        self.pool_fee
    }

    /// `protocol_fee + pool_fee`; cannot overflow once constructed.
    pub const fn total_fee(&self) -> Amount {
        Amount::new(self.protocol_fee.get() + self.pool_fee.get())
    }

    /// Input after fees; the amount the curve prices.
    pub const fn net_amount_in(&self) -> Amount {
        Amount::new(self.amount_in.get() - self.total_fee().get())
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quote({}, in={}, out={}, fee={})",
            self.side,
            self.amount_in,
            self.amount_out,
            self.total_fee()
        )
    }
}
