//! Basis-point fee rates.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, Rounding};
use crate::error::LaunchpadError;

/// Fee denominator: 10 000 bp = 100%.
pub const FEE_DENOMINATOR: u32 = 10_000;

/// A rate expressed in basis points (1 bp = 0.01%, 10 000 bp = 100%).
///
/// All `u32` values can be constructed so that configuration input can be
/// represented faithfully and rejected with
/// [`InvalidFeeRate`](LaunchpadError::InvalidFeeRate) by the operation that
/// receives it.  Use [`validate`](Self::validate) at those boundaries.
///
/// # Examples
///
/// ```
/// use bonding_launchpad::domain::{Amount, BasisPoints, Rounding};
///
/// let bp = BasisPoints::new(50);
/// assert!(bp.is_valid_rate());
/// let fee = bp.apply(Amount::new(1_000_000), Rounding::Down).expect("fits");
/// assert_eq!(fee, Amount::new(5_000));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// Zero basis points (0%).
    pub const ZERO: Self = Self(0);

    /// 100% expressed in basis points.
    pub const MAX_RATE: Self = Self(FEE_DENOMINATOR);

    /// Creates a new `BasisPoints` from a raw `u32` value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the underlying `u32` value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `true` if the value does not exceed the denominator.
    #[must_use]
    pub const fn is_valid_rate(&self) -> bool {
        self.0 <= FEE_DENOMINATOR
    }

    /// Returns `self` if it does not exceed the denominator.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::InvalidFeeRate`] otherwise.
    pub const fn validate(self) -> crate::error::Result<Self> {
        if self.is_valid_rate() {
            Ok(self)
        } else {
            Err(LaunchpadError::InvalidFeeRate)
        }
    }

    /// Computes `amount × self / 10 000` with explicit rounding.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::Overflow`] if the result does not fit in
    /// an [`Amount`].
    pub fn apply(&self, amount: Amount, rounding: Rounding) -> crate::error::Result<Amount> {
        amount
            .mul_div(
                &Amount::new(u128::from(self.0)),
                &Amount::new(u128::from(FEE_DENOMINATOR)),
                rounding,
            )
            .ok_or(LaunchpadError::Overflow("basis points apply overflow"))
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}
