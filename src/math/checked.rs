//! Checked arithmetic trait for domain wrapper types.
//!
//! The [`CheckedArithmetic`] trait turns the `Option`-returning primitives
//! on [`Amount`] into `Result`s carrying a specific [`LaunchpadError`], so
//! the engine can use `?` throughout the pricing and settlement paths.
//!
//! # Examples
//!
//! ```
//! use bonding_launchpad::domain::Amount;
//! use bonding_launchpad::math::CheckedArithmetic;
//!
//! let sum = Amount::new(100).safe_add(&Amount::new(200));
//! assert_eq!(sum, Ok(Amount::new(300)));
//! assert!(Amount::new(1).safe_sub(&Amount::new(2)).is_err());
//! ```

use crate::domain::{Amount, Rounding};
use crate::error::LaunchpadError;

/// Fallible arithmetic for domain wrapper types.
///
/// # Contract
///
/// - **No panics**: all error conditions produce `Err`.
/// - **No saturation**: overflow is an error the caller sees.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::Overflow`] on overflow.
    fn safe_add(&self, other: &Self) -> Result<Self, LaunchpadError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::Underflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, LaunchpadError>;

    /// Checked `self × mul / div` with a wide intermediate.
    ///
    /// # Errors
    ///
    /// - [`LaunchpadError::DivisionByZero`] if `div` is zero.
    /// - [`LaunchpadError::Overflow`] if the quotient does not fit.
    fn safe_mul_div(&self, mul: &Self, div: &Self, rounding: Rounding)
        -> Result<Self, LaunchpadError>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, LaunchpadError> {
        self.checked_add(other)
            .ok_or(LaunchpadError::Overflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, LaunchpadError> {
        self.checked_sub(other)
            .ok_or(LaunchpadError::Underflow("amount subtraction underflow"))
    }

    fn safe_mul_div(
        &self,
        mul: &Self,
        div: &Self,
        rounding: Rounding,
    ) -> Result<Self, LaunchpadError> {
        if div.is_zero() {
            return Err(LaunchpadError::DivisionByZero);
        }
        self.mul_div(mul, div, rounding)
            .ok_or(LaunchpadError::Overflow("amount mul_div overflow"))
    }
}
