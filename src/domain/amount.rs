//! Raw token amount with checked arithmetic.

use core::fmt;
use core::str::FromStr;

use primitive_types::{U256, U512};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Rounding;

/// A raw token amount in the smallest unit (wei or equivalent).
///
/// `Amount` never interprets decimals. All `u128` values are valid amounts.
///
/// Arithmetic methods are checked: they return `None` on overflow,
/// underflow, or division by zero instead of panicking.  Products that do
/// not fit in `u128` go through [`mul_div`](Self::mul_div), which keeps a
/// 256-bit intermediate.
///
/// Serialized as a decimal string because most text formats (TOML, JSON
/// consumers) cannot carry a full `u128`.
///
/// # Examples
///
/// ```
/// use bonding_launchpad::domain::{Amount, Rounding};
///
/// let a = Amount::new(100);
/// let b = Amount::new(200);
/// assert_eq!(a.checked_add(&b), Some(Amount::new(300)));
/// assert_eq!(b.checked_sub(&a), Some(Amount::new(100)));
/// assert_eq!(a.mul_div(&b, &Amount::new(3), Rounding::Down), Some(Amount::new(6_666)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Maximum representable amount.
    pub const MAX: Self = Self(u128::MAX);

    /// Creates a new `Amount` from a raw `u128` value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked multiplication. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_mul(&self, other: &Self) -> Option<Self> {
        match self.0.checked_mul(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked division with explicit rounding direction.
    ///
    /// Returns `None` if `divisor` is zero.
    #[must_use]
    pub const fn checked_div(&self, divisor: &Self, rounding: Rounding) -> Option<Self> {
        if divisor.0 == 0 {
            return None;
        }
        let q = self.0 / divisor.0;
        match rounding {
            Rounding::Down => Some(Self(q)),
            // q + 1 cannot overflow: a non-zero remainder implies q < u128::MAX.
            Rounding::Up if self.0 % divisor.0 != 0 => Some(Self(q + 1)),
            Rounding::Up => Some(Self(q)),
        }
    }

    /// Computes `self × mul / div` with a 256-bit intermediate product.
    ///
    /// Returns `None` if `div` is zero or the final quotient does not fit
    /// in `u128`.
    #[must_use]
    pub fn mul_div(&self, mul: &Self, div: &Self, rounding: Rounding) -> Option<Self> {
        if div.is_zero() {
            return None;
        }
        let product = U256::from(self.0).full_mul(U256::from(mul.0));
        let divisor = U512::from(div.0);
        let (q, r) = product.div_mod(divisor);
        let q = if rounding.is_up() && !r.is_zero() {
            q.checked_add(U512::one())?
        } else {
            q
        };
        if q > U512::from(u128::MAX) {
            return None;
        }
        Some(Self(q.low_u128()))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = core::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().replace('_', "").parse::<u128>().map(Self)
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

struct AmountVisitor;

impl Visitor<'_> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative integer or a decimal string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
        Ok(Amount(u128::from(v)))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Amount, E> {
        Ok(Amount(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
        u128::try_from(v)
            .map(Amount)
            .map_err(|_| E::custom("amount must not be negative"))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
        v.parse::<Amount>().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}
