//! Integer arithmetic for the pricing path.
//!
//! No floating point is used anywhere in pricing or settlement.  This
//! module provides [`CheckedArithmetic`] for overflow-safe operations on
//! [`Amount`](crate::domain::Amount) and the pure constant-product curve
//! functions used by the trading engine.

mod checked;
mod curve;

pub use checked::CheckedArithmetic;
pub use curve::{listing_legs, quote_exact_in, quote_exact_out};
