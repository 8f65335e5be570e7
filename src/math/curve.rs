//! Constant-product bonding-curve pricing.
//!
//! The curve is `x · y = k` over the pool's *virtual* reserves.  Fees are
//! deducted from the input amount **before** the pricing formula is applied:
//!
//! 1. `protocol_fee = ⌊amount_in × protocol_bps / 10 000⌋`
//! 2. `pool_fee     = ⌊amount_in × pool_bps / 10 000⌋`
//! 3. `net          = amount_in − protocol_fee − pool_fee`
//! 4. `amount_out   = ⌊reserve_out × net / (reserve_in + net)⌋`
//!
//! Step 4 equals `reserve_out − ⌈reserve_in × reserve_out / (reserve_in + net)⌉`,
//! so the post-trade product never drops below `k`.

use crate::domain::{Amount, BasisPoints, Quote, Rounding, Side};
use crate::error::{LaunchpadError, Result};
use crate::math::CheckedArithmetic;

/// Prices a trade of `amount_in` against the given virtual reserves.
///
/// For [`Side::Buy`] the input is the quote asset and the output is base;
/// for [`Side::Sell`] the roles swap.  This function is pure: it reads
/// nothing but its arguments.
///
/// # Errors
///
/// - [`LaunchpadError::InvalidFeeRate`] if the combined fees exceed the input.
/// - [`LaunchpadError::DivisionByZero`] if both `reserve_in` and `net` are zero.
/// - [`LaunchpadError::Overflow`] if any intermediate does not fit.
pub fn quote_exact_in(
    side: Side,
    amount_in: Amount,
    virtual_base: Amount,
    virtual_quote: Amount,
    protocol_bps: BasisPoints,
    pool_bps: BasisPoints,
) -> Result<Quote> {
    let protocol_fee = protocol_bps.apply(amount_in, Rounding::Down)?;
    let pool_fee = pool_bps.apply(amount_in, Rounding::Down)?;
    let net = amount_in
        .safe_sub(&protocol_fee)
        .and_then(|v| v.safe_sub(&pool_fee))
        .map_err(|_| LaunchpadError::InvalidFeeRate)?;

    let (reserve_in, reserve_out) = match side {
        Side::Buy => (virtual_quote, virtual_base),
        Side::Sell => (virtual_base, virtual_quote),
    };

    let denominator = reserve_in.safe_add(&net)?;
    let amount_out = reserve_out.safe_mul_div(&net, &denominator, Rounding::Down)?;

    Quote::new(side, amount_in, amount_out, protocol_fee, pool_fee)
}

/// Finds a gross input whose [`quote_exact_in`] output reaches
/// `target_out` while one unit less falls short, and returns its quote.
///
/// Binary search over `quote_exact_in`.  Whenever one input unit moves the
/// output by at most one unit, the returned quote delivers exactly
/// `target_out`.
///
/// # Errors
///
/// - [`LaunchpadError::InsufficientLiquidity`] if `target_out` is zero or
///   not below the output-side reserve.
/// - [`LaunchpadError::Overflow`] if no input representable as `u128`
///   reaches the target.
pub fn quote_exact_out(
    side: Side,
    target_out: Amount,
    virtual_base: Amount,
    virtual_quote: Amount,
    protocol_bps: BasisPoints,
    pool_bps: BasisPoints,
) -> Result<Quote> {
    let reserve_out = match side {
        Side::Buy => virtual_base,
        Side::Sell => virtual_quote,
    };
    if target_out.is_zero() || target_out >= reserve_out {
        return Err(LaunchpadError::InsufficientLiquidity);
    }
    let price = |amount_in: u128| {
        quote_exact_in(
            side,
            Amount::new(amount_in),
            virtual_base,
            virtual_quote,
            protocol_bps,
            pool_bps,
        )
    };

    let mut hi = target_out.get();
    loop {
        if price(hi)?.amount_out() >= target_out {
            break;
        }
        hi = hi
            .checked_mul(2)
            .ok_or(LaunchpadError::Overflow("no input reaches the requested output"))?;
    }
    let mut lo = 0u128;
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if price(mid)?.amount_out() >= target_out {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    price(hi)
}

/// Splits the pool's quote proceeds into the two legs used to seed the
/// external venue at listing.
///
/// `rate` is base units per quote unit scaled by 10 000 (10 000 = 1:1).
/// The quote leg is capped by `max_quote`; the base leg is derived from
/// it and capped by `max_base`, in which case the quote leg is recomputed
/// from the capped base leg (rounded down) so the pair keeps the rate.
///
/// Returns `(base, quote)`.
///
/// # Errors
///
/// - [`LaunchpadError::InvalidConfig`] if `rate` is zero.
/// - [`LaunchpadError::Overflow`] if a leg does not fit.
pub fn listing_legs(
    quote_available: Amount,
    rate: BasisPoints,
    max_base: Amount,
    max_quote: Amount,
) -> Result<(Amount, Amount)> {
    if rate.get() == 0 {
        return Err(LaunchpadError::InvalidConfig("listing rate must be positive"));
    }
    let rate = Amount::new(u128::from(rate.get()));
    let denominator = Amount::new(u128::from(crate::domain::FEE_DENOMINATOR));

    let quote = quote_available.min(max_quote);
    let base = quote.safe_mul_div(&rate, &denominator, Rounding::Down)?;
    if base <= max_base {
        return Ok((base, quote));
    }
    let quote = max_base.safe_mul_div(&denominator, &rate, Rounding::Down)?;
    Ok((max_base, quote))
}
