use tracing::debug;

use crate::domain::{Address, Amount, Quote, Side};
use crate::error::Result;
use crate::math::quote_exact_out;
use crate::state::AppState;

/// Prices a trade of `amount_in` against the current reserves of `token`.
///
/// Pure: works for a pool in any state and never mutates anything.
///
/// # Errors
///
/// - [`InvalidPool`](crate::error::LaunchpadError::InvalidPool) for an unknown token.
/// - [`InvalidConfig`](crate::error::LaunchpadError::InvalidConfig) if the master
///   configuration is unset.
/// - Arithmetic errors from the curve.
pub fn get_amount_out(state: &AppState, token: &Address, amount_in: Amount, is_buy: bool) -> Result<Quote> {
    let pool = state.pools.get(token)?;
    let master = state.config.master()?;
    let quote = pool.quote(Side::from_is_buy(is_buy), amount_in, master.fee_bps)?;
    debug!(
        %token,
        side = %quote.side(),
        %amount_in,
        amount_out = %quote.amount_out(),
        fee = %quote.total_fee(),
        "quoted"
    );
    Ok(quote)
}

/// Inverse of [`get_amount_out`]: a gross input that yields exactly
/// `amount_out` at the current reserves, when one exists.
///
/// Useful to buy out the remaining sale supply, which is the only buy that
/// both fits the remaining base and completes the sale.
///
/// # Errors
///
/// As [`get_amount_out`], plus
/// [`InsufficientLiquidity`](crate::error::LaunchpadError::InsufficientLiquidity)
/// if `amount_out` is zero or not below the output-side reserve.
pub fn get_amount_in(state: &AppState, token: &Address, amount_out: Amount, is_buy: bool) -> Result<Quote> {
    let pool = state.pools.get(token)?;
    let master = state.config.master()?;
    let side = Side::from_is_buy(is_buy);
    let quote = quote_exact_out(
        side,
        amount_out,
        pool.virtual_base_reserve(),
        pool.virtual_quote_reserve(),
        master.fee_bps,
        pool.fee_rate(side),
    )?;
    debug!(
        %token,
        %side,
        %amount_out,
        amount_in = %quote.amount_in(),
        "inverse quoted"
    );
    Ok(quote)
}
