use tracing::info;

use super::params::{CreatePoolParams, TradeParams};
use super::trade::{execute_buy, BuyMode};
use crate::domain::{Address, Amount, Side};
use crate::error::{LaunchpadError, Result};
use crate::events::Event;
use crate::math::{quote_exact_in, CheckedArithmetic};
use crate::pool::Pool;
use crate::state::{CallContext, World};
use crate::traits::{Host, TokenLedger};

/// Deploys a token and opens its pool, optionally buying on behalf of the
/// creator in the same step.
///
/// Preconditions, in order: `InvalidRouter`, `InvalidConfig` (template or
/// master configuration missing), `InvalidFeeRate`, `InvalidInputAmount`
/// (attached value must be zero without an initial buy and exactly
/// `initial + fee` with one).
///
/// The initial buy runs the public buy path with the creator as buyer and
/// recipient, except that it ignores the start time and the whitelist.
///
/// Returns the new token's address.
///
/// # Errors
///
/// The preconditions above, plus anything the initial buy or the ledger
/// reports.  The world is left partially modified on error; run it inside
/// [`World::transact`] or through the router.
pub fn create_pool<H: Host>(
    world: &mut World<H>,
    ctx: &CallContext,
    params: &CreatePoolParams,
) -> Result<Address> {
    let state = &world.state;
    if !state.access.is_whitelisted_router(&params.router) {
        return Err(LaunchpadError::InvalidRouter);
    }
    let template = state.config.pool_config(params.config_index)?;
    let master = state.config.master()?;
    params.terms.validate()?;

    if params.initial_buy_amount.is_zero() {
        if !ctx.value.is_zero() {
            return Err(LaunchpadError::InvalidInputAmount(
                "value without an initial buy",
            ));
        }
    } else {
        let quote = quote_exact_in(
            Side::Buy,
            params.initial_buy_amount,
            template.initial_virtual_base_reserve,
            template.initial_virtual_quote_reserve,
            master.fee_bps,
            params.terms.buy_fee_rate,
        )?;
        if ctx.value != params.initial_buy_amount.safe_add(&quote.total_fee())? {
            return Err(LaunchpadError::InvalidInputAmount(
                "value must equal initial buy plus fee",
            ));
        }
    }

    let custody = state.custody();
    let ledger = world.host.ledger_mut();
    let token = ledger.deploy(&params.name, &params.symbol, custody)?;
    ledger.mint(&token, custody, template.total_selling_base_amount)?;

    world.state.pools.insert(Pool::new(
        ctx.caller,
        token,
        params.router,
        params.name.clone(),
        params.symbol.clone(),
        params.config_index,
        template,
        params.terms.clone(),
    ))?;
    world.events.emit(Event::TokenCreated {
        token,
        creator: ctx.caller,
    });
    info!(
        %token,
        creator = %ctx.caller,
        router = %params.router,
        config_index = params.config_index,
        name = %params.name,
        symbol = %params.symbol,
        "pool created"
    );

    if !params.initial_buy_amount.is_zero() {
        let buy = TradeParams::new(token, ctx.caller, params.initial_buy_amount, Amount::ZERO);
        execute_buy(world, ctx, &buy, BuyMode::Initial)?;
    }
    Ok(token)
}
