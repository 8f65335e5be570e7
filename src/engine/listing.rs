//! Migration of a sold-out pool to the external venue.

use tracing::info;

use crate::domain::Address;
use crate::error::{LaunchpadError, Result};
use crate::events::Event;
use crate::math::{listing_legs, CheckedArithmetic};
use crate::state::World;
use crate::traits::{Host, LiquidityVenue, TokenLedger};

/// Lists the pool for `token`.
///
/// 1. The listing fee is paid from the pool's real quote to the fee receiver.
/// 2. The listing legs are sized by [`listing_legs`] from what is left.
/// 3. The base leg is minted, both legs are moved to the pool's router
///    account, and the venue is asked to add liquidity.  Liquidity units
///    are credited to the zero address, which locks them.
/// 4. Quote not used by the venue goes to the fee receiver.
/// 5. The pool becomes [`Listed`](crate::pool::PoolState::Listed).
///
/// # Errors
///
/// - [`LaunchpadError::InsufficientLiquidity`] if the real quote does not
///   cover the listing fee.
/// - [`LaunchpadError::Token`] / [`LaunchpadError::Venue`] from the
///   collaborators.
pub(crate) fn migrate<H: Host>(world: &mut World<H>, token: &Address) -> Result<()> {
    let master = world.state.config.master()?;
    let custody = world.state.custody();
    let pool = world.state.pools.get_mut(token)?;
    if !pool.state().is_active() {
        return Err(LaunchpadError::InvalidState("pool is not active"));
    }
    let template = *pool.template();
    let router = pool.router();

    pool.debit_real_quote(template.listing_fee)?;
    let (base_leg, quote_leg) = listing_legs(
        pool.real_quote_reserve(),
        template.default_listing_rate,
        template.max_listing_base_amount,
        template.max_listing_quote_amount,
    )?;
    let leftover = pool.real_quote_reserve().safe_sub(&quote_leg)?;
    pool.debit_real_quote(pool.real_quote_reserve())?;
    pool.mark_listed();

    let quote_asset = master.quote_asset;
    let ledger = world.host.ledger_mut();
    if !template.listing_fee.is_zero() {
        ledger.transfer(&quote_asset, custody, master.fee_receiver, template.listing_fee)?;
    }
    ledger.mint(token, custody, base_leg)?;
    ledger.transfer(token, custody, router, base_leg)?;
    ledger.transfer(&quote_asset, custody, router, quote_leg)?;
    if !leftover.is_zero() {
        ledger.transfer(&quote_asset, custody, master.fee_receiver, leftover)?;
    }
    let liquidity = world.host.venue_mut().add_liquidity(
        router,
        *token,
        quote_asset,
        base_leg,
        quote_leg,
        Address::ZERO,
    )?;

    world.events.emit(Event::Listed {
        token: *token,
        base_amount: base_leg,
        quote_amount: quote_leg,
        listing_fee: template.listing_fee,
    });
    info!(
        %token,
        %router,
        base = %base_leg,
        quote = %quote_leg,
        listing_fee = %template.listing_fee,
        %leftover,
        %liquidity,
        "pool listed"
    );
    Ok(())
}
