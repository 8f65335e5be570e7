//! Administrative operations and read-only getters.
//!
//! Every mutator checks the caller's role, refuses attached value, records
//! an event, and logs the change.

use tracing::info;

use crate::config::{MasterConfig, PoolConfig};
use crate::domain::{Address, Amount, BasisPoints, Timestamp};
use crate::error::{LaunchpadError, Result};
use crate::events::{ConfigChange, Event, PoolUpdate};
use crate::pool::{PoolInfo, PoolState};
use crate::state::{AppState, CallContext, World};
use crate::traits::Host;

// ---------------------------------------------------------------------------
// Access registry
// ---------------------------------------------------------------------------

/// Replaces the admin. Admin only.
///
/// # Errors
///
/// `Unauthorized`, `InvalidAddress` for the zero address, or
/// `InvalidInputAmount` if value is attached.
pub fn set_admin<H: Host>(world: &mut World<H>, ctx: &CallContext, new_admin: Address) -> Result<()> {
    ctx.require_no_value()?;
    let change = world.state.access.set_admin(&ctx.caller, new_admin)?;
    world.events.emit(Event::AccessChanged(change));
    info!(caller = %ctx.caller, %new_admin, "admin replaced");
    Ok(())
}

/// Adds or removes operators. Admin only.
///
/// # Errors
///
/// `Unauthorized` or `InvalidInputAmount`.
pub fn set_operators<H: Host>(
    world: &mut World<H>,
    ctx: &CallContext,
    ids: &[Address],
    enabled: bool,
) -> Result<()> {
    ctx.require_no_value()?;
    let change = world.state.access.set_operators(&ctx.caller, ids, enabled)?;
    world.events.emit(Event::AccessChanged(change));
    info!(caller = %ctx.caller, count = ids.len(), enabled, "operators updated");
    Ok(())
}

/// Adds or removes whitelisted routers. Admin only.
///
/// # Errors
///
/// `Unauthorized` or `InvalidInputAmount`.
pub fn set_whitelisted_routers<H: Host>(
    world: &mut World<H>,
    ctx: &CallContext,
    ids: &[Address],
    enabled: bool,
) -> Result<()> {
    ctx.require_no_value()?;
    let change = world
        .state
        .access
        .set_whitelisted_routers(&ctx.caller, ids, enabled)?;
    world.events.emit(Event::AccessChanged(change));
    info!(caller = %ctx.caller, count = ids.len(), enabled, "router whitelist updated");
    Ok(())
}

/// Sets the global pause flag. Admin only.
///
/// # Errors
///
/// `Unauthorized` or `InvalidInputAmount`.
pub fn set_paused<H: Host>(world: &mut World<H>, ctx: &CallContext, paused: bool) -> Result<()> {
    ctx.require_no_value()?;
    let change = world.state.access.set_paused(&ctx.caller, paused)?;
    world.events.emit(Event::AccessChanged(change));
    info!(caller = %ctx.caller, paused, "pause flag set");
    Ok(())
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Replaces the master configuration. Admin only.
///
/// # Errors
///
/// `Unauthorized`, `InvalidFeeRate`, or `InvalidInputAmount`.
pub fn set_master_config<H: Host>(
    world: &mut World<H>,
    ctx: &CallContext,
    config: MasterConfig,
) -> Result<()> {
    ctx.require_no_value()?;
    world.state.access.require_admin(&ctx.caller)?;
    world.state.config.set_master(config)?;
    world.events.emit(Event::ConfigChanged(ConfigChange::Master));
    info!(
        caller = %ctx.caller,
        quote_asset = %config.quote_asset,
        fee_receiver = %config.fee_receiver,
        fee_bps = %config.fee_bps,
        ref_bps = %config.ref_bps,
        "master config set"
    );
    Ok(())
}

/// Reads the master configuration.
///
/// # Errors
///
/// `InvalidConfig` if it was never set.
pub fn get_master_config(state: &AppState) -> Result<MasterConfig> {
    state.config.master()
}

/// Inserts or replaces a template. Admin or operator.
///
/// # Errors
///
/// `Unauthorized`, `InvalidConfig`, or `InvalidInputAmount`.
pub fn set_pool_config<H: Host>(
    world: &mut World<H>,
    ctx: &CallContext,
    index: u32,
    template: PoolConfig,
) -> Result<()> {
    ctx.require_no_value()?;
    world.state.access.require_authorized(&ctx.caller)?;
    world.state.config.set_pool_config(index, template)?;
    world
        .events
        .emit(Event::ConfigChanged(ConfigChange::PoolConfigSet(index)));
    info!(caller = %ctx.caller, index, "pool config set");
    Ok(())
}

/// Reads a template.
///
/// # Errors
///
/// `InvalidConfig` if absent or removed.
pub fn get_pool_config(state: &AppState, index: u32) -> Result<PoolConfig> {
    state.config.pool_config(index)
}

/// Removes a template. Pools created from it keep their snapshot. Admin or
/// operator.
///
/// # Errors
///
/// `Unauthorized`, `InvalidConfig` if there is nothing to remove, or
/// `InvalidInputAmount`.
pub fn remove_pool_config<H: Host>(world: &mut World<H>, ctx: &CallContext, index: u32) -> Result<()> {
    ctx.require_no_value()?;
    world.state.access.require_authorized(&ctx.caller)?;
    world.state.config.remove_pool_config(index)?;
    world
        .events
        .emit(Event::ConfigChanged(ConfigChange::PoolConfigRemoved(index)));
    info!(
        caller = %ctx.caller,
        index,
        policy = ?world.state.config.removal_policy(),
        "pool config removed"
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Pool administration
// ---------------------------------------------------------------------------

fn update_pool<H: Host>(
    world: &mut World<H>,
    ctx: &CallContext,
    token: &Address,
    update: PoolUpdate,
    apply: impl FnOnce(&mut crate::pool::Pool) -> Result<()>,
) -> Result<()> {
    apply(world.state.pools.get_mut(token)?)?;
    info!(caller = %ctx.caller, %token, ?update, "pool updated");
    world.events.emit(Event::PoolUpdated {
        token: *token,
        update,
    });
    Ok(())
}

/// Suspends or resumes a pool. Admin or operator.
///
/// # Errors
///
/// `Unauthorized`, `InvalidPool`, `InvalidState` for any transition into or
/// out of `Listed`, or `InvalidInputAmount`.
pub fn set_pool_state<H: Host>(
    world: &mut World<H>,
    ctx: &CallContext,
    token: &Address,
    pool_state: PoolState,
) -> Result<()> {
    ctx.require_no_value()?;
    world.state.access.require_authorized(&ctx.caller)?;
    update_pool(world, ctx, token, PoolUpdate::State(pool_state), |p| {
        p.set_state(pool_state)
    })
}

/// Replaces a pool's free-text details. Pool owner, admin, or operator.
///
/// # Errors
///
/// `InvalidPool`, `Unauthorized`, or `InvalidInputAmount`.
pub fn set_pool_details<H: Host>(
    world: &mut World<H>,
    ctx: &CallContext,
    token: &Address,
    details: String,
) -> Result<()> {
    ctx.require_no_value()?;
    let owner = world.state.pools.get(token)?.owner();
    if owner != ctx.caller && !world.state.access.is_authorized(&ctx.caller) {
        return Err(LaunchpadError::Unauthorized("caller is not pool owner"));
    }
    update_pool(world, ctx, token, PoolUpdate::Details, |p| {
        p.set_details(details);
        Ok(())
    })
}

/// Sets a pool's inter-buy cooldown in seconds. Admin or operator.
///
/// # Errors
///
/// `Unauthorized`, `InvalidPool`, or `InvalidInputAmount`.
pub fn set_delay_buy_time<H: Host>(
    world: &mut World<H>,
    ctx: &CallContext,
    token: &Address,
    secs: u64,
) -> Result<()> {
    ctx.require_no_value()?;
    world.state.access.require_authorized(&ctx.caller)?;
    update_pool(world, ctx, token, PoolUpdate::DelayBuyTime(secs), |p| {
        p.set_delay_buy_time(secs);
        Ok(())
    })
}

/// Sets a pool's per-transaction buy cap. Admin or operator.
///
/// # Errors
///
/// `Unauthorized`, `InvalidPool`, or `InvalidInputAmount`.
pub fn set_max_buy_amount<H: Host>(
    world: &mut World<H>,
    ctx: &CallContext,
    token: &Address,
    amount: Amount,
) -> Result<()> {
    ctx.require_no_value()?;
    world.state.access.require_authorized(&ctx.caller)?;
    update_pool(world, ctx, token, PoolUpdate::MaxBuyAmount(amount), |p| {
        p.set_max_buy_amount(amount);
        Ok(())
    })
}

/// Sets a pool's buy and sell fee rates. Admin or operator.
///
/// # Errors
///
/// `Unauthorized`, `InvalidPool`, `InvalidFeeRate`, or `InvalidInputAmount`.
pub fn set_fee_rate<H: Host>(
    world: &mut World<H>,
    ctx: &CallContext,
    token: &Address,
    buy: BasisPoints,
    sell: BasisPoints,
) -> Result<()> {
    ctx.require_no_value()?;
    world.state.access.require_authorized(&ctx.caller)?;
    update_pool(world, ctx, token, PoolUpdate::FeeRate { buy, sell }, |p| {
        p.set_fee_rates(buy, sell)
    })
}

/// Snapshot of a pool.
///
/// # Errors
///
/// `InvalidPool` for an unknown token.
pub fn get_pool_info(state: &AppState, token: &Address) -> Result<PoolInfo> {
    Ok(state.pools.get(token)?.info())
}

/// When `who` last bought from `token`'s pool.
///
/// # Errors
///
/// `InvalidPool` for an unknown token.
pub fn get_last_buy_time(state: &AppState, token: &Address, who: &Address) -> Result<Option<Timestamp>> {
    Ok(state.pools.get(token)?.last_buy_at(who))
}
