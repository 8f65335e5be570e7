//! Buying from and selling to the curve.
//!
//! Both paths check their preconditions in a fixed order, so a caller
//! always sees the first violated rule:
//!
//! | # | buy                   | sell                  |
//! |---|-----------------------|-----------------------|
//! | 1 | `Paused`              | `Paused`              |
//! | 2 | `InvalidPool`         | `InvalidPool`         |
//! | 3 | `InvalidState`        | `InvalidState`        |
//! | 4 | `NotStarted`          | `NotStarted`          |
//! | 5 | `NotWhitelisted`      | `NotWhitelisted`      |
//! | 6 | `ExceededMaxBuy`      | `InvalidInputAmount`  |
//! | 7 | `OnCooldown`          | `SlippageExceeded`    |
//! | 8 | `InvalidInputAmount`  | `InsufficientLiquidity` |
//! | 9 | `SlippageExceeded`    |                       |
//! | 10| `InsufficientLiquidity` |                     |
//!
//! Fees are charged in the input asset.  A buyer attaches
//! `amount_in + total_fee` of quote; a seller's fees come out of the base
//! pulled from them.

use tracing::info;

use super::listing;
use super::params::TradeParams;
use crate::config::MasterConfig;
use crate::domain::{Address, Amount, BasisPoints, Digest, Quote, Rounding, Side};
use crate::error::{LaunchpadError, Result};
use crate::events::Event;
use crate::host::account_leaf;
use crate::math::CheckedArithmetic;
use crate::pool::Pool;
use crate::state::{CallContext, World};
use crate::traits::{Host, ProofVerifier, TokenLedger};

/// How a trade's fees are paid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeeSplit {
    /// To the master fee receiver.
    pub protocol: Amount,
    /// To the referrer.
    pub referral: Amount,
    /// To the pool owner.
    pub pool: Amount,
}

/// Splits `quote`'s fees.  The referral share is
/// `min(⌊amount_in × ref_bps / 10 000⌋, protocol_fee)` and is carved out of
/// the protocol fee; it is zero without a referrer.
///
/// # Errors
///
/// Propagates rate application errors.
pub fn split_fees(quote: &Quote, ref_bps: BasisPoints, has_referrer: bool) -> Result<FeeSplit> {
    let referral = if has_referrer {
        ref_bps
            .apply(quote.amount_in(), Rounding::Down)?
            .min(quote.protocol_fee())
    } else {
        Amount::ZERO
    };
    Ok(FeeSplit {
        protocol: quote.protocol_fee().safe_sub(&referral)?,
        referral,
        pool: quote.pool_fee(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BuyMode {
    Public,
    /// The creator's buy inside `create_pool`: no start-time or whitelist
    /// gate.
    Initial,
}

/// Buys base from the curve with quote attached to `ctx`.
///
/// On success the pool may have listed; see [`listing::migrate`].
///
/// # Errors
///
/// Any precondition in the module table, plus [`LaunchpadError::Token`] if
/// the caller cannot pay and [`LaunchpadError::Venue`] if listing fails.
/// The world is left partially modified on error; run it inside
/// [`World::transact`] or through the router.
pub fn buy<H: Host>(world: &mut World<H>, ctx: &CallContext, params: &TradeParams) -> Result<Quote> {
    execute_buy(world, ctx, params, BuyMode::Public)
}

pub(crate) fn execute_buy<H: Host>(
    world: &mut World<H>,
    ctx: &CallContext,
    params: &TradeParams,
    mode: BuyMode,
) -> Result<Quote> {
    let state = &world.state;
    if state.access.is_paused() {
        return Err(LaunchpadError::Paused);
    }
    let pool = state.pools.get(&params.token)?;
    if !pool.state().is_active() {
        return Err(LaunchpadError::InvalidState("pool is not active"));
    }
    if mode == BuyMode::Public {
        if !pool.has_started(ctx.now) {
            return Err(LaunchpadError::NotStarted);
        }
        check_whitelist(world.host.verifier(), pool, &ctx.caller, &params.proof)?;
    }
    if params.amount_in > pool.terms().max_buy_amount {
        return Err(LaunchpadError::ExceededMaxBuy);
    }
    if !pool.cooldown_elapsed(&ctx.caller, ctx.now) {
        return Err(LaunchpadError::OnCooldown);
    }
    if params.amount_in.is_zero() {
        return Err(LaunchpadError::InvalidInputAmount("amount must be positive"));
    }
    let master = state.config.master()?;
    let quote = pool.quote(Side::Buy, params.amount_in, master.fee_bps)?;
    if ctx.value != params.amount_in.safe_add(&quote.total_fee())? {
        return Err(LaunchpadError::InvalidInputAmount("value must equal amount plus fee"));
    }
    if quote.amount_out() < params.min_amount_out {
        return Err(LaunchpadError::SlippageExceeded);
    }
    let owner = pool.owner();
    let custody = state.custody();

    let pool = world.state.pools.get_mut(&params.token)?;
    pool.apply_buy(&quote, ctx.caller, ctx.now)?;
    let (base_reserve, quote_reserve) = (pool.virtual_base_reserve(), pool.virtual_quote_reserve());
    let sale_complete = pool.sale_complete();

    let referrer = effective_referrer(params.referrer, &ctx.caller);
    let split = split_fees(&quote, master.ref_bps, referrer.is_some())?;
    let ledger = world.host.ledger_mut();
    ledger.transfer(&master.quote_asset, ctx.caller, custody, ctx.value)?;
    pay_fees(ledger, &master.quote_asset, custody, &master, owner, referrer, split)?;
    ledger.transfer(&params.token, custody, params.recipient, quote.amount_out())?;

    world.events.emit(Event::Trade {
        token: params.token,
        user: ctx.caller,
        is_buy: true,
        amount_in: params.amount_in,
        amount_out: quote.amount_out(),
        fee: quote.total_fee(),
        base_reserve,
        quote_reserve,
    });
    info!(
        token = %params.token,
        user = %ctx.caller,
        amount_in = %params.amount_in,
        amount_out = %quote.amount_out(),
        fee = %quote.total_fee(),
        %base_reserve,
        %quote_reserve,
        "buy settled"
    );

    if sale_complete {
        listing::migrate(world, &params.token)?;
    }
    Ok(quote)
}

/// Sells base back to the curve for quote.
///
/// The caller must hold `amount_in` base and have approved the custody
/// account (see [`AppState::custody`](crate::state::AppState::custody)).
/// Sells carry no cooldown or per-transaction cap.
///
/// # Errors
///
/// Any precondition in the module table, plus [`LaunchpadError::Token`] if
/// the base cannot be pulled from the caller.  The world is left partially
/// modified on error; run it inside [`World::transact`] or through the
/// router.
pub fn sell<H: Host>(world: &mut World<H>, ctx: &CallContext, params: &TradeParams) -> Result<Quote> {
    let state = &world.state;
    if state.access.is_paused() {
        return Err(LaunchpadError::Paused);
    }
    let pool = state.pools.get(&params.token)?;
    if !pool.state().is_active() {
        return Err(LaunchpadError::InvalidState("pool is not active"));
    }
    if !pool.has_started(ctx.now) {
        return Err(LaunchpadError::NotStarted);
    }
    check_whitelist(world.host.verifier(), pool, &ctx.caller, &params.proof)?;
    if params.amount_in.is_zero() {
        return Err(LaunchpadError::InvalidInputAmount("amount must be positive"));
    }
    ctx.require_no_value()?;
    let master = state.config.master()?;
    let quote = pool.quote(Side::Sell, params.amount_in, master.fee_bps)?;
    if quote.amount_out() < params.min_amount_out {
        return Err(LaunchpadError::SlippageExceeded);
    }
    let owner = pool.owner();
    let custody = state.custody();

    let pool = world.state.pools.get_mut(&params.token)?;
    pool.apply_sell(&quote)?;
    let (base_reserve, quote_reserve) = (pool.virtual_base_reserve(), pool.virtual_quote_reserve());

    let referrer = effective_referrer(params.referrer, &ctx.caller);
    let split = split_fees(&quote, master.ref_bps, referrer.is_some())?;
    let ledger = world.host.ledger_mut();
    ledger.transfer_from(&params.token, custody, ctx.caller, custody, params.amount_in)?;
    pay_fees(ledger, &params.token, custody, &master, owner, referrer, split)?;
    ledger.transfer(&master.quote_asset, custody, params.recipient, quote.amount_out())?;

    world.events.emit(Event::Trade {
        token: params.token,
        user: ctx.caller,
        is_buy: false,
        amount_in: params.amount_in,
        amount_out: quote.amount_out(),
        fee: quote.total_fee(),
        base_reserve,
        quote_reserve,
    });
    info!(
        token = %params.token,
        user = %ctx.caller,
        amount_in = %params.amount_in,
        amount_out = %quote.amount_out(),
        fee = %quote.total_fee(),
        %base_reserve,
        %quote_reserve,
        "sell settled"
    );
    Ok(quote)
}

fn check_whitelist<V: ProofVerifier>(
    verifier: &V,
    pool: &Pool,
    caller: &Address,
    proof: &[Digest],
) -> Result<()> {
    let root = pool.terms().whitelist_root;
    if root.is_zero() || verifier.verify(&root, &account_leaf(caller), proof) {
        return Ok(());
    }
    Err(LaunchpadError::NotWhitelisted)
}

/// Self-referral and the zero address earn nothing.
fn effective_referrer(referrer: Option<Address>, caller: &Address) -> Option<Address> {
    referrer.filter(|r| r != caller && !r.is_zero())
}

fn pay_fees<L: TokenLedger>(
    ledger: &mut L,
    asset: &Address,
    custody: Address,
    master: &MasterConfig,
    pool_owner: Address,
    referrer: Option<Address>,
    split: FeeSplit,
) -> Result<()> {
    let payouts = [
        (Some(master.fee_receiver), split.protocol),
        (referrer, split.referral),
        (Some(pool_owner), split.pool),
    ];
    for (to, amount) in payouts {
        if let Some(to) = to {
            if !amount.is_zero() {
                ledger.transfer(asset, custody, to, amount)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn quote(amount_in: u128, protocol: u128, pool: u128) -> Quote {
        let Ok(q) = Quote::new(
            Side::Buy,
            Amount::new(amount_in),
            Amount::new(1),
            Amount::new(protocol),
            Amount::new(pool),
        ) else {
            panic!("expected Ok");
        };
        q
    }

    #[test]
    fn no_referrer_keeps_whole_protocol_fee() {
        let Ok(split) = split_fees(&quote(10_000, 50, 100), BasisPoints::new(25), false) else {
            panic!("expected Ok");
        };
        assert_eq!(
            split,
            FeeSplit {
                protocol: Amount::new(50),
                referral: Amount::ZERO,
                pool: Amount::new(100),
            }
        );
    }

    #[test]
    fn referral_is_carved_from_protocol_fee() {
        let Ok(split) = split_fees(&quote(10_000, 50, 100), BasisPoints::new(25), true) else {
            panic!("expected Ok");
        };
        assert_eq!(split.referral, Amount::new(25));
        assert_eq!(split.protocol, Amount::new(25));
        assert_eq!(split.pool, Amount::new(100));
    }

    #[test]
    fn referral_capped_at_protocol_fee() {
        let Ok(split) = split_fees(&quote(10_000, 50, 0), BasisPoints::new(80), true) else {
            panic!("expected Ok");
        };
        assert_eq!(split.referral, Amount::new(50));
        assert!(split.protocol.is_zero());
    }

    #[test]
    fn self_and_zero_referrers_ignored() {
        let me = Address::from_bytes([1; 32]);
        assert_eq!(effective_referrer(Some(me), &me), None);
        assert_eq!(effective_referrer(Some(Address::ZERO), &me), None);
        let other = Address::from_bytes([2; 32]);
        assert_eq!(effective_referrer(Some(other), &me), Some(other));
    }

    // -----------------------------------------------------------------------
    // Settlement flows
    // -----------------------------------------------------------------------

    use super::super::fixtures::{addr, Fixture, START};
    use crate::config::pool_config::tests::E18;
    use crate::domain::Timestamp;
    use crate::host::MerkleTree;
    use crate::pool::PoolState;
    use crate::state::CallContext;

    #[test]
    fn buy_settles_balances_and_event() {
        let mut fx = Fixture::new();
        let token = fx.create();
        let buyer = addr(9);
        let Ok(q) = fx.buy(buyer, token, E18 / 10, START) else {
            panic!("expected Ok");
        };
        assert_eq!(q.protocol_fee().get(), E18 / 10 * 50 / 10_000);
        assert_eq!(q.pool_fee().get(), E18 / 10 * 100 / 10_000);
        assert_eq!(fx.base_balance(&token, &buyer), q.amount_out());
        assert!(fx.quote_balance(&buyer).is_zero());
        assert_eq!(fx.quote_balance(&fx.fee_receiver), q.protocol_fee());
        assert_eq!(fx.quote_balance(&fx.creator), q.pool_fee());
        let custody = fx.world.state.custody();
        assert_eq!(fx.quote_balance(&custody).get(), E18 / 10);

        let Ok(pool) = fx.world.state.pools.get(&token) else {
            panic!("pool");
        };
        let Some(Event::Trade {
            user,
            is_buy,
            amount_in,
            base_reserve,
            quote_reserve,
            ..
        }) = fx.world.events.last().cloned()
        else {
            panic!("expected Trade");
        };
        assert_eq!(user, buyer);
        assert!(is_buy);
        assert_eq!(amount_in.get(), E18 / 10);
        assert_eq!(base_reserve, pool.virtual_base_reserve());
        assert_eq!(quote_reserve, pool.virtual_quote_reserve());
        assert_eq!(pool.last_buy_at(&buyer), Some(Timestamp::from_secs(START)));
    }

    #[test]
    fn buy_before_start_fails() {
        let mut fx = Fixture::new();
        let token = fx.create();
        assert_eq!(
            fx.buy(addr(9), token, E18 / 10, START - 1),
            Err(LaunchpadError::NotStarted)
        );
        assert!(fx.buy(addr(9), token, E18 / 10, START).is_ok());
    }

    #[test]
    fn buy_while_registry_paused_fails() {
        let mut fx = Fixture::new();
        let token = fx.create();
        let admin = fx.admin;
        let Ok(_) = fx.world.state.access.set_paused(&admin, true) else {
            panic!("expected Ok");
        };
        assert_eq!(fx.buy(addr(9), token, E18 / 10, START), Err(LaunchpadError::Paused));
    }

    #[test]
    fn buy_unknown_pool_fails() {
        let mut fx = Fixture::new();
        let ctx = CallContext::new(addr(9), Timestamp::from_secs(START));
        let params = TradeParams::new(addr(77), addr(9), Amount::new(E18), Amount::ZERO);
        assert_eq!(
            fx.world.transact(|w| buy(w, &ctx, &params)),
            Err(LaunchpadError::InvalidPool)
        );
    }

    #[test]
    fn buy_on_suspended_pool_fails() {
        let mut fx = Fixture::new();
        let token = fx.create();
        let Ok(()) = fx
            .world
            .state
            .pools
            .get_mut(&token)
            .and_then(|p| p.set_state(PoolState::Paused))
        else {
            panic!("expected Ok");
        };
        let ctx = CallContext::new(addr(9), Timestamp::from_secs(START));
        let params = TradeParams::new(token, addr(9), Amount::new(E18 / 10), Amount::ZERO);
        let Err(LaunchpadError::InvalidState(_)) = fx.world.transact(|w| buy(w, &ctx, &params))
        else {
            panic!("expected InvalidState");
        };
    }

    #[test]
    fn buy_above_cap_fails() {
        let mut fx = Fixture::new();
        let token = fx.create();
        assert_eq!(
            fx.buy(addr(9), token, 2_000 * E18, START),
            Err(LaunchpadError::ExceededMaxBuy)
        );
    }

    #[test]
    fn cooldown_blocks_then_releases() {
        let mut fx = Fixture::new();
        let mut terms = fx.terms();
        terms.delay_buy_time = 10;
        let token = fx.create_with(terms);
        let buyer = addr(9);
        assert!(fx.buy(buyer, token, E18 / 10, START).is_ok());
        assert_eq!(
            fx.buy(buyer, token, E18 / 10, START + 9),
            Err(LaunchpadError::OnCooldown)
        );
        assert!(fx.buy(addr(8), token, E18 / 10, START + 9).is_ok());
        assert!(fx.buy(buyer, token, E18 / 10, START + 10).is_ok());
    }

    #[test]
    fn wrong_value_fails_without_effect() {
        let mut fx = Fixture::new();
        let token = fx.create();
        let buyer = addr(9);
        fx.fund(buyer, E18);
        let before = fx.world.state.clone();
        let ctx = CallContext::new(buyer, Timestamp::from_secs(START)).with_value(Amount::new(E18 / 10));
        let params = TradeParams::new(token, buyer, Amount::new(E18 / 10), Amount::ZERO);
        let Err(LaunchpadError::InvalidInputAmount(_)) = fx.world.transact(|w| buy(w, &ctx, &params))
        else {
            panic!("expected InvalidInputAmount");
        };
        assert_eq!(fx.world.state, before);
        assert_eq!(fx.quote_balance(&buyer).get(), E18);
    }

    #[test]
    fn slippage_guard() {
        let mut fx = Fixture::new();
        let token = fx.create();
        let buyer = addr(9);
        let value = fx.buy_value(&token, E18);
        fx.fund(buyer, value.get());
        let Ok(q) = super::super::get_amount_out(&fx.world.state, &token, Amount::new(E18), true)
        else {
            panic!("quote");
        };
        let Some(min_out) = q.amount_out().checked_add(&Amount::new(1)) else {
            panic!("min");
        };
        let ctx = CallContext::new(buyer, Timestamp::from_secs(START)).with_value(value);
        let params = TradeParams::new(token, buyer, Amount::new(E18), min_out);
        assert_eq!(
            fx.world.transact(|w| buy(w, &ctx, &params)),
            Err(LaunchpadError::SlippageExceeded)
        );
    }

    #[test]
    fn second_large_buy_runs_out_of_liquidity() {
        let mut fx = Fixture::new();
        let token = fx.create();
        assert!(fx.buy(addr(9), token, 1_000 * E18, START).is_ok());
        assert_eq!(
            fx.buy(addr(9), token, 1_000 * E18, START),
            Err(LaunchpadError::InsufficientLiquidity)
        );
    }

    #[test]
    fn whitelist_gates_buyers() {
        let mut fx = Fixture::new();
        let member = addr(9);
        let tree = MerkleTree::from_accounts(&[member, addr(10), addr(11)]);
        let mut terms = fx.terms();
        terms.whitelist_root = tree.root();
        let token = fx.create_with(terms);

        let Some(proof) = tree.proof(0) else {
            panic!("proof");
        };
        let value = fx.buy_value(&token, E18);
        fx.fund(member, value.get());
        let ctx = CallContext::new(member, Timestamp::from_secs(START)).with_value(value);
        let params =
            TradeParams::new(token, member, Amount::new(E18), Amount::ZERO).with_proof(proof.clone());
        assert!(fx.world.transact(|w| buy(w, &ctx, &params)).is_ok());

        let outsider = addr(12);
        fx.fund(outsider, value.get());
        let ctx = CallContext::new(outsider, Timestamp::from_secs(START)).with_value(value);
        let params = TradeParams::new(token, outsider, Amount::new(E18), Amount::ZERO).with_proof(proof);
        assert_eq!(
            fx.world.transact(|w| buy(w, &ctx, &params)),
            Err(LaunchpadError::NotWhitelisted)
        );
    }

    #[test]
    fn referrer_takes_share_of_protocol_fee() {
        let mut fx = Fixture::new();
        let token = fx.create();
        let buyer = addr(9);
        let referrer = addr(20);
        let value = fx.buy_value(&token, E18);
        fx.fund(buyer, value.get());
        let ctx = CallContext::new(buyer, Timestamp::from_secs(START)).with_value(value);
        let params =
            TradeParams::new(token, buyer, Amount::new(E18), Amount::ZERO).with_referrer(referrer);
        let Ok(q) = fx.world.transact(|w| buy(w, &ctx, &params)) else {
            panic!("expected Ok");
        };
        // ref_bps equals fee_bps, so the whole protocol fee goes to the referrer.
        assert_eq!(fx.quote_balance(&referrer), q.protocol_fee());
        assert!(fx.quote_balance(&fx.fee_receiver).is_zero());
    }

    #[test]
    fn sell_returns_quote_and_pays_base_fees() {
        let mut fx = Fixture::new();
        let token = fx.create();
        let seller = addr(9);
        let Ok(bought) = fx.buy(seller, token, 10 * E18, START) else {
            panic!("buy");
        };
        let half = bought.amount_out().get() / 2;
        let Ok(q) = fx.sell(seller, token, half, START + 1) else {
            panic!("sell");
        };
        assert_eq!(fx.quote_balance(&seller), q.amount_out());
        assert_eq!(
            fx.base_balance(&token, &seller).get(),
            bought.amount_out().get() - half
        );
        assert_eq!(fx.base_balance(&token, &fx.fee_receiver), q.protocol_fee());
        assert_eq!(fx.base_balance(&token, &fx.creator), q.pool_fee());
        let Ok(pool) = fx.world.state.pools.get(&token) else {
            panic!("pool");
        };
        assert_eq!(
            pool.sold_base_amount().get(),
            bought.amount_out().get() - q.net_amount_in().get()
        );
        let Some(Event::Trade { is_buy, user, .. }) = fx.world.events.last() else {
            panic!("expected Trade");
        };
        assert!(!is_buy);
        assert_eq!(*user, seller);
    }

    #[test]
    fn sell_rejects_value_and_zero_amount() {
        let mut fx = Fixture::new();
        let token = fx.create();
        let Ok(_) = fx.buy(addr(9), token, E18, START) else {
            panic!("buy");
        };
        let ctx = CallContext::new(addr(9), Timestamp::from_secs(START)).with_value(Amount::new(1));
        let params = TradeParams::new(token, addr(9), Amount::new(1_000), Amount::ZERO);
        let Err(LaunchpadError::InvalidInputAmount(_)) = fx.world.transact(|w| sell(w, &ctx, &params))
        else {
            panic!("expected InvalidInputAmount");
        };
        let Err(LaunchpadError::InvalidInputAmount(_)) = fx.sell(addr(9), token, 0, START) else {
            panic!("expected InvalidInputAmount");
        };
    }

    #[test]
    fn sell_without_allowance_rolls_back() {
        let mut fx = Fixture::new();
        let token = fx.create();
        let seller = addr(9);
        let Ok(bought) = fx.buy(seller, token, E18, START) else {
            panic!("buy");
        };
        let before = fx.world.state.clone();
        let ctx = CallContext::new(seller, Timestamp::from_secs(START));
        let params = TradeParams::new(token, seller, bought.amount_out(), Amount::ZERO);
        let Err(LaunchpadError::Token(_)) = fx.world.transact(|w| sell(w, &ctx, &params)) else {
            panic!("expected Token");
        };
        assert_eq!(fx.world.state, before);
        assert_eq!(fx.base_balance(&token, &seller), bought.amount_out());
    }

    #[test]
    fn sell_before_start_fails() {
        let mut fx = Fixture::new();
        let token = fx.create();
        assert_eq!(fx.sell(addr(9), token, E18, START - 1), Err(LaunchpadError::NotStarted));
    }
}
