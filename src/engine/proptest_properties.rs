//! Property-based tests for the trading engine.
//!
//! 1. **Curve invariant**: `virtual_base * virtual_quote` never decreases
//!    across buys and sells.
//! 2. **Quote purity**: quoting never touches state.
//! 3. **Template lookup**: creating from a missing template fails whatever
//!    the fee rates, initial buy and attached value.
//! 4. **Exact value**: a buy with the wrong attached value fails and
//!    leaves no trace.
//! 5. **Start gate**: buys before the start time fail, at or after succeed.
//! 6. **Cooldown**: a second buy inside the delay window fails.
//! 7. **Template snapshot**: removing a template leaves its pools intact.
//! 8. **Master round trip**: the master configuration reads back as set.

#![allow(clippy::panic)]

use primitive_types::U256;
use proptest::prelude::*;

use super::fixtures::{addr, Fixture, START};
use super::{
    create_pool, get_amount_out, get_master_config, get_pool_info, remove_pool_config,
    set_master_config, TradeParams,
};
use crate::config::pool_config::tests::E18;
use crate::config::MasterConfig;
use crate::domain::{Address, Amount, BasisPoints, Timestamp};
use crate::error::LaunchpadError;
use crate::state::CallContext;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn product(f: &Fixture, token: &Address) -> U256 {
    let Ok(pool) = f.world.state.pools().get(token) else {
        panic!("pool");
    };
    U256::from(pool.virtual_base_reserve().get()) * U256::from(pool.virtual_quote_reserve().get())
}

/// Buys small enough that three of them never exhaust the sale.
fn buy_strategy() -> impl Strategy<Value = u128> {
    (1u128..=100).prop_map(|units| units * E18)
}

fn bps_strategy() -> impl Strategy<Value = u32> {
    0u32..=10_000
}

// ---------------------------------------------------------------------------
// Property 1: Curve invariant
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_product_non_decreasing(
        buys in prop::collection::vec(buy_strategy(), 1..=3),
        sell_share in 1u128..=100,
    ) {
        let mut f = Fixture::new();
        let token = f.create();
        let trader = addr(9);

        let mut k = product(&f, &token);
        for amount in buys {
            let Ok(_) = f.buy(trader, token, amount, START) else {
                return Ok(());
            };
            let next = product(&f, &token);
            prop_assert!(next >= k, "buy shrank k: {} < {}", next, k);
            k = next;
        }

        let held = f.base_balance(&token, &trader).get();
        let to_sell = held * sell_share / 100;
        if to_sell == 0 { return Ok(()); }
        let Ok(_) = f.sell(trader, token, to_sell, START) else {
            return Ok(());
        };
        let next = product(&f, &token);
        prop_assert!(next >= k, "sell shrank k: {} < {}", next, k);
    }
}

// ---------------------------------------------------------------------------
// Property 2: Quote purity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_quote_is_pure(amount in 1u128..=2_000 * E18, is_buy in any::<bool>()) {
        let mut f = Fixture::new();
        let token = f.create();
        let before = f.world.state.clone();

        let first = get_amount_out(&f.world.state, &token, Amount::new(amount), is_buy);
        let second = get_amount_out(&f.world.state, &token, Amount::new(amount), is_buy);

        prop_assert_eq!(first, second);
        prop_assert_eq!(&f.world.state, &before);
    }
}

// ---------------------------------------------------------------------------
// Property 3: Template lookup
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_missing_template_rejected(
        index in 1u32..=u32::MAX,
        buy_fee in 0u32..=20_000,
        sell_fee in 0u32..=20_000,
        initial_buy in prop_oneof![Just(0u128), 1u128..=2_000 * E18],
        value in prop_oneof![Just(0u128), any::<u128>()],
    ) {
        let mut f = Fixture::new();
        let mut terms = f.terms();
        terms.buy_fee_rate = BasisPoints::new(buy_fee);
        terms.sell_fee_rate = BasisPoints::new(sell_fee);
        let mut params = f.params(terms);
        params.config_index = index;
        params.initial_buy_amount = Amount::new(initial_buy);
        prop_assert!(f.world.state.access().is_whitelisted_router(&params.router));
        let ctx = CallContext::new(f.creator, Timestamp::from_secs(0))
            .with_value(Amount::new(value));
        let before = f.world.clone();

        let result = f.world.transact(|w| create_pool(w, &ctx, &params));
        prop_assert!(matches!(result, Err(LaunchpadError::InvalidConfig(_))));
        prop_assert!(f.world.state.pools().is_empty());
        prop_assert_eq!(&f.world.host, &before.host);
        prop_assert_eq!(f.world.events.len(), before.events.len());
    }
}

// ---------------------------------------------------------------------------
// Property 4: Exact value
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_value_mismatch_rejected(
        amount in buy_strategy(),
        delta in 1u128..=E18,
        over in any::<bool>(),
    ) {
        let mut f = Fixture::new();
        let token = f.create();
        let trader = addr(9);
        let exact = f.buy_value(&token, amount).get();
        let value = if over { exact + delta } else { exact.saturating_sub(delta) };
        if value == exact { return Ok(()); }
        f.fund(trader, exact + delta);
        let before = f.world.clone();

        let ctx = CallContext::new(trader, Timestamp::from_secs(START))
            .with_value(Amount::new(value));
        let params = TradeParams::new(token, trader, Amount::new(amount), Amount::ZERO);
        let result = f.world.transact(|w| super::buy(w, &ctx, &params));

        prop_assert!(matches!(result, Err(LaunchpadError::InvalidInputAmount(_))));
        prop_assert_eq!(&f.world.state, &before.state);
        prop_assert_eq!(&f.world.host, &before.host);
    }
}

// ---------------------------------------------------------------------------
// Property 5: Start gate
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_start_time_gate(now in 0u64..=2 * START, amount in buy_strategy()) {
        let mut f = Fixture::new();
        let token = f.create();

        let result = f.buy(addr(9), token, amount, now);
        if now < START {
            prop_assert!(matches!(result, Err(LaunchpadError::NotStarted)));
        } else {
            prop_assert!(result.is_ok());
        }
    }
}

// ---------------------------------------------------------------------------
// Property 6: Cooldown
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_cooldown_enforced(delay in 1u64..=3_600, gap in 0u64..=7_200) {
        let mut f = Fixture::new();
        let mut terms = f.terms();
        terms.delay_buy_time = delay;
        let token = f.create_with(terms);
        let trader = addr(9);

        let Ok(_) = f.buy(trader, token, E18, START) else {
            panic!("first buy");
        };
        let second = f.buy(trader, token, E18, START + gap);
        if gap < delay {
            prop_assert!(matches!(second, Err(LaunchpadError::OnCooldown)));
        } else {
            prop_assert!(second.is_ok());
        }

        // cooldown is per caller
        prop_assert!(f.buy(addr(10), token, E18, START + gap).is_ok());
    }
}

// ---------------------------------------------------------------------------
// Property 7: Template snapshot
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_template_removal_keeps_pools(amount in buy_strategy()) {
        let mut f = Fixture::new();
        let token = f.create();
        let Ok(before) = get_pool_info(&f.world.state, &token) else {
            panic!("info");
        };

        let ctx = CallContext::new(f.admin, Timestamp::from_secs(0));
        let Ok(()) = f.world.transact(|w| remove_pool_config(w, &ctx, 0)) else {
            panic!("remove");
        };

        let Ok(after) = get_pool_info(&f.world.state, &token) else {
            panic!("info");
        };
        prop_assert_eq!(&before, &after);
        prop_assert!(f.buy(addr(9), token, amount, START).is_ok());
    }
}

// ---------------------------------------------------------------------------
// Property 8: Master round trip
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_master_config_round_trip(
        fee in bps_strategy(),
        referral in bps_strategy(),
        receiver in 1u8..=255,
    ) {
        let mut f = Fixture::new();
        let config = MasterConfig {
            quote_asset: f.quote_asset,
            fee_receiver: addr(receiver),
            fee_bps: BasisPoints::new(fee),
            ref_bps: BasisPoints::new(referral),
        };
        let ctx = CallContext::new(f.admin, Timestamp::from_secs(0));
        let Ok(()) = f.world.transact(|w| set_master_config(w, &ctx, config)) else {
            panic!("set master");
        };
        prop_assert_eq!(get_master_config(&f.world.state), Ok(config));
    }
}
