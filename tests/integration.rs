//! Integration tests exercising the full system through the module router.
//!
//! These tests verify end-to-end flows through the public API: bootstrap,
//! pool creation, trading, suspension, whitelisting, listing migration,
//! module cuts and concurrent dispatch.

#![allow(clippy::panic)]

use std::sync::Arc;

use primitive_types::U256;

use bonding_launchpad::prelude::*;
use bonding_launchpad::router::signatures;

const E18: u128 = 1_000_000_000_000_000_000;
const START: u64 = 1_000;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn addr(b: u8) -> Address {
    Address::from_bytes([b; 32])
}

fn template() -> PoolConfig {
    PoolConfig {
        initial_virtual_base_reserve: Amount::new(1_000 * E18),
        initial_virtual_quote_reserve: Amount::new(1_000 * E18),
        total_selling_base_amount: Amount::new(500 * E18),
        max_listing_base_amount: Amount::new(500 * E18),
        max_listing_quote_amount: Amount::new(500 * E18),
        default_listing_rate: BasisPoints::new(10_000),
        listing_fee: Amount::new(10 * E18),
    }
}

fn terms() -> PoolTerms {
    PoolTerms {
        details: "This is a test pool".to_owned(),
        start_time: Timestamp::from_secs(START),
        buy_fee_rate: BasisPoints::new(100),
        sell_fee_rate: BasisPoints::new(200),
        max_buy_amount: Amount::new(1_000 * E18),
        delay_buy_time: 0,
        whitelist_root: Digest::ZERO,
    }
}

struct Launchpad {
    router: ModuleRouter<InMemoryHost>,
    admin: Address,
    creator: Address,
    venue_router: Address,
    fee_receiver: Address,
    weth: Address,
}

impl Launchpad {
    /// Admin `0x01..`, creator `0x02..`, venue router `0x03..`, fee
    /// receiver `0x04..`; protocol fee 0.5 %, referral 0.5 %; template 0.
    fn new() -> Self {
        let admin = addr(1);
        let mut world = World::new(AppState::new(admin), InMemoryHost::default());
        let Ok(weth) = world.host.ledger.deploy("Wrapped Ether", "WETH", admin) else {
            panic!("deploy quote asset");
        };
        let lp = Self {
            router: ModuleRouter::with_default_facets(admin, world),
            admin,
            creator: addr(2),
            venue_router: addr(3),
            fee_receiver: addr(4),
            weth,
        };
        lp.admin_call(Operation::SetMasterConfig(MasterConfig {
            quote_asset: weth,
            fee_receiver: lp.fee_receiver,
            fee_bps: BasisPoints::new(50),
            ref_bps: BasisPoints::new(50),
        }));
        lp.admin_call(Operation::SetPoolConfig {
            index: 0,
            config: template(),
        });
        lp.admin_call(Operation::SetWhitelistedRouters {
            ids: vec![lp.venue_router],
            enabled: true,
        });
        lp
    }

    fn call(&self, who: Address, now: u64, value: u128, op: &Operation) -> Result<Output> {
        let ctx = CallContext::new(who, Timestamp::from_secs(now)).with_value(Amount::new(value));
        self.router.dispatch(&ctx, op)
    }

    fn admin_call(&self, op: Operation) {
        let Ok(_) = self.call(self.admin, 0, 0, &op) else {
            panic!("admin call {op:?}");
        };
    }

    fn create(&self, terms: PoolTerms) -> Address {
        let op = Operation::CreatePool(CreatePoolParams {
            name: "Test Token".to_owned(),
            symbol: "TEST".to_owned(),
            config_index: 0,
            router: self.venue_router,
            terms,
            initial_buy_amount: Amount::ZERO,
        });
        let Ok(Output::Address(token)) = self.call(self.creator, 0, 0, &op) else {
            panic!("create pool");
        };
        token
    }

    fn quote(&self, token: Address, amount_in: u128, is_buy: bool) -> Quote {
        let op = Operation::GetAmountOut {
            token,
            amount_in: Amount::new(amount_in),
            is_buy,
        };
        let Ok(Output::Quote(q)) = self.call(self.admin, 0, 0, &op) else {
            panic!("quote");
        };
        q
    }

    fn info(&self, token: Address) -> PoolInfo {
        let Ok(Output::PoolInfo(info)) = self.call(self.admin, 0, 0, &Operation::GetPoolInfo(token))
        else {
            panic!("pool info");
        };
        *info
    }

    fn fund(&self, who: Address, amount: u128) {
        let weth = self.weth;
        let Ok(()) = self
            .router
            .with_host_mut(|h| h.ledger.mint(&weth, who, Amount::new(amount)))
        else {
            panic!("fund");
        };
    }

    fn balance(&self, token: Address, who: Address) -> Amount {
        self.router.read(|w| w.host.ledger.balance_of(&token, &who))
    }

    /// Funds `who` with exactly `amount_in + fee` and buys.
    fn buy_with(&self, who: Address, params: TradeParams, now: u64) -> Result<Quote> {
        let q = self.quote(params.token, params.amount_in.get(), true);
        let value = q.amount_in().get() + q.total_fee().get();
        self.fund(who, value);
        match self.call(who, now, value, &Operation::Buy(params))? {
            Output::Quote(q) => Ok(q),
            other => panic!("unexpected output {other:?}"),
        }
    }

    fn buy(&self, who: Address, token: Address, amount_in: u128, now: u64) -> Result<Quote> {
        let params = TradeParams::new(token, who, Amount::new(amount_in), Amount::ZERO);
        self.buy_with(who, params, now)
    }

    fn sell(&self, who: Address, token: Address, amount_in: u128, now: u64) -> Result<Quote> {
        let custody = self.router.read(|w| w.state.custody());
        let Ok(()) = self
            .router
            .with_host_mut(|h| h.ledger.approve(&token, who, custody, Amount::new(amount_in)))
        else {
            panic!("approve");
        };
        let params = TradeParams::new(token, who, Amount::new(amount_in), Amount::ZERO);
        match self.call(who, now, 0, &Operation::Sell(params))? {
            Output::Quote(q) => Ok(q),
            other => panic!("unexpected output {other:?}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Curve arithmetic
// ---------------------------------------------------------------------------

#[test]
fn small_buy_matches_closed_form() {
    let lp = Launchpad::new();
    let token = lp.create(terms());
    let before = lp.info(token);

    let amount_in = E18 / 10;
    let Ok(q) = lp.buy(addr(9), token, amount_in, START) else {
        panic!("buy");
    };

    // 0.5 % protocol + 1 % pool
    let net = amount_in - amount_in * 50 / 10_000 - amount_in * 100 / 10_000;
    assert_eq!(net, E18 / 10 * 985 / 1_000);
    let vb = 1_000 * E18;
    let vq = 1_000 * E18;
    // vb * net stays below 2^128 at this size
    assert_eq!(q.amount_out().get(), vb * net / (vq + net));
    assert_eq!(q.net_amount_in().get(), net);

    let after = lp.info(token);
    assert_eq!(
        after.virtual_base_reserve.get(),
        before.virtual_base_reserve.get() - q.amount_out().get()
    );
    assert_eq!(
        after.virtual_quote_reserve.get(),
        before.virtual_quote_reserve.get() + net
    );
    assert_eq!(after.sold_base_amount, q.amount_out());
    assert_eq!(after.real_quote_reserve.get(), amount_in);
    assert_eq!(lp.balance(token, addr(9)), q.amount_out());
}

#[test]
fn large_buy_then_second_runs_dry() {
    let lp = Launchpad::new();
    let token = lp.create(terms());
    let Ok(first) = lp.buy(addr(9), token, 1_000 * E18, START) else {
        panic!("first buy");
    };
    // 1000 * 985 / 1985
    assert_eq!(first.amount_out().get() / E18, 496);
    assert_eq!(
        lp.buy(addr(10), token, 1_000 * E18, START),
        Err(LaunchpadError::InsufficientLiquidity)
    );

    let info = lp.info(token);
    assert_eq!(info.owner, lp.creator);
    assert_eq!(info.router, lp.venue_router);
    assert_eq!(info.state, PoolState::Active);
    assert_eq!(info.terms, terms());
    assert_eq!(info.template, template());
}

#[test]
fn buy_then_sell_respects_curve() {
    let lp = Launchpad::new();
    let token = lp.create(terms());
    let trader = addr(9);
    let Ok(bought) = lp.buy(trader, token, 10 * E18, START) else {
        panic!("buy");
    };
    let k_before = product(&lp.info(token));

    let half = bought.amount_out().get() / 2;
    let Ok(sold) = lp.sell(trader, token, half, START) else {
        panic!("sell");
    };
    assert_eq!(lp.balance(lp.weth, trader), sold.amount_out());
    assert_eq!(lp.balance(token, trader).get(), bought.amount_out().get() - half);
    // sell fees are taken in base
    assert_eq!(sold.pool_fee().get(), half * 200 / 10_000);
    assert_eq!(lp.balance(token, lp.creator), sold.pool_fee());

    assert!(product(&lp.info(token)) >= k_before);
}

fn product(info: &PoolInfo) -> U256 {
    U256::from(info.virtual_base_reserve.get()) * U256::from(info.virtual_quote_reserve.get())
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn suspended_pool_blocks_and_resumes() {
    let lp = Launchpad::new();
    let token = lp.create(terms());
    lp.admin_call(Operation::SetPoolState {
        token,
        state: PoolState::Paused,
    });
    assert!(matches!(
        lp.buy(addr(9), token, E18, START),
        Err(LaunchpadError::InvalidState(_))
    ));
    lp.admin_call(Operation::SetPoolState {
        token,
        state: PoolState::Active,
    });
    assert!(lp.buy(addr(9), token, E18, START).is_ok());
}

#[test]
fn global_pause_blocks_trading() {
    let lp = Launchpad::new();
    let token = lp.create(terms());
    lp.admin_call(Operation::SetPaused(true));
    assert_eq!(
        lp.buy(addr(9), token, E18, START),
        Err(LaunchpadError::Paused)
    );
    assert_eq!(
        lp.call(addr(9), 0, 0, &Operation::IsPaused),
        Ok(Output::Bool(true))
    );
}

#[test]
fn sale_completion_lists_pool() {
    let lp = Launchpad::new();
    let token = lp.create(terms());
    lp.admin_call(Operation::SetMaxBuyAmount {
        token,
        amount: Amount::new(10_000 * E18),
    });
    let Ok(Output::Quote(exact)) = lp.call(
        lp.admin,
        0,
        0,
        &Operation::GetAmountIn {
            token,
            amount_out: Amount::new(500 * E18),
            is_buy: true,
        },
    ) else {
        panic!("inverse quote");
    };
    let events_before = lp.router.read(|w| w.events.len());

    let Ok(q) = lp.buy(addr(9), token, exact.amount_in().get(), START) else {
        panic!("buyout");
    };
    assert_eq!(q.amount_out().get(), 500 * E18);

    let info = lp.info(token);
    assert_eq!(info.state, PoolState::Listed);
    assert!(info.real_quote_reserve.is_zero());
    assert_eq!(lp.balance(token, addr(9)).get(), 500 * E18);

    let Some(position) = lp.router.read(|w| w.host.venue.position(&lp.venue_router, &token)) else {
        panic!("venue position");
    };
    assert_eq!(position.base.get(), 500 * E18);
    assert_eq!(position.quote.get(), 500 * E18);
    assert_eq!(
        lp.router
            .read(|w| w.host.venue.lp_balance(&token, &Address::ZERO)),
        position.liquidity
    );

    let events = lp.router.read(|w| w.events.since(events_before).to_vec());
    assert!(matches!(events.first(), Some(Event::Trade { is_buy: true, .. })));
    assert!(matches!(events.last(), Some(Event::Listed { .. })));

    assert!(matches!(
        lp.buy(addr(10), token, E18, START),
        Err(LaunchpadError::InvalidState(_))
    ));
    assert!(matches!(
        lp.sell(addr(9), token, E18, START),
        Err(LaunchpadError::InvalidState(_))
    ));
    assert!(matches!(
        lp.call(
            lp.admin,
            0,
            0,
            &Operation::SetPoolState {
                token,
                state: PoolState::Active
            }
        ),
        Err(LaunchpadError::InvalidState(_))
    ));
}

#[test]
fn cooldown_spacing() {
    let lp = Launchpad::new();
    let mut t = terms();
    t.delay_buy_time = 30;
    let token = lp.create(t);
    let trader = addr(9);
    assert!(lp.buy(trader, token, E18, START).is_ok());
    assert_eq!(
        lp.buy(trader, token, E18, START + 29),
        Err(LaunchpadError::OnCooldown)
    );
    assert!(lp.buy(trader, token, E18, START + 30).is_ok());
    assert_eq!(
        lp.call(
            lp.admin,
            0,
            0,
            &Operation::GetLastBuyTime { token, who: trader }
        ),
        Ok(Output::LastBuyTime(Some(Timestamp::from_secs(START + 30))))
    );
}

#[test]
fn whitelist_and_referrer() {
    let lp = Launchpad::new();
    let (alice, bob, carol) = (addr(10), addr(11), addr(12));
    let tree = MerkleTree::from_accounts(&[alice, bob]);
    let mut t = terms();
    t.whitelist_root = tree.root();
    let token = lp.create(t);

    assert_eq!(
        lp.buy(carol, token, E18, START),
        Err(LaunchpadError::NotWhitelisted)
    );

    let Some(proof) = tree.proof(0) else {
        panic!("proof");
    };
    let referrer = addr(20);
    let params = TradeParams::new(token, alice, Amount::new(E18), Amount::ZERO)
        .with_proof(proof)
        .with_referrer(referrer);
    let Ok(q) = lp.buy_with(alice, params, START) else {
        panic!("whitelisted buy");
    };
    // referral 0.5 % of input, capped by the 0.5 % protocol fee
    assert_eq!(lp.balance(lp.weth, referrer).get(), E18 * 50 / 10_000);
    assert_eq!(
        lp.balance(lp.weth, lp.fee_receiver).get(),
        q.protocol_fee().get() - E18 * 50 / 10_000
    );
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn template_removal_keeps_existing_pools() {
    let lp = Launchpad::new();
    let token = lp.create(terms());
    let before = lp.info(token);
    lp.admin_call(Operation::RemovePoolConfig(0));
    assert_eq!(lp.info(token), before);
    assert!(matches!(
        lp.call(lp.admin, 0, 0, &Operation::GetPoolConfig(0)),
        Err(LaunchpadError::InvalidConfig(_))
    ));
    assert!(lp.buy(addr(9), token, E18, START).is_ok());
}

#[test]
fn master_config_round_trip() {
    let lp = Launchpad::new();
    let config = MasterConfig {
        quote_asset: lp.weth,
        fee_receiver: addr(40),
        fee_bps: BasisPoints::new(10_000),
        ref_bps: BasisPoints::new(0),
    };
    lp.admin_call(Operation::SetMasterConfig(config));
    assert_eq!(
        lp.call(addr(9), 0, 0, &Operation::GetMasterConfig),
        Ok(Output::MasterConfig(config))
    );
}

#[test]
fn bootstrap_from_settings() {
    let src = r#"
admin = "0x0101010101010101010101010101010101010101010101010101010101010101"
operators = ["0x0505050505050505050505050505050505050505050505050505050505050505"]
whitelisted_routers = ["0x0303030303030303030303030303030303030303030303030303030303030303"]
removal_policy = "tombstone"

[[pool_configs]]
index = 7

[pool_configs.config]
initial_virtual_base_reserve = "1000000000000000000000"
initial_virtual_quote_reserve = "1000000000000000000000"
total_selling_base_amount = "500000000000000000000"
max_listing_base_amount = "500000000000000000000"
max_listing_quote_amount = "500000000000000000000"
default_listing_rate = 10000
listing_fee = "10000000000000000000"
"#;
    let Ok(settings) = LaunchpadSettings::from_toml_str(src) else {
        panic!("settings");
    };
    let Ok(state) = AppState::from_settings(&settings) else {
        panic!("bootstrap");
    };
    let router = ModuleRouter::with_default_facets(addr(1), World::new(state, InMemoryHost::default()));
    let operator = CallContext::new(addr(5), Timestamp::from_secs(0));

    assert_eq!(
        router.dispatch(&operator, &Operation::GetPoolConfig(7)),
        Ok(Output::PoolConfig(template()))
    );
    assert_eq!(
        router.dispatch(&operator, &Operation::RemovePoolConfig(7)),
        Ok(Output::Unit)
    );
    assert_eq!(
        router.dispatch(&operator, &Operation::GetPoolConfig(7)),
        Err(LaunchpadError::InvalidConfig("pool config removed"))
    );
    // no master yet
    assert!(matches!(
        router.dispatch(&operator, &Operation::GetMasterConfig),
        Err(LaunchpadError::InvalidConfig(_))
    ));
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

#[test]
fn module_cut_swaps_trading_out_and_back() {
    let lp = Launchpad::new();
    let token = lp.create(terms());
    let buy = Selector::of(signatures::BUY);

    let Ok(()) = lp.router.cut(&lp.admin, vec![FacetCut::remove(vec![buy])], None) else {
        panic!("remove");
    };
    assert_eq!(
        lp.buy(addr(9), token, E18, START),
        Err(LaunchpadError::UnknownSelector(buy))
    );
    // the quote view is still bound
    let _ = lp.quote(token, E18, true);

    let trading: Arc<dyn Facet<InMemoryHost>> = Arc::new(bonding_launchpad::router::TradingFacet);
    let Ok(()) = lp.router.cut(&lp.admin, vec![FacetCut::add(trading, vec![buy])], None) else {
        panic!("add");
    };
    assert!(lp.buy(addr(9), token, E18, START).is_ok());
    assert_eq!(lp.router.facet_of(&buy), Some("trading"));
}

#[test]
fn concurrent_buys_are_serialized() {
    let lp = Launchpad::new();
    let token = lp.create(terms());
    let buyers: Vec<Address> = (50u8..58).map(addr).collect();

    let outs: Vec<Quote> = std::thread::scope(|s| {
        let handles: Vec<_> = buyers
            .iter()
            .map(|&who| {
                let lp = &lp;
                s.spawn(move || lp.buy(who, token, 10 * E18, START))
            })
            .collect();
        handles
            .into_iter()
            .map(|h| match h.join() {
                Ok(Ok(q)) => q,
                _ => panic!("buy thread"),
            })
            .collect()
    });

    let total: u128 = outs.iter().map(|q| q.amount_out().get()).sum();
    let info = lp.info(token);
    assert_eq!(info.sold_base_amount.get(), total);
    assert_eq!(info.real_quote_reserve.get(), 8 * 10 * E18);
    for who in buyers {
        assert!(!lp.balance(token, who).is_zero());
    }
}
