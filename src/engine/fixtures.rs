//! Shared setup for the engine's unit and property tests.

#![allow(clippy::panic)]

use crate::config::pool_config::tests::{reference_template, E18};
use crate::config::MasterConfig;
use crate::domain::{Address, Amount, BasisPoints, Digest, Quote, Timestamp};
use crate::error::Result;
use crate::host::InMemoryHost;
use crate::pool::PoolTerms;
use crate::state::{AppState, CallContext, World};
use crate::traits::TokenLedger;

use super::{create_pool, get_amount_out, CreatePoolParams, TradeParams};

pub(crate) const START: u64 = 10_000;

pub(crate) fn addr(b: u8) -> Address {
    Address::from_bytes([b; 32])
}

pub(crate) struct Fixture {
    pub(crate) world: World<InMemoryHost>,
    pub(crate) admin: Address,
    pub(crate) creator: Address,
    pub(crate) router: Address,
    pub(crate) fee_receiver: Address,
    pub(crate) quote_asset: Address,
}

impl Fixture {
    /// Admin `0x01..`, creator `0x02..`, router `0x03..`, fee receiver
    /// `0x04..`; master fee 50 bp, referral 50 bp; reference template at
    /// index 0.
    pub(crate) fn new() -> Self {
        let admin = addr(1);
        let mut world = World::new(AppState::new(admin), InMemoryHost::default());
        let Ok(quote_asset) = world.host.ledger.deploy("Wrapped Ether", "WETH", admin) else {
            panic!("quote asset");
        };
        let fee_receiver = addr(4);
        let router = addr(3);
        let Ok(()) = world.state.config.set_master(MasterConfig {
            quote_asset,
            fee_receiver,
            fee_bps: BasisPoints::new(50),
            ref_bps: BasisPoints::new(50),
        }) else {
            panic!("master");
        };
        let Ok(()) = world.state.config.set_pool_config(0, reference_template()) else {
            panic!("template");
        };
        let Ok(_) = world.state.access.set_whitelisted_routers(&admin, &[router], true) else {
            panic!("routers");
        };
        Self {
            world,
            admin,
            creator: addr(2),
            router,
            fee_receiver,
            quote_asset,
        }
    }

    pub(crate) fn terms(&self) -> PoolTerms {
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

    pub(crate) fn params(&self, terms: PoolTerms) -> CreatePoolParams {
        CreatePoolParams {
            name: "Test Token".to_owned(),
            symbol: "TEST".to_owned(),
            config_index: 0,
            router: self.router,
            terms,
            initial_buy_amount: Amount::ZERO,
        }
    }

    pub(crate) fn create_with(&mut self, terms: PoolTerms) -> Address {
        let params = self.params(terms);
        let ctx = CallContext::new(self.creator, Timestamp::from_secs(0));
        let Ok(token) = self.world.transact(|w| create_pool(w, &ctx, &params)) else {
            panic!("create_pool");
        };
        token
    }

    pub(crate) fn create(&mut self) -> Address {
        let terms = self.terms();
        self.create_with(terms)
    }

    pub(crate) fn fund(&mut self, who: Address, amount: u128) {
        let Ok(()) = self
            .world
            .host
            .ledger
            .mint(&self.quote_asset, who, Amount::new(amount))
        else {
            panic!("fund");
        };
    }

    pub(crate) fn quote_balance(&self, who: &Address) -> Amount {
        self.world.host.ledger.balance_of(&self.quote_asset, who)
    }

    pub(crate) fn base_balance(&self, token: &Address, who: &Address) -> Amount {
        self.world.host.ledger.balance_of(token, who)
    }

    pub(crate) fn buy_value(&self, token: &Address, amount_in: u128) -> Amount {
        let Ok(q) = get_amount_out(&self.world.state, token, Amount::new(amount_in), true) else {
            panic!("quote");
        };
        let Some(v) = q.amount_in().checked_add(&q.total_fee()) else {
            panic!("value");
        };
        v
    }

    /// Funds `who` and buys `amount_in` with exactly the required value.
    pub(crate) fn buy(&mut self, who: Address, token: Address, amount_in: u128, now: u64) -> Result<Quote> {
        let value = self.buy_value(&token, amount_in);
        self.fund(who, value.get());
        let ctx = CallContext::new(who, Timestamp::from_secs(now)).with_value(value);
        let params = TradeParams::new(token, who, Amount::new(amount_in), Amount::ZERO);
        self.world.transact(|w| super::buy(w, &ctx, &params))
    }

    /// Approves custody and sells `amount_in` base.
    pub(crate) fn sell(&mut self, who: Address, token: Address, amount_in: u128, now: u64) -> Result<Quote> {
        let custody = self.world.state.custody();
        let Ok(()) = self
            .world
            .host
            .ledger
            .approve(&token, who, custody, Amount::new(amount_in))
        else {
            panic!("approve");
        };
        let ctx = CallContext::new(who, Timestamp::from_secs(now));
        let params = TradeParams::new(token, who, Amount::new(amount_in), Amount::ZERO);
        self.world.transact(|w| super::sell(w, &ctx, &params))
    }
}
