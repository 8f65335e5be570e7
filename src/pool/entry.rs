//! A single bonding-curve pool.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::PoolState;
use crate::config::PoolConfig;
use crate::domain::{Address, Amount, BasisPoints, Digest, Quote, Side, Timestamp};
use crate::error::{LaunchpadError, Result};
use crate::math::{quote_exact_in, CheckedArithmetic};

/// Creator-chosen parameters of a pool.
///
/// All of them except `start_time` and `whitelist_root` can be changed
/// later by an admin or operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolTerms {
    /// Free-text description.
    pub details: String,
    /// Trading opens at this time.
    pub start_time: Timestamp,
    /// Pool fee on buys.
    pub buy_fee_rate: BasisPoints,
    /// Pool fee on sells.
    pub sell_fee_rate: BasisPoints,
    /// Largest accepted `amount_in` for a single buy.
    pub max_buy_amount: Amount,
    /// Seconds a caller must wait between buys; zero disables the cooldown.
    pub delay_buy_time: u64,
    /// Merkle root gating trades; zero disables the whitelist.
    pub whitelist_root: Digest,
}

impl PoolTerms {
    /// Checks both fee rates.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::InvalidFeeRate`] if either exceeds the
    /// denominator.
    pub fn validate(&self) -> Result<()> {
        self.buy_fee_rate.validate()?;
        self.sell_fee_rate.validate()?;
        Ok(())
    }
}

/// Read-only snapshot of a pool, as returned by `get_pool_info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolInfo {
    /// Creator.
    pub owner: Address,
    /// Pool token.
    pub token: Address,
    /// Router the pool lists through.
    pub router: Address,
    /// Token name.
    pub name: String,
    /// Token symbol.
    pub symbol: String,
    /// Template index the pool was created from.
    pub config_index: u32,
    /// Template snapshot.
    pub template: PoolConfig,
    /// Creator parameters.
    pub terms: PoolTerms,
    /// Lifecycle state.
    pub state: PoolState,
    /// Virtual base reserve.
    pub virtual_base_reserve: Amount,
    /// Virtual quote reserve.
    pub virtual_quote_reserve: Amount,
    /// Cumulative base sold by the curve.
    pub sold_base_amount: Amount,
    /// Quote actually held for the pool.
    pub real_quote_reserve: Amount,
}

/// A pool's complete state.
///
/// Mutators are crate-private: outside code changes pools only through the
/// engine operations, which enforce ordering of checks and atomicity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    owner: Address,
    token: Address,
    router: Address,
    name: String,
    symbol: String,
    config_index: u32,
    template: PoolConfig,
    terms: PoolTerms,
    state: PoolState,
    virtual_base_reserve: Amount,
    virtual_quote_reserve: Amount,
    sold_base_amount: Amount,
    real_quote_reserve: Amount,
    last_buy_at: BTreeMap<Address, Timestamp>,
}

impl Pool {
    /// Creates an active pool seeded from `template`.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        owner: Address,
        token: Address,
        router: Address,
        name: String,
        symbol: String,
        config_index: u32,
        template: PoolConfig,
        terms: PoolTerms,
    ) -> Self {
        Self {
            owner,
            token,
            router,
            name,
            symbol,
            config_index,
            virtual_base_reserve: template.initial_virtual_base_reserve,
            virtual_quote_reserve: template.initial_virtual_quote_reserve,
            template,
            terms,
            state: PoolState::Active,
            sold_base_amount: Amount::ZERO,
            real_quote_reserve: Amount::ZERO,
            last_buy_at: BTreeMap::new(),
        }
    }

    /// Creator.
    #[must_use]
    pub const fn owner(&self) -> Address {
        self.owner
    }

    /// Pool token.
    #[must_use]
    pub const fn token(&self) -> Address {
        self.token
    }

    /// Router the pool lists through.
    #[must_use]
    pub const fn router(&self) -> Address {
        self.router
    }

    /// Template snapshot taken at creation.
    #[must_use]
    pub const fn template(&self) -> &PoolConfig {
        &self.template
    }

    /// Creator parameters.
    #[must_use]
    pub const fn terms(&self) -> &PoolTerms {
        &self.terms
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn state(&self) -> PoolState {
        self.state
    }

    /// Virtual base reserve.
    #[must_use]
    pub const fn virtual_base_reserve(&self) -> Amount {
        self.virtual_base_reserve
    }

    /// Virtual quote reserve.
    #[must_use]
    pub const fn virtual_quote_reserve(&self) -> Amount {
        self.virtual_quote_reserve
    }

    /// Cumulative base sold.
    #[must_use]
    pub const fn sold_base_amount(&self) -> Amount {
        self.sold_base_amount
    }

    /// Quote held for the pool.
    #[must_use]
    pub const fn real_quote_reserve(&self) -> Amount {
        self.real_quote_reserve
    }

    /// Last successful buy by `who`, if any.
    #[must_use]
    pub fn last_buy_at(&self, who: &Address) -> Option<Timestamp> {
        self.last_buy_at.get(who).copied()
    }

    /// Base still deliverable by the curve.
    #[must_use]
    pub fn remaining_base(&self) -> Amount {
        self.template
            .total_selling_base_amount
            .checked_sub(&self.sold_base_amount)
            .unwrap_or(Amount::ZERO)
    }

    /// `true` once the sale target has been reached.
    #[must_use]
    pub fn sale_complete(&self) -> bool {
        self.sold_base_amount >= self.template.total_selling_base_amount
    }

    /// `true` if trading has opened at `now`.
    #[must_use]
    pub fn has_started(&self, now: Timestamp) -> bool {
        now >= self.terms.start_time
    }

    /// `true` if `caller` is outside the buy cooldown at `now`.
    #[must_use]
    pub fn cooldown_elapsed(&self, caller: &Address, now: Timestamp) -> bool {
        if self.terms.delay_buy_time == 0 {
            return true;
        }
        self.last_buy_at
            .get(caller)
            .map_or(true, |last| now.saturating_since(*last) >= self.terms.delay_buy_time)
    }

    /// Prices a trade against the current virtual reserves, charging this
    /// pool's fee for `side` plus `protocol_bps`.
    ///
    /// # Errors
    ///
    /// Propagates [`quote_exact_in`] errors.
    pub fn quote(&self, side: Side, amount_in: Amount, protocol_bps: BasisPoints) -> Result<Quote> {
        quote_exact_in(
            side,
            amount_in,
            self.virtual_base_reserve,
            self.virtual_quote_reserve,
            protocol_bps,
            self.fee_rate(side),
        )
    }

    /// The pool fee charged on `side`.
    #[must_use]
    pub const fn fee_rate(&self, side: Side) -> BasisPoints {
        match side {
            Side::Buy => self.terms.buy_fee_rate,
            Side::Sell => self.terms.sell_fee_rate,
        }
    }

    /// Applies a priced buy by `caller` at `now`.
    ///
    /// All new values are computed before any field is written, so an
    /// error leaves the pool unchanged.
    ///
    /// # Errors
    ///
    /// - [`LaunchpadError::InsufficientLiquidity`] if the output is zero or
    ///   exceeds the remaining base.
    /// - [`LaunchpadError::Overflow`] / [`LaunchpadError::Underflow`] on
    ///   arithmetic failure.
    pub(crate) fn apply_buy(&mut self, quote: &Quote, caller: Address, now: Timestamp) -> Result<()> {
        let out = quote.amount_out();
        if out.is_zero() || out > self.remaining_base() {
            return Err(LaunchpadError::InsufficientLiquidity);
        }
        let virtual_quote = self.virtual_quote_reserve.safe_add(&quote.net_amount_in())?;
        let virtual_base = self.virtual_base_reserve.safe_sub(&out)?;
        let sold = self.sold_base_amount.safe_add(&out)?;
        let real_quote = self.real_quote_reserve.safe_add(&quote.amount_in())?;

        self.virtual_quote_reserve = virtual_quote;
        self.virtual_base_reserve = virtual_base;
        self.sold_base_amount = sold;
        self.real_quote_reserve = real_quote;
        self.last_buy_at.insert(caller, now);
        Ok(())
    }

    /// Applies a priced sell.
    ///
    /// # Errors
    ///
    /// - [`LaunchpadError::InsufficientLiquidity`] if the output is zero or
    ///   exceeds the real quote reserve.
    /// - [`LaunchpadError::Overflow`] / [`LaunchpadError::Underflow`] on
    ///   arithmetic failure.
    pub(crate) fn apply_sell(&mut self, quote: &Quote) -> Result<()> {
        let out = quote.amount_out();
        if out.is_zero() || out > self.real_quote_reserve {
            return Err(LaunchpadError::InsufficientLiquidity);
        }
        let net = quote.net_amount_in();
        let virtual_base = self.virtual_base_reserve.safe_add(&net)?;
        let virtual_quote = self.virtual_quote_reserve.safe_sub(&out)?;
        let sold = self.sold_base_amount.safe_sub(&net)?;
        let real_quote = self.real_quote_reserve.safe_sub(&out)?;

        self.virtual_base_reserve = virtual_base;
        self.virtual_quote_reserve = virtual_quote;
        self.sold_base_amount = sold;
        self.real_quote_reserve = real_quote;
        Ok(())
    }

    /// Removes `amount` from the real quote reserve.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::InsufficientLiquidity`] if the reserve is
    /// too small.
    pub(crate) fn debit_real_quote(&mut self, amount: Amount) -> Result<()> {
        self.real_quote_reserve = self
            .real_quote_reserve
            .checked_sub(&amount)
            .ok_or(LaunchpadError::InsufficientLiquidity)?;
        Ok(())
    }

    pub(crate) fn mark_listed(&mut self) {
        self.state = PoolState::Listed;
    }

    /// Manual state change; see [`PoolState::check_manual_transition`].
    pub(crate) fn set_state(&mut self, to: PoolState) -> Result<()> {
        self.state.check_manual_transition(to)?;
        self.state = to;
        Ok(())
    }

    pub(crate) fn set_details(&mut self, details: String) {
        self.terms.details = details;
    }

    pub(crate) fn set_delay_buy_time(&mut self, secs: u64) {
        self.terms.delay_buy_time = secs;
    }

    pub(crate) fn set_max_buy_amount(&mut self, amount: Amount) {
        self.terms.max_buy_amount = amount;
    }

    pub(crate) fn set_fee_rates(&mut self, buy: BasisPoints, sell: BasisPoints) -> Result<()> {
        buy.validate()?;
        sell.validate()?;
        self.terms.buy_fee_rate = buy;
        self.terms.sell_fee_rate = sell;
        Ok(())
    }

    /// Snapshot for callers.
    #[must_use]
    pub fn info(&self) -> PoolInfo {
        PoolInfo {
            owner: self.owner,
            token: self.token,
            router: self.router,
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            config_index: self.config_index,
            template: self.template,
            terms: self.terms.clone(),
            state: self.state,
            virtual_base_reserve: self.virtual_base_reserve,
            virtual_quote_reserve: self.virtual_quote_reserve,
            sold_base_amount: self.sold_base_amount,
            real_quote_reserve: self.real_quote_reserve,
        }
    }
}
