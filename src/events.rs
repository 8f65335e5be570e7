//! Observable change events.
//!
//! Every committed mutation appends one or more [`Event`]s to the
//! [`EventLog`] held in the [`World`](crate::state::World).  Events of a
//! failed operation are discarded with the rest of its staged effects.

use serde::{Deserialize, Serialize};

use crate::domain::{Address, Amount, BasisPoints};
use crate::pool::PoolState;

/// A change to the [`AccessRegistry`](crate::access::AccessRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessChange {
    /// A new admin was installed.
    AdminSet(Address),
    /// Operator membership changed.
    Operators {
        /// Affected identities.
        ids: Vec<Address>,
        /// New membership.
        enabled: bool,
    },
    /// Router whitelist membership changed.
    Routers {
        /// Affected identities.
        ids: Vec<Address>,
        /// New membership.
        enabled: bool,
    },
    /// The global pause flag was set.
    Paused(bool),
}

/// A change to the [`ConfigStore`](crate::config::ConfigStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigChange {
    /// The master configuration was replaced.
    Master,
    /// A template was inserted or replaced.
    PoolConfigSet(u32),
    /// A template was removed.
    PoolConfigRemoved(u32),
}

/// A change to a single pool's administrative fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolUpdate {
    /// Lifecycle state changed.
    State(PoolState),
    /// Free-text details replaced.
    Details,
    /// Inter-buy cooldown changed, in seconds.
    DelayBuyTime(u64),
    /// Per-transaction buy cap changed.
    MaxBuyAmount(Amount),
    /// Buy and sell fee rates changed.
    FeeRate {
        /// New buy fee.
        buy: BasisPoints,
        /// New sell fee.
        sell: BasisPoints,
    },
}

/// Everything the launchpad reports to the outside world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// A pool and its token were created.
    TokenCreated {
        /// The new token.
        token: Address,
        /// The caller of `create_pool`.
        creator: Address,
    },
    /// A curve trade settled.
    Trade {
        /// Pool token.
        token: Address,
        /// The trading caller.
        user: Address,
        /// Direction.
        is_buy: bool,
        /// Gross input.
        amount_in: Amount,
        /// Output delivered.
        amount_out: Amount,
        /// Total fee charged, in the input asset.
        fee: Amount,
        /// Virtual base reserve after the trade.
        base_reserve: Amount,
        /// Virtual quote reserve after the trade.
        quote_reserve: Amount,
    },
    /// A pool reached its sale target and migrated to the venue.
    Listed {
        /// Pool token.
        token: Address,
        /// Base seeded into the venue.
        base_amount: Amount,
        /// Quote seeded into the venue.
        quote_amount: Amount,
        /// Quote paid as listing fee.
        listing_fee: Amount,
    },
    /// Access registry mutation.
    AccessChanged(AccessChange),
    /// Configuration mutation.
    ConfigChanged(ConfigChange),
    /// Pool administrative mutation.
    PoolUpdated {
        /// Pool token.
        token: Address,
        /// What changed.
        update: PoolUpdate,
    },
    /// The router's bindings were edited.
    ModulesCut {
        /// Selectors newly bound.
        added: usize,
        /// Selectors rebound to another facet.
        replaced: usize,
        /// Selectors unbound.
        removed: usize,
    },
    /// The router changed hands.
    RouterOwnerChanged {
        /// Owner before the transfer.
        previous: Address,
        /// Owner after the transfer.
        owner: Address,
    },
}

/// Append-only sequence of committed events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Appends an event.
    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Moves every event of `other` to the end of this log.
    pub fn append(&mut self, mut other: Self) {
        self.events.append(&mut other.events);
    }

    /// All events in emission order.
    #[must_use]
    pub fn as_slice(&self) -> &[Event] {
        &self.events
    }

    /// Number of events recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The most recent event, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Event> {
        self.events.last()
    }

    /// Events recorded at or after position `from`.
    #[must_use]
    pub fn since(&self, from: usize) -> &[Event] {
        self.events.get(from..).unwrap_or(&[])
    }

    /// Removes and returns every recorded event.
    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}
