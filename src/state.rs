//! The shared application state and the call context.
//!
//! [`AppState`] is the single store every facet operates on: access
//! registry, configuration and pool ledger.  [`World`] adds the external
//! collaborators and the event log, which is everything one operation can
//! touch.  Operations are staged on a copy of the state and collaborators
//! and rolled back by dropping it; see [`World::transact`].

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::access::AccessRegistry;
use crate::config::{ConfigStore, LaunchpadSettings};
use crate::domain::{Address, Amount, Timestamp};
use crate::error::{LaunchpadError, Result};
use crate::events::EventLog;
use crate::pool::PoolLedger;
use crate::traits::Host;

/// Who is calling, with how much quote attached, and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    /// The calling identity.
    pub caller: Address,
    /// Quote asset attached to the call.
    pub value: Amount,
    /// Current time on the external clock.
    pub now: Timestamp,
}

impl CallContext {
    /// A context with no attached value.
    #[must_use]
    pub const fn new(caller: Address, now: Timestamp) -> Self {
        Self {
            caller,
            value: Amount::ZERO,
            now,
        }
    }

    /// The same context with `value` attached.
    #[must_use]
    pub const fn with_value(self, value: Amount) -> Self {
        Self { value, ..self }
    }

    /// Rejects attached value on non-payable operations.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::InvalidInputAmount`] if `value` is non-zero.
    pub const fn require_no_value(&self) -> Result<()> {
        if self.value.is_zero() {
            Ok(())
        } else {
            Err(LaunchpadError::InvalidInputAmount("operation does not accept value"))
        }
    }
}

/// Access registry, configuration, and pools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    pub(crate) access: AccessRegistry,
    pub(crate) config: ConfigStore,
    pub(crate) pools: PoolLedger,
    custody: Address,
}

impl AppState {
    /// A fresh state administered by `admin`, with default removal policy.
    #[must_use]
    pub fn new(admin: Address) -> Self {
        Self {
            access: AccessRegistry::new(admin),
            config: ConfigStore::default(),
            pools: PoolLedger::new(),
            custody: Address::derive(b"launchpad-custody", &[admin.as_bytes()]),
        }
    }

    /// Builds a state from validated bootstrap settings.
    ///
    /// # Errors
    ///
    /// Propagates [`LaunchpadSettings::validate`] failures.
    pub fn from_settings(settings: &LaunchpadSettings) -> Result<Self> {
        settings.validate()?;
        let admin = settings.admin;
        let mut state = Self::new(admin);
        state.config = ConfigStore::new(settings.removal_policy);
        state.access.set_operators(&admin, &settings.operators, true)?;
        state
            .access
            .set_whitelisted_routers(&admin, &settings.whitelisted_routers, true)?;
        state.access.set_paused(&admin, settings.paused)?;
        if let Some(master) = settings.master {
            state.config.set_master(master)?;
        }
        for entry in &settings.pool_configs {
            state.config.set_pool_config(entry.index, entry.config)?;
        }
        info!(
            %admin,
            operators = settings.operators.len(),
            routers = settings.whitelisted_routers.len(),
            templates = settings.pool_configs.len(),
            "state bootstrapped from settings"
        );
        Ok(state)
    }

    /// The access registry.
    #[must_use]
    pub const fn access(&self) -> &AccessRegistry {
        &self.access
    }

    /// The configuration store.
    #[must_use]
    pub const fn config(&self) -> &ConfigStore {
        &self.config
    }

    /// The pool ledger.
    #[must_use]
    pub const fn pools(&self) -> &PoolLedger {
        &self.pools
    }

    /// The account holding unsold base and collected quote for every pool.
    /// Sellers approve this account before selling.
    #[must_use]
    pub const fn custody(&self) -> Address {
        self.custody
    }
}

/// Everything a single operation can read or write.
#[derive(Debug, Clone)]
pub struct World<H: Host> {
    /// Shared application state.
    pub state: AppState,
    /// External collaborators.
    pub host: H,
    /// Committed events.
    pub events: EventLog,
}

impl<H: Host> World<H> {
    /// Assembles a world with an empty event log.
    pub fn new(state: AppState, host: H) -> Self {
        Self {
            state,
            host,
            events: EventLog::new(),
        }
    }

    /// Runs `op` on a staged copy and commits it only if `op` succeeds.
    ///
    /// Only the state and the collaborators are copied.  Inside `op`,
    /// `events` starts empty and collects just this call's events, which
    /// are appended to the live log on commit.
    ///
    /// # Errors
    ///
    /// Returns the error of `op`; `self` is then unchanged.
    pub fn transact<R>(&mut self, op: impl FnOnce(&mut Self) -> Result<R>) -> Result<R> {
        let mut staged = Self::new(self.state.clone(), self.host.clone());
        let out = op(&mut staged)?;
        let Self {
            state,
            host,
            events,
        } = staged;
        self.state = state;
        self.host = host;
        self.events.append(events);
        Ok(out)
    }
}
