use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Pool;
use crate::domain::Address;
use crate::error::{LaunchpadError, Result};

/// All pools, keyed by token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolLedger {
    pools: BTreeMap<Address, Pool>,
}

impl PoolLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pools: BTreeMap::new(),
        }
    }

    /// Looks up the pool for `token`.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::InvalidPool`] if there is none.
    pub fn get(&self, token: &Address) -> Result<&Pool> {
        self.pools.get(token).ok_or(LaunchpadError::InvalidPool)
    }

    /// Mutable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::InvalidPool`] if there is none.
    pub(crate) fn get_mut(&mut self, token: &Address) -> Result<&mut Pool> {
        self.pools.get_mut(token).ok_or(LaunchpadError::InvalidPool)
    }

    /// Registers a new pool. A token maps to at most one pool.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::InvalidState`] if `pool.token()` is taken.
    pub(crate) fn insert(&mut self, pool: Pool) -> Result<()> {
        let token = pool.token();
        if self.pools.contains_key(&token) {
            return Err(LaunchpadError::InvalidState("pool already exists"));
        }
        self.pools.insert(token, pool);
        Ok(())
    }

    /// `true` if `token` has a pool.
    #[must_use]
    pub fn contains(&self, token: &Address) -> bool {
        self.pools.contains_key(token)
    }

    /// Number of pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// `true` if no pool exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Pool tokens in ascending order.
    pub fn tokens(&self) -> impl Iterator<Item = &Address> {
        self.pools.keys()
    }
}
